//! Conversion of the saved document into a portable, fixed-layout format.

pub mod libreoffice;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

pub use libreoffice::LibreOfficeConverter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortableFormat {
    Pdf,
}

impl PortableFormat {
    pub fn extension(self) -> &'static str {
        match self {
            PortableFormat::Pdf => "pdf",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("failed to start converter {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("converter exited with status {status:?}: {stderr}")]
    Failed { status: Option<i32>, stderr: String },
    #[error("converter reported success but {0} was not produced")]
    MissingOutput(PathBuf),
    #[error("converter did not finish within {0} seconds")]
    TimedOut(u64),
    #[error("failed to remove previous output {path}: {source}")]
    StaleOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to prepare converter profile: {0}")]
    Profile(#[source] std::io::Error),
}

/// External facility turning a saved document into another format.
///
/// Implementations write the result next to `source`, with the format's
/// extension, and return its path.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    async fn convert(
        &self,
        source: &Path,
        format: PortableFormat,
    ) -> Result<PathBuf, ConversionError>;
}

/// Path of the converted file: `source` with its extension replaced.
pub fn derived_path(source: &Path, format: PortableFormat) -> PathBuf {
    source.with_extension(format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_path_swaps_extension() {
        let source = Path::new("/tmp/YLE/Docs/YLE_News_Headlines_19_10_2026.docx");
        assert_eq!(
            derived_path(source, PortableFormat::Pdf),
            PathBuf::from("/tmp/YLE/Docs/YLE_News_Headlines_19_10_2026.pdf")
        );
    }
}
