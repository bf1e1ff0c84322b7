//! Fetch, build, write, convert: one pass per invocation.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::config::PipelineConfig;
use super::convert::{derived_path, DocumentConverter, PortableFormat};
use super::document::{DocumentError, DocxDocument};
use super::feed::{self, FeedError};
use super::report;
use super::writer::{self, WriteError, DOCUMENT_EXTENSION};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),
    #[error("document error: {0}")]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Converted(PathBuf),
    Failed(String),
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub item_count: usize,
    pub document_path: PathBuf,
    pub conversion: ConversionOutcome,
}

/// Runs one report for `today`.
///
/// Feed, build and write failures abort the run. Conversion failures are
/// logged and returned as `ConversionOutcome::Failed`; the saved document
/// stays in place. Passing no converter skips the conversion step.
pub async fn run_pipeline(
    config: &PipelineConfig,
    client: &reqwest::Client,
    converter: Option<&dyn DocumentConverter>,
    today: NaiveDate,
) -> Result<PipelineReport, PipelineError> {
    let items = feed::fetch_items(client, &config.feed_url).await?;
    let document = report::build_document(DocxDocument::new(), &items)?;

    let file_name = writer::report_file_name(today, DOCUMENT_EXTENSION);
    let document_path = writer::write_document(&document, &config.output_dir, &file_name)?;
    tracing::info!(path = %document_path.display(), "DOCX generated and saved");

    let conversion = match converter {
        Some(converter) => convert_to_portable_format(converter, &document_path).await,
        None => {
            tracing::info!("PDF conversion skipped");
            ConversionOutcome::Skipped
        }
    };

    Ok(PipelineReport {
        item_count: items.len(),
        document_path,
        conversion,
    })
}

/// Converts `source` to PDF next to it. Never fails the run.
pub async fn convert_to_portable_format(
    converter: &dyn DocumentConverter,
    source: &Path,
) -> ConversionOutcome {
    let expected = derived_path(source, PortableFormat::Pdf);
    match converter.convert(source, PortableFormat::Pdf).await {
        Ok(path) => {
            if path != expected {
                tracing::warn!(
                    expected = %expected.display(),
                    actual = %path.display(),
                    "converter wrote to an unexpected path"
                );
            }
            tracing::info!(path = %path.display(), "PDF created successfully");
            ConversionOutcome::Converted(path)
        }
        Err(error) => {
            tracing::error!(%error, source = %source.display(), "error converting DOCX to PDF");
            ConversionOutcome::Failed(error.to_string())
        }
    }
}
