use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;

use super::{derived_path, ConversionError, DocumentConverter, PortableFormat};

pub const DEFAULT_PROGRAM: &str = "soffice";

/// Converts documents with a headless LibreOffice (`soffice`) process.
#[derive(Debug, Clone)]
pub struct LibreOfficeConverter {
    program: PathBuf,
    timeout: Duration,
}

impl LibreOfficeConverter {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn command_args(source: &Path, format: PortableFormat, profile_url: &str) -> Vec<OsString> {
        let out_dir = source
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        vec![
            format!("-env:UserInstallation={profile_url}").into(),
            "--headless".into(),
            "--convert-to".into(),
            format.extension().into(),
            "--outdir".into(),
            out_dir.as_os_str().to_os_string(),
            source.as_os_str().to_os_string(),
        ]
    }
}

fn profile_url(dir: &Path) -> Result<String, ConversionError> {
    reqwest::Url::from_directory_path(dir)
        .map(String::from)
        .map_err(|()| {
            ConversionError::Profile(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("{} is not an absolute path", dir.display()),
            ))
        })
}

#[async_trait]
impl DocumentConverter for LibreOfficeConverter {
    async fn convert(
        &self,
        source: &Path,
        format: PortableFormat,
    ) -> Result<PathBuf, ConversionError> {
        // soffice exits 0 without converting when another instance holds the
        // profile, so a leftover file must not pass for fresh output.
        let destination = derived_path(source, format);
        match tokio::fs::remove_file(&destination).await {
            Ok(()) => tracing::debug!(path = %destination.display(), "removed previous output"),
            Err(error) if error.kind() == ErrorKind::NotFound => {}
            Err(error) => {
                return Err(ConversionError::StaleOutput {
                    path: destination,
                    source: error,
                })
            }
        }

        // Private profile per run: a stray soffice.bin from an earlier run
        // cannot lock it. Removed when `profile` drops.
        let profile = tempfile::Builder::new()
            .prefix("yle-headlines-soffice-")
            .tempdir()
            .map_err(ConversionError::Profile)?;
        let profile_arg = profile_url(profile.path())?;

        let mut command = tokio::process::Command::new(&self.program);
        command
            .args(Self::command_args(source, format, &profile_arg))
            .stdin(Stdio::null())
            .kill_on_drop(true);
        tracing::debug!(
            program = %self.program.display(),
            source = %source.display(),
            "starting converter"
        );

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| ConversionError::TimedOut(self.timeout.as_secs()))?
            .map_err(|error| ConversionError::Spawn {
                program: self.program.display().to_string(),
                source: error,
            })?;

        if !output.status.success() {
            return Err(ConversionError::Failed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if !destination.is_file() {
            return Err(ConversionError::MissingOutput(destination));
        }
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[test]
    fn arguments_target_the_source_directory() {
        let args = LibreOfficeConverter::command_args(
            Path::new("/data/YLE/Docs/report.docx"),
            PortableFormat::Pdf,
            "file:///tmp/profile/",
        );
        let expected: Vec<OsString> = [
            "-env:UserInstallation=file:///tmp/profile/",
            "--headless",
            "--convert-to",
            "pdf",
            "--outdir",
            "/data/YLE/Docs",
            "/data/YLE/Docs/report.docx",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn bare_file_name_converts_into_current_directory() {
        let args = LibreOfficeConverter::command_args(
            Path::new("report.docx"),
            PortableFormat::Pdf,
            "file:///tmp/profile/",
        );
        assert_eq!(args[5], OsString::from("."));
    }

    #[cfg(unix)]
    #[test]
    fn profile_url_is_a_file_directory_url() {
        let url = profile_url(Path::new("/tmp/yle profile")).expect("absolute path");
        assert_eq!(url, "file:///tmp/yle%20profile/");
        assert!(profile_url(Path::new("relative/dir")).is_err());
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let converter = LibreOfficeConverter::new("/nonexistent/bin/soffice-missing", TIMEOUT);
        let error = converter
            .convert(&dir.path().join("report.docx"), PortableFormat::Pdf)
            .await
            .expect_err("missing binary must fail");
        assert!(matches!(error, ConversionError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_a_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let converter = LibreOfficeConverter::new("false", TIMEOUT);
        let error = converter
            .convert(&dir.path().join("report.docx"), PortableFormat::Pdf)
            .await
            .expect_err("false exits non-zero");
        assert!(matches!(error, ConversionError::Failed { status: Some(1), .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn success_without_output_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("report.docx");
        std::fs::write(&source, b"placeholder").expect("write source");

        let converter = LibreOfficeConverter::new("true", TIMEOUT);
        let error = converter
            .convert(&source, PortableFormat::Pdf)
            .await
            .expect_err("true writes nothing");
        match error {
            ConversionError::MissingOutput(path) => assert_eq!(path, dir.path().join("report.pdf")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn previous_output_is_not_reported_as_a_fresh_conversion() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("YLE_News_Headlines_19_10_2026.docx");
        let old_pdf = dir.path().join("YLE_News_Headlines_19_10_2026.pdf");
        std::fs::write(&old_pdf, b"%PDF-1.7 from an earlier run").expect("write old pdf");
        std::fs::write(&source, b"placeholder").expect("write source");

        let converter = LibreOfficeConverter::new("true", TIMEOUT);
        let error = converter
            .convert(&source, PortableFormat::Pdf)
            .await
            .expect_err("exit 0 without writing must not reuse the old pdf");

        assert!(matches!(error, ConversionError::MissingOutput(ref path) if *path == old_pdf));
        assert!(!old_pdf.exists());
        assert!(source.is_file());
    }
}
