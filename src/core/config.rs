use std::path::PathBuf;
use std::time::Duration;

use super::convert::libreoffice::DEFAULT_PROGRAM;
use super::feed::DEFAULT_FEED_URL;

pub const DEFAULT_OUTPUT_DIR: &str = "YLE/Docs";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONVERT_TIMEOUT_SECS: u64 = 120;

/// Everything a run needs, resolved before the pipeline starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub feed_url: String,
    pub output_dir: PathBuf,
    pub converter_program: PathBuf,
    pub skip_conversion: bool,
    pub fetch_timeout: Duration,
    pub convert_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            converter_program: PathBuf::from(DEFAULT_PROGRAM),
            skip_conversion: false,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            convert_timeout: Duration::from_secs(DEFAULT_CONVERT_TIMEOUT_SECS),
        }
    }
}
