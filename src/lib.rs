pub mod core;
pub mod logging;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use crate::core::config::{
    PipelineConfig, DEFAULT_CONVERT_TIMEOUT_SECS, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_OUTPUT_DIR,
};
use crate::core::convert::libreoffice::DEFAULT_PROGRAM;
use crate::core::convert::{DocumentConverter, LibreOfficeConverter};
use crate::core::feed::fetcher::build_client;
use crate::core::feed::DEFAULT_FEED_URL;
use crate::core::pipeline::{run_pipeline, ConversionOutcome, PipelineReport};

#[derive(Debug, Parser)]
#[command(name = "yle-headlines", version)]
#[command(about = "Render today's YLE news headlines into a DOCX table and convert it to PDF")]
struct Cli {
    /// Feed to render (RSS, Atom or JSON Feed)
    #[arg(long, env = "YLE_FEED_URL", default_value = DEFAULT_FEED_URL)]
    feed_url: String,

    /// Directory receiving the dated DOCX and PDF files
    #[arg(long, env = "YLE_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// LibreOffice executable used for the PDF conversion
    #[arg(long, env = "YLE_SOFFICE_BIN", default_value = DEFAULT_PROGRAM)]
    soffice: PathBuf,

    /// Only write the DOCX file
    #[arg(long, env = "YLE_SKIP_PDF")]
    skip_pdf: bool,

    #[arg(long, env = "YLE_FETCH_TIMEOUT_SECS", default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    fetch_timeout_secs: u64,

    #[arg(long, env = "YLE_CONVERT_TIMEOUT_SECS", default_value_t = DEFAULT_CONVERT_TIMEOUT_SECS)]
    convert_timeout_secs: u64,

    /// Log level for this program; RUST_LOG overrides it
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> PipelineConfig {
        PipelineConfig {
            feed_url: self.feed_url,
            output_dir: self.output_dir,
            converter_program: self.soffice,
            skip_conversion: self.skip_pdf,
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
            convert_timeout: Duration::from_secs(self.convert_timeout_secs),
        }
    }
}

async fn run_once(config: &PipelineConfig) -> anyhow::Result<PipelineReport> {
    let client = build_client(config.fetch_timeout).context("failed to build HTTP client")?;
    let converter =
        LibreOfficeConverter::new(config.converter_program.clone(), config.convert_timeout);
    let converter: Option<&dyn DocumentConverter> = if config.skip_conversion {
        None
    } else {
        Some(&converter)
    };
    let today = chrono::Local::now().date_naive();

    let report = run_pipeline(config, &client, converter, today)
        .await
        .with_context(|| format!("report run for {} failed", config.feed_url))?;
    Ok(report)
}

pub fn run() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let cli = Cli::parse();
    logging::init(&cli.log_level);
    let config = cli.into_config();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let report = runtime.block_on(run_once(&config))?;

    let pdf = match &report.conversion {
        ConversionOutcome::Converted(path) => path.display().to_string(),
        ConversionOutcome::Failed(_) => "not created".to_string(),
        ConversionOutcome::Skipped => "skipped".to_string(),
    };
    tracing::info!(
        items = report.item_count,
        docx = %report.document_path.display(),
        pdf = %pdf,
        "report complete"
    );
    Ok(())
}
