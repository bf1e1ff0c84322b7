//! Console logging setup.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Default directives when `RUST_LOG` is unset: `level` for this crate,
/// warnings for dependencies.
fn default_directives(level: &str) -> String {
    format!("warn,yle_headlines_lib={level},yle_headlines={level}")
}

/// Installs a stdout fmt subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&level.to_lowercase())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(false),
        )
        .init();
}
