//! Logging initialization

use tracing_subscriber::EnvFilter;

/// Initialize logging to stderr
///
/// Only warnings are shown by default; `debug` enables debug output for this
/// crate. `RUST_LOG` takes precedence over both.
pub fn init_logging(debug: bool) {
    let default_filter = if debug {
        format!("{}=debug,warn", env!("CARGO_CRATE_NAME"))
    } else {
        "warn".to_string()
    };

    // stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(debug)
        .with_file(debug)
        .with_line_number(debug)
        .init();

    if debug {
        tracing::debug!("Debug logging enabled");
    }
}
