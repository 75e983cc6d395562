use std::error::Error;

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// JSON logs filtered by `directive` (e.g. `info` or `promptstudybot=debug`).
/// `log` records, including teloxide's, are forwarded into the same output.
pub fn init(directive: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(directive)?)
        .json()
        .with_span_events(FmtSpan::ENTER)
        .log_internal_errors(true)
        .with_line_number(true)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;
    Ok(())
}
