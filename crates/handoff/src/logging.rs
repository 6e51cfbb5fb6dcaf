//! Log plumbing: EOS log forwarding and subscriber setup.
//!
//! EOS log lines are re-emitted as `tracing` events with target `eos`, so
//! a host filters them like any other module, e.g. `RUST_LOG=info,eos=warn`.

use handoff_platform::{LogCallback, LogLevel, LogMessage};
use tracing::{debug, error, info, trace, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;

/// Re-emits one EOS log line through `tracing`.
pub fn forward_eos_log(message: &LogMessage) {
    let category = message.category.as_str();
    let text = message.message.as_str();
    match message.level {
        LogLevel::Off => {}
        LogLevel::Fatal | LogLevel::Error => {
            error!(target: "eos", category, "{text}")
        }
        LogLevel::Warning => warn!(target: "eos", category, "{text}"),
        LogLevel::Info => info!(target: "eos", category, "{text}"),
        LogLevel::Verbose => debug!(target: "eos", category, "{text}"),
        LogLevel::VeryVerbose => trace!(target: "eos", category, "{text}"),
    }
}

/// The callback the bridge installs with `EOS_Logging_SetCallback`.
pub fn eos_log_callback() -> LogCallback {
    Box::new(forward_eos_log)
}

/// Installs a global `fmt` subscriber filtered by `RUST_LOG`, falling back
/// to `default_directive` (e.g. `"info"`) when the variable is unset.
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init_logging(default_directive: &str) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
