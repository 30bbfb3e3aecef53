//! Process-wide logging setup shared by every binary.

pub mod logging;

pub use logging::LogFormat;

/// Initialize tracing/logging from the environment.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    logging::init(LogFormat::from_env());
}
