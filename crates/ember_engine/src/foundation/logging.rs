//! Logging setup
//!
//! The library logs through the `log` facade; binaries pick the sink. This
//! helper wires up `env_logger` for hosts that don't need anything fancier.

pub use log::{debug, error, info, trace, warn};

/// Initialize the default `env_logger` sink
///
/// Panics if a logger is already installed; tests should use
/// [`try_init`] instead.
pub fn init() {
    env_logger::init();
}

/// Initialize the default sink, ignoring an already-installed logger
pub fn try_init() {
    let _ = env_logger::builder().is_test(true).try_init();
}
