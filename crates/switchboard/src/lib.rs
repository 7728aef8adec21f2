//! Public surface for Switchboard.
//!
//! Re-exports the config crate and provides a small initialization helper so
//! binaries wire up logging the same way.

/// Re-export for convenience.
pub use switchboard_config as config;

pub mod report;

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
