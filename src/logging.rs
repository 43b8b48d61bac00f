//! Logger setup for the demo binary and tests.

use env_logger::{Builder, Env};
use log::{debug, LevelFilter};

/// Default level when `RUST_LOG` is unset.
#[must_use]
pub const fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes the global logger.
///
/// `RUST_LOG` overrides the default level chosen by `verbose`. Calling this
/// again once a logger is installed does nothing.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_level(verbose).to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    if builder.try_init().is_err() {
        debug!("logger already installed");
    }
}
