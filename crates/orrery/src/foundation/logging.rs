//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with an `info` default filter.
///
/// `RUST_LOG` still takes precedence when set.
pub fn init() {
    init_with_filter("info");
}

/// Initialize the logging system with an explicit default filter
pub fn init_with_filter(filter: &str) {
    // A second initialization (tests, embedding apps) is not an error
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp_millis()
        .try_init();
}
