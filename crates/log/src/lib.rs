//! # bookshelf-log
//!
//! Subscriber setup for Bookshelf binaries. Library crates only emit
//! `tracing` events; a binary picks a [`Config`] and calls [`init_with`].
//!
//! ```rust,ignore
//! let _guard = bookshelf_log::init_with(bookshelf_log::Config::from_env())?;
//! tracing::info!("ready");
//! ```

mod builder;
mod config;
mod core;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Format};
pub use crate::core::{LogError, LogResult};

/// Initializes logging from environment variables.
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::from_env())
}

/// Initializes logging with an explicit configuration.
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}
