//! Configuration module for cloudmap
//!
//! This module contains all configuration structures organized by domain:
//! - `root`: Main configuration and CLI overrides
//! - `dns`: Lookup settings (timeout, port, concurrency)
//! - `feeds`: Provider feed sources and the local cache file
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod dns;
pub mod errors;
pub mod feeds;
pub mod logging;
pub mod root;

pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use feeds::{FeedFormat, FeedSource, FeedsConfig};
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
