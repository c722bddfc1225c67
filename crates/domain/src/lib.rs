//! cloudmap domain layer
pub mod classification;
pub mod config;
pub mod errors;
pub mod lookup;
pub mod provider;
pub mod validators;

pub use classification::{BatchSummary, ClassificationResult, DomainReport};
pub use config::{CliOverrides, Config, ConfigError, FeedFormat, FeedSource};
pub use errors::{DomainError, ResolutionFailure};
pub use lookup::{NameLookupRequest, NameLookupResult};
pub use provider::{ProviderRange, ProviderRecord, ProviderTable, ProviderTableFile};
