pub mod cache_file;
pub mod http_source;
pub mod parser;

pub use cache_file::JsonFileProviderStore;
pub use http_source::HttpFeedSource;
pub use parser::{FeedParser, Parser};
