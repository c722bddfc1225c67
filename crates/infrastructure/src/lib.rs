pub mod dns;
pub mod feeds;
