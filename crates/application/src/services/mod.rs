mod cloud_classifier;
mod nameserver_pool;

pub use cloud_classifier::CloudClassifier;
pub use nameserver_pool::NameserverPool;
