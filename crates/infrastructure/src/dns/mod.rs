pub mod forwarding;
pub mod nameserver;
pub mod resolver;
pub mod transport;

pub use resolver::NameserverResolver;
