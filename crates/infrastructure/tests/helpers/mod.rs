#![allow(unused_imports)]

pub mod dns_server_mock;
pub mod http_server_mock;

pub use dns_server_mock::{MockAnswers, MockDnsServer};
pub use http_server_mock::MockHttpServer;
