pub mod config;
pub mod feeds;
pub mod inputs;
pub mod logging;

pub use config::{load_config, log_config_summary};
pub use feeds::load_provider_table;
pub use inputs::read_list;
pub use logging::init_logging;
