// Infrastructure layer
pub mod config_sink;
pub mod file_system;

pub use config_sink::*;
pub use file_system::*;
