// Shared utilities module
pub mod config_loader;
pub mod errors;
pub mod logging;
pub mod summary_ui;

pub use config_loader::*;
pub use errors::*;
pub use logging::*;
pub use summary_ui::*;
