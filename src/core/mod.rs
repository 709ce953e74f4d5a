// Core domain layer
pub mod assembler;
pub mod filename;
pub mod interfaces;
pub mod layout;
pub mod matchers;
pub mod mode;
pub mod models;

pub use assembler::*;
pub use filename::*;
pub use interfaces::*;
pub use layout::*;
pub use matchers::*;
pub use models::*;
