// Pipeplan - build pipeline assembler
// Library entry point, shared by the CLI and integration tests

pub mod cli;
pub mod core;
pub mod infrastructure;
pub mod utils;
