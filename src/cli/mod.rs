pub mod browse;
pub mod commands;
pub mod render;

pub use browse::BrowseCommand;
pub use commands::{Cli, Commands};
