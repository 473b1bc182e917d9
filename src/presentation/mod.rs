pub mod cli;
pub mod config;

pub use cli::{Cli, Command, run};
pub use config::{Environment, Settings};
