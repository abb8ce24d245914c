pub mod adapter;
mod cli;
pub mod config;
pub mod host;
mod log;
pub mod model;
pub mod source;
pub mod widget;
pub mod youtube;

pub use adapter::Adapter;
pub use cli::{run, Cli, Command};
pub use source::DataSource;
