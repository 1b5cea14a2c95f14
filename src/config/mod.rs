//! Configuration management

mod file_gateway;
mod settings;

pub use file_gateway::JsonFileGateway;
pub use settings::{reset_all, AppSettings};
