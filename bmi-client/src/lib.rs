mod client;
mod config;

pub use client::*;
pub use config::{Config, ConfigError};
