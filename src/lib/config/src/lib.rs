//! Configuration for the toolbox api, loaded from `./config/general.toml` with environment overrides.

mod config;
mod error;

pub use crate::config::*;
pub use crate::error::ConfigError;
