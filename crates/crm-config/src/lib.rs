//! Configuration management for the crm system.
//!
//! This crate handles loading and saving `crm.yaml` files, discovering them
//! by walking up from the working directory, and layering `CRM_*`
//! environment variables on top.

pub mod config;
pub mod discovery;

pub use config::{CrmConfig, ConfigError, load_config, save_config};
pub use discovery::find_config_file;
