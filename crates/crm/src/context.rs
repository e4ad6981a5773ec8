//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what a command handler needs: the loaded
//! configuration, where it came from, the API URL to talk to, and the
//! global output flags.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crm_client::ApiClient;
use crm_config::discovery::CONFIG_FILE_NAME;
use crm_config::{CrmConfig, find_config_file, load_config};

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Effective configuration (defaults, file, environment).
    pub config: CrmConfig,

    /// The configuration file in use, if one was found.
    pub config_path: Option<PathBuf>,

    /// Where `crm config init` writes.
    pub init_path: PathBuf,

    /// API base URL: `--api-url` or `client.api_url`.
    pub api_url: String,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// The configuration file is `--config` if given, else the nearest
    /// `crm.yaml` from the current directory upwards.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let cwd = env::current_dir().context("cannot determine current directory")?;
        let config_path = match &global.config {
            Some(path) => Some(path.clone()),
            None => find_config_file(&cwd),
        };
        let config = load_config(config_path.as_deref()).with_context(|| match &config_path {
            Some(path) => format!("invalid configuration in {}", path.display()),
            None => "invalid configuration".to_string(),
        })?;

        let init_path = global
            .config
            .clone()
            .unwrap_or_else(|| cwd.join(CONFIG_FILE_NAME));
        let api_url = global
            .api_url
            .as_deref()
            .unwrap_or(config.api_url())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            config,
            config_path: config_path.filter(|p| p.is_file()),
            init_path,
            api_url,
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        })
    }

    /// A client for the configured API.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.api_url)
    }

    /// Log filter: `-v` forces debug, otherwise `log.filter`.
    pub fn log_filter(&self) -> &str {
        if self.verbose {
            "crm=debug"
        } else {
            &self.config.log.filter
        }
    }

    pub fn config_source(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
