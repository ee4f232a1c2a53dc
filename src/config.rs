//! Client configuration.
//!
//! Configuration comes from an optional TOML file, then environment variables.
//! Every key is optional; anything left out falls back to Sidekiq's stock
//! behaviour (queue `default`, retries enabled, local Redis).
//!
//! ```toml
//! redis_url = "redis://127.0.0.1:6379/0"
//! namespace = "myapp"
//!
//! [default_worker_options]
//! queue = "default"
//! retry = 25
//! ```
//!
//! # Examples
//!
//! ```rust
//! use sidekiq_push::config::ClientConfig;
//! use sidekiq_push::retry::RetryOption;
//!
//! let config: ClientConfig = toml::from_str(r#"
//!     [default_worker_options]
//!     queue = "mailers"
//!     retry = false
//! "#).unwrap();
//!
//! let defaults = config.worker_defaults();
//! assert_eq!(defaults.queue, "mailers");
//! assert_eq!(defaults.retry, Some(RetryOption::Enabled(false)));
//! ```

use crate::{
    Result,
    retry::{RetryOption, cast_retry_option},
    settings::WorkerDefaults,
};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};
use tracing::{debug, warn};

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

pub const ENV_DEFAULT_QUEUE: &str = "SIDEKIQ_PUSH_DEFAULT_QUEUE";
pub const ENV_DEFAULT_RETRY: &str = "SIDEKIQ_PUSH_DEFAULT_RETRY";
pub const ENV_NAMESPACE: &str = "SIDEKIQ_PUSH_NAMESPACE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Redis connection URL.
    pub redis_url: Option<String>,
    /// Key prefix for redis-namespace deployments.
    pub namespace: Option<String>,
    /// Defaults for queue and retry when the command line leaves them out.
    pub default_worker_options: WorkerOptionsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerOptionsConfig {
    pub queue: Option<String>,
    pub retry: Option<RetryOption>,
}

impl ClientConfig {
    /// Loads the file at `path` if it exists, then applies environment overrides.
    ///
    /// A missing file is not an error. A file that exists but does not parse is.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            debug!(path = %path.display(), "loading client config");
            Self::from_file(path)?
        } else {
            debug!(path = %path.display(), "no client config found, using defaults");
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| env::var(key).ok());
    }

    /// Applies overrides read through `lookup`, keyed by variable name.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(queue) = lookup(ENV_DEFAULT_QUEUE) {
            self.default_worker_options.queue = Some(queue);
        }

        if let Some(raw) = lookup(ENV_DEFAULT_RETRY) {
            match cast_retry_option(&raw).into_option() {
                Some(retry) => self.default_worker_options.retry = Some(retry),
                None => warn!(
                    variable = ENV_DEFAULT_RETRY,
                    value = %raw,
                    "ignoring unrecognized retry value"
                ),
            }
        }

        if let Some(namespace) = lookup(ENV_NAMESPACE) {
            self.namespace = Some(namespace);
        }
    }

    /// Worker defaults with stock values for anything not configured.
    pub fn worker_defaults(&self) -> WorkerDefaults {
        let stock = WorkerDefaults::default();
        WorkerDefaults {
            queue: self
                .default_worker_options
                .queue
                .clone()
                .unwrap_or(stock.queue),
            retry: self.default_worker_options.retry.or(stock.retry),
        }
    }

    pub fn redis_url(&self) -> &str {
        self.redis_url.as_deref().unwrap_or(DEFAULT_REDIS_URL)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|ns| !ns.is_empty())
    }
}
