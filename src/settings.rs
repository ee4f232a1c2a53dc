//! Per-invocation settings and their resolution against worker defaults.
//!
//! Settings start out holding only what the user typed. Before a push runs,
//! [`Settings::apply_defaults`] fills every unset field from a
//! [`WorkerDefaults`] record. "Unset" means `None`: an explicit
//! `retry = false` is a value and survives resolution untouched.

use crate::retry::RetryOption;
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, str::FromStr};
use tracing::debug;

/// Conventional location of the client configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/initializers/sidekiq.toml";

/// Operations the client knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Push,
}

impl Command {
    pub const ALL: &'static [Command] = &[Command::Push];

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Push => "push",
        }
    }

    /// Comma separated list of every command name, for error messages.
    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(Command::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "push" => Ok(Command::Push),
            _ => Err(format!(
                "Invalid command '{}'. Available commands: {}",
                s,
                Command::available()
            )),
        }
    }
}

/// Default worker options applied to anything the user left unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerDefaults {
    pub queue: String,
    pub retry: Option<RetryOption>,
}

impl Default for WorkerDefaults {
    fn default() -> Self {
        Self {
            queue: "default".to_string(),
            retry: Some(RetryOption::Enabled(true)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub command: Command,
    pub command_args: Vec<String>,
    pub config_path: PathBuf,
    pub queue: Option<String>,
    pub retry: Option<RetryOption>,
}

impl Settings {
    pub fn new(command: Command, command_args: Vec<String>) -> Self {
        Self {
            command,
            command_args,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            queue: None,
            retry: None,
        }
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    pub fn with_queue(mut self, queue: impl Into<String>) -> Self {
        self.queue = Some(queue.into());
        self
    }

    pub fn with_retry(mut self, retry: RetryOption) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Fills `queue` and `retry` from `defaults` where the user gave nothing.
    pub fn apply_defaults(&mut self, defaults: &WorkerDefaults) {
        if self.queue.is_none() {
            debug!(queue = %defaults.queue, "queue not given, using default");
            self.queue = Some(defaults.queue.clone());
        }

        if self.retry.is_none() {
            debug!(retry = ?defaults.retry, "retry not given, using default");
            self.retry = defaults.retry;
        }
    }

    /// Resolved queue name; falls back to the stock default before resolution.
    pub fn queue_name(&self) -> &str {
        self.queue.as_deref().unwrap_or("default")
    }
}
