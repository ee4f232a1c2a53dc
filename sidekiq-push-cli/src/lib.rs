//! # sidekiq-push CLI
//!
//! Command-line client that pushes worker classes onto Sidekiq queues.
//!
//! ## Basic Usage
//!
//! ```bash
//! # Push two jobs using the queue/retry defaults from the config file
//! sidekiq-push push FirstWorker SecondWorker
//!
//! # Explicit queue and retry count
//! sidekiq-push -q critical -r 5 push HardWorker
//!
//! # Disable retries and use another config file
//! sidekiq-push -c config/sidekiq.staging.toml -r false push CleanupWorker
//! ```
//!
//! ## Options
//!
//! - `-c, --config-path <PATH>` - Client config file (default `config/initializers/sidekiq.toml`)
//! - `-q, --queue <NAME>` - Queue to place the jobs on
//! - `-r, --retry <VALUE>` - `true|t|yes|y`, `false|f|no|n|0`, or a number of attempts
//! - `-u, --redis-url <URL>` - Redis URL, also read from `REDIS_URL`
//! - `-v, --verbose` / `--quiet` - Log verbosity
//!
//! ## Configuration
//!
//! The config file is optional and only read when it exists:
//!
//! ```toml
//! redis_url = "redis://127.0.0.1:6379/0"
//! namespace = "myapp"
//!
//! [default_worker_options]
//! queue = "default"
//! retry = true
//! ```
//!
//! `SIDEKIQ_PUSH_DEFAULT_QUEUE`, `SIDEKIQ_PUSH_DEFAULT_RETRY` and
//! `SIDEKIQ_PUSH_NAMESPACE` override the file.
//!
//! ## Exit Codes
//!
//! - Exit code 0: every job was pushed
//! - Exit code 1: at least one push failed, or the config could not be loaded
//! - Exit code 2: invalid arguments

pub mod commands;
pub mod config;

use clap::{CommandFactory, Parser, error::ErrorKind};
use sidekiq_push::{Command, DEFAULT_CONFIG_PATH, RetryCast, Settings};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sidekiq-push")]
#[command(bin_name = "sidekiq-push")]
#[command(about = "Push jobs onto Sidekiq queues from the command line")]
#[command(version)]
pub struct Cli {
    #[arg(value_name = "COMMAND", help = "'push' to push a job to the queue")]
    pub command: String,

    #[arg(value_name = "COMMAND_ARGS", help = "Command arguments (worker classes for 'push')")]
    pub command_args: Vec<String>,

    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, help = "Sidekiq client config file path")]
    pub config_path: PathBuf,

    #[arg(short, long, help = "Queue to place job on")]
    pub queue: Option<String>,

    #[arg(short, long, value_name = "VALUE", help = "Retry option for job")]
    pub retry: Option<RetryCast>,

    #[arg(short = 'u', long, env = "REDIS_URL", help = "Redis connection URL")]
    pub redis_url: Option<String>,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, help = "Suppress output except errors")]
    pub quiet: bool,
}

impl Cli {
    /// Validates the command and its arguments and builds unresolved settings.
    ///
    /// An unrecognized `--retry` value leaves retry unset.
    pub fn settings(&self) -> Result<Settings, clap::Error> {
        let mut cmd = Cli::command();

        let command: Command = self
            .command
            .parse()
            .map_err(|message: String| cmd.error(ErrorKind::InvalidValue, message))?;

        if command == Command::Push && self.command_args.is_empty() {
            return Err(cmd.error(
                ErrorKind::MissingRequiredArgument,
                "No Worker Classes to push",
            ));
        }

        Ok(Settings {
            command,
            command_args: self.command_args.clone(),
            config_path: self.config_path.clone(),
            queue: self.queue.clone(),
            retry: self.retry.and_then(RetryCast::into_option),
        })
    }

    /// True when `--retry` was given but could not be cast.
    pub fn retry_unrecognized(&self) -> bool {
        matches!(self.retry, Some(RetryCast::Unrecognized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidekiq_push::RetryOption;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("sidekiq-push").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_missing_command_fails() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_invalid_command_fails() {
        let cli = parse(&["dosomething"]).unwrap();
        let err = cli.settings().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(err.to_string().contains("Invalid command 'dosomething'"));
        assert!(err.to_string().contains("Available commands: push"));
    }

    #[test]
    fn test_push_without_classes_fails() {
        let cli = parse(&["push"]).unwrap();
        let err = cli.settings().unwrap_err();
        assert!(err.to_string().contains("No Worker Classes"));
    }

    #[test]
    fn test_push_with_classes() {
        let settings = parse(&["push", "FirstWorker", "SecondWorker"])
            .unwrap()
            .settings()
            .unwrap();
        assert_eq!(settings.command, Command::Push);
        assert_eq!(settings.command_args, vec!["FirstWorker", "SecondWorker"]);
        assert_eq!(settings.config_path, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(settings.queue, None);
        assert_eq!(settings.retry, None);
    }

    #[test]
    fn test_push_with_config_path() {
        let settings = parse(&["-c", "mysidekiq.toml", "push", "FirstWorker"])
            .unwrap()
            .settings()
            .unwrap();
        assert_eq!(settings.config_path, PathBuf::from("mysidekiq.toml"));
        assert_eq!(settings.queue, None);
    }

    #[test]
    fn test_push_with_queue() {
        let settings = parse(&["-q", "my_queue", "push", "FirstWorker"])
            .unwrap()
            .settings()
            .unwrap();
        assert_eq!(settings.queue.as_deref(), Some("my_queue"));
    }

    #[test]
    fn test_push_with_boolean_retry() {
        let settings = parse(&["-r", "false", "push", "FirstWorker"])
            .unwrap()
            .settings()
            .unwrap();
        assert_eq!(settings.retry, Some(RetryOption::Enabled(false)));
    }

    #[test]
    fn test_push_with_integer_retry() {
        let settings = parse(&["--retry", "42", "push", "FirstWorker"])
            .unwrap()
            .settings()
            .unwrap();
        assert_eq!(settings.retry, Some(RetryOption::Attempts(42)));
    }

    #[test]
    fn test_unrecognized_retry_is_unset() {
        let cli = parse(&["-r", "sometimes", "push", "FirstWorker"]).unwrap();
        assert!(cli.retry_unrecognized());
        assert_eq!(cli.settings().unwrap().retry, None);
    }

    #[test]
    fn test_flags_after_command() {
        let settings = parse(&["push", "FirstWorker", "-q", "late"])
            .unwrap()
            .settings()
            .unwrap();
        assert_eq!(settings.command_args, vec!["FirstWorker"]);
        assert_eq!(settings.queue.as_deref(), Some("late"));
    }
}
