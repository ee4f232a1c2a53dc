//! # sidekiq-push
//!
//! Push jobs onto Sidekiq-compatible Redis queues from Rust.
//!
//! The crate covers the client side only: it resolves per-job options, turns
//! each worker class into a Sidekiq job payload and stores it where a Sidekiq
//! server will pick it up. Nothing here executes or consumes jobs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sidekiq_push::{
//!     ClientConfig, Command, JobPusher, Settings, queue::RedisQueue,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut settings = Settings::new(
//!         Command::Push,
//!         vec!["FirstWorker".to_string(), "SecondWorker".to_string()],
//!     );
//!
//!     // Fill queue/retry from the config file (or stock defaults).
//!     let config = ClientConfig::load(&settings.config_path)?;
//!     settings.apply_defaults(&config.worker_defaults());
//!
//!     let queue = RedisQueue::from_config(&config)?;
//!     let pusher = JobPusher::new(queue, settings.queue_name(), settings.retry);
//!     let summary = pusher
//!         .push_all(&settings.command_args, &mut std::io::stdout())
//!         .await?;
//!
//!     println!("all pushed: {}", summary.all_succeeded());
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Retry options
//!
//! A job's `retry` option is a boolean or an attempt count. Strings from the
//! command line go through [`retry::cast_retry_option`]; anything it does not
//! recognise is treated as "not given" rather than guessed at.
//!
//! ### Settings resolution
//!
//! [`Settings`] holds what the user asked for. [`Settings::apply_defaults`]
//! fills the gaps from [`WorkerDefaults`], and only the gaps: an explicit
//! `retry = false` stays `false`.
//!
//! ### Pushing
//!
//! [`JobPusher`] pushes each class in order through a [`queue::QueueClient`],
//! reports one line per class and folds the outcomes into a [`PushSummary`].
//! One failed class does not stop the others.
//!
//! ## Feature Flags
//!
//! - `test` - Enable the in-memory `queue::test::TestQueue` backend

pub mod config;
pub mod error;
pub mod job;
pub mod push;
pub mod queue;
pub mod retry;
pub mod settings;

pub use config::ClientConfig;
pub use error::SidekiqPushError;
pub use job::{JobId, JobPayload, PushRequest};
pub use push::{JobPusher, PushOutcome, PushSummary};
pub use queue::{QueueClient, RedisQueue};
pub use retry::{RetryCast, RetryOption, cast_retry_option};
pub use settings::{Command, DEFAULT_CONFIG_PATH, Settings, WorkerDefaults};

/// Convenient type alias for Results with [`SidekiqPushError`] as the error type.
pub type Result<T> = std::result::Result<T, SidekiqPushError>;
