//! The push loop.
//!
//! [`JobPusher`] pushes one job per worker class, strictly in order, and never
//! stops early: a class that fails to push is reported and the loop moves on.
//! Each outcome is written as a single line the moment it is known, and the
//! collected outcomes are returned as a [`PushSummary`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use sidekiq_push::{JobPusher, RetryOption, queue::RedisQueue};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let queue = RedisQueue::new("redis://127.0.0.1:6379", None)?;
//! let pusher = JobPusher::new(queue, "default", Some(RetryOption::Enabled(true)));
//!
//! let classes = vec!["FirstWorker".to_string(), "SecondWorker".to_string()];
//! let summary = pusher.push_all(&classes, &mut std::io::stdout()).await?;
//! println!("all pushed: {}", summary.all_succeeded());
//! # Ok(())
//! # }
//! ```

use crate::{
    Result,
    job::{JobId, PushRequest},
    queue::QueueClient,
    retry::RetryOption,
};
use std::{fmt, io::Write};
use tracing::{debug, error};

/// Result of pushing a single worker class.
#[derive(Debug, Clone, PartialEq)]
pub enum PushOutcome {
    Posted {
        class: String,
        queue: String,
        jid: JobId,
        retry: Option<RetryOption>,
    },
    Failed {
        class: String,
        error: String,
    },
}

impl PushOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PushOutcome::Posted { .. })
    }

    pub fn class(&self) -> &str {
        match self {
            PushOutcome::Posted { class, .. } | PushOutcome::Failed { class, .. } => class,
        }
    }
}

impl fmt::Display for PushOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushOutcome::Posted {
                class,
                queue,
                jid,
                retry,
            } => {
                write!(f, "Posted {} to queue '{}', Job ID : {}, Retry : ", class, queue, jid)?;
                if let Some(retry) = retry {
                    write!(f, "{}", retry)?;
                }
                Ok(())
            }
            PushOutcome::Failed { error, .. } => write!(f, "Failed to push to queue : {}", error),
        }
    }
}

/// Outcomes of a whole push run, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PushSummary {
    pub outcomes: Vec<PushOutcome>,
}

impl PushSummary {
    /// True only if every class was pushed.
    pub fn all_succeeded(&self) -> bool {
        self.outcomes
            .iter()
            .fold(true, |ok, outcome| ok && outcome.is_success())
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Pushes worker classes onto a queue with fixed, already resolved options.
#[derive(Debug)]
pub struct JobPusher<Q> {
    client: Q,
    queue: String,
    retry: Option<RetryOption>,
}

impl<Q: QueueClient> JobPusher<Q> {
    pub fn new(client: Q, queue: impl Into<String>, retry: Option<RetryOption>) -> Self {
        Self {
            client,
            queue: queue.into(),
            retry,
        }
    }

    pub fn client(&self) -> &Q {
        &self.client
    }

    pub fn queue(&self) -> &str {
        &self.queue
    }

    pub fn retry(&self) -> Option<RetryOption> {
        self.retry
    }

    /// Pushes a single class, converting any backend error into a `Failed` outcome.
    pub async fn push_one(&self, class: &str) -> PushOutcome {
        let request = PushRequest::new(class, self.queue.clone()).with_retry(self.retry);

        match self.client.push(request).await {
            Ok(jid) => {
                debug!(class = %class, queue = %self.queue, jid = %jid, "job pushed");
                PushOutcome::Posted {
                    class: class.to_string(),
                    queue: self.queue.clone(),
                    jid,
                    retry: self.retry,
                }
            }
            Err(err) => {
                error!(class = %class, queue = %self.queue, error = %err, "failed to push job");
                PushOutcome::Failed {
                    class: class.to_string(),
                    error: err.to_string(),
                }
            }
        }
    }

    /// Pushes every class in order, writing one line per class to `out`.
    ///
    /// Push failures never abort the loop; only a failed write to `out` does.
    pub async fn push_all<W: Write>(&self, classes: &[String], out: &mut W) -> Result<PushSummary> {
        let mut summary = PushSummary::default();

        for class in classes {
            let outcome = self.push_one(class).await;
            writeln!(out, "{}", outcome)?;
            summary.outcomes.push(outcome);
        }

        out.flush()?;
        debug!(
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            "push run finished"
        );
        Ok(summary)
    }
}
