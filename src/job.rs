use crate::retry::RetryOption;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sidekiq job id: 12 random bytes rendered as 24 lower-case hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn generate() -> Self {
        let bytes: [u8; 12] = rand::random();
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for JobId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A request to enqueue one invocation of a worker class.
#[derive(Debug, Clone, PartialEq)]
pub struct PushRequest {
    pub class: String,
    pub queue: String,
    pub args: Vec<serde_json::Value>,
    pub retry: Option<RetryOption>,
}

impl PushRequest {
    /// Request with an empty argument list.
    pub fn new(class: impl Into<String>, queue: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            queue: queue.into(),
            args: Vec::new(),
            retry: None,
        }
    }

    pub fn with_retry(mut self, retry: Option<RetryOption>) -> Self {
        self.retry = retry;
        self
    }

    /// Stamps the request with an id and timestamps, producing the stored form.
    pub fn into_payload(self, jid: JobId, now: DateTime<Utc>) -> JobPayload {
        let timestamp = epoch_seconds(now);
        JobPayload {
            class: self.class,
            queue: self.queue,
            args: self.args,
            retry: self.retry,
            jid,
            created_at: timestamp,
            enqueued_at: timestamp,
        }
    }
}

/// The JSON document Sidekiq servers read from a queue list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPayload {
    pub class: String,
    pub queue: String,
    pub args: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub retry: Option<RetryOption>,
    pub jid: JobId,
    pub created_at: f64,
    pub enqueued_at: f64,
}

fn epoch_seconds(at: DateTime<Utc>) -> f64 {
    at.timestamp() as f64 + f64::from(at.timestamp_subsec_micros()) / 1_000_000.0
}
