//! Sidekiq-compatible Redis backend.
//!
//! A push stores the job the same way Sidekiq's own client does: the queue name
//! is added to the `queues` set and the JSON payload is `LPUSH`ed onto
//! `queue:<name>`, both inside one `MULTI`/`EXEC`. With a namespace configured
//! every key is prefixed with `<namespace>:`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use sidekiq_push::{PushRequest, queue::{QueueClient, RedisQueue}};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let queue = RedisQueue::new("redis://127.0.0.1:6379", None)?;
//! let jid = queue.push(PushRequest::new("HardWorker", "default")).await?;
//! println!("pushed {}", jid);
//! # Ok(())
//! # }
//! ```

use crate::{
    Result,
    config::ClientConfig,
    job::{JobId, PushRequest},
    queue::{QueueClient, validate_request},
};
use async_trait::async_trait;
use chrono::Utc;
use redis::aio::MultiplexedConnection;
use tokio::sync::Mutex;
use tracing::debug;

pub struct RedisQueue {
    client: redis::Client,
    namespace: Option<String>,
    connection: Mutex<Option<MultiplexedConnection>>,
}

impl std::fmt::Debug for RedisQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisQueue")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl RedisQueue {
    /// Creates a queue for `redis_url`. No connection is made until the first push.
    pub fn new(redis_url: &str, namespace: Option<String>) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self {
            client,
            namespace: namespace.filter(|ns| !ns.is_empty()),
            connection: Mutex::new(None),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.redis_url(), config.namespace().map(str::to_string))
    }

    /// Key of the set that lists every known queue.
    pub fn queues_key(&self) -> String {
        self.namespaced("queues")
    }

    /// Key of the list holding jobs for `queue`.
    pub fn queue_key(&self, queue: &str) -> String {
        self.namespaced(&format!("queue:{}", queue))
    }

    fn namespaced(&self, key: &str) -> String {
        match &self.namespace {
            Some(ns) => format!("{}:{}", ns, key),
            None => key.to_string(),
        }
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        let mut guard = self.connection.lock().await;
        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }

        debug!("connecting to redis");
        let conn = self.client.get_multiplexed_async_connection().await?;
        *guard = Some(conn.clone());
        Ok(conn)
    }

    async fn forget_connection(&self) {
        *self.connection.lock().await = None;
    }
}

#[async_trait]
impl QueueClient for RedisQueue {
    async fn push(&self, request: PushRequest) -> Result<JobId> {
        validate_request(&request)?;

        let queue = request.queue.clone();
        let jid = JobId::generate();
        let payload = serde_json::to_string(&request.into_payload(jid.clone(), Utc::now()))?;

        let mut conn = self.connection().await?;
        let result: redis::RedisResult<()> = redis::pipe()
            .atomic()
            .sadd(self.queues_key(), &queue)
            .ignore()
            .lpush(self.queue_key(&queue), payload)
            .ignore()
            .query_async(&mut conn)
            .await;

        if let Err(err) = result {
            if err.is_io_error() || err.is_connection_dropped() {
                self.forget_connection().await;
            }
            return Err(err.into());
        }

        debug!(jid = %jid, queue = %queue, "job stored");
        Ok(jid)
    }
}
