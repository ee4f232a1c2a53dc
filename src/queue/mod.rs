//! Queue backends that accept job pushes.
//!
//! The [`QueueClient`] trait is the seam between the push loop and whatever
//! actually stores the job. [`RedisQueue`] speaks Sidekiq's Redis layout; the
//! in-memory [`test::TestQueue`] (feature `test`) records pushes for tests.

use crate::{
    Result,
    job::{JobId, PushRequest},
};
use async_trait::async_trait;

pub mod redis;


pub use self::redis::RedisQueue;

/// A backend that can enqueue a single job.
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Enqueues `request` and returns the id the job was stored under.
    async fn push(&self, request: PushRequest) -> Result<JobId>;
}

#[async_trait]
impl<T: QueueClient + ?Sized> QueueClient for std::sync::Arc<T> {
    async fn push(&self, request: PushRequest) -> Result<JobId> {
        (**self).push(request).await
    }
}

/// Rejects requests no backend could store meaningfully.
pub(crate) fn validate_request(request: &PushRequest) -> Result<()> {
    if request.class.trim().is_empty() {
        return Err(crate::SidekiqPushError::InvalidJob {
            message: "job class must not be empty".to_string(),
        });
    }
    if request.queue.trim().is_empty() {
        return Err(crate::SidekiqPushError::InvalidJob {
            message: "queue name must not be empty".to_string(),
        });
    }
    Ok(())
}
