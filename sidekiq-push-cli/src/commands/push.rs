use anyhow::Result;
use sidekiq_push::{Command, JobPusher, QueueClient, RedisQueue, Settings};
use std::io::Write;
use tracing::{info, warn};

use crate::config;

/// Resolves `settings` against the config file and runs the requested command.
///
/// Returns whether every job was pushed.
pub async fn execute(mut settings: Settings, redis_url: Option<&str>) -> Result<bool> {
    let config = config::load(&settings.config_path, redis_url)?;
    settings.apply_defaults(&config.worker_defaults());

    match settings.command {
        Command::Push => {
            let queue = RedisQueue::from_config(&config)?;
            let stdout = std::io::stdout();
            push_workers(&settings, queue, &mut stdout.lock()).await
        }
    }
}

/// Pushes every worker class in `settings`, one outcome line per class on `out`.
pub async fn push_workers<Q, W>(settings: &Settings, queue: Q, out: &mut W) -> Result<bool>
where
    Q: QueueClient,
    W: Write,
{
    if settings.retry.is_none() {
        warn!("no retry option configured, jobs will use the server default");
    }

    info!(
        "📤 Pushing {} job(s) to queue '{}'",
        settings.command_args.len(),
        settings.queue_name()
    );

    let pusher = JobPusher::new(queue, settings.queue_name(), settings.retry);
    let summary = pusher.push_all(&settings.command_args, out).await?;

    if summary.all_succeeded() {
        info!("✅ Pushed {} job(s)", summary.succeeded());
    } else {
        warn!(
            "⚠️  {} of {} job(s) failed to push",
            summary.failed(),
            summary.outcomes.len()
        );
    }

    Ok(summary.all_succeeded())
}
