use clap::Parser;
use sidekiq_push::{RetryOption, queue::test::TestQueue};
use sidekiq_push_cli::{Cli, commands, config};
use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_binary(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sidekiq-push"))
        .args(args)
        .env_remove("REDIS_URL")
        .env_remove("SIDEKIQ_PUSH_DEFAULT_QUEUE")
        .env_remove("SIDEKIQ_PUSH_DEFAULT_RETRY")
        .env_remove("SIDEKIQ_PUSH_NAMESPACE")
        .output()
        .expect("failed to run sidekiq-push")
}

#[test]
fn test_binary_rejects_missing_command() {
    let output = run_binary(&[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_binary_rejects_unknown_command() {
    let output = run_binary(&["dosomething"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid command 'dosomething'"));
}

#[test]
fn test_binary_rejects_push_without_classes() {
    let output = run_binary(&["push"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No Worker Classes to push"));
}

#[test]
fn test_binary_reports_every_failed_push() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("absent.toml");

    let output = run_binary(&[
        "-c",
        config_path.to_str().unwrap(),
        "-u",
        "redis://127.0.0.1:1",
        "push",
        "FirstWorker",
        "SecondWorker",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|line| line.starts_with("Failed to push to queue : ")));
}

#[test]
fn test_binary_fails_on_broken_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("sidekiq.toml");
    fs::write(&config_path, "redis_url = [\n").unwrap();

    let output = run_binary(&["-c", config_path.to_str().unwrap(), "push", "FirstWorker"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[tokio::test]
async fn test_config_file_defaults_flow_into_pushes() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("sidekiq.toml");
    fs::write(
        &config_path,
        "[default_worker_options]\nqueue = \"reports\"\nretry = 10\n",
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "sidekiq-push",
        "-c",
        config_path.to_str().unwrap(),
        "push",
        "ReportWorker",
    ])
    .unwrap();
    let mut settings = cli.settings().unwrap();
    let client_config = config::load(&settings.config_path, None).unwrap();
    settings.apply_defaults(&client_config.worker_defaults());

    let queue = std::sync::Arc::new(TestQueue::new());
    let mut out = Vec::new();
    let ok = commands::push_workers(&settings, queue.clone(), &mut out)
        .await
        .unwrap();

    assert!(ok);
    let jobs = queue.jobs("reports").await;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].class, "ReportWorker");
    assert_eq!(jobs[0].retry, Some(RetryOption::Attempts(10)));

    let line = String::from_utf8(out).unwrap();
    assert!(line.starts_with("Posted ReportWorker to queue 'reports', Job ID : "));
    assert!(line.trim_end().ends_with("Retry : 10"));
}

#[tokio::test]
async fn test_flags_beat_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("sidekiq.toml");
    fs::write(
        &config_path,
        "[default_worker_options]\nqueue = \"reports\"\nretry = true\n",
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "sidekiq-push",
        "-c",
        config_path.to_str().unwrap(),
        "-q",
        "urgent",
        "-r",
        "n",
        "push",
        "ReportWorker",
    ])
    .unwrap();
    let mut settings = cli.settings().unwrap();
    let client_config = config::load(&settings.config_path, None).unwrap();
    settings.apply_defaults(&client_config.worker_defaults());

    assert_eq!(settings.queue.as_deref(), Some("urgent"));
    assert_eq!(settings.retry, Some(RetryOption::Enabled(false)));
}
