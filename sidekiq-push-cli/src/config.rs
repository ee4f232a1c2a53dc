use anyhow::{Context, Result};
use sidekiq_push::ClientConfig;
use std::path::Path;
use tracing::debug;

/// Loads the client config at `path` and applies command-line overrides.
///
/// Priority: command line / `REDIS_URL` > environment > config file > defaults.
pub fn load(path: &Path, redis_url: Option<&str>) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(path)
        .with_context(|| format!("could not load config file {}", path.display()))?;

    if let Some(url) = redis_url {
        debug!("redis url taken from command line or REDIS_URL");
        config.redis_url = Some(url.to_string());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_redis_url_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sidekiq.toml");
        fs::write(&path, "redis_url = \"redis://from-file:6379\"\n").unwrap();

        let config = load(&path, None).unwrap();
        assert_eq!(config.redis_url(), "redis://from-file:6379");

        let config = load(&path, Some("redis://from-flag:6379")).unwrap();
        assert_eq!(config.redis_url(), "redis://from-flag:6379");
    }

    #[test]
    fn test_broken_file_mentions_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        fs::write(&path, "[default_worker_options\n").unwrap();

        let err = load(&path, None).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.toml"));
    }
}
