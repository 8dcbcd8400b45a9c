//! Configuration loader.
//!
//! Reads `frontdesk.toml` and deserializes it into
//! [`frontdesk_types::config::Config`], falling back to defaults when the
//! file is missing or malformed, then applies `FRONTDESK_*` environment
//! overrides. The result is constructed once at process start and passed
//! into each adapter's constructor — no call-time env lookups anywhere.

use std::path::Path;

use frontdesk_types::config::{Config, NotifyConfig, PushConfig};

/// Load configuration from `path`, then apply environment overrides.
///
/// - Missing file: defaults.
/// - Unreadable or malformed file: logs a warning, uses defaults.
pub async fn load_config(path: &Path) -> Config {
    let mut config = load_file(path).await;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config
}

async fn load_file(path: &Path) -> Config {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return Config::default();
        }
        Err(err) => {
            tracing::warn!("failed to read {}: {err}, using defaults", path.display());
            return Config::default();
        }
    };

    match toml::from_str::<Config>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("failed to parse {}: {err}, using defaults", path.display());
            Config::default()
        }
    }
}

/// Environment overrides for secrets and deployment-specific values.
///
/// The push relay override requires all four variables together; a partial
/// set is ignored with a warning rather than producing a half-configured
/// relay.
fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(bind) = lookup("FRONTDESK_BIND") {
        config.server.bind = bind;
    }
    if let Some(secret) = lookup("FRONTDESK_ADMIN_SECRET") {
        config.admin.secret = Some(secret.into());
    }
    if let Some(base_url) = lookup("FRONTDESK_CLIENT_BASE_URL") {
        config.client.base_url = base_url;
    }

    let push_vars = [
        lookup("FRONTDESK_PUSH_BASE_URL"),
        lookup("FRONTDESK_PUSH_APP_ID"),
        lookup("FRONTDESK_PUSH_KEY"),
        lookup("FRONTDESK_PUSH_SECRET"),
    ];
    match push_vars {
        [Some(base_url), Some(app_id), Some(key), Some(secret)] => {
            config.push = Some(PushConfig {
                base_url,
                app_id,
                key,
                secret: secret.into(),
            });
        }
        [None, None, None, None] => {}
        _ => {
            tracing::warn!(
                "partial FRONTDESK_PUSH_* environment override ignored, all four variables are required"
            );
        }
    }

    if let Some(bot_token) = lookup("FRONTDESK_BOT_TOKEN") {
        let chat_ids = lookup("FRONTDESK_CHAT_IDS")
            .map(|raw| {
                raw.split(',')
                    .filter_map(|part| part.trim().parse::<i64>().ok())
                    .collect()
            })
            .or_else(|| config.notify.as_ref().map(|n| n.chat_ids.clone()))
            .unwrap_or_default();
        config.notify = Some(NotifyConfig {
            bot_token: bot_token.into(),
            chat_ids,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_file(&tmp.path().join("frontdesk.toml")).await;
        assert!(config.admin.secret.is_none());
        assert_eq!(config.server.bind, "127.0.0.1:8080");
    }

    #[tokio::test]
    async fn malformed_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("frontdesk.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();
        let config = load_file(&path).await;
        assert!(config.push.is_none());
    }

    #[tokio::test]
    async fn valid_file_parses() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("frontdesk.toml");
        tokio::fs::write(&path, "[admin]\nsecret = \"hunter2\"\n")
            .await
            .unwrap();
        let config = load_file(&path).await;
        assert_eq!(config.admin.secret.unwrap().expose_secret(), "hunter2");
    }

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn admin_secret_override_applies() {
        let mut config = Config::default();
        let vars = env(&[("FRONTDESK_ADMIN_SECRET", "from-env")]);
        apply_env_overrides(&mut config, |name| vars.get(name).cloned());
        assert_eq!(config.admin.secret.unwrap().expose_secret(), "from-env");
    }

    #[test]
    fn partial_push_override_is_ignored() {
        let mut config = Config::default();
        let vars = env(&[
            ("FRONTDESK_PUSH_BASE_URL", "https://relay.example.com"),
            ("FRONTDESK_PUSH_APP_ID", "fd1"),
        ]);
        apply_env_overrides(&mut config, |name| vars.get(name).cloned());
        assert!(config.push.is_none());
    }

    #[test]
    fn complete_push_override_applies() {
        let mut config = Config::default();
        let vars = env(&[
            ("FRONTDESK_PUSH_BASE_URL", "https://relay.example.com"),
            ("FRONTDESK_PUSH_APP_ID", "fd1"),
            ("FRONTDESK_PUSH_KEY", "pk"),
            ("FRONTDESK_PUSH_SECRET", "ps"),
        ]);
        apply_env_overrides(&mut config, |name| vars.get(name).cloned());
        let push = config.push.unwrap();
        assert_eq!(push.app_id, "fd1");
        assert_eq!(push.key, "pk");
    }

    #[test]
    fn bot_token_override_parses_chat_ids() {
        let mut config = Config::default();
        let vars = env(&[
            ("FRONTDESK_BOT_TOKEN", "123:abc"),
            ("FRONTDESK_CHAT_IDS", "42, 43,bogus,44"),
        ]);
        apply_env_overrides(&mut config, |name| vars.get(name).cloned());
        let notify = config.notify.unwrap();
        assert_eq!(notify.chat_ids, vec![42, 43, 44]);
    }
}
