//! Process configuration, deserialized once at startup from
//! `frontdesk.toml` plus `FRONTDESK_*` environment overrides.
//!
//! Every credential-bearing section is optional: an absent section means
//! the corresponding adapter is constructed disabled and every call to it
//! is a silent no-op. Only the admin secret is different — its absence
//! makes the login endpoint fail closed with 503.

use secrecy::SecretString;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub admin: AdminConfig,
    pub push: Option<PushConfig>,
    pub notify: Option<NotifyConfig>,
    pub client: ClientConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Access-gate settings. One shared secret for the whole system; anyone
/// holding it is fully privileged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub secret: Option<SecretString>,
}

/// Credentials for the push relay. All fields are required together; the
/// section as a whole is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct PushConfig {
    /// Relay base URL, e.g. `https://relay.example.com`.
    pub base_url: String,
    pub app_id: String,
    pub key: String,
    pub secret: SecretString,
}

/// Credentials and recipients for the outbound Telegram notification bot.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    pub bot_token: SecretString,
    #[serde(default)]
    pub chat_ids: Vec<i64>,
}

/// Settings for the terminal clients (`fdesk chat`, `fdesk inbox`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn defaults_have_no_credentials() {
        let config = Config::default();
        assert!(config.admin.secret.is_none());
        assert!(config.push.is_none());
        assert!(config.notify.is_none());
        assert_eq!(config.server.bind, "127.0.0.1:8080");
    }

    #[test]
    fn parses_full_toml() {
        let config: Config = toml::from_str(
            r#"
[server]
bind = "0.0.0.0:9000"

[admin]
secret = "hunter2"

[push]
base_url = "https://relay.example.com"
app_id = "fd1"
key = "pk"
secret = "ps"

[notify]
bot_token = "123:abc"
chat_ids = [42, 43]
"#,
        )
        .unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.admin.secret.unwrap().expose_secret(), "hunter2");
        let push = config.push.unwrap();
        assert_eq!(push.app_id, "fd1");
        assert_eq!(config.notify.unwrap().chat_ids, vec![42, 43]);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[admin]\nsecret = \"s\"\n").unwrap();
        assert!(config.push.is_none());
        assert_eq!(config.client.base_url, "http://127.0.0.1:8080");
    }
}
