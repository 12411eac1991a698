//! Environment and file based configuration.
//!
//! Settings are loaded in priority order: environment variables (highest),
//! a `klaxon.toml` file, then built-in defaults. The only value without a
//! usable default is the webhook URL itself; everything else works
//! out-of-the-box.

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use klaxon_core::HookConfig;
use serde::{Deserialize, Serialize};

use crate::client::ClientConfig;
use crate::{DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT};

const CONFIG_FILE: &str = "klaxon.toml";

/// Deployment-level settings for a webhook client.
///
/// # Example
///
/// ```no_run
/// use klaxon_delivery::{Settings, WebhookClient};
///
/// # fn example() -> anyhow::Result<()> {
/// let settings = Settings::load()?;
/// let client = WebhookClient::new(settings.to_hook_config()?, settings.to_client_config())?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Webhook target URL.
    ///
    /// Environment variable: `WEBHOOK_URL`
    #[serde(default, alias = "WEBHOOK_URL")]
    pub webhook_url: String,

    /// Default destination channel for new messages.
    ///
    /// Environment variable: `DEFAULT_CHANNEL`
    #[serde(default, alias = "DEFAULT_CHANNEL")]
    pub default_channel: Option<String>,

    /// Default sender username for new messages.
    ///
    /// Environment variable: `DEFAULT_USERNAME`
    #[serde(default, alias = "DEFAULT_USERNAME")]
    pub default_username: Option<String>,

    /// Default icon (URL or `:emoji:` shortcode) for new messages.
    ///
    /// Environment variable: `DEFAULT_ICON`
    #[serde(default, alias = "DEFAULT_ICON")]
    pub default_icon: Option<String>,

    /// Whether `@name` mentions are converted to links.
    ///
    /// Environment variable: `LINK_NAMES`
    #[serde(default, alias = "LINK_NAMES")]
    pub link_names: bool,

    /// Whether bare URLs expand into link previews.
    ///
    /// Environment variable: `UNFURL_LINKS`
    #[serde(default, alias = "UNFURL_LINKS")]
    pub unfurl_links: bool,

    /// Whether bare media URLs expand into previews.
    ///
    /// Environment variable: `UNFURL_MEDIA`
    #[serde(default = "default_true", alias = "UNFURL_MEDIA")]
    pub unfurl_media: bool,

    /// Whether message text is interpreted as markup.
    ///
    /// Environment variable: `ALLOW_MARKDOWN`
    #[serde(default = "default_true", alias = "ALLOW_MARKDOWN")]
    pub allow_markdown: bool,

    /// Attachment field names that opt into markup rendering.
    #[serde(default)]
    pub markdown_in_attachments: Vec<String>,

    /// HTTP request timeout in seconds.
    ///
    /// Environment variable: `TIMEOUT_SECONDS`
    #[serde(default = "default_timeout_seconds", alias = "TIMEOUT_SECONDS")]
    pub timeout_seconds: u64,

    /// User agent sent with webhook requests.
    ///
    /// Environment variable: `USER_AGENT`
    #[serde(default = "default_user_agent", alias = "USER_AGENT")]
    pub user_agent: String,
}

impl Settings {
    /// Loads settings from defaults, `klaxon.toml`, and environment variable
    /// overrides.
    ///
    /// # Errors
    ///
    /// Fails if a source cannot be read or parsed, or if the merged settings
    /// do not validate (most commonly a missing webhook URL).
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(""));

        let settings: Self = figment.extract().context("failed to load klaxon settings")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Converts to the endpoint configuration.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if the webhook URL is empty.
    pub fn to_hook_config(&self) -> klaxon_core::Result<HookConfig> {
        let mut hook = HookConfig::new(self.webhook_url.clone())?;
        if let Some(channel) = &self.default_channel {
            hook.set_default_channel(channel.clone());
        }
        if let Some(username) = &self.default_username {
            hook.set_default_username(username.clone());
        }
        if let Some(icon) = &self.default_icon {
            hook.set_default_icon(icon.clone());
        }
        hook.set_link_names(self.link_names)
            .set_unfurl_links(self.unfurl_links)
            .set_unfurl_media(self.unfurl_media)
            .set_allow_markdown(self.allow_markdown)
            .set_markdown_fields(self.markdown_in_attachments.iter().cloned());
        Ok(hook)
    }

    /// Converts to the HTTP client configuration.
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: std::time::Duration::from_secs(self.timeout_seconds),
            user_agent: self.user_agent.clone(),
        }
    }

    /// Validates the merged settings.
    fn validate(&self) -> Result<()> {
        if self.webhook_url.is_empty() {
            anyhow::bail!("webhook_url must be set (WEBHOOK_URL or klaxon.toml)");
        }

        if !self.webhook_url.starts_with("http://") && !self.webhook_url.starts_with("https://") {
            anyhow::bail!("webhook_url must be an http(s) URL");
        }

        if self.timeout_seconds == 0 {
            anyhow::bail!("timeout_seconds must be greater than 0");
        }

        if self.user_agent.is_empty() {
            anyhow::bail!("user_agent must not be empty");
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            default_channel: None,
            default_username: None,
            default_icon: None,
            link_names: false,
            unfurl_links: false,
            unfurl_media: true,
            allow_markdown: true,
            markdown_in_attachments: Vec::new(),
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, env, sync::Mutex, time::Duration};

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct TestEnvGuard {
        _lock: std::sync::MutexGuard<'static, ()>,
        vars: Vec<String>,
        originals: HashMap<String, Option<String>>,
    }

    impl TestEnvGuard {
        fn new() -> Self {
            let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            Self { _lock: lock, vars: Vec::new(), originals: HashMap::new() }
        }

        fn set_var(&mut self, key: &str, value: &str) {
            if !self.vars.contains(&key.to_string()) {
                self.originals.insert(key.to_string(), env::var(key).ok());
                self.vars.push(key.to_string());
            }
            env::set_var(key, value);
        }
    }

    impl Drop for TestEnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                match self.originals.get(var) {
                    Some(Some(value)) => env::set_var(var, value),
                    Some(None) => env::remove_var(var),
                    None => {},
                }
            }
        }
    }

    #[test]
    fn defaults_require_webhook_url() {
        let settings = Settings::default();
        assert!(settings.validate().is_err());

        let mut configured = Settings::default();
        configured.webhook_url = "https://hooks.example.com/T".to_string();
        assert!(configured.validate().is_ok());
    }

    #[test]
    fn env_overrides_applied() {
        let mut guard = TestEnvGuard::new();
        guard.set_var("WEBHOOK_URL", "https://hooks.example.com/T000/B000");
        guard.set_var("DEFAULT_CHANNEL", "#alerts");
        guard.set_var("LINK_NAMES", "true");
        guard.set_var("TIMEOUT_SECONDS", "45");

        let settings = Settings::load().expect("settings should load with env overrides");

        assert_eq!(settings.webhook_url, "https://hooks.example.com/T000/B000");
        assert_eq!(settings.default_channel.as_deref(), Some("#alerts"));
        assert!(settings.link_names);
        assert_eq!(settings.timeout_seconds, 45);
        // Untouched values keep their defaults.
        assert!(settings.unfurl_media);
        assert!(settings.allow_markdown);
    }

    #[test]
    fn invalid_settings_rejected() {
        let mut settings = Settings::default();
        settings.webhook_url = "ftp://hooks.example.com/T".to_string();
        assert!(settings.validate().is_err());

        settings.webhook_url = "https://hooks.example.com/T".to_string();
        settings.timeout_seconds = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn conversions_map_every_field() {
        let mut settings = Settings::default();
        settings.webhook_url = "https://hooks.example.com/T".to_string();
        settings.default_channel = Some("#ops".to_string());
        settings.default_icon = Some(":bell:".to_string());
        settings.link_names = true;
        settings.unfurl_media = false;
        settings.markdown_in_attachments = vec!["title".to_string()];
        settings.timeout_seconds = 5;

        let hook = settings.to_hook_config().expect("valid hook config");
        assert_eq!(hook.target(), "https://hooks.example.com/T");
        assert_eq!(hook.default_channel(), Some("#ops"));
        assert_eq!(hook.default_icon(), Some(":bell:"));
        assert!(hook.link_names());
        assert!(!hook.unfurl_media());
        assert_eq!(hook.markdown_fields(), ["title"]);

        let client_config = settings.to_client_config();
        assert_eq!(client_config.timeout, Duration::from_secs(5));
        assert_eq!(client_config.user_agent, DEFAULT_USER_AGENT);
    }
}
