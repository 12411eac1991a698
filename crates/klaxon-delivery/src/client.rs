//! HTTP client for webhook notification delivery.
//!
//! Wraps an endpoint configuration together with a pooled reqwest client.
//! Each send builds the wire payload, encodes it, and issues exactly one POST
//! to the configured target. The response status is logged but never
//! interpreted: delivery success means the POST went out without a transport
//! failure.

use std::time::Duration;

use klaxon_core::{HookConfig, Message, Payload};
use reqwest::header::CONTENT_TYPE;
use tracing::{info_span, Instrument};

use crate::error::{DeliveryError, Result};
use crate::{DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT};

/// Configuration for the webhook HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Timeout for each HTTP request.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Client for one webhook endpoint.
///
/// Holds the endpoint configuration whose defaults seed new messages, and
/// whose link/unfurl toggles are read each time a payload is built. Messages
/// carry no terminal state, so the same message may be sent repeatedly.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    hook: HookConfig,
    config: ClientConfig,
}

impl WebhookClient {
    /// Creates a client for the given endpoint configuration.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::Configuration` if the target is not a valid
    /// URL or the HTTP client cannot be built.
    pub fn new(hook: HookConfig, config: ClientConfig) -> Result<Self> {
        reqwest::Url::parse(hook.target())
            .map_err(|e| DeliveryError::configuration(format!("invalid webhook target URL: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| DeliveryError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, hook, config })
    }

    /// Creates a client with the default HTTP configuration.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_defaults(hook: HookConfig) -> Result<Self> {
        Self::new(hook, ClientConfig::default())
    }

    /// The endpoint configuration.
    pub fn hook(&self) -> &HookConfig {
        &self.hook
    }

    /// Mutable access to the endpoint configuration.
    ///
    /// Changes to the link/unfurl toggles affect every subsequent send;
    /// changes to the presentation defaults affect only messages created
    /// afterwards.
    pub fn hook_mut(&mut self) -> &mut HookConfig {
        &mut self.hook
    }

    /// The HTTP client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Creates a new message initialized from the endpoint's current defaults.
    pub fn create_message(&self) -> Message {
        self.hook.create_message()
    }

    /// Delivers a message to the endpoint.
    ///
    /// Builds the wire payload, encodes it, and POSTs it once with
    /// `Content-Type: application/json`. HTTP-level error statuses are the
    /// endpoint's way of complaining, not ours: they are logged and the send
    /// still counts as delivered. The message is untouched and may be sent
    /// again.
    ///
    /// # Errors
    ///
    /// - `DeliveryError::Encoding` if the payload cannot be serialized; no
    ///   HTTP call is attempted.
    /// - `DeliveryError::Transport` if the POST itself fails, untranslated
    ///   from the HTTP client.
    pub async fn send(&self, message: &Message) -> Result<()> {
        let payload = Payload::build(&self.hook, message);
        let body = serde_json::to_vec(&payload)?;

        let span = info_span!(
            "webhook_post",
            url = %self.hook.target(),
            attachments = message.attachments().len()
        );

        async move {
            tracing::debug!(bytes = body.len(), "posting webhook payload");

            let response = self
                .http
                .post(self.hook.target())
                .header(CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                tracing::debug!(status = status.as_u16(), "webhook accepted");
            } else {
                tracing::warn!(status = status.as_u16(), "non-success response from endpoint");
            }

            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Overwrites the message text, then delivers it.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn send_text(&self, message: &mut Message, text: impl Into<String>) -> Result<()> {
        message.set_text(text);
        self.send(message).await
    }

    /// One-shot convenience: creates a message from the endpoint defaults,
    /// sets its text, and delivers it.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn post_text(&self, text: impl Into<String>) -> Result<()> {
        let mut message = self.create_message();
        message.set_text(text);
        self.send(&message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_hook() -> HookConfig {
        HookConfig::new("https://hooks.example.com/T000/B000").expect("valid target")
    }

    #[test]
    fn default_client_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("klaxon/"));
    }

    #[test]
    fn invalid_target_rejected_at_construction() {
        let hook = HookConfig::new("not a url").expect("non-empty target");
        let result = WebhookClient::with_defaults(hook);
        assert!(matches!(result, Err(DeliveryError::Configuration { .. })));
    }

    #[test]
    fn message_defaults_come_from_hook() {
        let mut hook = test_hook();
        hook.set_default_channel("#ops").set_default_username("deploy-bot");

        let client = WebhookClient::with_defaults(hook).expect("client builds");
        let message = client.create_message();

        assert_eq!(message.channel(), Some("#ops"));
        assert_eq!(message.username(), Some("deploy-bot"));
    }

    #[test]
    fn hook_mut_allows_endpoint_toggles() {
        let mut client = WebhookClient::with_defaults(test_hook()).expect("client builds");
        client.hook_mut().set_link_names(true);
        assert!(client.hook().link_names());
    }
}
