//! Endpoint configuration.
//!
//! Holds the delivery target and the default presentation settings copied
//! into every message created from it. Options parsing is permissive:
//! unrecognized keys are ignored so callers can pass richer objects through
//! unchanged, and boolean options are coerced from JSON truthiness.

use serde_json::Value;

use crate::error::{CoreError, Result};
use crate::message::Message;

/// Configuration for one webhook endpoint.
///
/// Defaults here are session-level: [`create_message`](Self::create_message)
/// copies them by value, so mutating the configuration afterwards never
/// retroactively changes an already-created message. The link and unfurl
/// toggles are the exception by design — they stay endpoint-level and are
/// read at payload-build time.
#[derive(Debug, Clone, PartialEq)]
pub struct HookConfig {
    target: String,
    default_channel: Option<String>,
    default_username: Option<String>,
    default_icon: Option<String>,
    post_as_user: bool,
    link_names: bool,
    unfurl_links: bool,
    unfurl_media: bool,
    allow_markdown: bool,
    markdown_fields: Vec<String>,
}

impl HookConfig {
    /// Creates a configuration for the given delivery target with compiled-in
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if the target is empty.
    pub fn new(target: impl Into<String>) -> Result<Self> {
        let target = target.into();
        if target.is_empty() {
            return Err(CoreError::invalid_input("webhook target URL must not be empty"));
        }
        Ok(Self {
            target,
            default_channel: None,
            default_username: None,
            default_icon: None,
            post_as_user: false,
            link_names: false,
            unfurl_links: false,
            unfurl_media: true,
            allow_markdown: true,
            markdown_fields: Vec::new(),
        })
    }

    /// Creates a configuration from a structured options object.
    ///
    /// Recognized keys: `channel`, `username`, `as_user`, `icon`,
    /// `link_names`, `unfurl_links`, `unfurl_media`, `allow_markdown`,
    /// `markdown_in_attachments`. Unknown keys are ignored. Boolean options
    /// are coerced from JSON truthiness; absent keys keep the compiled-in
    /// default. A non-object options value is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if the target is empty.
    pub fn from_options(target: impl Into<String>, options: &Value) -> Result<Self> {
        let mut config = Self::new(target)?;
        let Some(options) = options.as_object() else {
            return Ok(config);
        };

        for (key, value) in options {
            match key.as_str() {
                "channel" => config.default_channel = string_option(value),
                "username" => config.default_username = string_option(value),
                "icon" => config.default_icon = string_option(value),
                "as_user" => config.post_as_user = truthy(value),
                "link_names" => config.link_names = truthy(value),
                "unfurl_links" => config.unfurl_links = truthy(value),
                "unfurl_media" => config.unfurl_media = truthy(value),
                "allow_markdown" => config.allow_markdown = truthy(value),
                "markdown_in_attachments" => config.markdown_fields = string_list(value),
                _ => {},
            }
        }
        Ok(config)
    }

    /// The delivery target URL.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Replaces the delivery target URL.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if the target is empty; the
    /// configuration is left unchanged.
    pub fn set_target(&mut self, target: impl Into<String>) -> Result<&mut Self> {
        let target = target.into();
        if target.is_empty() {
            return Err(CoreError::invalid_input("webhook target URL must not be empty"));
        }
        self.target = target;
        Ok(self)
    }

    /// The default destination channel, if set.
    pub fn default_channel(&self) -> Option<&str> {
        self.default_channel.as_deref()
    }

    /// Sets the default destination channel for new messages.
    pub fn set_default_channel(&mut self, channel: impl Into<String>) -> &mut Self {
        self.default_channel = Some(channel.into());
        self
    }

    /// The default sender username, if set.
    pub fn default_username(&self) -> Option<&str> {
        self.default_username.as_deref()
    }

    /// Sets the default sender username for new messages.
    pub fn set_default_username(&mut self, username: impl Into<String>) -> &mut Self {
        self.default_username = Some(username.into());
        self
    }

    /// The default icon value, if set.
    pub fn default_icon(&self) -> Option<&str> {
        self.default_icon.as_deref()
    }

    /// Sets the default icon for new messages.
    pub fn set_default_icon(&mut self, icon: impl Into<String>) -> &mut Self {
        self.default_icon = Some(icon.into());
        self
    }

    /// Whether messages are flagged to post as the authenticated user.
    ///
    /// Carried in the model but not written into the wire payload.
    pub fn post_as_user(&self) -> bool {
        self.post_as_user
    }

    /// Sets the post-as-user flag.
    pub fn set_post_as_user(&mut self, post_as_user: bool) -> &mut Self {
        self.post_as_user = post_as_user;
        self
    }

    /// Whether `@name` mentions are converted to links.
    pub fn link_names(&self) -> bool {
        self.link_names
    }

    /// Sets whether `@name` mentions are converted to links.
    pub fn set_link_names(&mut self, link_names: bool) -> &mut Self {
        self.link_names = link_names;
        self
    }

    /// Whether bare URLs expand into link previews.
    pub fn unfurl_links(&self) -> bool {
        self.unfurl_links
    }

    /// Sets whether bare URLs expand into link previews.
    pub fn set_unfurl_links(&mut self, unfurl_links: bool) -> &mut Self {
        self.unfurl_links = unfurl_links;
        self
    }

    /// Whether bare media URLs expand into previews.
    pub fn unfurl_media(&self) -> bool {
        self.unfurl_media
    }

    /// Sets whether bare media URLs expand into previews.
    pub fn set_unfurl_media(&mut self, unfurl_media: bool) -> &mut Self {
        self.unfurl_media = unfurl_media;
        self
    }

    /// Whether message text is interpreted as markup by default.
    pub fn allow_markdown(&self) -> bool {
        self.allow_markdown
    }

    /// Sets whether message text is interpreted as markup by default.
    pub fn set_allow_markdown(&mut self, allow_markdown: bool) -> &mut Self {
        self.allow_markdown = allow_markdown;
        self
    }

    /// Attachment field names that opt into markup rendering by default.
    pub fn markdown_fields(&self) -> &[String] {
        &self.markdown_fields
    }

    /// Replaces the default markdown-field selection for new messages.
    pub fn set_markdown_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markdown_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Creates a new message initialized from the current defaults.
    ///
    /// Channel, username, icon, markup toggle, and markdown-field selection
    /// are copied by value. The link and unfurl toggles are not copied; they
    /// remain endpoint-level and are applied when the payload is built.
    pub fn create_message(&self) -> Message {
        Message::with_defaults(
            self.default_channel.clone(),
            self.default_username.clone(),
            self.default_icon.clone(),
            self.allow_markdown,
            self.markdown_fields.clone(),
        )
    }
}

/// JSON truthiness: `null`, `false`, `0`, and `""` are falsy; everything
/// else is truthy.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn string_option(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(entries) => {
            entries.iter().filter_map(|entry| entry.as_str().map(str::to_owned)).collect()
        },
        Value::String(name) => vec![name.clone()],
        _ => Vec::new(),
    }
}
