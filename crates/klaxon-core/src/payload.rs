//! Wire payload projection.
//!
//! Projects an endpoint configuration and a message into the JSON object the
//! webhook endpoint accepts. The projection is pure: building a payload never
//! mutates the configuration or the message, and building twice from the same
//! inputs yields the same payload.

use serde::Serialize;
use serde_json::Value;

use crate::config::HookConfig;
use crate::icon::IconKind;
use crate::message::Message;

/// The JSON object POSTed to the webhook endpoint.
///
/// `text`, `channel`, and `username` are always present (null when unset).
/// `link_names` uses the endpoint's integer encoding: `1` when mentions are
/// linked, `0` otherwise — never a boolean. `icon_url` and `icon_emoji` are
/// mutually exclusive and appear only when the message carries an icon of the
/// matching kind. `attachments` is always present and preserves insertion
/// order. The post-as-user flag in the model has no wire counterpart.
#[derive(Debug, Clone, Serialize)]
pub struct Payload {
    /// Main body text.
    pub text: Option<String>,
    /// Destination channel.
    pub channel: Option<String>,
    /// Sender username.
    pub username: Option<String>,
    /// `1` to convert `@name` mentions to links, `0` otherwise.
    pub link_names: u8,
    /// Whether bare URLs expand into link previews.
    pub unfurl_links: bool,
    /// Whether bare media URLs expand into previews.
    pub unfurl_media: bool,
    /// Whether the body text is interpreted as markup.
    pub mrkdwn: bool,
    /// Icon image URL; present only for URL-shaped icons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    /// Icon emoji shortcode; present only for colon-wrapped icons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
    /// Attachment projections, in insertion order.
    pub attachments: Vec<Value>,
}

impl Payload {
    /// Builds the wire payload from the endpoint configuration and a message.
    ///
    /// Presentation fields come from the message; the link and unfurl toggles
    /// are read from the configuration at build time.
    pub fn build(config: &HookConfig, message: &Message) -> Self {
        let (icon_url, icon_emoji) = match message.icon_kind() {
            Some(IconKind::Url) => (message.icon().map(str::to_owned), None),
            Some(IconKind::Emoji) => (None, message.icon().map(str::to_owned)),
            None => (None, None),
        };

        Self {
            text: message.text().map(str::to_owned),
            channel: message.channel().map(str::to_owned),
            username: message.username().map(str::to_owned),
            link_names: u8::from(config.link_names()),
            unfurl_links: config.unfurl_links(),
            unfurl_media: config.unfurl_media(),
            mrkdwn: message.allow_markdown(),
            icon_url,
            icon_emoji,
            attachments: message.attachments().iter().map(|a| a.to_wire()).collect(),
        }
    }
}
