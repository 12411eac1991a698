//! Outbound message builder.
//!
//! A message is created from an endpoint configuration (never directly), so
//! its presentation defaults are value-copied at creation time. All setters
//! mutate in place and return the builder for chaining. There is no terminal
//! state: a message stays mutable after delivery and may be sent again.

use serde_json::Value;

use crate::attachment::Attachment;
use crate::error::Result;
use crate::icon::IconKind;

/// Input accepted by [`Message::attach`]: either an already constructed
/// [`Attachment`] or raw structured card data converted at attach time.
#[derive(Debug, Clone)]
pub enum AttachmentSource {
    /// An attachment built ahead of time; attached as-is.
    Attachment(Attachment),
    /// Raw card data; must be a JSON object.
    Value(Value),
}

impl From<Attachment> for AttachmentSource {
    fn from(attachment: Attachment) -> Self {
        Self::Attachment(attachment)
    }
}

impl From<Value> for AttachmentSource {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// An outbound notification message under construction.
///
/// Created via [`HookConfig::create_message`](crate::HookConfig::create_message);
/// presentation defaults are copied in by value, so later configuration
/// changes do not affect an existing message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    text: Option<String>,
    channel: Option<String>,
    username: Option<String>,
    post_as_user: bool,
    icon: Option<String>,
    icon_kind: Option<IconKind>,
    allow_markdown: bool,
    markdown_fields: Vec<String>,
    attachments: Vec<Attachment>,
}

impl Message {
    pub(crate) fn with_defaults(
        channel: Option<String>,
        username: Option<String>,
        icon: Option<String>,
        allow_markdown: bool,
        markdown_fields: Vec<String>,
    ) -> Self {
        let mut message = Self {
            text: None,
            channel,
            username,
            post_as_user: false,
            icon: None,
            icon_kind: None,
            allow_markdown,
            markdown_fields,
            attachments: Vec::new(),
        };
        if let Some(icon) = icon {
            message.set_icon(icon);
        }
        message
    }

    /// The main body text, if set.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Sets the main body text.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self
    }

    /// The destination channel, if set.
    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    /// Sets the destination channel, overriding the endpoint default.
    pub fn to(&mut self, channel: impl Into<String>) -> &mut Self {
        self.channel = Some(channel.into());
        self
    }

    /// The sender username, if set.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Sets the sender username, overriding the endpoint default.
    pub fn from(&mut self, username: impl Into<String>) -> &mut Self {
        self.username = Some(username.into());
        self
    }

    /// Whether the message is flagged to post as the authenticated user.
    ///
    /// This flag is carried in the model but is not written into the wire
    /// payload; see the crate documentation of the payload schema.
    pub fn post_as_user(&self) -> bool {
        self.post_as_user
    }

    /// Sets the post-as-user flag.
    pub fn set_post_as_user(&mut self, post_as_user: bool) -> &mut Self {
        self.post_as_user = post_as_user;
        self
    }

    /// The icon value, if set.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// The inferred icon kind, if an icon is set.
    pub fn icon_kind(&self) -> Option<IconKind> {
        self.icon_kind
    }

    /// Sets the message icon and infers its kind from the value's shape.
    ///
    /// An empty value clears both the icon and its kind, same as
    /// [`clear_icon`](Self::clear_icon).
    pub fn set_icon(&mut self, icon: impl Into<String>) -> &mut Self {
        let icon = icon.into();
        match IconKind::infer(&icon) {
            Some(kind) => {
                self.icon = Some(icon);
                self.icon_kind = Some(kind);
            },
            None => {
                self.icon = None;
                self.icon_kind = None;
            },
        }
        self
    }

    /// Clears the icon and its inferred kind.
    pub fn clear_icon(&mut self) -> &mut Self {
        self.icon = None;
        self.icon_kind = None;
        self
    }

    /// Whether the body text is interpreted as markup.
    pub fn allow_markdown(&self) -> bool {
        self.allow_markdown
    }

    /// Sets whether the body text is interpreted as markup.
    pub fn set_allow_markdown(&mut self, allow_markdown: bool) -> &mut Self {
        self.allow_markdown = allow_markdown;
        self
    }

    /// Attachment field names that opt into markup rendering.
    pub fn markdown_fields(&self) -> &[String] {
        &self.markdown_fields
    }

    /// Replaces the markdown-field selection inherited by future attachments.
    pub fn set_markdown_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markdown_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// The owned attachments, in insertion order.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Appends an attachment.
    ///
    /// Accepts either an [`Attachment`] or a plain JSON object. A plain
    /// object without its own `mrkdwn_in` key inherits the message's current
    /// markdown-field selection (a snapshot taken now, not a live link).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if given a JSON value that is not an
    /// object; the attachment list is left unchanged.
    pub fn attach(&mut self, source: impl Into<AttachmentSource>) -> Result<&mut Self> {
        match source.into() {
            AttachmentSource::Attachment(attachment) => self.attachments.push(attachment),
            AttachmentSource::Value(value) => {
                let explicit_selection = value
                    .as_object()
                    .is_some_and(|fields| fields.contains_key("mrkdwn_in"));
                let mut attachment = Attachment::new(value)?;
                if !explicit_selection {
                    attachment.set_markdown_fields(self.markdown_fields.iter().cloned());
                }
                self.attachments.push(attachment);
            },
        }
        Ok(self)
    }

    /// Replaces all attachments: clears the list, then attaches each element
    /// in order.
    ///
    /// # Errors
    ///
    /// Propagates the first `attach` failure; elements before it remain
    /// attached, exactly as with an explicit clear-then-attach sequence.
    pub fn set_attachments<I, S>(&mut self, attachments: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<AttachmentSource>,
    {
        self.clear_attachments();
        for source in attachments {
            self.attach(source)?;
        }
        Ok(self)
    }

    /// Removes all attachments.
    pub fn clear_attachments(&mut self) -> &mut Self {
        self.attachments.clear();
        self
    }
}
