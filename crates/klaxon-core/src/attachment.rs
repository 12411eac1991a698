//! Rich message attachments.
//!
//! An attachment is a structured card inside a message: a set of pass-through
//! key/value fields the core does not interpret, plus a selection of field
//! names that opt into markup rendering (`mrkdwn_in` on the wire). Attachments
//! are pure value objects and hold no reference to their owning message.

use serde_json::{Map, Value};

use crate::error::{CoreError, Result};

/// One structured card inside a message.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    /// Pass-through card data, stored as given (minus `mrkdwn_in`).
    fields: Map<String, Value>,
    /// Field names rendered with markup enabled.
    markdown_fields: Vec<String>,
}

impl Attachment {
    /// Creates an attachment from structured card data.
    ///
    /// The value must be a JSON object. A `mrkdwn_in` key, when present, is
    /// extracted as the markdown-field selection; all other keys are stored
    /// untouched and reappear verbatim in the wire projection.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if the value is not a JSON object.
    pub fn new(value: Value) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(CoreError::invalid_input("attachment data must be a JSON object"));
        };

        let markdown_fields = match fields.remove("mrkdwn_in") {
            Some(Value::Array(entries)) => entries
                .into_iter()
                .filter_map(|entry| match entry {
                    Value::String(name) => Some(name),
                    _ => None,
                })
                .collect(),
            Some(Value::String(name)) => vec![name],
            Some(_) | None => Vec::new(),
        };

        Ok(Self { fields, markdown_fields })
    }

    /// The pass-through card fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Field names rendered with markup enabled.
    pub fn markdown_fields(&self) -> &[String] {
        &self.markdown_fields
    }

    /// Replaces the markdown-field selection.
    pub fn set_markdown_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markdown_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Projects the attachment into its wire form.
    ///
    /// All original keys, plus `mrkdwn_in` when the markdown-field selection
    /// is non-empty (omitted otherwise).
    pub fn to_wire(&self) -> Value {
        let mut fields = self.fields.clone();
        if !self.markdown_fields.is_empty() {
            fields.insert(
                "mrkdwn_in".to_string(),
                Value::Array(self.markdown_fields.iter().cloned().map(Value::String).collect()),
            );
        }
        Value::Object(fields)
    }
}
