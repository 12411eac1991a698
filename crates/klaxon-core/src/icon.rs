//! Icon shape inference.
//!
//! The webhook payload carries an icon under one of two mutually exclusive
//! keys depending on the value's shape: colon-wrapped strings are emoji
//! shortcodes, everything else is treated as an image URL.

/// Presentation kind of a message icon, inferred from the icon value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    /// Icon is an image URL (`icon_url` on the wire).
    Url,
    /// Icon is an emoji shortcode such as `:tada:` (`icon_emoji` on the wire).
    Emoji,
}

impl IconKind {
    /// Infers the icon kind from the value's shape.
    ///
    /// A string of at least two characters whose first and last characters
    /// are both `:` is an emoji shortcode; every other non-empty value is a
    /// URL. Empty values have no kind.
    pub fn infer(value: &str) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        if value.len() >= 2 && value.starts_with(':') && value.ends_with(':') {
            Some(Self::Emoji)
        } else {
            Some(Self::Url)
        }
    }
}
