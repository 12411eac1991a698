//! Message model and wire payload schema for chat-webhook notifications.
//!
//! Provides the endpoint configuration, message and attachment builders, and
//! the pure payload projection used by the delivery crate. Everything here is
//! plain data with no I/O; the HTTP side lives in `klaxon-delivery`.
//!
//! # Example
//!
//! ```
//! use klaxon_core::{HookConfig, Payload};
//!
//! # fn example() -> klaxon_core::Result<()> {
//! let mut hook = HookConfig::new("https://hooks.example.com/T000/B000")?;
//! hook.set_default_channel("#ops");
//!
//! let mut message = hook.create_message();
//! message.set_text("deploy finished").set_icon(":tada:");
//!
//! let payload = Payload::build(&hook, &message);
//! assert_eq!(payload.channel.as_deref(), Some("#ops"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod attachment;
pub mod config;
pub mod error;
pub mod icon;
pub mod message;
pub mod payload;

pub use attachment::Attachment;
pub use config::HookConfig;
pub use error::{CoreError, Result};
pub use icon::IconKind;
pub use message::{AttachmentSource, Message};
pub use payload::Payload;
