//! HTTP delivery for Klaxon webhook notifications.
//!
//! This crate owns the outbound side: it wraps an endpoint configuration from
//! `klaxon-core` together with a reqwest client and performs exactly one POST
//! per send. Delivery is fire-and-forget — the response body and status are
//! logged but never interpreted, and there is no retry or queueing layer.
//!
//! # Example
//!
//! ```no_run
//! use klaxon_core::HookConfig;
//! use klaxon_delivery::{DeliveryError, WebhookClient};
//!
//! # async fn example() -> Result<(), DeliveryError> {
//! let mut hook = HookConfig::new("https://hooks.example.com/T000/B000")?;
//! hook.set_default_channel("#ops");
//!
//! let client = WebhookClient::with_defaults(hook)?;
//!
//! let mut message = client.create_message();
//! message.set_text("deploy finished").set_icon(":tada:");
//! client.send(&message).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod settings;

// Re-export main public API
pub use client::{ClientConfig, WebhookClient};
pub use error::{DeliveryError, Result};
pub use settings::Settings;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Default user agent sent with webhook requests.
pub const DEFAULT_USER_AGENT: &str = concat!("klaxon/", env!("CARGO_PKG_VERSION"));
