//! End-to-end composition scenarios through the public API.
//!
//! Exercises the configure → create → compose → project flow the way a
//! caller uses it, pinning the exact wire shapes the endpoint expects.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use klaxon_core::{Attachment, HookConfig, Payload};
use serde_json::json;

#[test]
fn configure_compose_project_round_trip() {
    let mut hook = HookConfig::new("https://hooks.example/T").expect("valid target");
    hook.set_default_channel("#general");

    let mut message = hook.create_message();
    message.set_text("hi");

    let value = serde_json::to_value(Payload::build(&hook, &message)).expect("payload serializes");

    assert_eq!(
        value,
        json!({
            "text": "hi",
            "channel": "#general",
            "username": null,
            "link_names": 0,
            "unfurl_links": false,
            "unfurl_media": true,
            "mrkdwn": true,
            "attachments": []
        })
    );
}

#[test]
fn emoji_icon_appears_under_icon_emoji() {
    let hook = HookConfig::new("https://hooks.example/T").expect("valid target");
    let mut message = hook.create_message();
    message.set_icon(":tada:");

    let value = serde_json::to_value(Payload::build(&hook, &message)).expect("payload serializes");

    assert_eq!(value["icon_emoji"], json!(":tada:"));
    assert!(value.get("icon_url").is_none());
}

#[test]
fn attached_card_inherits_message_markdown_selection() {
    let hook = HookConfig::new("https://hooks.example/T").expect("valid target");
    let mut message = hook.create_message();
    message.set_markdown_fields(["title"]);
    message.attach(json!({"title": "x"})).expect("object attaches");

    let value = serde_json::to_value(Payload::build(&hook, &message)).expect("payload serializes");

    assert_eq!(value["attachments"], json!([{"title": "x", "mrkdwn_in": ["title"]}]));
}

#[test]
fn options_driven_configuration_flows_into_messages() {
    let hook = HookConfig::from_options(
        "https://hooks.example/T",
        &json!({
            "channel": "#alerts",
            "username": "monitor",
            "icon": "https://example.com/bot.png",
            "markdown_in_attachments": ["text"]
        }),
    )
    .expect("valid options");

    let message = hook.create_message();

    assert_eq!(message.channel(), Some("#alerts"));
    assert_eq!(message.username(), Some("monitor"));
    assert_eq!(message.icon(), Some("https://example.com/bot.png"));
    assert_eq!(message.markdown_fields(), ["text"]);
}

#[test]
fn set_attachments_matches_clear_then_attach() {
    let hook = HookConfig::new("https://hooks.example/T").expect("valid target");

    let sources = [json!({"title": "a"}), json!({"title": "b"}), json!({"title": "c"})];

    let mut replaced = hook.create_message();
    replaced.attach(json!({"title": "stale"})).expect("object attaches");
    replaced.set_attachments(sources.clone()).expect("objects attach");

    let mut sequential = hook.create_message();
    sequential.attach(json!({"title": "stale"})).expect("object attaches");
    sequential.clear_attachments();
    for source in sources {
        sequential.attach(source).expect("object attaches");
    }

    let left = serde_json::to_value(Payload::build(&hook, &replaced)).expect("payload serializes");
    let right =
        serde_json::to_value(Payload::build(&hook, &sequential)).expect("payload serializes");
    assert_eq!(left["attachments"], right["attachments"]);
    assert_eq!(left["attachments"].as_array().expect("array").len(), 3);
}

#[test]
fn prebuilt_attachments_and_plain_objects_mix() {
    let hook = HookConfig::new("https://hooks.example/T").expect("valid target");
    let mut message = hook.create_message();

    let mut card = Attachment::new(json!({"fallback": "summary"})).expect("valid object");
    card.set_markdown_fields(["fallback"]);

    message.attach(card).expect("attachment attaches");
    message.attach(json!({"title": "plain"})).expect("object attaches");

    let value = serde_json::to_value(Payload::build(&hook, &message)).expect("payload serializes");

    assert_eq!(
        value["attachments"],
        json!([
            {"fallback": "summary", "mrkdwn_in": ["fallback"]},
            {"title": "plain"}
        ])
    );
}

#[test]
fn message_survives_repeated_projection() {
    // No terminal state: projecting (and by extension sending) twice is
    // allowed and yields identical payloads.
    let hook = HookConfig::new("https://hooks.example/T").expect("valid target");
    let mut message = hook.create_message();
    message.set_text("again");

    let first = serde_json::to_value(Payload::build(&hook, &message)).expect("payload serializes");
    let second = serde_json::to_value(Payload::build(&hook, &message)).expect("payload serializes");

    assert_eq!(first, second);
}
