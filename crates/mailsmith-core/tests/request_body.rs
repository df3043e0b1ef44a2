/// End-to-end assembly and serialization of send request bodies
use chrono::DateTime;
use serde_json::json;

use mailsmith_core::{
    Asm, Attachment, Content, EmailAddress, Mail, MailSettings, MessageSpec, Personalization,
    Recipient, TrackingSettings,
};

#[test]
fn test_minimal_send_document() {
    let mail = MessageSpec::new()
        .from("a@x.com")
        .to("b@x.com")
        .subject("Hi")
        .text("hello")
        .compose()
        .unwrap();

    let body = mail.request_body().unwrap();
    assert_eq!(
        body,
        json!({
            "from": {"address": "a@x.com"},
            "personalizations": [{"to": [{"address": "b@x.com"}]}],
            "subject": {"text": "Hi"},
            "content": [{"type": "text/plain", "value": "hello"}],
        })
    );
}

#[test]
fn test_full_send_document() {
    let mut mail = MessageSpec::new()
        .from(EmailAddress::with_name("orders@example.com", "Example Orders"))
        .to(Recipient::new(EmailAddress::with_name("alice@example.com", "Alice"))
            .substitution("-order-", "1042"))
        .to(Recipient::new("bob@example.com").substitution("-order-", "1043"))
        .subjects(["Your order 1042", "Your order 1043"])
        .text("Thanks for your order")
        .html("<p>Thanks for your order</p>")
        .substitution("-support-", "help@example.com")
        .compose()
        .unwrap();

    // post-compose edits through the aggregate's own operations
    mail.add_cc_at(0, "archive@example.com").unwrap();
    mail.set_template_id("d-order-confirmation");
    mail.add_section("%footer%", "Example Inc.");
    mail.add_header("X-Campaign", "orders");
    mail.add_category("transactional");
    mail.add_custom_arg("shard", 12);
    mail.set_send_at(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
    mail.set_batch_id("batch-7");
    mail.set_asm(Asm::new(json!({"group_id": 9, "groups_to_display": [9]})));
    mail.set_ip_pool_name("transactional");
    mail.set_mail_settings(MailSettings::new(json!({"sandbox_mode": {"enable": true}})));
    mail.set_tracking_settings(TrackingSettings::new(json!({"open_tracking": {"enable": true}})));
    mail.set_reply_to(EmailAddress::new("replies@example.com"));
    mail.add_attachment(Attachment::new(json!({
        "content": "SGVsbG8sIFdvcmxkIQ==",
        "type": "text/plain",
        "filename": "receipt.txt",
    })));

    let body = mail.request_body().unwrap();
    let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        [
            "from",
            "personalizations",
            "content",
            "attachments",
            "template_id",
            "sections",
            "headers",
            "categories",
            "custom_args",
            "send_at",
            "batch_id",
            "asm",
            "ip_pool_name",
            "mail_settings",
            "tracking_settings",
            "reply_to",
        ]
    );

    assert_eq!(
        body["personalizations"][0],
        json!({
            "to": [{"address": "alice@example.com", "name": "Alice"}],
            "cc": [{"address": "archive@example.com"}],
            "subject": {"text": "Your order 1042"},
            "substitutions": {"-order-": "1042", "-support-": "help@example.com"},
        })
    );
    assert_eq!(
        body["personalizations"][1]["subject"],
        json!({"text": "Your order 1043"})
    );
    assert_eq!(body["custom_args"], json!({"shard": "12"}));
    assert_eq!(body["send_at"], json!(1_700_000_000));
    assert_eq!(
        body["content"],
        json!([
            {"type": "text/plain", "value": "Thanks for your order"},
            {"type": "text/html", "value": "<p>Thanks for your order</p>"},
        ])
    );
}

#[test]
fn test_round_trip_filtering_is_idempotent() {
    let mut mail = Mail::new();
    mail.set_from("a@x.com");
    mail.add_to("b@x.com");
    mail.add_category("alerts");

    let body = mail.to_json().unwrap();
    let reparsed: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&body).unwrap()).unwrap();

    assert_eq!(reparsed, body);
    let keys: Vec<&str> = reparsed
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["from", "personalizations", "categories"]);
}

#[test]
fn test_manual_flow_with_explicit_personalizations() {
    let mut mail = Mail::new();
    mail.set_from("noreply@example.com");

    let mut first = Personalization::new();
    first.add_to(EmailAddress::new("a@x.com"));
    first.set_subject("For A");
    let first_index = mail.add_personalization(first);

    let mut second = Personalization::new();
    second.add_to(EmailAddress::new("b@x.com"));
    let second_index = mail.add_personalization(second);

    mail.add_bcc_at(second_index, "audit@example.com").unwrap();
    mail.add_content(Content::plain_text("hello"));

    assert_eq!((first_index, second_index), (0, 1));
    let body = mail.request_body().unwrap();
    assert_eq!(body["personalizations"][0]["subject"], json!({"text": "For A"}));
    assert_eq!(
        body["personalizations"][1]["bcc"],
        json!([{"address": "audit@example.com"}])
    );
}

#[test]
fn test_empty_aggregate_has_no_body() {
    let mail = Mail::new();
    assert!(mail.to_json().is_none());
    assert!(mail.request_body().is_err());
}
