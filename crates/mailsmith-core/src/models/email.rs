/// Value objects for the send request body
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A sender or recipient address, used for from/to/cc/bcc/reply-to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailAddress {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmailAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
        }
    }

    pub fn with_name(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: Some(name.into()),
        }
    }
}

impl From<&str> for EmailAddress {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for EmailAddress {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}

/// A subject line, attachable at the mail level (default) or per
/// personalization (override)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subject {
    pub text: String,
}

impl Subject {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl From<&str> for Subject {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Subject {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// One MIME-typed body fragment of the message
///
/// The wire key for the MIME type is `type`, per the send endpoint schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Content {
    #[serde(rename = "type")]
    pub mime_type: String,
    pub value: String,
}

impl Content {
    pub fn new(mime_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            value: value.into(),
        }
    }

    pub fn plain_text(value: impl Into<String>) -> Self {
        Self::new(mime::TEXT_PLAIN.essence_str(), value)
    }

    pub fn html(value: impl Into<String>) -> Self {
        Self::new(mime::TEXT_HTML.essence_str(), value)
    }

    pub(crate) fn is_plain_text(&self) -> bool {
        self.mime_type == mime::TEXT_PLAIN.essence_str()
    }

    pub(crate) fn is_html(&self) -> bool {
        self.mime_type == mime::TEXT_HTML.essence_str()
    }
}

/// A recipient plus the per-recipient overrides it carries into composition:
/// an optional own subject and own template substitutions
#[derive(Debug, Clone)]
pub struct Recipient {
    pub email: EmailAddress,
    pub subject: Option<Subject>,
    pub substitutions: BTreeMap<String, String>,
}

impl Recipient {
    pub fn new(email: impl Into<EmailAddress>) -> Self {
        Self {
            email: email.into(),
            subject: None,
            substitutions: BTreeMap::new(),
        }
    }

    pub fn subject(mut self, subject: impl Into<Subject>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn substitution(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.substitutions.insert(key.into(), value.into());
        self
    }
}

impl From<EmailAddress> for Recipient {
    fn from(email: EmailAddress) -> Self {
        Self::new(email)
    }
}

impl From<&str> for Recipient {
    fn from(address: &str) -> Self {
        Self::new(EmailAddress::new(address))
    }
}

impl From<String> for Recipient {
    fn from(address: String) -> Self {
        Self::new(EmailAddress::new(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_address_serialization() {
        let addr = EmailAddress::with_name("test@example.com", "Test User");

        let json = serde_json::to_value(&addr).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"address": "test@example.com", "name": "Test User"})
        );
    }

    #[test]
    fn test_email_address_name_absent() {
        let addr = EmailAddress::new("test@example.com");

        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, r#"{"address":"test@example.com"}"#);
    }

    #[test]
    fn test_content_wire_shape() {
        let content = Content::plain_text("hello");
        let json = serde_json::to_string(&content).unwrap();
        assert_eq!(json, r#"{"type":"text/plain","value":"hello"}"#);

        let content = Content::html("<p>hello</p>");
        assert_eq!(content.mime_type, "text/html");
    }

    #[test]
    fn test_subject_fragment() {
        let subject = Subject::from("Hi");
        let json = serde_json::to_value(&subject).unwrap();
        assert_eq!(json, serde_json::json!({"text": "Hi"}));
    }

    #[test]
    fn test_recipient_carries_overrides() {
        let recipient = Recipient::new("user@example.com")
            .subject("Your invoice")
            .substitution("-name-", "Alice");

        assert_eq!(recipient.email.address, "user@example.com");
        assert_eq!(recipient.subject, Some(Subject::new("Your invoice")));
        assert_eq!(
            recipient.substitutions.get("-name-").map(String::as_str),
            Some("Alice")
        );
    }
}
