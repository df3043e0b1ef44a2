/// A single addressing unit of the send request
///
/// Each personalization carries its own recipient lists and optional
/// overrides for the subject, template substitutions, custom args, and send
/// time. The API sends one physical email per personalization entry.
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::email::{EmailAddress, Subject};

/// Every field starts absent; only fields the caller touched appear in the
/// serialized output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Personalization {
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<Vec<EmailAddress>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cc: Option<Vec<EmailAddress>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bcc: Option<Vec<EmailAddress>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<Subject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    substitutions: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_args: Option<BTreeMap<String, String>>,
    #[serde(
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    send_at: Option<DateTime<Utc>>,
}

impl Personalization {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to(&mut self, to: impl Into<EmailAddress>) {
        self.to.get_or_insert_with(Vec::new).push(to.into());
    }

    pub fn add_cc(&mut self, cc: impl Into<EmailAddress>) {
        self.cc.get_or_insert_with(Vec::new).push(cc.into());
    }

    pub fn add_bcc(&mut self, bcc: impl Into<EmailAddress>) {
        self.bcc.get_or_insert_with(Vec::new).push(bcc.into());
    }

    pub fn set_subject(&mut self, subject: impl Into<Subject>) {
        self.subject = Some(subject.into());
    }

    /// Keys are unique; inserting an existing key replaces its value.
    pub fn add_substitution(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.substitutions
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
    }

    /// The value is coerced to its string representation.
    pub fn add_custom_arg(&mut self, key: impl Into<String>, value: impl ToString) {
        self.custom_args
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.to_string());
    }

    pub fn set_send_at(&mut self, send_at: DateTime<Utc>) {
        self.send_at = Some(send_at);
    }

    pub fn to(&self) -> Option<&[EmailAddress]> {
        self.to.as_deref()
    }

    pub fn cc(&self) -> Option<&[EmailAddress]> {
        self.cc.as_deref()
    }

    pub fn bcc(&self) -> Option<&[EmailAddress]> {
        self.bcc.as_deref()
    }

    pub fn subject(&self) -> Option<&Subject> {
        self.subject.as_ref()
    }

    pub fn substitutions(&self) -> Option<&BTreeMap<String, String>> {
        self.substitutions.as_ref()
    }

    pub fn custom_args(&self) -> Option<&BTreeMap<String, String>> {
        self.custom_args.as_ref()
    }

    pub fn send_at(&self) -> Option<DateTime<Utc>> {
        self.send_at
    }
}
