/// The send request body aggregate
///
/// `Mail` collects everything a single send call carries and produces the
/// final JSON document. Serialization emits only fields the caller set, in
/// the endpoint's canonical key order, and applies the same absence
/// filtering recursively to every nested value object.
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::MailsmithError;

use super::email::{Content, EmailAddress, Subject};
use super::personalization::Personalization;
use super::settings::{Asm, Attachment, MailSettings, TrackingSettings};

#[derive(Debug, Clone, Default, Serialize)]
pub struct Mail {
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<EmailAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    personalizations: Option<Vec<Personalization>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<Subject>,
    #[serde(rename = "content", skip_serializing_if = "Option::is_none")]
    contents: Option<Vec<Content>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attachments: Option<Vec<Attachment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sections: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headers: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_args: Option<BTreeMap<String, String>>,
    #[serde(
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    send_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    batch_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    asm: Option<Asm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ip_pool_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mail_settings: Option<MailSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tracking_settings: Option<TrackingSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<EmailAddress>,
}

impl Mail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_from(&mut self, from: impl Into<EmailAddress>) {
        self.from = Some(from.into());
    }

    pub fn from(&self) -> Option<&EmailAddress> {
        self.from.as_ref()
    }

    /// The default target for bare recipient calls: the first
    /// personalization, created on demand.
    fn slot_default(&mut self) -> &mut Personalization {
        let list = self.personalizations.get_or_insert_with(Vec::new);
        if list.is_empty() {
            list.push(Personalization::new());
        }
        &mut list[0]
    }

    /// Resolves an explicit slot index. Valid targets are existing entries
    /// and `len` itself, which appends a fresh entry at that slot; anything
    /// beyond fails before the aggregate is touched.
    fn slot_at(&mut self, index: usize) -> Result<&mut Personalization, MailsmithError> {
        let len = self.personalizations.as_ref().map_or(0, |list| list.len());
        if index > len {
            return Err(MailsmithError::PersonalizationIndex { index, len });
        }
        let list = self.personalizations.get_or_insert_with(Vec::new);
        if index == list.len() {
            list.push(Personalization::new());
        }
        Ok(&mut list[index])
    }

    pub fn add_to(&mut self, to: impl Into<EmailAddress>) {
        self.slot_default().add_to(to);
    }

    pub fn add_to_at(
        &mut self,
        index: usize,
        to: impl Into<EmailAddress>,
    ) -> Result<(), MailsmithError> {
        self.slot_at(index)?.add_to(to);
        Ok(())
    }

    /// Applies [`add_to`](Self::add_to) once per element; an empty input
    /// touches nothing.
    pub fn add_tos<I>(&mut self, tos: I)
    where
        I: IntoIterator,
        I::Item: Into<EmailAddress>,
    {
        for to in tos {
            self.add_to(to);
        }
    }

    /// Applies [`add_to_at`](Self::add_to_at) once per element, all sharing
    /// the same slot target.
    pub fn add_tos_at<I>(&mut self, index: usize, tos: I) -> Result<(), MailsmithError>
    where
        I: IntoIterator,
        I::Item: Into<EmailAddress>,
    {
        for to in tos {
            self.add_to_at(index, to)?;
        }
        Ok(())
    }

    pub fn add_cc(&mut self, cc: impl Into<EmailAddress>) {
        self.slot_default().add_cc(cc);
    }

    pub fn add_cc_at(
        &mut self,
        index: usize,
        cc: impl Into<EmailAddress>,
    ) -> Result<(), MailsmithError> {
        self.slot_at(index)?.add_cc(cc);
        Ok(())
    }

    pub fn add_ccs<I>(&mut self, ccs: I)
    where
        I: IntoIterator,
        I::Item: Into<EmailAddress>,
    {
        for cc in ccs {
            self.add_cc(cc);
        }
    }

    pub fn add_ccs_at<I>(&mut self, index: usize, ccs: I) -> Result<(), MailsmithError>
    where
        I: IntoIterator,
        I::Item: Into<EmailAddress>,
    {
        for cc in ccs {
            self.add_cc_at(index, cc)?;
        }
        Ok(())
    }

    pub fn add_bcc(&mut self, bcc: impl Into<EmailAddress>) {
        self.slot_default().add_bcc(bcc);
    }

    pub fn add_bcc_at(
        &mut self,
        index: usize,
        bcc: impl Into<EmailAddress>,
    ) -> Result<(), MailsmithError> {
        self.slot_at(index)?.add_bcc(bcc);
        Ok(())
    }

    pub fn add_bccs<I>(&mut self, bccs: I)
    where
        I: IntoIterator,
        I::Item: Into<EmailAddress>,
    {
        for bcc in bccs {
            self.add_bcc(bcc);
        }
    }

    pub fn add_bccs_at<I>(&mut self, index: usize, bccs: I) -> Result<(), MailsmithError>
    where
        I: IntoIterator,
        I::Item: Into<EmailAddress>,
    {
        for bcc in bccs {
            self.add_bcc_at(index, bcc)?;
        }
        Ok(())
    }

    /// Appends the supplied personalization as a new list entry and returns
    /// its index, usable with the `*_at` operations. Explicit
    /// personalizations are never merged into an existing slot.
    pub fn add_personalization(&mut self, personalization: Personalization) -> usize {
        let list = self.personalizations.get_or_insert_with(Vec::new);
        list.push(personalization);
        list.len() - 1
    }

    pub fn personalizations(&self) -> Option<&[Personalization]> {
        self.personalizations.as_deref()
    }

    pub fn set_subject(&mut self, subject: impl Into<Subject>) {
        self.subject = Some(subject.into());
    }

    pub fn subject(&self) -> Option<&Subject> {
        self.subject.as_ref()
    }

    /// Appends a content part. Insertion order is preserved, except that
    /// `text/plain` parts are placed ahead of the first `text/html` part;
    /// the endpoint requires plain text before HTML.
    pub fn add_content(&mut self, content: Content) {
        let contents = self.contents.get_or_insert_with(Vec::new);
        if content.is_plain_text() {
            let at = contents
                .iter()
                .position(Content::is_html)
                .unwrap_or(contents.len());
            contents.insert(at, content);
        } else {
            contents.push(content);
        }
    }

    pub fn contents(&self) -> Option<&[Content]> {
        self.contents.as_deref()
    }

    pub fn add_attachment(&mut self, attachment: Attachment) {
        self.attachments.get_or_insert_with(Vec::new).push(attachment);
    }

    pub fn attachments(&self) -> Option<&[Attachment]> {
        self.attachments.as_deref()
    }

    pub fn set_template_id(&mut self, template_id: impl Into<String>) {
        self.template_id = Some(template_id.into());
    }

    pub fn template_id(&self) -> Option<&str> {
        self.template_id.as_deref()
    }

    pub fn add_section(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.sections
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
    }

    pub fn sections(&self) -> Option<&BTreeMap<String, String>> {
        self.sections.as_ref()
    }

    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
    }

    pub fn headers(&self) -> Option<&BTreeMap<String, String>> {
        self.headers.as_ref()
    }

    /// Categories are append-only; duplicates are allowed.
    pub fn add_category(&mut self, category: impl Into<String>) {
        self.categories
            .get_or_insert_with(Vec::new)
            .push(category.into());
    }

    pub fn categories(&self) -> Option<&[String]> {
        self.categories.as_deref()
    }

    /// The value is coerced to its string representation.
    pub fn add_custom_arg(&mut self, key: impl Into<String>, value: impl ToString) {
        self.custom_args
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.to_string());
    }

    pub fn custom_args(&self) -> Option<&BTreeMap<String, String>> {
        self.custom_args.as_ref()
    }

    pub fn set_send_at(&mut self, send_at: DateTime<Utc>) {
        self.send_at = Some(send_at);
    }

    pub fn send_at(&self) -> Option<DateTime<Utc>> {
        self.send_at
    }

    pub fn set_batch_id(&mut self, batch_id: impl Into<String>) {
        self.batch_id = Some(batch_id.into());
    }

    pub fn batch_id(&self) -> Option<&str> {
        self.batch_id.as_deref()
    }

    pub fn set_asm(&mut self, asm: Asm) {
        self.asm = Some(asm);
    }

    pub fn asm(&self) -> Option<&Asm> {
        self.asm.as_ref()
    }

    pub fn set_ip_pool_name(&mut self, ip_pool_name: impl Into<String>) {
        self.ip_pool_name = Some(ip_pool_name.into());
    }

    pub fn ip_pool_name(&self) -> Option<&str> {
        self.ip_pool_name.as_deref()
    }

    pub fn set_mail_settings(&mut self, mail_settings: MailSettings) {
        self.mail_settings = Some(mail_settings);
    }

    pub fn mail_settings(&self) -> Option<&MailSettings> {
        self.mail_settings.as_ref()
    }

    pub fn set_tracking_settings(&mut self, tracking_settings: TrackingSettings) {
        self.tracking_settings = Some(tracking_settings);
    }

    pub fn tracking_settings(&self) -> Option<&TrackingSettings> {
        self.tracking_settings.as_ref()
    }

    pub fn set_reply_to(&mut self, reply_to: impl Into<EmailAddress>) {
        self.reply_to = Some(reply_to.into());
    }

    pub fn reply_to(&self) -> Option<&EmailAddress> {
        self.reply_to.as_ref()
    }

    /// Produces the request document, or `None` if no field was ever set.
    /// An untouched aggregate serializes to explicit absence, never to an
    /// empty object.
    pub fn to_json(&self) -> Option<Value> {
        let value = serde_json::to_value(self).ok()?;
        match value {
            Value::Object(ref map) if map.is_empty() => None,
            value => Some(value),
        }
    }

    /// The fail-fast form of [`to_json`](Self::to_json) for transport
    /// handoff: an empty aggregate is an error.
    pub fn request_body(&self) -> Result<Value, MailsmithError> {
        let body = self.to_json().ok_or(MailsmithError::EmptyMessage)?;
        tracing::debug!(
            personalizations = self.personalizations.as_ref().map_or(0, |list| list.len()),
            contents = self.contents.as_ref().map_or(0, |list| list.len()),
            "assembled send request body"
        );
        Ok(body)
    }
}
