/// Bulk message composition
///
/// `MessageSpec` collects the one-call description of a send (sender,
/// recipients with their per-recipient overrides, subject or subjects,
/// bodies, and global substitutions) and folds it into a normalized
/// [`Mail`] with one personalization per recipient.
use std::collections::BTreeMap;

use crate::error::MailsmithError;
use crate::models::{Content, EmailAddress, Mail, Personalization, Recipient, Subject};

/// How the subject line applies across recipients.
#[derive(Debug, Clone)]
pub enum SubjectSpec {
    /// One subject shared by every recipient, set as the mail-level
    /// default. Recipients carrying their own subject still override it.
    Shared(Subject),
    /// One subject per recipient, paired by position. The sequence length
    /// must match the recipient count.
    PerRecipient(Vec<Subject>),
}

#[derive(Debug, Default)]
pub struct MessageSpec {
    from: Option<EmailAddress>,
    to: Vec<Recipient>,
    subject: Option<SubjectSpec>,
    plain_text: Option<String>,
    html: Option<String>,
    global_substitutions: BTreeMap<String, String>,
}

impl MessageSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, from: impl Into<EmailAddress>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Adds one recipient. Can be called multiple times.
    pub fn to(mut self, recipient: impl Into<Recipient>) -> Self {
        self.to.push(recipient.into());
        self
    }

    pub fn tos<I>(mut self, recipients: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Recipient>,
    {
        self.to.extend(recipients.into_iter().map(Into::into));
        self
    }

    /// One subject shared by every recipient.
    pub fn subject(mut self, subject: impl Into<Subject>) -> Self {
        self.subject = Some(SubjectSpec::Shared(subject.into()));
        self
    }

    /// One subject per recipient, paired by position with the recipient
    /// list.
    pub fn subjects<I>(mut self, subjects: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Subject>,
    {
        self.subject = Some(SubjectSpec::PerRecipient(
            subjects.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn text(mut self, value: impl Into<String>) -> Self {
        self.plain_text = Some(value.into());
        self
    }

    pub fn html(mut self, value: impl Into<String>) -> Self {
        self.html = Some(value.into());
        self
    }

    /// A substitution applied to every generated personalization. Applied
    /// after per-recipient substitutions, so on a shared key the global
    /// value wins.
    pub fn substitution(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.global_substitutions.insert(key.into(), value.into());
        self
    }

    fn is_empty(&self) -> bool {
        self.from.is_none()
            && self.to.is_empty()
            && self.subject.is_none()
            && self.plain_text.is_none()
            && self.html.is_none()
            && self.global_substitutions.is_empty()
    }

    /// Folds the collected description into a [`Mail`], one
    /// personalization per recipient.
    ///
    /// An entirely empty `MessageSpec` yields an empty aggregate, which
    /// serializes to absence; that keeps the fully-manual builder flow
    /// available.
    pub fn compose(self) -> Result<Mail, MailsmithError> {
        if self.is_empty() {
            return Ok(Mail::new());
        }

        if let Some(SubjectSpec::PerRecipient(subjects)) = &self.subject {
            if subjects.len() != self.to.len() {
                return Err(MailsmithError::SubjectCountMismatch {
                    subjects: subjects.len(),
                    recipients: self.to.len(),
                });
            }
        }

        let mut mail = Mail::new();
        if let Some(from) = self.from {
            mail.set_from(from);
        }
        if let Some(SubjectSpec::Shared(subject)) = &self.subject {
            mail.set_subject(subject.clone());
        }

        let recipients = self.to.len();
        for (position, recipient) in self.to.into_iter().enumerate() {
            let mut personalization = Personalization::new();
            personalization.add_to(recipient.email);
            for (key, value) in recipient.substitutions {
                personalization.add_substitution(key, value);
            }
            match &self.subject {
                Some(SubjectSpec::PerRecipient(subjects)) => {
                    personalization.set_subject(subjects[position].clone());
                }
                _ => {
                    if let Some(own) = recipient.subject {
                        personalization.set_subject(own);
                    }
                }
            }
            for (key, value) in &self.global_substitutions {
                personalization.add_substitution(key.clone(), value.clone());
            }
            mail.add_personalization(personalization);
        }

        if let Some(text) = self.plain_text {
            mail.add_content(Content::plain_text(text));
        }
        if let Some(html) = self.html {
            mail.add_content(Content::html(html));
        }

        tracing::debug!(recipients, "composed send request body");
        Ok(mail)
    }
}
