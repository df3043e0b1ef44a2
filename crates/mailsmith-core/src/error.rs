/// Error types for request body assembly
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MailsmithError {
    #[error("Subject count mismatch: {subjects} subjects for {recipients} recipients")]
    SubjectCountMismatch { subjects: usize, recipients: usize },

    #[error("Personalization index {index} out of range ({len} entries)")]
    PersonalizationIndex { index: usize, len: usize },

    #[error("Empty message: no from, personalizations, or content set")]
    EmptyMessage,
}
