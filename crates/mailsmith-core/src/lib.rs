// Library root - exports public API

pub mod composer;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use composer::{MessageSpec, SubjectSpec};
pub use error::MailsmithError;
pub use models::{
    Asm, Attachment, Content, EmailAddress, Mail, MailSettings, Personalization, Recipient,
    Subject, TrackingSettings,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
