/// Data models for the send request body
pub mod email;
pub mod mail;
pub mod personalization;
pub mod settings;

// Re-export commonly used types
pub use email::*;
pub use mail::*;
pub use personalization::*;
pub use settings::*;
