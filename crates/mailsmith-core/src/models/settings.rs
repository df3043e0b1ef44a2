/// Opaque pass-through blocks of the send request
///
/// These are produced by sibling builders outside this crate and carried
/// through the request body untouched. This core only decides whether to
/// include them and where; it never re-implements their internal schema.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Subscription/unsubscribe-group configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Asm(Value);

impl Asm {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Asm {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Send-level mail settings block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct MailSettings(Value);

impl MailSettings {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for MailSettings {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Open/click tracking settings block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TrackingSettings(Value);

impl TrackingSettings {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for TrackingSettings {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// One already-encoded attachment entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Attachment(Value);

impl Attachment {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Attachment {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blocks_serialize_transparently() {
        let asm = Asm::new(json!({"group_id": 42, "groups_to_display": [42, 43]}));
        let value = serde_json::to_value(&asm).unwrap();
        assert_eq!(value, json!({"group_id": 42, "groups_to_display": [42, 43]}));

        let settings = MailSettings::from(json!({"sandbox_mode": {"enable": true}}));
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["sandbox_mode"]["enable"], json!(true));
    }
}
