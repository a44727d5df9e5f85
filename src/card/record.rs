//! The user record returned by the lookup API
//!
//! The card only reads `id`, `name` and `email`. Anything else the API sends
//! is kept verbatim so the stored record equals the response body.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A fetched user record
///
/// All three known fields are optional: the API contract promises them, but
/// a body of `{}` is still a successful load and renders with empty text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Record id as sent by the API (number or string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Fields the card does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    /// Build a record with a name and email (no id)
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            email: Some(email.into()),
            extra: Map::new(),
        }
    }

    /// Attach an id
    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Display name, empty when the API omitted it
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Email, empty when the API omitted it
    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    /// Parse a response body. Only JSON objects are records.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_record() {
        let record =
            UserRecord::from_json(json!({"id": 1, "name": "Alice", "email": "a@x.com"})).unwrap();
        assert_eq!(record.id, Some(json!(1)));
        assert_eq!(record.display_name(), "Alice");
        assert_eq!(record.display_email(), "a@x.com");
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let body = json!({"id": "u-7", "name": "Bob", "email": "b@x.com", "role": "admin"});
        let record = UserRecord::from_json(body.clone()).unwrap();
        assert_eq!(record.extra.get("role"), Some(&json!("admin")));
        assert_eq!(serde_json::to_value(&record).unwrap(), body);
    }

    #[test]
    fn test_empty_object_is_a_record() {
        let record = UserRecord::from_json(json!({})).unwrap();
        assert_eq!(record, UserRecord::default());
        assert_eq!(record.display_name(), "");
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(UserRecord::from_json(json!([1, 2, 3])).is_err());
        assert!(UserRecord::from_json(json!("Alice")).is_err());
    }
}
