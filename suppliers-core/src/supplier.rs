use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{CoreError, CoreResult};

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_DISABLED: &str = "disabled";

/// Column width of the text attributes in the backing table.
pub const MAX_FIELD_LEN: usize = 63;

/// A supplier we interact with in the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Option<i64>,
    pub name: String,
    pub category: String,
    pub available: bool,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    STATUS_ACTIVE.to_string()
}

/// Write model sent by clients on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierPayload {
    pub name: String,
    pub category: String,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Supplier {
    pub fn new(name: impl Into<String>, category: impl Into<String>, available: bool) -> Self {
        Self {
            id: None,
            name: name.into(),
            category: category.into(),
            available,
            status: default_status(),
        }
    }

    /// Builds a supplier from an untrusted JSON body.
    ///
    /// Any `id` in the body is ignored; the caller decides which id the
    /// record carries.
    pub fn from_json(data: &Value) -> CoreResult<Self> {
        let object = data.as_object().ok_or_else(|| {
            CoreError::Validation(
                "Invalid supplier: body of request contained bad or no data".to_string(),
            )
        })?;

        let name = required_text(object, "name")?;
        let category = required_text(object, "category")?;

        let available = match object.get("available") {
            None => return Err(missing("available")),
            Some(Value::Bool(flag)) => *flag,
            Some(other) => {
                return Err(CoreError::Validation(format!(
                    "Invalid type for boolean [available]: {}",
                    json_type(other)
                )))
            }
        };

        let status = match object.get("status") {
            None | Some(Value::Null) => default_status(),
            Some(_) => required_text(object, "status")?,
        };

        Ok(Self {
            id: None,
            name,
            category,
            available,
            status,
        })
    }

    pub fn from_payload(payload: SupplierPayload) -> CoreResult<Self> {
        let value = serde_json::to_value(&payload)
            .map_err(|e| CoreError::Internal(e.to_string()))?;
        Self::from_json(&value)
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn disable(&mut self) {
        self.status = STATUS_DISABLED.to_string();
    }

    pub fn is_disabled(&self) -> bool {
        self.status == STATUS_DISABLED
    }
}

impl std::fmt::Display for Supplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Supplier {:?} id=[{}]>", self.name, id),
            None => write!(f, "<Supplier {:?} id=[None]>", self.name),
        }
    }
}

fn missing(key: &str) -> CoreError {
    CoreError::Validation(format!("Invalid supplier: missing {}", key))
}

fn required_text(object: &Map<String, Value>, key: &str) -> CoreResult<String> {
    match object.get(key) {
        None => Err(missing(key)),
        Some(Value::String(text)) if text.chars().count() > MAX_FIELD_LEN => {
            Err(CoreError::Validation(format!(
                "Invalid attribute: {} is longer than {} characters",
                key, MAX_FIELD_LEN
            )))
        }
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(CoreError::Validation(format!(
            "Invalid attribute: {} must be a string, not {}",
            key,
            json_type(other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validation_message(result: CoreResult<Supplier>) -> String {
        match result {
            Err(CoreError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_reads_all_fields() {
        let supplier = Supplier::from_json(&json!({
            "name": "Acme",
            "category": "tools",
            "available": true,
            "status": "pending"
        }))
        .unwrap();

        assert_eq!(supplier.id, None);
        assert_eq!(supplier.name, "Acme");
        assert_eq!(supplier.category, "tools");
        assert!(supplier.available);
        assert_eq!(supplier.status, "pending");
    }

    #[test]
    fn test_from_json_defaults_status() {
        let supplier = Supplier::from_json(&json!({
            "name": "Acme",
            "category": "tools",
            "available": false
        }))
        .unwrap();

        assert_eq!(supplier.status, STATUS_ACTIVE);
    }

    #[test]
    fn test_from_json_ignores_body_id() {
        let supplier = Supplier::from_json(&json!({
            "id": 99,
            "name": "Acme",
            "category": "tools",
            "available": true
        }))
        .unwrap();

        assert_eq!(supplier.id, None);
    }

    #[test]
    fn test_from_json_rejects_missing_keys() {
        let msg = validation_message(Supplier::from_json(&json!({})));
        assert_eq!(msg, "Invalid supplier: missing name");

        let msg = validation_message(Supplier::from_json(&json!({
            "name": "Acme",
            "category": "tools"
        })));
        assert_eq!(msg, "Invalid supplier: missing available");
    }

    #[test]
    fn test_from_json_rejects_non_boolean_available() {
        let msg = validation_message(Supplier::from_json(&json!({
            "name": "Acme",
            "category": "tools",
            "available": "true"
        })));
        assert_eq!(msg, "Invalid type for boolean [available]: string");
    }

    #[test]
    fn test_from_json_rejects_non_object_body() {
        let msg = validation_message(Supplier::from_json(&json!([1, 2, 3])));
        assert!(msg.contains("bad or no data"));
    }

    #[test]
    fn test_from_json_rejects_long_names() {
        let long = "x".repeat(MAX_FIELD_LEN + 1);
        let msg = validation_message(Supplier::from_json(&json!({
            "name": long,
            "category": "tools",
            "available": true
        })));
        assert!(msg.starts_with("Invalid attribute: name"));
    }

    #[test]
    fn test_payload_skips_empty_status() {
        let payload = SupplierPayload {
            name: "Acme".to_string(),
            category: "tools".to_string(),
            available: true,
            status: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("status").is_none());

        let supplier = Supplier::from_payload(payload).unwrap();
        assert_eq!(supplier.status, STATUS_ACTIVE);
    }

    #[test]
    fn test_disable() {
        let mut supplier = Supplier::new("Acme", "tools", true).with_id(4);
        assert!(!supplier.is_disabled());
        supplier.disable();
        assert!(supplier.is_disabled());
        assert_eq!(supplier.to_string(), "<Supplier \"Acme\" id=[4]>");
    }
}
