//! Pantry item types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A pantry item as received from the caller
///
/// No invariants are enforced here. Every field is kept as loosely-typed
/// JSON so malformed input reaches the enricher instead of failing
/// deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PantryItemRaw {
    /// Item name
    #[serde(default)]
    pub name: Option<Value>,
    /// Quantity on hand
    #[serde(default)]
    pub quantity: Option<Value>,
    /// Expiry date in ISO form
    #[serde(default)]
    pub expiry_iso: Option<Value>,
}

impl PantryItemRaw {
    /// Create an item with a name and quantity and no expiry date
    pub fn new(name: impl Into<String>, quantity: f64) -> Self {
        Self {
            name: Some(Value::String(name.into())),
            quantity: Some(Value::from(quantity)),
            expiry_iso: None,
        }
    }

    /// Set the expiry date
    pub fn expires(mut self, expiry_iso: impl Into<String>) -> Self {
        self.expiry_iso = Some(Value::String(expiry_iso.into()));
        self
    }

    /// Name as text; numbers and booleans are stringified, anything else is empty
    pub fn name_text(&self) -> String {
        match &self.name {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// Quantity as a number, if it is a JSON number or a numeric string
    pub fn quantity_number(&self) -> Option<f64> {
        match &self.quantity {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Expiry date text, if present as a string
    pub fn expiry_text(&self) -> Option<&str> {
        match &self.expiry_iso {
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Urgency bucket used for fingerprinting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrgencyBucket {
    /// Expires within the expiring-soon window
    Soon,
    /// Expires later or has no known expiry
    Later,
}

impl UrgencyBucket {
    /// Get bucket as string label
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyBucket::Soon => "soon",
            UrgencyBucket::Later => "later",
        }
    }
}

/// A pantry item in canonical form, carrying urgency metadata
///
/// `expiring_soon` is true iff `days_left` is known and within the
/// expiring-soon window. `days_left` is `None` iff the expiry date was
/// absent or unparsable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItemEnriched {
    /// Trimmed name (may be empty)
    pub name: String,
    /// Quantity, never negative
    pub quantity: f64,
    /// Expiry date as received
    pub expiry_iso: Option<String>,
    /// Whole calendar days until expiry; negative once expired
    pub days_left: Option<i64>,
    /// Whether the item should be used up first
    pub expiring_soon: bool,
}

impl PantryItemEnriched {
    /// Urgency bucket for this item
    pub fn urgency_bucket(&self) -> UrgencyBucket {
        if self.expiring_soon {
            UrgencyBucket::Soon
        } else {
            UrgencyBucket::Later
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lenient_deserialize() {
        let raw: PantryItemRaw =
            serde_json::from_value(json!({"name": "Milk", "quantity": "2", "expiry_iso": null}))
                .unwrap();
        assert_eq!(raw.name_text(), "Milk");
        assert_eq!(raw.quantity_number(), Some(2.0));
        assert_eq!(raw.expiry_text(), None);
    }

    #[test]
    fn test_missing_fields() {
        let raw: PantryItemRaw = serde_json::from_value(json!({})).unwrap();
        assert_eq!(raw.name_text(), "");
        assert_eq!(raw.quantity_number(), None);
    }

    #[test]
    fn test_non_numeric_quantity() {
        let raw: PantryItemRaw =
            serde_json::from_value(json!({"name": 7, "quantity": "a few"})).unwrap();
        assert_eq!(raw.name_text(), "7");
        assert_eq!(raw.quantity_number(), None);
    }

    #[test]
    fn test_builder() {
        let raw = PantryItemRaw::new("eggs", 6.0).expires("2024-01-13");
        assert_eq!(raw.name_text(), "eggs");
        assert_eq!(raw.quantity_number(), Some(6.0));
        assert_eq!(raw.expiry_text(), Some("2024-01-13"));
    }

    #[test]
    fn test_bucket() {
        let item = PantryItemEnriched {
            name: "eggs".into(),
            quantity: 6.0,
            expiry_iso: None,
            days_left: None,
            expiring_soon: false,
        };
        assert_eq!(item.urgency_bucket().as_str(), "later");
    }
}
