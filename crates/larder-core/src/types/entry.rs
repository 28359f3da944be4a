//! Recipe cache entry type

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::recipe::RecipeResponse;
use crate::{Document, Result, StoreError};

/// A cached recipe response, stored under its pantry fingerprint
///
/// Entries are never deleted. Once `expires_at` has passed the entry is
/// stale and gets overwritten by the next miss for the same fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCacheEntry {
    /// Pantry fingerprint, equal to the document key
    pub fingerprint: String,
    /// When the entry was written
    pub created_at: DateTime<Utc>,
    /// When the entry stops being served
    pub expires_at: DateTime<Utc>,
    /// The normalized response
    pub response: RecipeResponse,
    /// Model that generated the response
    pub model: String,
    /// Prompt/schema version
    pub version: u32,
}

impl RecipeCacheEntry {
    /// Create an entry written at `now` that stays fresh for `ttl`
    ///
    /// Returns `None` when `ttl` is not positive or `now + ttl` is out of
    /// range, so `expires_at > created_at` always holds.
    pub fn new(
        fingerprint: impl Into<String>,
        response: RecipeResponse,
        model: impl Into<String>,
        version: u32,
        now: DateTime<Utc>,
        ttl: TimeDelta,
    ) -> Option<Self> {
        if ttl <= TimeDelta::zero() {
            return None;
        }
        let expires_at = now.checked_add_signed(ttl)?;
        Some(Self {
            fingerprint: fingerprint.into(),
            created_at: now,
            expires_at,
            response,
            model: model.into(),
            version,
        })
    }

    /// Check if the entry can still be served at `now`
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    /// Get remaining time before the entry goes stale
    pub fn ttl_remaining(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        let remaining = self.expires_at - now;
        (remaining > TimeDelta::zero()).then_some(remaining)
    }

    /// Get age of the entry
    pub fn age(&self, now: DateTime<Utc>) -> TimeDelta {
        (now - self.created_at).max(TimeDelta::zero())
    }

    /// Encode as a store document
    pub fn to_document(&self) -> Result<Document> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(StoreError::Serialization(format!(
                "cache entry encoded as {other}, expected an object"
            ))),
            Err(e) => Err(StoreError::Serialization(e.to_string())),
        }
    }

    /// Decode from a store document
    pub fn from_document(document: Document) -> Result<Self> {
        serde_json::from_value(Value::Object(document))
            .map_err(|e| StoreError::Deserialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_new_entry_expires_after_ttl() {
        let entry = RecipeCacheEntry::new(
            "abc",
            RecipeResponse::default(),
            "fake-model",
            1,
            at(8),
            TimeDelta::hours(24),
        )
        .unwrap();
        assert!(entry.expires_at > entry.created_at);
        assert_eq!(entry.expires_at - entry.created_at, TimeDelta::hours(24));
        assert!(entry.is_fresh(at(20)));
        assert_eq!(entry.ttl_remaining(at(20)), Some(TimeDelta::hours(12)));
        assert_eq!(entry.age(at(20)), TimeDelta::hours(12));
    }

    #[test]
    fn test_expiry_is_strict() {
        let entry = RecipeCacheEntry::new(
            "abc",
            RecipeResponse::default(),
            "fake-model",
            1,
            at(0),
            TimeDelta::hours(1),
        )
        .unwrap();
        assert!(!entry.is_fresh(at(1)));
        assert!(entry.ttl_remaining(at(1)).is_none());
    }

    #[test]
    fn test_non_positive_or_overflowing_ttl_rejected() {
        let build = |ttl| {
            RecipeCacheEntry::new("abc", RecipeResponse::default(), "m", 1, at(0), ttl)
        };
        assert!(build(TimeDelta::zero()).is_none());
        assert!(build(TimeDelta::seconds(-5)).is_none());
        assert!(build(TimeDelta::MAX).is_none());
        assert!(build(TimeDelta::milliseconds(1)).is_some());
    }

    #[test]
    fn test_document_uses_camel_case() {
        let entry = RecipeCacheEntry::new(
            "abc",
            RecipeResponse::default(),
            "fake-model",
            1,
            at(0),
            TimeDelta::hours(24),
        )
        .unwrap();
        let doc = entry.to_document().unwrap();
        assert!(doc.contains_key("createdAt"));
        assert!(doc.contains_key("expiresAt"));
        assert_eq!(doc["fingerprint"], "abc");

        let decoded = RecipeCacheEntry::from_document(doc).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn test_from_malformed_document() {
        let mut doc = Document::new();
        doc.insert("fingerprint".into(), Value::from("abc"));
        let err = RecipeCacheEntry::from_document(doc).unwrap_err();
        assert!(matches!(err, StoreError::Deserialization(_)));
    }
}
