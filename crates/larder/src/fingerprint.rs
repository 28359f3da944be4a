//! Order-independent pantry fingerprints
//!
//! A fingerprint identifies a pantry state for caching. Two pantries get the
//! same fingerprint when they hold the same `(name, quantity, urgency
//! bucket)` tuples, whatever their order, casing, or spacing. The exact
//! number of days left does not matter, only whether an item is expiring
//! soon.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fmt;

use larder_core::PantryItemEnriched;

const FIELD_SEPARATOR: char = ':';
const ITEM_SEPARATOR: &str = "|";

/// Hex SHA-256 digest of a pantry state
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wrap an already-computed digest, e.g. one read back from a store key
impl From<String> for Fingerprint {
    fn from(digest: String) -> Self {
        Self(digest)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Fingerprint a set of enriched pantry items
pub fn fingerprint(items: &[PantryItemEnriched]) -> Fingerprint {
    Fingerprint(sha256_hex(&canonical_form(items)))
}

/// The string that gets hashed: sorted, de-duplicated item keys joined by `|`
pub fn canonical_form(items: &[PantryItemEnriched]) -> String {
    let keys: BTreeSet<String> = items.iter().map(item_key).collect();
    keys.into_iter().collect::<Vec<_>>().join(ITEM_SEPARATOR)
}

/// `name:quantity:bucket` for one item
fn item_key(item: &PantryItemEnriched) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        normalize_name(&item.name),
        item.quantity,
        item.urgency_bucket().as_str(),
        sep = FIELD_SEPARATOR,
    )
}

/// Trim, lowercase, and collapse whitespace runs to a single space
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
