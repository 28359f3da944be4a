//! Pantry enrichment: canonical items with urgency metadata

use chrono::NaiveDate;

use larder_core::{PantryItemEnriched, PantryItemRaw};

use crate::urgency::{days_until, is_expiring_soon};

/// Enrich raw pantry items against `today`
///
/// Output order matches input order. Total: every input yields an item.
pub fn enrich(raw: &[PantryItemRaw], today: NaiveDate) -> Vec<PantryItemEnriched> {
    raw.iter().map(|item| enrich_item(item, today)).collect()
}

/// Enrich a single item
pub fn enrich_item(item: &PantryItemRaw, today: NaiveDate) -> PantryItemEnriched {
    let days_left = item.expiry_text().and_then(|expiry| days_until(expiry, today));
    PantryItemEnriched {
        days_left,
        expiring_soon: is_expiring_soon(days_left),
        ..canonical(item)
    }
}

/// Canonical items without urgency signals
///
/// Used when the enrichment stage is switched off: names and quantities are
/// still coerced, but no expiry is computed.
pub fn passthrough(raw: &[PantryItemRaw]) -> Vec<PantryItemEnriched> {
    raw.iter().map(canonical).collect()
}

/// Stable sort by urgency: fewest days left first, unknown expiry last
pub fn sort_by_urgency(items: &mut [PantryItemEnriched]) {
    items.sort_by_key(|item| item.days_left.unwrap_or(i64::MAX));
}

fn canonical(item: &PantryItemRaw) -> PantryItemEnriched {
    PantryItemEnriched {
        name: item.name_text().trim().to_string(),
        quantity: coerce_quantity(item.quantity_number()),
        expiry_iso: item.expiry_text().map(str::to_string),
        days_left: None,
        expiring_soon: false,
    }
}

/// Finite, non-negative quantity; anything else becomes 0
fn coerce_quantity(quantity: Option<f64>) -> f64 {
    match quantity {
        Some(q) if q.is_finite() && q > 0.0 => q,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn raw(value: serde_json::Value) -> PantryItemRaw {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_enrich_urgency() {
        let items = enrich(
            &[
                PantryItemRaw::new("Milk", 1.0).expires("2024-01-13"),
                PantryItemRaw::new("Rice", 2.0).expires("2024-01-14"),
                PantryItemRaw::new("Salt", 1.0),
            ],
            today(),
        );

        assert_eq!(items[0].days_left, Some(3));
        assert!(items[0].expiring_soon);
        assert_eq!(items[1].days_left, Some(4));
        assert!(!items[1].expiring_soon);
        assert_eq!(items[2].days_left, None);
        assert!(!items[2].expiring_soon);
    }

    #[test]
    fn test_name_trimmed() {
        let item = enrich_item(&PantryItemRaw::new("  Egg \t", 1.0), today());
        assert_eq!(item.name, "Egg");
    }

    #[test]
    fn test_quantity_coercion() {
        let cases = [
            (json!({"name": "a"}), 0.0),
            (json!({"name": "a", "quantity": null}), 0.0),
            (json!({"name": "a", "quantity": "lots"}), 0.0),
            (json!({"name": "a", "quantity": "3"}), 3.0),
            (json!({"name": "a", "quantity": -2}), 0.0),
            (json!({"name": "a", "quantity": 1.5}), 1.5),
            (json!({"name": "a", "quantity": true}), 0.0),
        ];
        for (value, expected) in cases {
            assert_eq!(enrich_item(&raw(value.clone()), today()).quantity, expected, "{value}");
        }
    }

    #[test]
    fn test_unparsable_expiry_kept_but_no_days() {
        let item = enrich_item(
            &raw(json!({"name": "Tofu", "quantity": 1, "expiry_iso": "soonish"})),
            today(),
        );
        assert_eq!(item.expiry_iso.as_deref(), Some("soonish"));
        assert_eq!(item.days_left, None);
        assert!(!item.expiring_soon);
    }

    #[test]
    fn test_preserves_input_order() {
        let items = enrich(
            &[
                PantryItemRaw::new("b", 1.0).expires("2024-01-20"),
                PantryItemRaw::new("a", 1.0).expires("2024-01-11"),
            ],
            today(),
        );
        assert_eq!(items[0].name, "b");
        assert_eq!(items[1].name, "a");
    }

    #[test]
    fn test_sort_by_urgency_none_last() {
        let mut items = enrich(
            &[
                PantryItemRaw::new("salt", 1.0),
                PantryItemRaw::new("rice", 1.0).expires("2024-02-01"),
                PantryItemRaw::new("milk", 1.0).expires("2024-01-11"),
                PantryItemRaw::new("ham", 1.0).expires("2024-01-09"),
                PantryItemRaw::new("pepper", 1.0),
            ],
            today(),
        );
        sort_by_urgency(&mut items);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["ham", "milk", "rice", "salt", "pepper"]);
    }

    #[test]
    fn test_passthrough_has_no_urgency() {
        let items = passthrough(&[PantryItemRaw::new(" Milk ", 1.0).expires("2024-01-11")]);
        assert_eq!(items[0].name, "Milk");
        assert_eq!(items[0].expiry_iso.as_deref(), Some("2024-01-11"));
        assert_eq!(items[0].days_left, None);
        assert!(!items[0].expiring_soon);
    }
}
