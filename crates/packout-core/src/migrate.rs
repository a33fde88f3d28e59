//! Load-time migration
//!
//! Older documents stored items without a `kind`, the payload being implied by which of
//! `qty` / `status` / `len` was present, sometimes as strings. Everything is converted to
//! the canonical [`Item`] shape here, once, so nothing downstream has to guess.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{PackoutError, PackoutResult};
use crate::folder::{sort_folders, Folder, FolderId};
use crate::item::{Item, ItemKind, Payload, Status};
use crate::store::Documents;

#[derive(Deserialize)]
struct RawFolder {
    name: String,
    #[serde(default)]
    items: Option<Vec<Value>>,
}

/// Build the folder list from a collection listing.
///
/// Documents without a string `name` are page meta records and are skipped.
pub fn folders_from_documents(docs: &Documents) -> PackoutResult<Vec<Folder>> {
    let mut folders = Vec::new();

    for (doc_id, body) in docs {
        if !body.get("name").is_some_and(Value::is_string) {
            tracing::trace!(doc_id = %doc_id, "skipping non-folder document");
            continue;
        }
        let raw: RawFolder = serde_json::from_value(body.clone()).map_err(|source| PackoutError::Decode {
            doc_id: doc_id.clone(),
            source,
        })?;
        folders.push(Folder {
            id: FolderId::from_stored(doc_id.clone()),
            name: raw.name,
            items: raw.items.unwrap_or_default().iter().map(migrate_item).collect(),
        });
    }

    sort_folders(&mut folders);
    Ok(folders)
}

/// Convert one stored item, canonical or legacy, into an [`Item`].
pub fn migrate_item(raw: &Value) -> Item {
    let obj = match raw {
        Value::Object(obj) => obj,
        Value::String(name) => return Item::new(name.clone(), ItemKind::Quantity),
        _ => return Item::new("", ItemKind::Quantity),
    };

    let name = obj.get("name").and_then(Value::as_str).unwrap_or_default().to_string();

    let explicit = obj.get("kind").and_then(Value::as_str).and_then(ItemKind::parse);
    let kind = explicit.unwrap_or_else(|| {
        if obj.contains_key("status") {
            ItemKind::Status
        } else if obj.contains_key("len") {
            ItemKind::Length
        } else {
            ItemKind::Quantity
        }
    });

    let payload = match kind {
        ItemKind::Quantity => Payload::Quantity { qty: read_qty(obj.get("qty")) },
        ItemKind::Status => Payload::Status {
            status: obj.get("status").and_then(Value::as_str).and_then(Status::parse),
        },
        ItemKind::Length => Payload::Length { len: read_len(obj.get("len")) },
    };

    Item { name, payload }
}

fn read_qty(value: Option<&Value>) -> u32 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() && n > 0.0 {
        n.min(u32::MAX as f64).trunc() as u32
    } else {
        0
    }
}

fn read_len(value: Option<&Value>) -> Option<f64> {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_item_passes_through() {
        let item = migrate_item(&json!({"name": "Ladder", "kind": "length", "len": 3.5}));
        assert_eq!(item, Item::length("Ladder", Some(3.5)));
    }

    #[test]
    fn test_legacy_qty_inferred() {
        let item = migrate_item(&json!({"name": "Cones", "qty": 6}));
        assert_eq!(item, Item::quantity("Cones", 6));
    }

    #[test]
    fn test_legacy_status_inferred_even_with_qty() {
        let item = migrate_item(&json!({"name": "Propane", "qty": 0, "status": "low"}));
        assert_eq!(item, Item::status("Propane", Some(Status::Low)));
    }

    #[test]
    fn test_legacy_len_string() {
        let item = migrate_item(&json!({"name": "Hose", "len": " 12.5 "}));
        assert_eq!(item, Item::length("Hose", Some(12.5)));
    }

    #[test]
    fn test_explicit_kind_ignores_other_fields() {
        let item = migrate_item(&json!({"name": "Rope", "kind": "length", "qty": 7}));
        assert_eq!(item, Item::length("Rope", None));
    }

    #[test]
    fn test_bad_values_become_zero() {
        assert_eq!(migrate_item(&json!({"qty": -3})), Item::quantity("", 0));
        assert_eq!(migrate_item(&json!({"qty": "lots"})), Item::quantity("", 0));
        assert_eq!(migrate_item(&json!({"status": "sparkly"})), Item::status("", None));
        assert_eq!(migrate_item(&json!({"status": null})), Item::status("", None));
    }

    #[test]
    fn test_non_object_items() {
        assert_eq!(migrate_item(&json!("Tarp")), Item::quantity("Tarp", 0));
        assert_eq!(migrate_item(&json!(42)), Item::quantity("", 0));
    }

    #[test]
    fn test_folders_skip_meta_and_sort() {
        let mut docs = Documents::new();
        docs.insert("truck-b".into(), json!({"name": "Truck B", "items": []}));
        docs.insert("_meta".into(), json!({"collapsed": {"truck-b": true}}));
        docs.insert("attic".into(), json!({"name": "Attic", "items": [{"name": "Fan", "qty": 1}]}));
        docs.insert("empty".into(), json!({"name": "Empty", "items": null}));

        let folders = folders_from_documents(&docs).unwrap();
        let names: Vec<_> = folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Attic", "Empty", "Truck B"]);
        assert_eq!(folders[0].items, vec![Item::quantity("Fan", 1)]);
        assert!(folders[1].items.is_empty());
    }

    #[test]
    fn test_malformed_items_is_decode_error() {
        let mut docs = Documents::new();
        docs.insert("bad".into(), json!({"name": "Bad", "items": "nope"}));
        let err = folders_from_documents(&docs).unwrap_err();
        assert!(matches!(err, PackoutError::Decode { ref doc_id, .. } if doc_id == "bad"));
    }
}
