//! Item Entity
//!
//! An inventory entry. Every item carries exactly one payload, selected by its kind.

use serde::{Deserialize, Serialize};

/// Fill level of a status item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Full,
    Mid,
    Low,
    Empty,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Full, Status::Mid, Status::Low, Status::Empty];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Full => "full",
            Status::Mid => "mid",
            Status::Low => "low",
            Status::Empty => "empty",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Some(Status::Full),
            "mid" => Some(Status::Mid),
            "low" => Some(Status::Low),
            "empty" => Some(Status::Empty),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Full => "Full",
            Status::Mid => "Mid",
            Status::Low => "Low",
            Status::Empty => "Empty",
        }
    }
}

/// Payload discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Quantity,
    Status,
    Length,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Quantity, ItemKind::Status, ItemKind::Length];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Quantity => "quantity",
            ItemKind::Status => "status",
            ItemKind::Length => "length",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quantity" | "qty" => Some(ItemKind::Quantity),
            "status" => Some(ItemKind::Status),
            "length" | "len" => Some(ItemKind::Length),
            _ => None,
        }
    }
}

/// Kind-specific value. `None` means "unset".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Payload {
    Quantity { qty: u32 },
    Status { status: Option<Status> },
    Length { len: Option<f64> },
}

impl Payload {
    /// The zero value a freshly created or re-kinded item starts from.
    pub fn zero(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Quantity => Payload::Quantity { qty: 0 },
            ItemKind::Status => Payload::Status { status: None },
            ItemKind::Length => Payload::Length { len: None },
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Payload::Quantity { .. } => ItemKind::Quantity,
            Payload::Status { .. } => ItemKind::Status,
            Payload::Length { .. } => ItemKind::Length,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(flatten)]
    pub payload: Payload,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            payload: Payload::zero(kind),
        }
    }

    pub fn quantity(name: impl Into<String>, qty: u32) -> Self {
        Self { name: name.into(), payload: Payload::Quantity { qty } }
    }

    pub fn status(name: impl Into<String>, status: Option<Status>) -> Self {
        Self { name: name.into(), payload: Payload::Status { status } }
    }

    pub fn length(name: impl Into<String>, len: Option<f64>) -> Self {
        Self { name: name.into(), payload: Payload::Length { len } }
    }

    pub fn kind(&self) -> ItemKind {
        self.payload.kind()
    }

    /// Switch kind. The previous payload is dropped, never coerced.
    /// Returns false when the item already has this kind.
    pub fn set_kind(&mut self, kind: ItemKind) -> bool {
        if self.kind() == kind {
            return false;
        }
        self.payload = Payload::zero(kind);
        true
    }

    /// One-hot-with-off: selecting the active status clears it.
    /// Returns false if this is not a status item.
    pub fn toggle_status(&mut self, target: Status) -> bool {
        match &mut self.payload {
            Payload::Status { status } => {
                *status = if *status == Some(target) { None } else { Some(target) };
                true
            }
            _ => false,
        }
    }

    pub fn set_quantity(&mut self, qty: u32) -> bool {
        match &mut self.payload {
            Payload::Quantity { qty: current } => {
                *current = qty;
                true
            }
            _ => false,
        }
    }

    /// Add `delta` to the count, saturating at zero.
    pub fn adjust_quantity(&mut self, delta: i64) -> bool {
        match &mut self.payload {
            Payload::Quantity { qty } => {
                let next = (*qty as i64).saturating_add(delta).clamp(0, u32::MAX as i64);
                *qty = next as u32;
                true
            }
            _ => false,
        }
    }

    pub fn set_length(&mut self, len: Option<f64>) -> bool {
        match &mut self.payload {
            Payload::Length { len: current } => {
                *current = len.filter(|v| v.is_finite());
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_status_selects_then_clears() {
        let mut item = Item::status("Propane", None);
        assert!(item.toggle_status(Status::Low));
        assert_eq!(item.payload, Payload::Status { status: Some(Status::Low) });

        item.toggle_status(Status::Low);
        assert_eq!(item.payload, Payload::Status { status: None });
    }

    #[test]
    fn test_toggle_other_status_switches() {
        let mut item = Item::status("Water", Some(Status::Full));
        item.toggle_status(Status::Empty);
        assert_eq!(item.payload, Payload::Status { status: Some(Status::Empty) });
    }

    #[test]
    fn test_toggle_status_on_quantity_item_is_refused() {
        let mut item = Item::quantity("Straps", 4);
        assert!(!item.toggle_status(Status::Full));
        assert_eq!(item.payload, Payload::Quantity { qty: 4 });
    }

    #[test]
    fn test_set_kind_discards_payload() {
        let mut item = Item::quantity("Rope", 7);
        assert!(item.set_kind(ItemKind::Length));
        assert_eq!(item.payload, Payload::Length { len: None });

        assert!(item.set_kind(ItemKind::Quantity));
        assert_eq!(item.payload, Payload::Quantity { qty: 0 });
    }

    #[test]
    fn test_set_same_kind_keeps_payload() {
        let mut item = Item::length("Hose", Some(25.0));
        assert!(!item.set_kind(ItemKind::Length));
        assert_eq!(item.payload, Payload::Length { len: Some(25.0) });
    }

    #[test]
    fn test_adjust_quantity_saturates_at_zero() {
        let mut item = Item::quantity("Cones", 1);
        item.adjust_quantity(-1);
        item.adjust_quantity(-1);
        assert_eq!(item.payload, Payload::Quantity { qty: 0 });
        item.adjust_quantity(3);
        assert_eq!(item.payload, Payload::Quantity { qty: 3 });
    }

    #[test]
    fn test_set_length_rejects_non_finite() {
        let mut item = Item::length("Cable", Some(10.0));
        item.set_length(Some(f64::NAN));
        assert_eq!(item.payload, Payload::Length { len: None });
    }

    #[test]
    fn test_canonical_serialization() {
        let item = Item::length("Ladder", Some(3.5));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Ladder", "kind": "length", "len": 3.5}));

        let item = Item::status("Fuel", None);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Fuel", "kind": "status", "status": null}));
    }
}
