//! Leptos DragDrop Utilities
//!
//! Press-and-hold drag-to-reorder for vertical lists.
//! A short hold on a row's handle starts the drag; moving first or letting go early
//! does not, so taps and scrolls pass through untouched.
//!
//! The state machines ([`gesture`], [`session`]) have no DOM dependency; the
//! [`HoldDrag`] controller wires them to pointer events.

pub mod gesture;
pub mod session;
mod controller;

pub use controller::{HandleId, HoldDrag, ROW_CLASS};
pub use gesture::{HoldDragConfig, CANCEL_DISTANCE_PX, HOLD_DELAY_MS};
pub use session::{Dropped, RowBox};
