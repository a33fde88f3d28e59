//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.

mod document_cmd;

pub use document_cmd::*;
