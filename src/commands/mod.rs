//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.

mod documents;

use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Serialize command arguments as plain JS objects (maps included).
fn to_args<T: Serialize>(args: &T) -> Result<JsValue, String> {
    args.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| e.to_string())
}

/// Rejected invokes carry the command's `Err(String)` or a JS error.
fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

pub use documents::*;
