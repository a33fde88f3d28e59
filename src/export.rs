//! JSON export of the current page.

use wasm_bindgen::{JsCast, JsValue};

use crate::models::{ExportDoc, Folder};

pub fn export_file_name(page: &str) -> String {
    format!("{}.json", page)
}

pub fn export_json(page: &str, folders: &[Folder]) -> Result<String, String> {
    serde_json::to_string_pretty(&ExportDoc { page, folders }).map_err(|e| e.to_string())
}

/// Serialize the folders and hand them to the browser as a download.
pub fn download_json(page: &str, folders: &[Folder]) -> Result<(), String> {
    let json = export_json(page, folders)?;
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let parts = js_sys::Array::of1(&JsValue::from_str(&json));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let anchor = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "anchor cast failed".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(&export_file_name(page));
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    web_sys::console::log_1(&format!("[APP] Exported {} folders", folders.len()).into());
    Ok(())
}

fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}
