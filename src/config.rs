//! Page Configuration
//!
//! The page key selects the document collection. It comes from `?page=<key>`.

pub const DEFAULT_PAGE: &str = "packout";

#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    /// Collection name in the document store; also scopes collapse state.
    pub key: String,
    pub title: String,
}

impl PageConfig {
    pub fn new(key: &str) -> Self {
        let key = normalize_key(key);
        let title = title_from_key(&key);
        Self { key, title }
    }

    /// Read `?page=` from the current URL.
    pub fn from_location() -> Self {
        let key = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
            .and_then(|params| params.get("page"))
            .unwrap_or_default();
        Self::new(&key)
    }
}

fn normalize_key(raw: &str) -> String {
    let key: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect::<String>()
        .to_ascii_lowercase();
    if key.is_empty() {
        DEFAULT_PAGE.to_string()
    } else {
        key
    }
}

fn title_from_key(key: &str) -> String {
    key.split(|c| c == '-' || c == '_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page() {
        assert_eq!(PageConfig::new("").key, DEFAULT_PAGE);
        assert_eq!(PageConfig::new("  ??  ").key, DEFAULT_PAGE);
    }

    #[test]
    fn test_key_and_title() {
        let page = PageConfig::new("Truck_b-shelves");
        assert_eq!(page.key, "truck_b-shelves");
        assert_eq!(page.title, "Truck B Shelves");
    }
}
