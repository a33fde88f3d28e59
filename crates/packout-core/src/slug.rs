//! Folder identifier normalization.

use crate::error::{PackoutError, PackoutResult};
use crate::folder::FolderId;

/// Derive a folder id from its display name: lowercase ASCII alphanumerics,
/// every other run collapsed to a single `-`, no leading or trailing `-`.
pub fn folder_id(name: &str) -> PackoutResult<FolderId> {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        return Err(PackoutError::InvalidName(name.to_string()));
    }
    Ok(FolderId::from_stored(slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_id_basic() {
        assert_eq!(folder_id("Truck A").unwrap().as_str(), "truck-a");
    }

    #[test]
    fn test_folder_id_collapses_separators() {
        assert_eq!(folder_id("  Truck   a!! ").unwrap().as_str(), "truck-a");
        assert_eq!(folder_id("--Gear/Box #2--").unwrap().as_str(), "gear-box-2");
    }

    #[test]
    fn test_folder_id_rejects_empty() {
        assert!(matches!(folder_id("   "), Err(PackoutError::InvalidName(_))));
        assert!(matches!(folder_id("!!"), Err(PackoutError::InvalidName(_))));
    }
}
