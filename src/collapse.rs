//! Local Collapse Store
//!
//! Per-folder collapsed flags in `localStorage`, scoped by page. A missing key
//! means expanded. Failures are logged and otherwise ignored: the flag is a
//! view preference, not data.

const KEY_PREFIX: &str = "packout:collapsed";

#[derive(Clone, Debug)]
pub struct CollapseStore {
    page: String,
}

impl CollapseStore {
    pub fn new(page: &str) -> Self {
        Self { page: page.to_string() }
    }

    pub fn get(&self, folder_id: &str) -> bool {
        storage().is_some_and(|s| read_flag(&s, &storage_key(&self.page, folder_id)))
    }

    pub fn set(&self, folder_id: &str, collapsed: bool) {
        let Some(storage) = storage() else {
            return;
        };
        if let Err(e) = write_flag(&storage, &storage_key(&self.page, folder_id), collapsed) {
            warn(&format!("[APP] Could not save collapsed state of {}: {}", folder_id, e));
        }
    }

    /// Carry a folder's flag over to the id it was renamed to.
    pub fn rename(&self, old_id: &str, new_id: &str) {
        let Some(storage) = storage() else {
            return;
        };
        let from = storage_key(&self.page, old_id);
        let to = storage_key(&self.page, new_id);
        if let Err(e) = move_flag(&storage, &from, &to) {
            warn(&format!("[APP] Could not move collapsed state {} -> {}: {}", old_id, new_id, e));
        }
    }
}

/// Key-value backend of the flags.
trait FlagStorage {
    fn read(&self, key: &str) -> Option<String>;
    /// `None` removes the key.
    fn write(&self, key: &str, value: Option<&str>) -> Result<(), String>;
}

impl FlagStorage for web_sys::Storage {
    fn read(&self, key: &str) -> Option<String> {
        self.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: Option<&str>) -> Result<(), String> {
        let result = match value {
            Some(v) => self.set_item(key, v),
            None => self.remove_item(key),
        };
        result.map_err(|e| e.as_string().unwrap_or_else(|| format!("{:?}", e)))
    }
}

fn read_flag(storage: &impl FlagStorage, key: &str) -> bool {
    storage.read(key).is_some_and(|v| v == "1")
}

fn write_flag(storage: &impl FlagStorage, key: &str, collapsed: bool) -> Result<(), String> {
    storage.write(key, collapsed.then_some("1"))
}

/// Write the new key before dropping the old one, so a failure never loses the flag.
fn move_flag(storage: &impl FlagStorage, from: &str, to: &str) -> Result<(), String> {
    if from == to {
        return Ok(());
    }
    let collapsed = read_flag(storage, from);
    write_flag(storage, to, collapsed)?;
    storage.write(from, None)
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn storage_key(page: &str, folder_id: &str) -> String {
    format!("{}:{}:{}", KEY_PREFIX, page, folder_id)
}

fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryFlags {
        entries: RefCell<HashMap<String, String>>,
        full: Cell<bool>,
    }

    impl FlagStorage for MemoryFlags {
        fn read(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn write(&self, key: &str, value: Option<&str>) -> Result<(), String> {
            match value {
                Some(_) if self.full.get() => Err("QuotaExceededError".to_string()),
                Some(v) => {
                    self.entries.borrow_mut().insert(key.to_string(), v.to_string());
                    Ok(())
                }
                None => {
                    self.entries.borrow_mut().remove(key);
                    Ok(())
                }
            }
        }
    }

    #[test]
    fn test_storage_key_is_page_scoped() {
        assert_eq!(storage_key("trailer", "truck-a"), "packout:collapsed:trailer:truck-a");
        assert_ne!(storage_key("a", "x"), storage_key("b", "x"));
    }

    #[test]
    fn test_expanded_removes_key() {
        let flags = MemoryFlags::default();
        write_flag(&flags, "k", true).unwrap();
        assert!(read_flag(&flags, "k"));
        write_flag(&flags, "k", false).unwrap();
        assert!(flags.entries.borrow().is_empty());
    }

    #[test]
    fn test_write_failure_is_reported() {
        let flags = MemoryFlags::default();
        flags.full.set(true);
        assert_eq!(write_flag(&flags, "k", true), Err("QuotaExceededError".to_string()));
        assert!(!read_flag(&flags, "k"));
    }

    #[test]
    fn test_rename_carries_flag() {
        let flags = MemoryFlags::default();
        let old = storage_key("trailer", "truck-a");
        let new = storage_key("trailer", "trailer-1");
        write_flag(&flags, &old, true).unwrap();

        move_flag(&flags, &old, &new).unwrap();
        assert!(read_flag(&flags, &new));
        assert!(flags.read(&old).is_none());
    }

    #[test]
    fn test_failed_move_keeps_old_flag() {
        let flags = MemoryFlags::default();
        write_flag(&flags, "old", true).unwrap();
        flags.full.set(true);

        assert!(move_flag(&flags, "old", "new").is_err());
        assert!(read_flag(&flags, "old"));
    }
}
