use super::*;

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    assert!(storage.is_empty());
    storage.set("token", "abc");
    assert_eq!(storage.get("token").as_deref(), Some("abc"));
    storage.set("token", "def");
    assert_eq!(storage.get("token").as_deref(), Some("def"));
    assert_eq!(storage.len(), 1);
    storage.remove("token");
    assert_eq!(storage.get("token"), None);
    storage.remove("missing");
}

#[test]
fn memory_storage_clones_share_entries() {
    let storage = MemoryStorage::with_entries([("a", "1")]);
    let view = storage.clone();
    storage.set("b", "2");
    assert_eq!(view.get("a").as_deref(), Some("1"));
    assert_eq!(view.get("b").as_deref(), Some("2"));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_is_inert_outside_browser() {
    let storage = BrowserStorage;
    storage.set("token", "abc");
    assert_eq!(storage.get("token"), None);
    storage.remove("token");
}
