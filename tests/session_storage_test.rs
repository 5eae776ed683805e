#![cfg(target_arch = "wasm32")]

use deliverydesk::session::{Dashboard, LocalStorageStore, Session, SessionManager, SessionStore};
use serde_json::json;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn clear_storage() {
    let store = LocalStorageStore;
    store.remove(Dashboard::Admin.storage_key());
    store.remove(Dashboard::Vendor.storage_key());
}

#[wasm_bindgen_test]
fn session_survives_reload() {
    clear_storage();
    let admin = SessionManager::new(Dashboard::Admin, LocalStorageStore);
    let session = admin.login("jwt-admin".to_string(), json!({"name": "Root"}));

    // a fresh manager reads what the previous page load wrote
    let restored = SessionManager::new(Dashboard::Admin, LocalStorageStore).restore();
    assert_eq!(restored, session);
    assert_eq!(restored.display_name(), "Root");

    let raw = web_sys::window()
        .unwrap()
        .local_storage()
        .unwrap()
        .unwrap()
        .get_item("userData")
        .unwrap();
    assert!(raw.unwrap().contains("jwt-admin"));
    clear_storage();
}

#[wasm_bindgen_test]
fn dashboards_do_not_share_sessions() {
    clear_storage();
    SessionManager::new(Dashboard::Vendor, LocalStorageStore).login("jwt-vendor".to_string(), json!({}));
    assert_eq!(SessionManager::new(Dashboard::Admin, LocalStorageStore).restore(), Session::Anonymous);
    clear_storage();
}

#[wasm_bindgen_test]
fn garbage_in_storage_signs_out() {
    clear_storage();
    LocalStorageStore.save("vendorData", "not json");
    let vendor = SessionManager::new(Dashboard::Vendor, LocalStorageStore);
    assert_eq!(vendor.restore(), Session::Anonymous);
    assert!(LocalStorageStore.load("vendorData").is_none());
}
