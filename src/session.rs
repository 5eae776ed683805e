//! Who is signed in to which dashboard.
//!
//! The session is an explicit value provided from the root component. It is
//! persisted through a [`SessionStore`] so a reload keeps the user signed in.

use crate::client::{ApiClient, Transport};
use crate::error::ClientError;
use leptos::logging::{log, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dashboard {
    Admin,
    Vendor,
}

impl Dashboard {
    /// Local-storage key the session is persisted under.
    pub fn storage_key(self) -> &'static str {
        match self {
            Dashboard::Admin => "userData",
            Dashboard::Vendor => "vendorData",
        }
    }

    /// API path of the login endpoint.
    pub fn login_endpoint(self) -> &'static str {
        match self {
            Dashboard::Admin => "admin/login",
            Dashboard::Vendor => "vendor/login",
        }
    }

    /// Identifier the login form asks for besides the password.
    pub fn credential_field(self) -> &'static str {
        match self {
            Dashboard::Admin => "email",
            Dashboard::Vendor => "username",
        }
    }

    pub fn base_route(self) -> &'static str {
        match self {
            Dashboard::Admin => "/admin",
            Dashboard::Vendor => "/vendor",
        }
    }

    pub fn login_route(self) -> String {
        format!("{}/login", self.base_route())
    }

    pub fn title(self) -> &'static str {
        match self {
            Dashboard::Admin => "Admin",
            Dashboard::Vendor => "Vendor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { token: String, profile: Value },
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated { token, .. } => Some(token),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    /// Name shown in the header: the profile's name, else its username.
    pub fn display_name(&self) -> &str {
        let Session::Authenticated { profile, .. } = self else {
            return "";
        };
        ["name", "username", "email"]
            .iter()
            .find_map(|key| profile.get(key).and_then(Value::as_str))
            .unwrap_or("")
    }
}

/// What is written to storage.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
    #[serde(default)]
    profile: Value,
}

/// Key/value persistence for sessions.
pub trait SessionStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// The browser's `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    // no browser while rendering on the server
    #[cfg(not(target_arch = "wasm32"))]
    fn storage() -> Option<web_sys::Storage> {
        None
    }
}

impl SessionStore for LocalStorageStore {
    fn load(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn save(&self, key: &str, value: &str) {
        let saved = Self::storage().map(|s| s.set_item(key, value).is_ok());
        if saved != Some(true) {
            warn!("[SESSION] Could not persist {}", key);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory store; clones share their contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Session transitions for one dashboard.
#[derive(Debug, Clone)]
pub struct SessionManager<S> {
    dashboard: Dashboard,
    store: S,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(dashboard: Dashboard, store: S) -> Self {
        Self { dashboard, store }
    }

    pub fn dashboard(&self) -> Dashboard {
        self.dashboard
    }

    /// Reads the persisted session. Anything unreadable is cleared and
    /// treated as signed out.
    pub fn restore(&self) -> Session {
        let key = self.dashboard.storage_key();
        let Some(raw) = self.store.load(key) else {
            return Session::Anonymous;
        };
        match serde_json::from_str::<StoredSession>(&raw) {
            Ok(stored) if !stored.token.is_empty() => Session::Authenticated {
                token: stored.token,
                profile: stored.profile,
            },
            Ok(_) | Err(_) => {
                warn!("[SESSION] Discarding unreadable {} entry", key);
                self.store.remove(key);
                Session::Anonymous
            }
        }
    }

    pub fn login(&self, token: String, profile: Value) -> Session {
        let stored = StoredSession { token, profile };
        match serde_json::to_string(&stored) {
            Ok(raw) => self.store.save(self.dashboard.storage_key(), &raw),
            Err(err) => warn!("[SESSION] Could not encode session: {}", err),
        }
        log!("[SESSION] {} signed in", self.dashboard.title());
        Session::Authenticated {
            token: stored.token,
            profile: stored.profile,
        }
    }

    pub fn logout(&self) -> Session {
        self.store.remove(self.dashboard.storage_key());
        log!("[SESSION] {} signed out", self.dashboard.title());
        Session::Anonymous
    }

    /// Posts the credentials to the dashboard's login endpoint and persists
    /// the returned token.
    pub async fn sign_in<T: Transport, C: Serialize>(
        &self,
        client: &ApiClient<T>,
        credentials: &C,
    ) -> Result<Session, ClientError> {
        let response = client.login(self.dashboard.login_endpoint(), credentials).await?;
        Ok(self.login(response.token, response.profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::MemoryTransport;
    use crate::client::ApiConfig;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn login_persists_under_dashboard_key() {
        let store = MemoryStore::new();
        let vendor = SessionManager::new(Dashboard::Vendor, store.clone());
        let session = vendor.login("jwt".into(), json!({"name": "Acme"}));
        assert_eq!(session.token(), Some("jwt"));
        assert_eq!(session.display_name(), "Acme");
        assert!(store.load("vendorData").is_some());
        assert!(store.load("userData").is_none());

        assert_eq!(vendor.restore(), session);
        assert_eq!(SessionManager::new(Dashboard::Admin, store).restore(), Session::Anonymous);
    }

    #[test]
    fn corrupt_entry_restores_anonymous_and_is_cleared() {
        let store = MemoryStore::new();
        store.save("userData", "{not json");
        let admin = SessionManager::new(Dashboard::Admin, store.clone());
        assert_eq!(admin.restore(), Session::Anonymous);
        assert!(store.load("userData").is_none());

        store.save("userData", r#"{"token":""}"#);
        assert_eq!(admin.restore(), Session::Anonymous);
    }

    #[test]
    fn logout_clears_storage() {
        let store = MemoryStore::new();
        let admin = SessionManager::new(Dashboard::Admin, store.clone());
        admin.login("t".into(), Value::Null);
        assert_eq!(admin.logout(), Session::Anonymous);
        assert_eq!(admin.restore(), Session::Anonymous);
    }

    #[test]
    fn sign_in_uses_dashboard_endpoint() {
        let transport = MemoryTransport::new();
        transport.respond(200, r#"{"success":true,"token":"jwt","admin":{"username":"root"}}"#);
        let client = ApiClient::new(ApiConfig::new("/api"), transport.clone());
        let admin = SessionManager::new(Dashboard::Admin, MemoryStore::new());

        let session = block_on(admin.sign_in(&client, &json!({"username": "root", "password": "pw"}))).unwrap();
        assert_eq!(session.display_name(), "root");
        assert_eq!(transport.requests()[0].url, "/api/admin/login");
    }

    #[test]
    fn failed_sign_in_keeps_anonymous() {
        let transport = MemoryTransport::new();
        transport.respond(401, r#"{"success":false,"message":"Invalid credentials"}"#);
        let client = ApiClient::new(ApiConfig::new("/api"), transport);
        let store = MemoryStore::new();
        let vendor = SessionManager::new(Dashboard::Vendor, store.clone());

        let err = block_on(vendor.sign_in(&client, &json!({}))).unwrap_err();
        assert_eq!(err.banner_message(), "Invalid credentials");
        assert!(store.load("vendorData").is_none());
    }
}
