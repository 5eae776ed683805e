//! REST client shared by both dashboards.
//!
//! Pages never touch HTTP directly: they build requests through [`ApiClient`],
//! which attaches the base URL and bearer token, hands the request to a
//! [`Transport`] and runs every response through the envelope adapter.

pub mod gloo;
#[cfg(test)]
pub mod memory;

use crate::envelope::{self, Page};
use crate::error::ClientError;
use crate::forms::FileUpload;
use http::Method;
use leptos::logging::log;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use gloo::GlooTransport;

/// Where the REST API lives. Mirrors the frontend build-time `API_URL`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "/api";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Reads `API_URL` at compile time; the bundle is built per environment.
    pub fn from_env() -> Self {
        Self::new(option_env!("API_URL").unwrap_or(Self::DEFAULT_BASE_URL))
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    pub texts: Vec<(String, String)>,
    pub files: Vec<(String, FileUpload)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub token: Option<String>,
    pub body: RequestBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one request and hands back whatever came over the wire. Transports
/// only fail when no HTTP response was produced at all.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError>;
}

/// How a resource is updated on the server. The API is not consistent about
/// this, so each resource declares its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateMethod {
    Put,
    Patch,
}

impl UpdateMethod {
    pub fn as_method(self) -> Method {
        match self {
            UpdateMethod::Put => Method::PUT,
            UpdateMethod::Patch => Method::PATCH,
        }
    }
}

/// Credentials returned by a login endpoint.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default, alias = "user", alias = "vendor", alias = "admin")]
    pub profile: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    config: ApiConfig,
    token: Option<String>,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self {
            config,
            token: None,
            transport,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn send(&self, method: Method, path: &str, body: RequestBody) -> Result<RawResponse, ClientError> {
        let request = ApiRequest {
            method,
            url: self.config.url(path),
            token: self.token.clone(),
            body,
        };
        log!("[API] {} {}", request.method, request.url);
        self.transport.send(request).await
    }

    /// `GET /<path>` expecting a list.
    pub async fn list<R: DeserializeOwned>(&self, path: &str, keys: &[&str]) -> Result<Vec<R>, ClientError> {
        let raw = self.send(Method::GET, path, RequestBody::Empty).await?;
        envelope::parse_list(raw.status, &raw.body, keys)
    }

    /// `GET /<path>?page=&limit=` for infinite-scroll pages.
    pub async fn list_page<R: DeserializeOwned>(
        &self,
        path: &str,
        page: u32,
        limit: u32,
        keys: &[&str],
    ) -> Result<Page<R>, ClientError> {
        let path = format!("{path}?page={page}&limit={limit}");
        let raw = self.send(Method::GET, &path, RequestBody::Empty).await?;
        envelope::parse_page(raw.status, &raw.body, keys)
    }

    /// Server-side search, `GET /<path>/<search_path>?q=`.
    pub async fn search<R: DeserializeOwned>(
        &self,
        path: &str,
        search_path: &str,
        query: &str,
        keys: &[&str],
    ) -> Result<Vec<R>, ClientError> {
        let path = format!("{path}/{search_path}?q={}", urlencoding::encode(query));
        let raw = self.send(Method::GET, &path, RequestBody::Empty).await?;
        envelope::parse_list(raw.status, &raw.body, keys)
    }

    pub async fn create<R: DeserializeOwned>(&self, path: &str, body: RequestBody, keys: &[&str]) -> Result<R, ClientError> {
        let raw = self.send(Method::POST, path, body).await?;
        envelope::parse_one(raw.status, &raw.body, keys)
    }

    pub async fn update<R: DeserializeOwned>(
        &self,
        path: &str,
        id: &str,
        method: UpdateMethod,
        body: RequestBody,
        keys: &[&str],
    ) -> Result<R, ClientError> {
        let path = format!("{path}/{}", urlencoding::encode(id));
        let raw = self.send(method.as_method(), &path, body).await?;
        envelope::parse_one(raw.status, &raw.body, keys)
    }

    /// `PATCH /<path>` for sub-resource actions such as status changes.
    pub async fn patch<R: DeserializeOwned>(&self, path: &str, body: RequestBody, keys: &[&str]) -> Result<R, ClientError> {
        let raw = self.send(Method::PATCH, path, body).await?;
        envelope::parse_one(raw.status, &raw.body, keys)
    }

    pub async fn remove(&self, path: &str, id: &str) -> Result<(), ClientError> {
        let path = format!("{path}/{}", urlencoding::encode(id));
        let raw = self.send(Method::DELETE, &path, RequestBody::Empty).await?;
        envelope::parse_ack(raw.status, &raw.body)
    }

    pub async fn login<C: Serialize>(&self, path: &str, credentials: &C) -> Result<LoginResponse, ClientError> {
        let body = RequestBody::Json(serde_json::to_value(credentials)?);
        let raw = self.send(Method::POST, path, body).await?;
        envelope::parse_one(raw.status, &raw.body, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryTransport;
    use super::*;
    use crate::models::vendor::Vendor;
    use futures::executor::block_on;

    #[test]
    fn config_joins_paths_without_double_slashes() {
        let config = ApiConfig::new("https://api.example.com/v1/");
        assert_eq!(config.url("/vendors"), "https://api.example.com/v1/vendors");
        assert_eq!(config.url("vendors/42"), "https://api.example.com/v1/vendors/42");
    }

    #[test]
    fn requests_carry_bearer_token_and_encoded_query() {
        let transport = MemoryTransport::new();
        transport.respond(200, r#"{"success":true,"data":[]}"#);
        let client = ApiClient::new(ApiConfig::new("/api"), transport).with_token(Some("tok".into()));

        let found: Vec<Vendor> = block_on(client.search("vendors", "search", "acme brand", &[])).unwrap();
        assert!(found.is_empty());

        let sent = client.transport().requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::GET);
        assert_eq!(sent[0].url, "/api/vendors/search?q=acme%20brand");
        assert_eq!(sent[0].token.as_deref(), Some("tok"));
    }

    #[test]
    fn update_uses_declared_method() {
        let transport = MemoryTransport::new();
        transport.respond(200, r#"{"success":true,"data":{"_id":"v1","name":"A","username":"a","brandName":"B"}}"#);
        let client = ApiClient::new(ApiConfig::default(), transport);

        let vendor: Vendor = block_on(client.update(
            "vendors",
            "v1",
            UpdateMethod::Patch,
            RequestBody::Json(serde_json::json!({"name": "A"})),
            &[],
        ))
        .unwrap();
        assert_eq!(vendor.brand_name, "B");
        assert_eq!(client.transport().requests()[0].method, Method::PATCH);
        assert_eq!(client.transport().requests()[0].url, "/api/vendors/v1");
    }

    #[test]
    fn login_reads_token_and_profile() {
        let transport = MemoryTransport::new();
        transport.respond(200, r#"{"success":true,"token":"jwt","vendor":{"_id":"v1","name":"Acme"}}"#);
        let client = ApiClient::new(ApiConfig::default(), transport);
        let creds = serde_json::json!({"username": "acme1", "password": "secret1"});
        let login = block_on(client.login("vendor/login", &creds)).unwrap();
        assert_eq!(login.token, "jwt");
        assert_eq!(login.profile["name"], "Acme");
    }
}
