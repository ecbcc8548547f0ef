use std::fmt;
use std::sync::RwLock;
use std::time::Duration;

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Normalized error shape for every failure crossing the HTTP boundary.
/// `status` is the HTTP status code, or 0 for transport-level failures.
/// Controllers carry this verbatim to the views.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub message: String,
    pub status: u16,
    pub payload: Value,
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            "network error occurred".to_string()
        } else {
            message
        };
        Self {
            message,
            status: 0,
            payload: Value::Null,
        }
    }

    fn from_response_body(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(parsed) => {
                let message = parsed
                    .get("error")
                    .and_then(Value::as_str)
                    .or_else(|| parsed.get("detail").and_then(Value::as_str))
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("server responded with status {}", status));
                Self {
                    message,
                    status,
                    payload: parsed,
                }
            }
            Err(_) => Self {
                message: format!("server error ({}): failed to parse response body", status),
                status,
                payload: Value::Null,
            },
        }
    }

    /// Auth-class status: the session manager reacts to these by dropping
    /// to Anonymous; nobody else interprets error content.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status, 401 | 403)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.status == 0 {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} (status {})", self.message, self.status)
        }
    }
}

impl std::error::Error for ApiError {}

/// Single choke point for every call to the backend. Attaches the session
/// credential (cookie jar plus bearer header when a token is set) and
/// normalizes every failure mode into [`ApiError`].
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Only the session manager writes the token; everyone else reads.
    pub fn set_token(&self, token: &str) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.to_string());
        }
    }

    pub fn clear_token(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|g| g.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The credential is inserted into the merged header map with replace
    /// semantics, so a caller-supplied Authorization header can never shadow
    /// it or ride along as a duplicate.
    fn apply_auth(&self, builder: RequestBuilder, headers: Option<HeaderMap>) -> RequestBuilder {
        let mut merged = headers.unwrap_or_default();
        if let Some(token) = self.token() {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                merged.insert(AUTHORIZATION, value);
            }
        }
        if merged.is_empty() {
            builder
        } else {
            builder.headers(merged)
        }
    }

    /// Generic entry point; `get`/`post_json`/`post_empty` are thin wrappers.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&(impl Serialize + ?Sized)>,
        headers: Option<HeaderMap>,
    ) -> Result<T, ApiError> {
        if path.is_empty() {
            return Err(ApiError::network("empty endpoint path"));
        }
        debug!("{} {}", method, path);
        let mut builder = self.http.request(method, self.url(path));
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let bytes = self.send(self.apply_auth(builder, headers)).await?;
        Self::decode(&bytes)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.call(Method::GET, path, None::<&Value>, None).await
    }

    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + ?Sized),
    ) -> Result<T, ApiError> {
        self.call(Method::POST, path, Some(body), None).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.call(Method::POST, path, None::<&Value>, None).await
    }

    /// Multipart file upload. The content-type header is left to the
    /// transport so it can set the multipart boundary itself.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<T, ApiError> {
        debug!("POST {} (multipart, {} bytes)", path, bytes.len());
        let part = Part::bytes(bytes).file_name(file_name);
        let form = Form::new().part(field.to_string(), part);
        let builder = self.http.post(self.url(path)).multipart(form);
        let bytes = self.send(self.apply_auth(builder, None)).await?;
        Self::decode(&bytes)
    }

    /// Binary download (report export). Same credential and error rules,
    /// but the success body is returned raw.
    pub async fn download(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        debug!("GET {} (binary)", path);
        let builder = self.http.get(self.url(path));
        let bytes = self.send(self.apply_auth(builder, None)).await?;
        Ok(bytes)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        if (200..300).contains(&status) {
            Ok(bytes.to_vec())
        } else {
            let err = ApiError::from_response_body(status, &bytes);
            warn!("request failed: {}", err);
            Err(err)
        }
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(bytes).map_err(|e| ApiError {
            message: format!("failed to decode response body: {}", e),
            status: 0,
            payload: Value::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn success_body_is_returned_as_is() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/ping")
            .with_status(200)
            .with_body(r#"{"ok":true,"nested":{"n":1}}"#)
            .create_async()
            .await;

        let api = client(&server.url());
        let value: Value = api.get("/ping").await.unwrap();
        assert_eq!(value["ok"], Value::Bool(true));
        assert_eq!(value["nested"]["n"], 1);
    }

    #[tokio::test]
    async fn non_2xx_with_error_field_uses_server_message() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/quota")
            .with_status(429)
            .with_body(r#"{"error":"quota exceeded"}"#)
            .create_async()
            .await;

        let api = client(&server.url());
        let err = api.get::<Value>("/quota").await.unwrap_err();
        assert_eq!(err.message, "quota exceeded");
        assert_eq!(err.status, 429);
        assert_eq!(err.payload["error"], "quota exceeded");
    }

    #[tokio::test]
    async fn non_2xx_with_detail_field_uses_server_message() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/forbidden")
            .with_status(403)
            .with_body(r#"{"detail":"not yours"}"#)
            .create_async()
            .await;

        let api = client(&server.url());
        let err = api.get::<Value>("/forbidden").await.unwrap_err();
        assert_eq!(err.message, "not yours");
        assert!(err.is_auth_error());
    }

    #[tokio::test]
    async fn non_2xx_without_message_field_gets_generic_message() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/oops")
            .with_status(500)
            .with_body(r#"{"weird":1}"#)
            .create_async()
            .await;

        let api = client(&server.url());
        let err = api.get::<Value>("/oops").await.unwrap_err();
        assert_eq!(err.message, "server responded with status 500");
        assert_eq!(err.status, 500);
    }

    #[tokio::test]
    async fn non_2xx_with_unparseable_body_is_normalized() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/broken")
            .with_status(502)
            .with_body("<html>bad gateway</html>")
            .create_async()
            .await;

        let api = client(&server.url());
        let err = api.get::<Value>("/broken").await.unwrap_err();
        assert_eq!(err.status, 502);
        assert!(err.message.contains("failed to parse response body"));
        assert_eq!(err.payload, Value::Null);
    }

    #[tokio::test]
    async fn transport_failure_has_status_zero() {
        // nothing listens on this port
        let api = client("http://127.0.0.1:9");
        let err = api.get::<Value>("/anything").await.unwrap_err();
        assert_eq!(err.status, 0);
        assert!(!err.message.is_empty());
    }

    #[tokio::test]
    async fn bearer_token_is_attached_when_set() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/me")
            .match_header("authorization", "Bearer sekrit")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let api = client(&server.url());
        api.set_token("sekrit");
        let _: Value = api.get("/me").await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn caller_headers_cannot_shadow_the_credential() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/me")
            .match_header("authorization", "Bearer real")
            .match_header("x-extra", "1")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let api = client(&server.url());
        api.set_token("real");
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer forged"));
        headers.insert("x-extra", HeaderValue::from_static("1"));
        let _: Value = api
            .call(Method::GET, "/me", None::<&Value>, Some(headers))
            .await
            .unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn forged_authorization_is_replaced_not_appended() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/me")
            .match_request(|req| {
                let auth = req.header("authorization");
                auth.len() == 1
                    && auth[0].to_str().map(|v| v == "Bearer real").unwrap_or(false)
            })
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let api = client(&server.url());
        api.set_token("real");
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer forged"));
        let _: Value = api
            .call(Method::GET, "/me", None::<&Value>, Some(headers))
            .await
            .unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn empty_endpoint_is_rejected() {
        let api = client("http://127.0.0.1:9");
        let err = api.get::<Value>("").await.unwrap_err();
        assert_eq!(err.status, 0);
        assert_eq!(err.message, "empty endpoint path");
    }

    #[tokio::test]
    async fn download_returns_raw_bytes() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/export/csv")
            .with_status(200)
            .with_body("id,amount\n1,2.0\n")
            .create_async()
            .await;

        let api = client(&server.url());
        let bytes = api.download("/export/csv").await.unwrap();
        assert_eq!(bytes, b"id,amount\n1,2.0\n");
    }
}
