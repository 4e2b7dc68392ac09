use std::sync::RwLock;
use std::time::Duration;

use reqwest::multipart::Form;
use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::error::ApiError;

/// Connection settings for the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// HTTP client for the album backend.
///
/// Holds the bearer token for the active session; the session lifecycle
/// (login, forced logout on 401) is driven by the caller through
/// `set_token`/`clear_token`, the client itself never reads ambient state.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .tcp_keepalive(Duration::from_secs(30))
            .user_agent("FamilyAlbum/0.1.0")
            .build()
            .map_err(|e| ApiError::Transport(format!("Client build failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    pub fn set_token(&self, token: String) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token);
        }
    }

    pub fn clear_token(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// URL of an uploaded photo file; the token rides along as a query
    /// parameter because image elements cannot set request headers.
    pub fn photo_url(&self, file_path: &str) -> String {
        match self.token() {
            Some(token) => format!("{}/uploads/photos/{}?token={}", self.base_url, file_path, token),
            None => format!("{}/uploads/photos/{}", self.base_url, file_path),
        }
    }

    /// URL of an album cover image.
    pub fn cover_url(&self, cover: &str) -> String {
        match self.token() {
            Some(token) => format!("{}/uploads/covers/{}?token={}", self.base_url, cover, token),
            None => format!("{}/uploads/covers/{}", self.base_url, cover),
        }
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token() {
            Some(token) => req.header("Authorization", token),
            None => req,
        }
    }

    async fn read_envelope(req: reqwest::RequestBuilder) -> Result<Envelope, ApiError> {
        let response = req
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Request failed: {}", e)))?;

        // The backend reports failures inside the envelope, sometimes with a
        // matching HTTP status. Decode the body first and only fall back to
        // the status line when there is no envelope to read.
        let status = response.status();
        match response.json::<Envelope>().await {
            Ok(envelope) => Ok(envelope),
            Err(e) if status.is_success() => Err(ApiError::Decode(e.to_string())),
            Err(_) => Err(ApiError::Server {
                code: status.as_u16() as i64,
                msg: format!("Server returned status {}", status),
            }),
        }
    }

    pub(crate) async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Envelope, ApiError> {
        let req = self.authorize(self.http.get(self.url(path)).query(query));
        Self::read_envelope(req).await
    }

    pub(crate) async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope, ApiError> {
        let req = self.authorize(self.http.post(self.url(path)).json(body));
        Self::read_envelope(req).await
    }

    pub(crate) async fn put_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope, ApiError> {
        let req = self.authorize(self.http.put(self.url(path)).json(body));
        Self::read_envelope(req).await
    }

    pub(crate) async fn delete_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope, ApiError> {
        let req = self.authorize(self.http.delete(self.url(path)).json(body));
        Self::read_envelope(req).await
    }

    pub(crate) async fn post_multipart(&self, path: &str, form: Form) -> Result<Envelope, ApiError> {
        let req = self.authorize(self.http.post(self.url(path)).multipart(form));
        Self::read_envelope(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_lifecycle() {
        let client = ApiClient::new(&ApiConfig::default()).unwrap();
        assert!(client.token().is_none());
        client.set_token("abc".to_string());
        assert_eq!(client.token().as_deref(), Some("abc"));
        client.clear_token();
        assert!(client.token().is_none());
    }

    #[test]
    fn test_image_urls_carry_token() {
        let client = ApiClient::new(&ApiConfig {
            base_url: "http://backend:5000/".to_string(),
            timeout_secs: 10,
        })
        .unwrap();
        client.set_token("t0k3n".to_string());
        assert_eq!(
            client.photo_url("3/birthday.png"),
            "http://backend:5000/uploads/photos/3/birthday.png?token=t0k3n"
        );
        assert_eq!(
            client.cover_url("cover.jpg"),
            "http://backend:5000/uploads/covers/cover.jpg?token=t0k3n"
        );
    }
}
