use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::ApiError;

/// Client configuration with the documented defaults: an 80 second call
/// timeout and a fixed client identifier. The timeout covers the whole
/// exchange including body read; its expiry surfaces as `ApiError::Transport`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(80),
            user_agent: "Vestibule Client Library <https://github.com/vestibule/vestibule>".to_string(),
        }
    }
}

/// Request body, chosen explicitly at the call site.
#[derive(Debug, Clone)]
pub enum Payload {
    /// File-like body sent as-is.
    Raw(Vec<u8>),
    /// Structure already serialized to a JSON value.
    Json(serde_json::Value),
}

impl Payload {
    /// Build a JSON payload from any serializable structure. A serialization
    /// failure degrades to an empty body with a warning rather than failing
    /// the call; see DESIGN.md for the rationale behind keeping this lossy.
    pub fn json<T: Serialize>(data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(v) => Payload::Json(v),
            Err(e) => {
                warn!("unable to serialize payload to JSON: {e}");
                Payload::Raw(Vec::new())
            }
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        match self {
            Payload::Raw(bytes) => bytes,
            Payload::Json(value) => match serde_json::to_vec(&value) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("unable to serialize payload to JSON: {e}");
                    Vec::new()
                }
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error_message: String,
}

/// HTTP Basic-authenticated client for a remote JSON API. Holds its endpoint
/// and credentials; every call goes through `execute` and the status mapping
/// there.
#[derive(Debug, Clone)]
pub struct Client {
    endpoint: String,
    username: String,
    password: String,
    http: reqwest::Client,
}

impl Client {
    pub fn new(endpoint: &str, username: &str, password: &str) -> Result<Self, ApiError> {
        Self::with_config(endpoint, username, password, ClientConfig::default())
    }

    pub fn with_config(
        endpoint: &str,
        username: &str,
        password: &str,
        config: ClientConfig,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;
        // a trailing slash on the endpoint would double up when joining paths
        let endpoint = endpoint.strip_suffix('/').unwrap_or(endpoint).to_string();
        Ok(Self {
            endpoint,
            username: username.to_string(),
            password: password.to_string(),
            http,
        })
    }

    pub async fn get(&self, path: &str) -> Result<reqwest::Response, ApiError> {
        self.execute(Method::GET, path, None).await
    }

    pub async fn post<T: Serialize>(&self, path: &str, data: &T) -> Result<reqwest::Response, ApiError> {
        self.execute(Method::POST, path, Some(Payload::json(data))).await
    }

    pub async fn post_file(&self, path: &str, data: Vec<u8>) -> Result<reqwest::Response, ApiError> {
        self.execute(Method::POST, path, Some(Payload::Raw(data))).await
    }

    pub async fn put<T: Serialize>(&self, path: &str, data: &T) -> Result<reqwest::Response, ApiError> {
        self.execute(Method::PUT, path, Some(Payload::json(data))).await
    }

    pub async fn delete(&self, path: &str) -> Result<reqwest::Response, ApiError> {
        self.execute(Method::DELETE, path, None).await
    }

    /// Perform one call and map the outcome. Status codes are mapped exactly:
    /// 401/403/500/404 to their fixed variants, 400 decodes an
    /// `{"error_message": …}` body (a decode failure on that path is reported,
    /// not swallowed), any other >= 400 becomes `UnexpectedStatus`. Below 400
    /// the response is handed back unread for the caller to consume.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        payload: Option<Payload>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.endpoint, path);
        let mut req = self
            .http
            .request(method, &url)
            .basic_auth(&self.username, Some(&self.password))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(payload) = payload {
            req = req.body(payload.into_bytes());
        }

        let response = req.send().await?;
        match response.status().as_u16() {
            401 => Err(ApiError::NotAuthorized),
            403 => Err(ApiError::Forbidden),
            500 => Err(ApiError::ServerError),
            404 => Err(ApiError::NotFound),
            400 => match response.json::<ErrorResponse>().await {
                Ok(body) => Err(ApiError::BadRequest(body.error_message)),
                Err(e) => Err(ApiError::BadRequest(format!("error body decode failed: {e}"))),
            },
            code if code >= 400 => Err(ApiError::UnexpectedStatus(code)),
            _ => Ok(response),
        }
    }
}
