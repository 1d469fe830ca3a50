//! HTTP client for the FTP Manager API.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use super::error::ApiError;
use super::types::*;
use crate::config::ClientConfig;

/// Backend origin used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://backend:8000";

/// Per-request options: method, JSON body and extra headers.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    /// POST with a JSON body.
    pub fn post<B: Serialize>(body: &B) -> Result<Self, ApiError> {
        Ok(Self {
            method: Method::POST,
            body: Some(serde_json::to_value(body)?),
            ..Self::default()
        })
    }

    /// Add (or replace) a header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// FTPM API client.
///
/// Holds no mutable state; build one at start-up and share it behind an
/// `Arc`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with the default timeouts.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeouts(base_url, Duration::from_secs(5), Duration::from_secs(2))
    }

    /// Create a client from the loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::with_timeouts(
            config.base_url.clone(),
            config.request_timeout,
            config.connect_timeout,
        )
    }

    fn with_timeouts(
        base_url: impl Into<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self { client, base_url })
    }

    /// Base origin all endpoints are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base_url, endpoint);
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// Issue a request and decode the JSON response.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let url = self.url(endpoint)?;
        self.request_url(endpoint, url, options).await
    }

    /// Issue a request and return the body as text.
    pub async fn request_text(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<String, ApiError> {
        let url = self.url(endpoint)?;
        let response = self.send(endpoint, url, options).await?;
        response.text().await.map_err(|e| {
            error!(endpoint, error = %e, "API request failed while reading body");
            ApiError::Network {
                endpoint: endpoint.to_string(),
                source: e,
            }
        })
    }

    async fn request_url<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        url: Url,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let response = self.send(endpoint, url, options).await?;

        let body = response.bytes().await.map_err(|e| {
            error!(endpoint, error = %e, "API request failed while reading body");
            ApiError::Network {
                endpoint: endpoint.to_string(),
                source: e,
            }
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            error!(endpoint, error = %e, "API response could not be decoded");
            ApiError::Decode {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// Send the request; non-success statuses become [`ApiError::Status`].
    async fn send(
        &self,
        endpoint: &str,
        url: Url,
        options: RequestOptions,
    ) -> Result<Response, ApiError> {
        let RequestOptions {
            method,
            body,
            headers,
        } = options;

        debug!(endpoint, %method, "API request");

        let mut builder = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .headers(headers);
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await.map_err(|e| {
            error!(endpoint, error = %e, "API request failed");
            ApiError::Network {
                endpoint: endpoint.to_string(),
                source: e,
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // A body that cannot be read is treated like one that cannot be parsed.
        let body = response.bytes().await.unwrap_or_default();
        let err = ApiError::from_error_body(status.as_u16(), &body);
        warn!(endpoint, status = status.as_u16(), error = %err, "API request rejected");
        Err(err)
    }

    /// `GET /` - service name and version, used as a connectivity probe.
    pub async fn root_info(&self) -> Result<ServiceInfo, ApiError> {
        self.request("/", RequestOptions::get()).await
    }

    /// `GET /api/dashboard/stats`
    pub async fn get_dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.request("/api/dashboard/stats", RequestOptions::get())
            .await
    }

    /// `GET /api/dashboard/recent-users`
    pub async fn get_recent_users(&self) -> Result<Vec<RecentUser>, ApiError> {
        self.request("/api/dashboard/recent-users", RequestOptions::get())
            .await
    }

    /// `GET /api/users`
    pub async fn get_users(&self) -> Result<Vec<User>, ApiError> {
        self.request("/api/users", RequestOptions::get()).await
    }

    /// `POST /api/users`
    pub async fn create_user(
        &self,
        request: &CreateUserRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.request("/api/users", RequestOptions::post(request)?)
            .await
    }

    /// `DELETE /api/users/{username}`
    ///
    /// The username is percent-encoded as a single path segment.
    pub async fn delete_user(&self, username: &str) -> Result<MessageResponse, ApiError> {
        let mut url = self.url("/api/users")?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.clone()))?
            .push(username);

        let endpoint = url.path().to_string();
        self.request_url(&endpoint, url, RequestOptions::delete())
            .await
    }

    /// `GET /api/logs/vsftpd` (plain text)
    pub async fn get_vsftpd_log(&self) -> Result<String, ApiError> {
        self.request_text("/api/logs/vsftpd", RequestOptions::get())
            .await
    }

    /// `GET /api/config`
    pub async fn get_config(&self) -> Result<ServerConfig, ApiError> {
        self.request("/api/config", RequestOptions::get()).await
    }

    /// `POST /api/config`
    pub async fn update_config(
        &self,
        config: &ServerConfig,
    ) -> Result<ConfigUpdateResponse, ApiError> {
        self.request("/api/config", RequestOptions::post(config)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.url("/api/users").unwrap().as_str(),
            "http://localhost:8000/api/users"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = ApiClient::new("not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_post_options_carry_json_body() {
        let request = CreateUserRequest {
            username: "carol".into(),
            password: "pw".into(),
            home_dir: Some("/srv/carol".into()),
            quota_mb: None,
        };
        let options = RequestOptions::post(&request).unwrap();

        assert_eq!(options.method, Method::POST);
        assert_eq!(options.body.unwrap()["home_dir"], "/srv/carol");
    }
}
