//! Billing API client.
//!
//! DESIGN
//! ======
//! [`SessionApi`] is the seam the session store talks through, so tests can
//! script responses. [`HttpApi`] is the real implementation:
//!
//! - `hydrate`: browser `fetch` via `gloo-net`
//! - `native` (default): `reqwest`
//! - neither: every call fails with [`ApiError::Transport`]
//!
//! When both features are on, the browser backend wins.
//!
//! ERROR HANDLING
//! ==============
//! Login responses are returned for every status; mapping statuses to
//! session errors is the store's job. The projects call treats any non-2xx
//! status as [`ApiError::Status`].

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::headers::{Header, token_from_header};
use super::types::{LoginRequest, LoginResponse, Project, ProjectsResponse};
use crate::config::SessionConfig;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {status}")]
    Status { status: u16 },
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Provider-neutral async access to the billing API. Enables mocking in tests.
#[async_trait::async_trait(?Send)]
pub trait SessionApi {
    /// Post credentials to the login endpoint.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] only when no response was received.
    async fn login(&self, request: &LoginRequest, headers: &[Header]) -> Result<LoginResponse, ApiError>;

    /// List the projects visible to the bearer of the token in `headers`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a non-2xx status, or an
    /// undecodable body.
    async fn fetch_projects(&self, headers: &[Header]) -> Result<ProjectsResponse, ApiError>;
}

/// Decode a projects body, keeping a renewed token when the server sent one.
#[cfg_attr(not(any(feature = "native", feature = "hydrate")), allow(dead_code))]
pub(crate) fn parse_projects(
    status: u16,
    authorization: Option<&str>,
    body: &str,
) -> Result<ProjectsResponse, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status { status });
    }
    let projects: Vec<Project> = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    let renewed_token = authorization.and_then(token_from_header);
    Ok(ProjectsResponse { projects, renewed_token })
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// [`SessionApi`] over HTTP against the endpoints in [`SessionConfig`].
pub struct HttpApi {
    config: SessionConfig,
    #[cfg(all(feature = "native", not(feature = "hydrate")))]
    client: reqwest::Client,
}

impl HttpApi {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            #[cfg(all(feature = "native", not(feature = "hydrate")))]
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl SessionApi for HttpApi {
    async fn login(&self, request: &LoginRequest, headers: &[Header]) -> Result<LoginResponse, ApiError> {
        let url = self.config.login_url();
        log::debug!("POST {url} as {}", request.username);

        #[cfg(feature = "hydrate")]
        {
            let mut builder = gloo_net::http::Request::post(&url);
            for (name, value) in headers {
                builder = builder.header(name, value);
            }
            let resp = builder
                .json(request)
                .map_err(|e| ApiError::Transport(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = resp.status();
            let authorization = resp.headers().get("authorization");
            let body = resp.text().await.unwrap_or_default();
            Ok(LoginResponse { status, authorization, body })
        }
        #[cfg(all(feature = "native", not(feature = "hydrate")))]
        {
            let mut builder = self.client.post(&url).json(request);
            for (name, value) in headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            let resp = builder
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = resp.status().as_u16();
            let authorization = resp
                .headers()
                .get(reqwest::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let body = resp.text().await.unwrap_or_default();
            Ok(LoginResponse { status, authorization, body })
        }
        #[cfg(not(any(feature = "native", feature = "hydrate")))]
        {
            let _ = headers;
            Err(ApiError::Transport(format!("no HTTP backend enabled for {url}")))
        }
    }

    async fn fetch_projects(&self, headers: &[Header]) -> Result<ProjectsResponse, ApiError> {
        let url = self.config.projects_url();
        log::debug!("GET {url}");

        #[cfg(feature = "hydrate")]
        {
            let mut builder = gloo_net::http::Request::get(&url);
            for (name, value) in headers {
                builder = builder.header(name, value);
            }
            let resp = builder
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = resp.status();
            let authorization = resp.headers().get("authorization");
            let body = resp.text().await.map_err(|e| ApiError::Decode(e.to_string()))?;
            parse_projects(status, authorization.as_deref(), &body)
        }
        #[cfg(all(feature = "native", not(feature = "hydrate")))]
        {
            let mut builder = self.client.get(&url);
            for (name, value) in headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            let resp = builder
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = resp.status().as_u16();
            let authorization = resp
                .headers()
                .get(reqwest::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let body = resp.text().await.map_err(|e| ApiError::Decode(e.to_string()))?;
            parse_projects(status, authorization.as_deref(), &body)
        }
        #[cfg(not(any(feature = "native", feature = "hydrate")))]
        {
            let _ = headers;
            Err(ApiError::Transport(format!("no HTTP backend enabled for {url}")))
        }
    }
}
