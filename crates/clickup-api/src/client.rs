//! Blocking client for the ClickUp REST API.
//!
//! One call is one HTTP round-trip: build the URL, attach the token, send,
//! read the whole body, check the status, decode. Nothing is retried.

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::params::QueryParams;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::debug;
use ureq::{Agent, RequestBuilder};

/// Deadline for a whole request, from connect to the last body byte.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// Client holding the token, team ID and a ureq agent.
///
/// Built once per process and passed to every command handler.
pub struct ClickUpClient {
    config: Config,
    agent: Agent,
}

impl fmt::Debug for ClickUpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickUpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ClickUpClient {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { config, agent }
    }

    /// Workspace ID used by team-scoped endpoints.
    #[must_use]
    pub fn team_id(&self) -> &str {
        &self.config.team_id
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Absolute URL for `path` (which starts with `/`) plus encoded params.
    #[must_use]
    pub fn endpoint_url(&self, path: &str, params: &QueryParams) -> String {
        if params.is_empty() {
            format!("{}{path}", self.config.base_url)
        } else {
            format!("{}{path}?{}", self.config.base_url, params.encode())
        }
    }

    /// `GET path`, decoding the response into `T`.
    ///
    /// # Errors
    /// Returns an `ApiError` naming the stage that failed.
    pub fn get<T>(&self, path: &str, params: &QueryParams) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        self.request(Method::Get, path, params, None)
    }

    /// `POST path` with a JSON body, decoding the response into `T`.
    ///
    /// # Errors
    /// Returns an `ApiError` naming the stage that failed.
    pub fn post<T, B>(&self, path: &str, params: &QueryParams, body: &B) -> Result<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(body).map_err(ApiError::Encode)?;
        self.request(Method::Post, path, params, Some(body))
    }

    /// `PUT path` with a JSON body, decoding the response into `T`.
    ///
    /// # Errors
    /// Returns an `ApiError` naming the stage that failed.
    pub fn put<T, B>(&self, path: &str, params: &QueryParams, body: &B) -> Result<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(body).map_err(ApiError::Encode)?;
        self.request(Method::Put, path, params, Some(body))
    }

    fn request<T>(
        &self,
        method: Method,
        path: &str,
        params: &QueryParams,
        body: Option<String>,
    ) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let url = self.endpoint_url(path, params);
        if let Err(source) = url.parse::<ureq::http::Uri>() {
            return Err(ApiError::InvalidEndpoint { url, source });
        }

        debug!(%method, %url, "sending request");

        let url = url.as_str();
        let result = match (method, body) {
            (Method::Get, _) => self.authorize(self.agent.get(url)).call(),
            (Method::Post, Some(body)) => self.authorize(self.agent.post(url)).send(body.as_bytes()),
            (Method::Post, None) => self.authorize(self.agent.post(url)).send_empty(),
            (Method::Put, Some(body)) => self.authorize(self.agent.put(url)).send(body.as_bytes()),
            (Method::Put, None) => self.authorize(self.agent.put(url)).send_empty(),
        };
        let mut response = result.map_err(ApiError::Transport)?;

        let status = response.status().as_u16();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(ApiError::Read)?;

        debug!(%method, %url, status, bytes = text.len(), "received response");

        if !(200..300).contains(&status) {
            return Err(ApiError::Status { status, body: text });
        }

        decode_body(&text)
    }

    fn authorize<B>(&self, builder: RequestBuilder<B>) -> RequestBuilder<B> {
        builder
            .header("Authorization", self.config.api_token.as_str())
            .header("Content-Type", "application/json")
    }
}

/// Decode a 2xx body. An empty body yields `T::default()`.
pub(crate) fn decode_body<T>(body: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(body).map_err(ApiError::Decode)
}
