//! Shared HTTP plumbing for the resource modules.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::{ClientConfig, RequestError};

/// Handle to the backend. Cheap to clone; holds no session state.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    /// Build a request, attaching the bearer token when one is present.
    pub(crate) fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!(%method, %url, authenticated = token.is_some_and(|t| !t.is_empty()), "api request");

        let req = self.http.request(method, url);
        match token {
            Some(token) if !token.is_empty() => req.bearer_auth(token),
            _ => req,
        }
    }

    /// Send and reject non-2xx answers with `failure` as the message.
    pub(crate) async fn send(&self, req: RequestBuilder, failure: &str) -> Result<Response, RequestError> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        tracing::debug!(status = status.as_u16(), "api request rejected");
        Err(RequestError::Status {
            status: status.as_u16(),
            message: failure.to_string(),
        })
    }
}

/// Parse a 2xx body against `T`; mismatches are `Malformed`, not panics.
pub(crate) async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T, RequestError> {
    let body = resp.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| RequestError::Malformed(e.to_string()))
}
