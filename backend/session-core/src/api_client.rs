//! Shared REST transport.
//!
//! Every request goes through [`ApiClient::prepare_request`], which attaches
//! the current access token from the session store as a bearer credential.
//! Requests made while anonymous carry no `Authorization` header.

use crate::config::ClientConfig;
use crate::error::{ApiError, CoreError};
use crate::session::SessionStore;

use common::ErrorLocation;

use std::panic::Location;
use std::time::Duration;

use log::debug;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
    session: SessionStore,
}

impl ApiClient {
    /// Build a client for `base_url_str` with the default 30s timeout.
    pub fn new(base_url_str: &str, session: SessionStore) -> Result<Self, ApiError> {
        Self::with_timeout(base_url_str, DEFAULT_TIMEOUT_DURATION, session)
    }

    pub fn with_timeout(
        base_url_str: &str,
        timeout: Duration,
        session: SessionStore,
    ) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url_str)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            client,
            session,
        })
    }

    /// Build a client from validated configuration.
    pub fn from_config(config: &ClientConfig, session: SessionStore) -> Result<Self, CoreError> {
        let base_url = config.base_url()?;
        Ok(Self::with_timeout(
            base_url.as_str(),
            config.timeout(),
            session,
        )?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    pub(crate) fn get(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.client.get(self.endpoint(path)?))
    }

    pub(crate) fn post(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.client.post(self.endpoint(path)?))
    }

    pub(crate) fn put(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.client.put(self.endpoint(path)?))
    }

    pub(crate) fn delete(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.client.delete(self.endpoint(path)?))
    }

    fn prepare_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        }
    }

    /// Send a request and fail on any non-2xx status.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.prepare_request(request).send().await?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url().path());

        if !status.is_success() {
            return Err(ApiError::Status {
                status_code: status.as_u16().into(),
                message: response.text().await.unwrap_or_default(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(response)
    }

    /// Send a request and decode its JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let json: Value = response.json().await?;
        Ok(serde_json::from_value(json)?)
    }
}
