//! Remote authentication service.
//!
//! [`AuthApi`] is the seam between the orchestrator and the network;
//! [`HttpAuthApi`] is the REST implementation.

pub mod models;

pub use models::{LoginRequest, LoginResponse, RefreshResponse};

use crate::api_client::ApiClient;
use crate::error::ApiError;
use crate::session::User;

use models::RefreshRequest;

use common::RedactedToken;

use std::future::Future;

const LOGIN_ENDPOINT: &str = "auth/login";
const REFRESH_ENDPOINT: &str = "auth/refresh";
const LOGOUT_ENDPOINT: &str = "auth/logout";
const CURRENT_USER_ENDPOINT: &str = "auth/me";

/// Operations offered by the remote auth service.
pub trait AuthApi: Send + Sync {
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>> + Send;

    fn refresh(
        &self,
        refresh_token: &RedactedToken,
    ) -> impl Future<Output = Result<RefreshResponse, ApiError>> + Send;

    /// The response body is ignored; only the status matters.
    fn logout(&self) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn current_user(&self) -> impl Future<Output = Result<User, ApiError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    api: ApiClient,
}

impl HttpAuthApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn client(&self) -> &ApiClient {
        &self.api
    }
}

impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let request = self.api.post(LOGIN_ENDPOINT)?.json(request);
        self.api.send_json(request).await
    }

    async fn refresh(&self, refresh_token: &RedactedToken) -> Result<RefreshResponse, ApiError> {
        let body = RefreshRequest {
            refresh_token: refresh_token.as_str(),
        };
        let request = self.api.post(REFRESH_ENDPOINT)?.json(&body);
        self.api.send_json(request).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let request = self
            .api
            .post(LOGOUT_ENDPOINT)?
            .json(&serde_json::json!({}));
        self.api.send(request).await?;
        Ok(())
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        let request = self.api.get(CURRENT_USER_ENDPOINT)?;
        self.api.send_json(request).await
    }
}
