//! Example CRUD resources served by the same backend as the auth service.
//!
//! Requests share [`ApiClient`], so they carry the session's bearer token
//! exactly like the auth endpoints do.

pub mod models;

pub use models::{ExampleUser, NewUser, Post, PostQuery, UserPatch};

use crate::api_client::ApiClient;
use crate::error::ApiError;

const USERS_ENDPOINT: &str = "users";
const POSTS_ENDPOINT: &str = "posts";

#[derive(Debug, Clone)]
pub struct ExampleApi {
    api: ApiClient,
}

impl ExampleApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_users(&self) -> Result<Vec<ExampleUser>, ApiError> {
        let request = self.api.get(USERS_ENDPOINT)?;
        self.api.send_json(request).await
    }

    pub async fn get_user_by_id(&self, id: u64) -> Result<ExampleUser, ApiError> {
        let request = self.api.get(&format!("{USERS_ENDPOINT}/{id}"))?;
        self.api.send_json(request).await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<ExampleUser, ApiError> {
        let request = self.api.post(USERS_ENDPOINT)?.json(user);
        self.api.send_json(request).await
    }

    pub async fn update_user(&self, id: u64, patch: &UserPatch) -> Result<ExampleUser, ApiError> {
        let request = self.api.put(&format!("{USERS_ENDPOINT}/{id}"))?.json(patch);
        self.api.send_json(request).await
    }

    pub async fn delete_user(&self, id: u64) -> Result<(), ApiError> {
        let request = self.api.delete(&format!("{USERS_ENDPOINT}/{id}"))?;
        self.api.send(request).await?;
        Ok(())
    }

    pub async fn get_posts(&self, query: PostQuery) -> Result<Vec<Post>, ApiError> {
        let request = self.api.get(POSTS_ENDPOINT)?.query(&query);
        self.api.send_json(request).await
    }
}
