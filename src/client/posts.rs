use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::models::posts::{CreatePostDto, Post, UpdatePostDto};

use super::ApiError;

/// Typed calls against the posts API. `base_url` includes the `/api` prefix.
#[derive(Clone)]
pub struct PostsClient {
    client: Client,
    base_url: String,
}

impl PostsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(2))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.bytes().await?;
        Err(ApiError::from_response(status, &body))
    }

    pub async fn list(&self) -> Result<Vec<Post>, ApiError> {
        self.send(self.client.get(self.url("/posts"))).await
    }

    pub async fn find(&self, post_id: i32) -> Result<Post, ApiError> {
        self.send(self.client.get(self.url(&format!("/posts/{post_id}"))))
            .await
    }

    pub async fn create(&self, params: &CreatePostDto) -> Result<Post, ApiError> {
        self.send(self.client.post(self.url("/posts")).json(params))
            .await
    }

    pub async fn update(&self, post_id: i32, params: &UpdatePostDto) -> Result<Post, ApiError> {
        self.send(
            self.client
                .put(self.url(&format!("/posts/{post_id}")))
                .json(params),
        )
        .await
    }

    /// Returns the post as it was before deletion.
    pub async fn destroy(&self, post_id: i32) -> Result<Post, ApiError> {
        self.send(self.client.delete(self.url(&format!("/posts/{post_id}"))))
            .await
    }
}
