//! HTTP query function searching a JSON posts endpoint.

use std::{env, time::Duration};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use quicksearch_engine::QueryFetcher;
use reqwest::{Client, header};
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_POSTS_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
}

/// Searches `endpoint` with `GET <endpoint>?q=<query>`.
#[derive(Clone, Debug)]
pub struct PostsClient {
    endpoint: String,
    http: Client,
}

impl PostsClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(format!("quicksearch/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS))
            .default_headers(default_headers)
            .timeout(Duration::from_secs(30))
            .build()
            .context("build http client")?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QueryFetcher<Post> for PostsClient {
    async fn fetch(&self, query: &str) -> Result<Option<Vec<Post>>> {
        debug!(endpoint = %self.endpoint, query = %query, "requesting posts");
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("q", query)])
            .send()
            .await
            .context("send posts request")?;

        let status = response.status();
        if !status.is_success() {
            bail!("posts endpoint responded with {status}");
        }
        let posts: Vec<Post> = response.json().await.context("decode posts response")?;
        Ok(Some(posts))
    }
}

/// Label for one post row.
pub fn render_post(post: &Post) -> String {
    format!("#{} {}", post.id, post.title)
}
