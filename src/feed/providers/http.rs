// src/feed/providers/http.rs
//! Remote document source for deployments where the fixture documents are
//! published by another host. Requires feature `feed-http`.

use async_trait::async_trait;

use crate::feed::types::{DataSource, FetchError};

pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    /// `base_url` without a trailing slash, e.g. `https://host/data`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch_document(&self, name: &str) -> Result<String, FetchError> {
        let url = format!("{}/{name}.json", self.base_url.trim_end_matches('/'));
        let resp = self.client.get(&url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(name.to_string()));
        }
        let body = resp.error_for_status()?.text().await?;
        Ok(body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
