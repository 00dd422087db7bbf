// src/feed/providers/fixture.rs
//! Local fixture source: documents live as `<dir>/<name>.json` on disk, the
//! same files the UI fetches statically under `/data/`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::feed::types::{DataSource, FetchError};

pub struct FixtureSource {
    dir: PathBuf,
}

impl FixtureSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl DataSource for FixtureSource {
    async fn fetch_document(&self, name: &str) -> Result<String, FetchError> {
        let path = self.dir.join(format!("{name}.json"));
        if !path.exists() {
            return Err(FetchError::NotFound(name.to_string()));
        }
        let body = tokio::fs::read_to_string(&path).await?;
        Ok(body)
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
