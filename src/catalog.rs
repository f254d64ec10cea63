//! HTTP client for the catalog service.
//!
//! This module provides the two read operations the browser needs: listing
//! every show, and listing the episodes of one show. Each call is a single
//! attempt; retry policy belongs to the caller.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::types::{Episode, RawEpisode, RawShow, Show, ShowId};
use log::debug;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;

/// Read access to show and episode listings.
///
/// Implemented by [`CatalogClient`] for the real service; the cache and the
/// synchronizer are generic over it.
pub trait Catalog: Send + Sync + 'static {
    /// Fetch every show in the catalog.
    fn fetch_shows(&self) -> impl Future<Output = Result<Vec<Show>>> + Send;

    /// Fetch the episodes of one show, in catalog order.
    fn fetch_episodes(&self, show_id: ShowId) -> impl Future<Output = Result<Vec<Episode>>> + Send;
}

/// Catalog service client over HTTP.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Build a client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self::with_client(client, config.base_url()))
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Network(format!("HTTP {} for {}", status.as_u16(), url)));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| AppError::Parse(format!("Failed to decode {}: {}", url, e)))
    }
}

impl Catalog for CatalogClient {
    async fn fetch_shows(&self) -> Result<Vec<Show>> {
        let raw: Vec<RawShow> = self.get_json("/shows").await?;
        let shows: Vec<Show> = raw.into_iter().map(Show::from).collect();
        debug!("Fetched {} shows", shows.len());
        Ok(shows)
    }

    async fn fetch_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>> {
        let raw: Vec<RawEpisode> = self.get_json(&format!("/shows/{}/episodes", show_id)).await?;
        let episodes: Vec<Episode> = raw.into_iter().map(Episode::from).collect();
        debug!("Fetched {} episodes for show {}", episodes.len(), show_id);
        Ok(episodes)
    }
}
