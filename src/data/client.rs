//! Caching PokeAPI client
//!
//! Every request goes through the response cache first. On a hit the cached
//! body is decoded and returned without a network call; on a miss (or when a
//! cached body no longer decodes) the resource is fetched, decoded, and its raw
//! body stored under the request URL.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use super::{LocationArea, LocationPage, Pokemon};
use crate::cache::Cache;

/// Base URL for PokeAPI v2
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Errors that can occur when fetching from PokeAPI
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure, including request timeouts
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: StatusCode },

    /// The response body did not match the expected shape
    #[error("Failed to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for PokeAPI backed by an in-memory response cache
#[derive(Debug)]
pub struct PokeApiClient {
    /// HTTP client with the request timeout applied
    http_client: Client,
    /// Raw response bodies keyed by URL
    cache: Cache,
    /// Base URL for the API, without a trailing slash
    base_url: String,
}

impl PokeApiClient {
    /// Creates a client for `base_url` that gives up on requests after `timeout`.
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. [`DEFAULT_BASE_URL`]
    /// * `timeout` - Maximum duration of a single request
    /// * `cache` - Cache owned by this client for its whole lifetime
    pub fn new(base_url: impl Into<String>, timeout: Duration, cache: Cache) -> Result<Self, ApiError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http_client,
            cache,
            base_url,
        })
    }

    /// The response cache, for inspection
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// URL of the first page of the location-area listing
    pub fn location_areas_url(&self) -> String {
        format!("{}/location-area", self.base_url)
    }

    /// Fetches a page of location areas.
    ///
    /// # Arguments
    /// * `page_url` - A `next`/`previous` cursor from an earlier page, or `None`
    ///   for the first page
    pub async fn list_locations(&self, page_url: Option<&str>) -> Result<LocationPage, ApiError> {
        match page_url {
            Some(url) => self.fetch(url).await,
            None => self.fetch(&self.location_areas_url()).await,
        }
    }

    /// Fetches the details of a location area, including its encounters.
    pub async fn explore_area(&self, area: &str) -> Result<LocationArea, ApiError> {
        let url = format!("{}/location-area/{}", self.base_url, area);
        self.fetch(&url).await
    }

    /// Fetches a Pokemon record by name.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon, ApiError> {
        let url = format!("{}/pokemon/{}", self.base_url, name);
        self.fetch(&url).await
    }

    /// Fetches `url` and decodes its JSON body, consulting the cache first.
    ///
    /// # Returns
    /// * `Ok(T)` - Decoded from the cache or from a fresh response
    /// * `Err(ApiError)` - If the request fails, the status is not 2xx, or the
    ///   body cannot be decoded. The cache is left untouched.
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        if let Some(cached) = self.cache.get(url) {
            match serde_json::from_slice::<T>(&cached) {
                Ok(value) => {
                    debug!(url, "cache hit");
                    return Ok(value);
                }
                Err(e) => debug!(url, error = %e, "cached body did not decode, refetching"),
            }
        }

        debug!(url, "fetching");
        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        let value = serde_json::from_slice::<T>(&body)?;
        self.cache.add(url, body.to_vec());

        Ok(value)
    }

    /// Stops the cache sweeper.
    pub async fn shutdown(self) {
        self.cache.shutdown().await;
    }
}
