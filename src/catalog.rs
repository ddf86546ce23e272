//! Creature catalog client supplying avatars and cell decorations.
//!
//! The catalog is only consulted while a game is being created. Every
//! failure degrades to "fewer decorations"; none of them stops a game.

use crate::config::CatalogConfig;
use async_trait::async_trait;
use derive_more::{Display, Error};
use futures::future::join_all;
use rand::Rng;
use serde::Deserialize;
use std::time::Duration;
use sugoroku_engine::Decoration;
use tracing::{debug, info, instrument, warn};

/// Source of decorative entities.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetches up to `count` decorations.
    ///
    /// Individual lookups that fail are dropped, so the result may be
    /// shorter than `count`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the provider cannot serve anything at all.
    async fn fetch(&self, count: usize) -> Result<Vec<Decoration>, CatalogError>;
}

/// Catalog that never returns anything (offline play).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCatalog;

#[async_trait]
impl CatalogProvider for NoCatalog {
    async fn fetch(&self, count: usize) -> Result<Vec<Decoration>, CatalogError> {
        debug!(count, "Catalog disabled, no decorations");
        Ok(Vec::new())
    }
}

/// Catalog serving a fixed list, cycled as needed.
#[derive(Debug, Clone, Default)]
pub struct FixedCatalog {
    entries: Vec<Decoration>,
}

impl FixedCatalog {
    /// Creates a catalog over `entries`.
    pub fn new(entries: Vec<Decoration>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl CatalogProvider for FixedCatalog {
    async fn fetch(&self, count: usize) -> Result<Vec<Decoration>, CatalogError> {
        Ok(self.entries.iter().cycle().take(count).cloned().collect())
    }
}

/// Client for a PokeAPI-compatible catalog (`GET {base}/pokemon/{id}`).
#[derive(Debug, Clone)]
pub struct PokeApiCatalog {
    client: reqwest::Client,
    base_url: String,
    max_id: u32,
}

impl PokeApiCatalog {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the HTTP client cannot be built.
    #[instrument(skip(config), fields(base_url = %config.base_url()))]
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()
            .map_err(|e| CatalogError::new(format!("Failed to build HTTP client: {}", e)))?;
        info!("Creating PokeAPI catalog client");
        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            max_id: (*config.max_id()).max(1),
        })
    }

    /// Fetches one entry by catalog id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport failure, non-success status or
    /// an unparseable body.
    #[instrument(skip(self))]
    pub async fn fetch_one(&self, id: u32) -> Result<Decoration, CatalogError> {
        let url = format!("{}/pokemon/{}", self.base_url, id);
        debug!(%url, "Fetching catalog entry");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::new(format!("Request for {} failed: {}", id, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::new(format!("Catalog returned {} for {}", status, id)));
        }

        let entry: CatalogEntry = response
            .json()
            .await
            .map_err(|e| CatalogError::new(format!("Failed to parse entry {}: {}", id, e)))?;
        Ok(entry.into_decoration())
    }

    fn random_ids(&self, count: usize) -> Vec<u32> {
        let mut rng = rand::rng();
        (0..count).map(|_| rng.random_range(1..=self.max_id)).collect()
    }
}

#[async_trait]
impl CatalogProvider for PokeApiCatalog {
    #[instrument(skip(self))]
    async fn fetch(&self, count: usize) -> Result<Vec<Decoration>, CatalogError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let ids = self.random_ids(count);
        let results = join_all(ids.into_iter().map(|id| self.fetch_one(id))).await;

        let mut decorations = Vec::with_capacity(count);
        let mut last_error = None;
        for result in results {
            match result {
                Ok(decoration) => decorations.push(decoration),
                Err(e) => {
                    warn!(error = %e, "Dropping catalog entry");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if decorations.is_empty() => Err(e),
            _ => {
                info!(requested = count, fetched = decorations.len(), "Catalog entries fetched");
                Ok(decorations)
            }
        }
    }
}

/// The parts of a catalog entry the game uses.
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: u32,
    name: String,
    #[serde(default)]
    sprites: Sprites,
}

#[derive(Debug, Default, Deserialize)]
struct Sprites {
    front_default: Option<String>,
    #[serde(default)]
    other: OtherSprites,
}

#[derive(Debug, Default, Deserialize)]
struct OtherSprites {
    #[serde(rename = "official-artwork")]
    official_artwork: Option<Artwork>,
}

#[derive(Debug, Deserialize)]
struct Artwork {
    front_default: Option<String>,
}

impl CatalogEntry {
    /// Prefers the official artwork, then the front sprite.
    fn into_decoration(self) -> Decoration {
        let image_ref = self
            .sprites
            .other
            .official_artwork
            .and_then(|a| a.front_default)
            .or(self.sprites.front_default)
            .unwrap_or_default();
        Decoration::new(self.id, self.name, image_ref)
    }
}

/// Catalog error.
#[derive(Debug, Clone, Display, Error)]
#[display("Catalog error: {} at {}:{}", message, file, line)]
pub struct CatalogError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl CatalogError {
    /// Creates a new catalog error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_prefers_artwork() {
        let entry: CatalogEntry = serde_json::from_str(
            r#"{
                "id": 25,
                "name": "pikachu",
                "sprites": {
                    "front_default": "sprite.png",
                    "other": {"official-artwork": {"front_default": "art.png"}}
                }
            }"#,
        )
        .expect("parse");
        let decoration = entry.into_decoration();
        assert_eq!(*decoration.id(), 25);
        assert_eq!(decoration.image_ref(), "art.png");
    }

    #[test]
    fn test_entry_falls_back_to_sprite() {
        let entry: CatalogEntry = serde_json::from_str(
            r#"{"id": 1, "name": "bulbasaur", "sprites": {"front_default": "sprite.png", "other": {}}}"#,
        )
        .expect("parse");
        assert_eq!(entry.into_decoration().image_ref(), "sprite.png");
    }

    #[tokio::test]
    async fn test_fixed_catalog_cycles() {
        let catalog = FixedCatalog::new(vec![Decoration::new(1, "a", "a.png"), Decoration::new(2, "b", "b.png")]);
        let fetched = catalog.fetch(3).await.expect("fetch");
        let ids: Vec<u32> = fetched.iter().map(|d| *d.id()).collect();
        assert_eq!(ids, vec![1, 2, 1]);
        assert!(NoCatalog.fetch(5).await.expect("fetch").is_empty());
    }
}
