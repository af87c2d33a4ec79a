//! Stats API Client
//!
//! HTTP client for the Tropimon stats API, used by the terminal host.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::dashboard::{
    normalize_species_id, Board, FetchError, JsonSource, RankedPlayerRow, RankedSpeciesRow,
    RowKind, SpeciesDetail, SummaryStats, SUMMARY_PATH,
};

/// Default API base URL (the stats service listens on port 8000)
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// One leaderboard, typed by its row kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Leaderboard {
    Players(Vec<RankedPlayerRow>),
    Species(Vec<RankedSpeciesRow>),
}

impl Leaderboard {
    pub fn len(&self) -> usize {
        match self {
            Leaderboard::Players(rows) => rows.len(),
            Leaderboard::Species(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (label, count) pairs in ranking order
    pub fn entries(&self) -> Vec<(&str, u64)> {
        match self {
            Leaderboard::Players(rows) => rows.iter().map(|r| (r.player.as_str(), r.count)).collect(),
            Leaderboard::Species(rows) => rows.iter().map(|r| (r.species.as_str(), r.count)).collect(),
        }
    }
}

/// Stats API client
#[derive(Debug, Clone)]
pub struct StatsClient {
    client: Client,
    base_url: String,
}

impl StatsClient {
    /// Create a client for the API at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the capture summary
    pub async fn summary(&self) -> Result<SummaryStats, FetchError> {
        self.get_typed(&self.url(SUMMARY_PATH)).await
    }

    /// Fetch one leaderboard, optionally limiting the number of rows
    pub async fn top(&self, board: Board, limit: Option<u32>) -> Result<Leaderboard, FetchError> {
        let url = self.url(&board.path_with_limit(limit));

        match board.row_kind() {
            RowKind::Player => Ok(Leaderboard::Players(self.get_typed(&url).await?)),
            RowKind::Species => Ok(Leaderboard::Species(self.get_typed(&url).await?)),
        }
    }

    /// Fetch the capture breakdown of one species
    ///
    /// The name is normalised first, so `Geodude` works.
    pub async fn species_detail(&self, species: &str) -> Result<SpeciesDetail, FetchError> {
        let id = normalize_species_id(species);
        let url = self.url(&format!("/api/species/{}", urlencoding::encode(&id)));
        self.get_typed(&url).await
    }

    async fn get_typed<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let value = self.get_json(url).await?;
        serde_json::from_value(value).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait(?Send)]
impl JsonSource for StatsClient {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(url).send().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
