//! Core data types for the Tropimon stats dashboard
//!
//! This module defines the payloads served by the stats API:
//! - `SummaryStats`: Aggregate capture counters
//! - `RankedPlayerRow` / `RankedSpeciesRow`: One leaderboard entry
//! - `SpeciesDetail`: Per-species breakdown
//! - `Board`: The six ranked resources and their endpoints

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Namespace applied to bare species names
pub const SPECIES_NAMESPACE: &str = "cobblemon";

/// Aggregate capture counters across all players
///
/// Fetched fresh on every load. A key missing from the payload (or sent
/// as `null`) reads as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "JsonObject")]
pub struct SummaryStats {
    pub total_captures: u64,
    pub total_shiny: u64,
    pub total_legendaries: u64,
    pub total_mythicals: u64,
}

impl TryFrom<JsonObject> for SummaryStats {
    type Error = PayloadError;

    fn try_from(object: JsonObject) -> Result<Self, Self::Error> {
        Ok(Self {
            total_captures: count_or_zero(&object, "total_captures")?,
            total_shiny: count_or_zero(&object, "total_shiny")?,
            total_legendaries: count_or_zero(&object, "total_legendaries")?,
            total_mythicals: count_or_zero(&object, "total_mythicals")?,
        })
    }
}

/// A JSON object payload
///
/// API payloads decode through this rather than serde's derived visitor,
/// which would also accept the positional array form of a struct.
type JsonObject = Map<String, Value>;

/// A JSON object that does not have the expected fields
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("missing field `{0}`")]
    Missing(&'static str),

    #[error("field `{field}` is not {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

fn count_or_zero(object: &JsonObject, field: &'static str) -> Result<u64, PayloadError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(0),
        Some(value) => as_count(value, field),
    }
}

fn required_count(object: &JsonObject, field: &'static str) -> Result<u64, PayloadError> {
    object
        .get(field)
        .ok_or(PayloadError::Missing(field))
        .and_then(|value| as_count(value, field))
}

fn required_str(object: &JsonObject, field: &'static str) -> Result<String, PayloadError> {
    object
        .get(field)
        .ok_or(PayloadError::Missing(field))?
        .as_str()
        .map(str::to_owned)
        .ok_or(PayloadError::WrongType {
            field,
            expected: "a string",
        })
}

fn as_count(value: &Value, field: &'static str) -> Result<u64, PayloadError> {
    value.as_u64().ok_or(PayloadError::WrongType {
        field,
        expected: "a non-negative integer",
    })
}

/// A leaderboard entry that can be projected onto a bar chart
///
/// The implementing type decides both the bar label and whether the
/// x-axis tick labels are worth showing.
pub trait RankedRow {
    /// Whether charts of this row type show their x-axis tick labels
    const SHOW_X_LABELS: bool;

    /// Bar label (player name or species id)
    fn label(&self) -> &str;

    /// Bar height
    fn count(&self) -> u64;
}

/// One entry of a player leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "JsonObject")]
pub struct RankedPlayerRow {
    /// Anonymised display name (e.g. "Player #3FA2")
    pub player: String,
    pub count: u64,
}

impl TryFrom<JsonObject> for RankedPlayerRow {
    type Error = PayloadError;

    fn try_from(object: JsonObject) -> Result<Self, Self::Error> {
        Ok(Self {
            player: required_str(&object, "player")?,
            count: required_count(&object, "count")?,
        })
    }
}

impl RankedRow for RankedPlayerRow {
    const SHOW_X_LABELS: bool = true;

    fn label(&self) -> &str {
        &self.player
    }

    fn count(&self) -> u64 {
        self.count
    }
}

/// One entry of a species leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "JsonObject")]
pub struct RankedSpeciesRow {
    /// Namespaced species id (e.g. "cobblemon:geodude")
    pub species: String,
    pub count: u64,
}

impl TryFrom<JsonObject> for RankedSpeciesRow {
    type Error = PayloadError;

    fn try_from(object: JsonObject) -> Result<Self, Self::Error> {
        Ok(Self {
            species: required_str(&object, "species")?,
            count: required_count(&object, "count")?,
        })
    }
}

impl RankedRow for RankedSpeciesRow {
    // Species ids are long and there can be fifty of them.
    const SHOW_X_LABELS: bool = false;

    fn label(&self) -> &str {
        &self.species
    }

    fn count(&self) -> u64 {
        self.count
    }
}

/// Capture breakdown for a single species
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesDetail {
    pub species: String,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub shiny: u64,
    #[serde(default)]
    pub top_players: Vec<RankedPlayerRow>,
}

/// Which row type a leaderboard returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Player,
    Species,
}

/// The ranked resources exposed by the stats API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Board {
    Captures,
    Shiny,
    Legendaries,
    Mythicals,
    Species,
    ShinySpecies,
}

impl Board {
    /// All boards in dashboard order
    pub const ALL: [Board; 6] = [
        Board::Captures,
        Board::Shiny,
        Board::Legendaries,
        Board::Mythicals,
        Board::Species,
        Board::ShinySpecies,
    ];

    /// Short name used on the command line and in the endpoint path
    pub fn name(self) -> &'static str {
        match self {
            Board::Captures => "captures",
            Board::Shiny => "shiny",
            Board::Legendaries => "legendaries",
            Board::Mythicals => "mythicals",
            Board::Species => "species",
            Board::ShinySpecies => "shiny-species",
        }
    }

    /// API path, relative to the API base
    pub fn path(self) -> &'static str {
        match self {
            Board::Captures => "/api/top/captures",
            Board::Shiny => "/api/top/shiny",
            Board::Legendaries => "/api/top/legendaries",
            Board::Mythicals => "/api/top/mythicals",
            Board::Species => "/api/top/species",
            Board::ShinySpecies => "/api/top/shiny-species",
        }
    }

    /// Chart title as shown on the dashboard
    pub fn title(self) -> &'static str {
        match self {
            Board::Captures => "Top Captures",
            Board::Shiny => "Top Shiny",
            Board::Legendaries => "Top Légendaires",
            Board::Mythicals => "Top Mythiques",
            Board::Species => "Top Species",
            Board::ShinySpecies => "Top Shiny Species",
        }
    }

    pub fn row_kind(self) -> RowKind {
        match self {
            Board::Species | Board::ShinySpecies => RowKind::Species,
            _ => RowKind::Player,
        }
    }

    /// API path with an optional `limit` query parameter
    pub fn path_with_limit(self, limit: Option<u32>) -> String {
        match limit {
            Some(limit) => format!("{}?limit={}", self.path(), limit),
            None => self.path().to_string(),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown board name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown leaderboard '{0}' (expected one of: captures, shiny, legendaries, mythicals, species, shiny-species)")]
pub struct UnknownBoard(pub String);

impl FromStr for Board {
    type Err = UnknownBoard;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Board::ALL
            .into_iter()
            .find(|board| board.name() == wanted)
            .ok_or_else(|| UnknownBoard(s.to_string()))
    }
}

/// Normalise a user-supplied species name into a namespaced id
///
/// `Geodude`, `geodude` and `CObbLEmon:geodude` all become
/// `cobblemon:geodude`.
pub fn normalize_species_id(raw: &str) -> String {
    let id = raw.trim().to_lowercase();
    let prefix = format!("{}:", SPECIES_NAMESPACE);
    if id.starts_with(&prefix) {
        id
    } else {
        format!("{}{}", prefix, id)
    }
}
