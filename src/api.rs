// API client module: contains a small blocking HTTP client that talks to
// the Puppy Bowl REST API. It is intentionally small and synchronous to
// keep the learning curve low for beginners. Every endpoint wraps its
// payload in a `data` envelope, so the decoders here unwrap that shape
// and hand the rest of the program plain players.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Base URL of the hosted API, used when no override is configured.
pub const DEFAULT_API_URL: &str = "https://fsa-puppy-bowl.herokuapp.com/api";

/// Cohort segment appended to the base URL. Every cohort gets its own
/// roster on the shared server.
pub const DEFAULT_COHORT: &str = "2302-acc-pt-web-pt-d";

/// Identifier of a player as the server knows it.
///
/// The server hands ids back as JSON numbers in some payloads and as
/// strings in others, so deserialization accepts both and normalizes to
/// the string form used in request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(PlayerId(s)),
            Value::Number(n) => Ok(PlayerId(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "player id must be a string or a number, got {other}"
            ))),
        }
    }
}

/// One roster entry as returned by the server. Only the id is required
/// to be present; the display fields fall back to empty strings so a
/// sparse record still renders.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub image_url: String,
}

/// Data shape used to add a player. Fields mirror what the form on the
/// original site collects.
#[derive(Serialize, Deserialize, Debug)]
pub struct NewPlayer {
    pub name: String,
    pub breed: String,
}

#[derive(Deserialize)]
struct PlayersEnvelope {
    data: PlayersData,
}

#[derive(Deserialize)]
struct PlayersData {
    players: Vec<Player>,
}

#[derive(Deserialize)]
struct PlayerEnvelope {
    data: PlayerData,
}

#[derive(Deserialize)]
struct PlayerData {
    player: Player,
}

/// What can go wrong talking to the roster server. The variants keep
/// the request URL so log lines can say which call failed, and they
/// separate "the network or body was broken" from "the body was valid
/// JSON of the wrong shape", because the controller reacts differently
/// to the two.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("player id must not be empty")]
    EmptyPlayerId,
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },
    #[error("{url} answered with a body that is not JSON: {source}")]
    InvalidJson {
        url: String,
        source: reqwest::Error,
    },
    #[error("unexpected response shape from {url}: {source}")]
    UnexpectedShape {
        url: String,
        source: serde_json::Error,
    },
}

/// The four roster operations the rest of the program is written
/// against. `ApiClient` is the real implementation; tests substitute
/// their own.
pub trait RosterApi {
    /// Fetch the whole roster.
    fn list_players(&self) -> Result<Vec<Player>, ApiError>;

    /// Fetch a single player by id. The id must be non-empty; an empty
    /// id fails without touching the network.
    fn fetch_player(&self, id: &str) -> Result<Player, ApiError>;

    /// Add a player to the roster. Returns the decoded response body
    /// as-is; callers treat any non-null body as acceptance.
    fn create_player(&self, player: &NewPlayer) -> Result<Value, ApiError>;

    /// Remove a player from the roster. Returns whether the server
    /// answered with a success status.
    fn delete_player(&self, id: &str) -> Result<bool, ApiError>;
}

/// Simple API client that holds a reqwest blocking client and the base
/// URL of the cohort's roster endpoints.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create an ApiClient for the given base URL. A trailing slash on
    /// the URL is tolerated.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        let base_url: String = base_url.into();
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create an ApiClient configured from the environment variables
    /// `PUPPY_BOWL_API_URL` and `PUPPY_BOWL_COHORT`, falling back to the
    /// hosted API and the default cohort.
    pub fn from_env() -> Result<Self> {
        let api_url =
            std::env::var("PUPPY_BOWL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let cohort = std::env::var("PUPPY_BOWL_COHORT").unwrap_or_else(|_| DEFAULT_COHORT.into());
        Self::new(format!("{}/{}", api_url.trim_end_matches('/'), cohort))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GET a URL and decode the body as free-form JSON. Decoding the
    /// body in a second step (from Value to the typed envelope) lets the
    /// caller tell a garbled body apart from a well-formed body of the
    /// wrong shape.
    fn get_json(&self, url: &str) -> Result<Value, ApiError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        response.json::<Value>().map_err(|source| ApiError::InvalidJson {
            url: url.to_string(),
            source,
        })
    }
}

impl RosterApi for ApiClient {
    fn list_players(&self) -> Result<Vec<Player>, ApiError> {
        let url = self.url("players");
        let body = self.get_json(&url)?;
        let envelope: PlayersEnvelope = serde_json::from_value(body)
            .map_err(|source| ApiError::UnexpectedShape { url, source })?;
        Ok(envelope.data.players)
    }

    fn fetch_player(&self, id: &str) -> Result<Player, ApiError> {
        if id.is_empty() {
            return Err(ApiError::EmptyPlayerId);
        }
        let url = self.url(&format!("players/{id}"));
        let body = self.get_json(&url)?;
        let envelope: PlayerEnvelope = serde_json::from_value(body)
            .map_err(|source| ApiError::UnexpectedShape { url, source })?;
        Ok(envelope.data.player)
    }

    fn create_player(&self, player: &NewPlayer) -> Result<Value, ApiError> {
        let url = self.url("players");
        let response = self
            .client
            .post(&url)
            .json(player)
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        response
            .json::<Value>()
            .map_err(|source| ApiError::InvalidJson { url, source })
    }

    fn delete_player(&self, id: &str) -> Result<bool, ApiError> {
        let url = self.url(&format!("players/{id}"));
        let response = self
            .client
            .delete(&url)
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        Ok(response.status().is_success())
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
