//! Backend contract: endpoint paths and request/response payloads.
//!
//! Nothing here does I/O. The host performs the HTTP calls; these types fix
//! the shapes on both sides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mission::{Mission, ScoreReward};
use crate::profile::CivicScores;

/// Base URL used when the host does not configure one.
pub const DEFAULT_API_URL: &str = "http://localhost:5001/api";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid date of birth `{0}`, expected YYYY-MM-DD")]
    InvalidDob(String),
    #[error("malformed payload")]
    Payload(#[from] serde_json::Error),
    #[error("score update needs a user id")]
    MissingUser,
    #[error("score update needs at least one score")]
    EmptyScores,
}

/// Normalise a configured base URL so it always ends in `/api`.
/// An empty value falls back to [`DEFAULT_API_URL`].
pub fn normalize_base_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        DEFAULT_API_URL.to_string()
    } else if raw.ends_with("/api") {
        raw.to_string()
    } else {
        format!("{raw}/api")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Register,
    User(String),
    Missions(u32),
    ScoreUpdate,
}

impl Endpoint {
    pub fn method(&self) -> &'static str {
        match self {
            Endpoint::Register | Endpoint::ScoreUpdate => "POST",
            Endpoint::User(_) | Endpoint::Missions(_) => "GET",
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::Register => "/register".to_string(),
            Endpoint::User(id) => format!("/user/{id}"),
            Endpoint::Missions(level) => format!("/missions?level={level}"),
            Endpoint::ScoreUpdate => "/score/update".to_string(),
        }
    }

    /// Full URL under an already normalised base.
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub dob: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: String,
    pub age: u32,
    pub current_level: u32,
}

/// Body of `POST /score/update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreUpdateRequest {
    pub user_id: String,
    pub mission_id: String,
    pub scores_earned: ScoreReward,
}

impl ScoreUpdateRequest {
    /// Validated the same way the backend validates it.
    pub fn new(
        user_id: impl Into<String>,
        mission_id: impl Into<String>,
        scores_earned: ScoreReward,
    ) -> Result<Self, ApiError> {
        let user_id = user_id.into();
        if user_id.is_empty() {
            return Err(ApiError::MissingUser);
        }
        if scores_earned.is_empty() {
            return Err(ApiError::EmptyScores);
        }
        Ok(Self {
            user_id,
            mission_id: mission_id.into(),
            scores_earned,
        })
    }

    pub fn to_json(&self) -> Result<String, ApiError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreUpdateResponse {
    pub message: String,
    #[serde(default)]
    pub civic_scores: Option<CivicScores>,
}

/// Parse the body of `GET /missions?level={n}`.
pub fn parse_missions(json: &str) -> Result<Vec<Mission>, ApiError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_api_suffix() {
        assert_eq!(normalize_base_url("http://localhost:5001"), "http://localhost:5001/api");
        assert_eq!(normalize_base_url("https://civic.example/api"), "https://civic.example/api");
        assert_eq!(normalize_base_url("  "), DEFAULT_API_URL);
    }

    #[test]
    fn endpoint_paths() {
        let base = normalize_base_url("http://host");
        assert_eq!(Endpoint::Register.url(&base), "http://host/api/register");
        assert_eq!(Endpoint::User("abc".into()).path(), "/user/abc");
        assert_eq!(Endpoint::Missions(2).path(), "/missions?level=2");
        assert_eq!(Endpoint::ScoreUpdate.method(), "POST");
        assert_eq!(Endpoint::Missions(1).method(), "GET");
    }

    #[test]
    fn score_update_body_shape() {
        let scores = ScoreReward::from([("hygiene".to_string(), 10), ("environment".to_string(), 5)]);
        let req = ScoreUpdateRequest::new("u1", "mission_hyg_001", scores).unwrap();
        assert_eq!(
            req.to_json().unwrap(),
            r#"{"user_id":"u1","mission_id":"mission_hyg_001","scores_earned":{"environment":5,"hygiene":10}}"#
        );
    }

    #[test]
    fn score_update_validation() {
        let one = ScoreReward::from([("hygiene".to_string(), 5)]);
        assert!(matches!(ScoreUpdateRequest::new("", "m", one), Err(ApiError::MissingUser)));
        assert!(matches!(
            ScoreUpdateRequest::new("u1", "m", ScoreReward::new()),
            Err(ApiError::EmptyScores)
        ));
    }

    #[test]
    fn missions_list_parses() {
        let missions = parse_missions(
            r#"[{"mission_id":"mission_hyg_000","title":"Tap the Trash","description":"Tap it.","level_required":1,"score_reward":{"hygiene":5}}]"#,
        )
        .unwrap();
        assert_eq!(missions.len(), 1);
        assert_eq!(missions[0].level(), 1);
        assert!(matches!(parse_missions("{}"), Err(ApiError::Payload(_))));
    }

    #[test]
    fn register_response_parses() {
        let resp: RegisterResponse =
            serde_json::from_str(r#"{"user_id":"u1","age":5,"current_level":2}"#).unwrap();
        assert_eq!(resp.current_level, 2);
    }
}
