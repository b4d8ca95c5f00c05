//! Civic Sense missions: tap and drag cleanup levels that report civic score
//! rewards to the host page.

use wasm_bindgen::prelude::*;

pub mod api;
pub mod host;
pub mod level;
pub mod mission;
pub mod profile;
pub mod scene;
pub mod sprites;

pub use api::{ApiError, Endpoint, ScoreUpdateRequest};
pub use host::HostSession;
pub use level::{Level, ScoreProgress};
pub use mission::{Mission, MissionContext, SceneOptions, ScoreReward};
pub use profile::{CalendarDate, CivicScores, UserProfile};
pub use scene::{Completion, MissionScene, MISSION_COMPLETE};

civic_web::export_game!(MissionScene, "civic-sense");

/// Body for `POST /score/update` from a completion payload, or `undefined`
/// when the inputs are incomplete.
#[wasm_bindgen]
pub fn score_update_body(user_id: &str, mission_id: &str, payload_json: &str) -> Option<String> {
    let build = || -> Result<String, ApiError> {
        let scores: ScoreReward = serde_json::from_str(payload_json)?;
        ScoreUpdateRequest::new(user_id, mission_id, scores)?.to_json()
    };
    build().map_err(|e| log::warn!("No score update: {e}")).ok()
}

/// Mission level for a `YYYY-MM-DD` date of birth, evaluated on `today`.
#[wasm_bindgen]
pub fn level_for_dob(dob: &str, today: &str) -> Option<u32> {
    let today: CalendarDate = today.parse().map_err(|e| log::warn!("{e}")).ok()?;
    profile::level_for_dob(dob, today).map_err(|e| log::warn!("{e}")).ok()
}

/// Backend base URL, always ending in `/api`.
#[wasm_bindgen]
pub fn api_base_url(raw: &str) -> String {
    api::normalize_base_url(raw)
}
