//! The host side of the scene contract.
//!
//! The browser shell owns the profile and the network; `HostSession` models
//! what it does with the scene: fill the registry, turn the completion event
//! into a score update, and swap in the refreshed profile.

use civic_engine::{GameEvent, Registry, RegistryError};
use serde::Serialize;

use crate::api::{ApiError, ScoreUpdateRequest};
use crate::mission::{keys, Mission, SceneOptions, ScoreReward};
use crate::profile::UserProfile;
use crate::scene::MISSION_COMPLETE;

#[derive(Debug, Clone, Default)]
pub struct HostSession {
    profile: Option<UserProfile>,
    mission: Option<Mission>,
    options: SceneOptions,
}

impl HostSession {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile: Some(profile),
            ..Self::default()
        }
    }

    pub fn with_options(mut self, options: SceneOptions) -> Self {
        self.options = options;
        self
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn mission(&self) -> Option<&Mission> {
        self.mission.as_ref()
    }

    /// Take the first mission offered for the player's level.
    pub fn choose_mission(&mut self, missions: Vec<Mission>) -> Option<&Mission> {
        self.mission = missions.into_iter().next();
        self.mission.as_ref()
    }

    /// A frozen registry holding what the scene reads at boot.
    pub fn registry(&self) -> Result<Registry, RegistryError> {
        let mut registry = Registry::new();
        put(&mut registry, keys::MISSION, &self.mission)?;
        put(&mut registry, keys::USER, &self.profile)?;
        put(&mut registry, keys::SCENE_OPTIONS, &self.options)?;
        registry.freeze();
        Ok(registry)
    }

    /// The same registry as a JSON object, for `game_init`.
    pub fn registry_json(&self) -> Result<String, ApiError> {
        let mut map = serde_json::Map::new();
        map.insert(keys::MISSION.to_string(), serde_json::to_value(&self.mission)?);
        map.insert(keys::USER.to_string(), serde_json::to_value(&self.profile)?);
        map.insert(keys::SCENE_OPTIONS.to_string(), serde_json::to_value(self.options)?);
        Ok(serde_json::Value::Object(map).to_string())
    }

    /// Turn a scene event into the score update to POST, if it is a completion.
    pub fn on_event(&self, event: &GameEvent) -> Result<Option<ScoreUpdateRequest>, ApiError> {
        if !event.is(MISSION_COMPLETE) {
            return Ok(None);
        }
        let scores: ScoreReward = serde_json::from_value(event.payload.clone())?;
        let user_id = self.profile.as_ref().map(|p| p.user_id.as_str()).unwrap_or_default();
        let mission_id = self.mission.as_ref().map(|m| m.mission_id.as_str()).unwrap_or_default();
        ScoreUpdateRequest::new(user_id, mission_id, scores).map(Some)
    }

    /// Replace the profile with a fresh copy from the backend.
    pub fn refresh_profile(&mut self, profile: UserProfile) {
        log::info!("Profile refreshed for {}", profile.user_id);
        self.profile = Some(profile);
    }
}

fn put<T: Serialize>(registry: &mut Registry, key: &str, value: &T) -> Result<(), RegistryError> {
    let value = serde_json::to_value(value).map_err(|source| RegistryError::Value {
        key: key.to_string(),
        source,
    })?;
    registry.set(key, value)
}
