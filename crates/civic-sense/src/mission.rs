use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use civic_engine::{AssetStrategy, Registry};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::profile::UserProfile;

/// Score deltas keyed by civic category, e.g. `{"hygiene": 10}`.
pub type ScoreReward = BTreeMap<String, i32>;

/// Registry keys written by the host before boot.
pub mod keys {
    pub const MISSION: &str = "missionData";
    pub const USER: &str = "user";
    pub const SCENE_OPTIONS: &str = "sceneOptions";
}

/// Reward used when a mission does not name one.
pub fn default_reward() -> ScoreReward {
    ScoreReward::from([("hygiene".to_string(), 5)])
}

/// A playable mission as served by `GET /missions?level={n}`.
///
/// Each field is read on its own: a field with the wrong shape is logged and
/// left absent instead of discarding the mission. Fields the scene does not
/// use (`game_data`, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    /// Accepts a string or a number.
    #[serde(default, deserialize_with = "id_string")]
    pub mission_id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub level_required: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub score_reward: Option<ScoreReward>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub target_age_group: Option<String>,
}

/// `null` or a value of the wrong shape reads as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value)
        .map_err(|e| log::warn!("Ignoring malformed mission field: {e}"))
        .ok())
}

fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => id,
        Value::Number(id) => id.to_string(),
        Value::Null => String::new(),
        other => {
            log::warn!("Ignoring malformed mission_id {other}");
            String::new()
        }
    })
}

impl Mission {
    /// Level number; absent or 0 means level 1.
    pub fn level(&self) -> u32 {
        match self.level_required {
            None | Some(0) => 1,
            Some(n) => n,
        }
    }

    /// Reward to report on completion. An explicitly empty map is kept.
    pub fn reward(&self) -> ScoreReward {
        self.score_reward.clone().unwrap_or_else(default_reward)
    }

    /// Title for the HUD header.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().filter(|t| !t.is_empty()).unwrap_or("Unknown")
    }
}

/// Reward as a JSON object, the completion event payload.
pub fn reward_payload(reward: &ScoreReward) -> Value {
    Value::Object(
        reward
            .iter()
            .map(|(category, delta)| (category.clone(), Value::from(*delta)))
            .collect(),
    )
}

fn default_true() -> bool {
    true
}

/// Host-tunable scene behaviour, read from the `sceneOptions` registry key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneOptions {
    #[serde(default)]
    pub asset_strategy: AssetStrategy,
    /// Fixed seed for trash placement. Absent means a fresh layout every boot.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_true")]
    pub tap_to_move: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            asset_strategy: AssetStrategy::default(),
            seed: None,
            tap_to_move: true,
        }
    }
}

impl SceneOptions {
    /// The configured seed, or a fresh one.
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(fresh_seed)
    }
}

/// A seed that differs between boots, and between scenes built in one boot.
fn fresh_seed() -> u64 {
    static BOOTS: AtomicU64 = AtomicU64::new(0);
    let boot = BOOTS.fetch_add(1, Ordering::Relaxed);
    mix(clock_entropy() ^ boot.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[cfg(target_arch = "wasm32")]
fn clock_entropy() -> u64 {
    use civic_web::js_sys::{Date, Math};
    let noise = (Math::random() * (1u64 << 53) as f64) as u64;
    (Date::now() as u64) ^ noise.rotate_left(21)
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_entropy() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}

/// splitmix64 finalizer, so neighbouring inputs give unrelated seeds.
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Everything the scene reads from the registry, resolved once at construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissionContext {
    pub mission: Option<Mission>,
    pub user: Option<UserProfile>,
    pub options: SceneOptions,
}

impl MissionContext {
    pub fn new(mission: Option<Mission>) -> Self {
        Self {
            mission,
            ..Self::default()
        }
    }

    /// Read the context out of the registry. Malformed values are logged and
    /// treated as absent.
    pub fn from_registry(registry: &Registry) -> Self {
        Self {
            mission: read_or_warn(registry, keys::MISSION),
            user: read_or_warn(registry, keys::USER),
            options: read_or_warn(registry, keys::SCENE_OPTIONS).unwrap_or_default(),
        }
    }

    pub fn with_options(mut self, options: SceneOptions) -> Self {
        self.options = options;
        self
    }

    pub fn level(&self) -> u32 {
        self.mission.as_ref().map_or(1, Mission::level)
    }

    pub fn reward(&self) -> ScoreReward {
        self.mission.as_ref().map_or_else(default_reward, Mission::reward)
    }

    pub fn display_title(&self) -> &str {
        self.mission.as_ref().map_or("Unknown", Mission::display_title)
    }
}

fn read_or_warn<T: serde::de::DeserializeOwned>(registry: &Registry, key: &str) -> Option<T> {
    registry.get(key).unwrap_or_else(|e| {
        log::warn!("Ignoring registry entry: {e}");
        None
    })
}
