use serde::Serialize;
use serde_json::Value;

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// A game event communicated from Rust to the JavaScript host.
///
/// Serialized as `{ "name": ..., "payload": ... }` and drained by the host
/// after each frame. `payload` is free-form JSON owned by the game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameEvent {
    pub name: String,
    pub payload: Value,
}

impl GameEvent {
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    /// Whether this event carries the given name.
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_serializes_name_and_payload() {
        let event = GameEvent::new("MISSION_COMPLETE", json!({ "hygiene": 10 }));
        let text = serde_json::to_string(&event).unwrap();
        assert_eq!(text, r#"{"name":"MISSION_COMPLETE","payload":{"hygiene":10}}"#);
        assert!(event.is("MISSION_COMPLETE"));
    }
}
