//! Write-once key/value registry shared between the host and a scene.
//!
//! The host fills the registry before boot; once frozen it is read-only and
//! scenes pull typed values out of it during construction.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::RegistryError;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    values: HashMap<String, Value>,
    frozen: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object into a frozen registry.
    ///
    /// An empty string is accepted and yields an empty registry.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        if json.trim().is_empty() {
            return Ok(Self::frozen_empty());
        }
        let value: Value = serde_json::from_str(json).map_err(RegistryError::Parse)?;
        let Value::Object(map) = value else {
            return Err(RegistryError::NotAnObject);
        };
        Ok(Self {
            values: map.into_iter().collect(),
            frozen: true,
        })
    }

    fn frozen_empty() -> Self {
        Self {
            values: HashMap::new(),
            frozen: true,
        }
    }

    /// Store a value. Fails once the registry has been frozen.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Result<(), RegistryError> {
        let key = key.into();
        if self.frozen {
            return Err(RegistryError::Frozen(key));
        }
        self.values.insert(key, value);
        Ok(())
    }

    /// Seal the registry. Later writes are rejected.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Raw JSON value for a key.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Deserialize the value stored under `key`.
    ///
    /// Missing keys and explicit `null` both read as `Ok(None)`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, RegistryError> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(value)
                .map(Some)
                .map_err(|source| RegistryError::Value {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        level: u32,
    }

    #[test]
    fn set_then_freeze_rejects_writes() {
        let mut reg = Registry::new();
        reg.set("a", json!(1)).unwrap();
        reg.freeze();
        assert!(matches!(reg.set("b", json!(2)), Err(RegistryError::Frozen(k)) if k == "b"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn from_json_is_frozen_and_typed() {
        let reg = Registry::from_json(r#"{ "sample": { "level": 2 }, "nothing": null }"#).unwrap();
        assert!(reg.is_frozen());
        assert_eq!(reg.get::<Sample>("sample").unwrap(), Some(Sample { level: 2 }));
        assert_eq!(reg.get::<Sample>("nothing").unwrap(), None);
        assert_eq!(reg.get::<Sample>("missing").unwrap(), None);
    }

    #[test]
    fn wrong_shape_is_reported() {
        let reg = Registry::from_json(r#"{ "sample": "two" }"#).unwrap();
        assert!(matches!(reg.get::<Sample>("sample"), Err(RegistryError::Value { .. })));
    }

    #[test]
    fn non_object_json_is_rejected() {
        assert!(matches!(Registry::from_json("[1, 2]"), Err(RegistryError::NotAnObject)));
        assert!(matches!(Registry::from_json("{"), Err(RegistryError::Parse(_))));
        assert!(Registry::from_json("  ").unwrap().is_empty());
    }
}
