//! Player preferences
//!
//! Persisted separately from the leaderboard.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StorageError};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Character picked last time, preselected in the menu
    pub last_character: Option<String>,
    /// Draw sprite skins. When off, only solid shapes are drawn.
    pub sprites: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_character: None,
            sprites: true,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "flappyzolder_settings";

    /// Load settings, falling back to defaults on missing or bad data
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Settings corrupt, using defaults: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings unreadable, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        let json = serde_json::to_string(self).map_err(|e| StorageError::Write {
            key: Self::STORAGE_KEY.to_string(),
            reason: e.to_string(),
        })?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults_when_absent() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            last_character: Some("Jorik".to_string()),
            sprites: false,
        };
        settings.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_sprite_toggle_persists() {
        let mut store = MemoryStore::new();
        let mut settings = Settings {
            last_character: Some("Sam".to_string()),
            ..Settings::default()
        };
        settings.save(&mut store).unwrap();

        settings.sprites = false;
        settings.save(&mut store).unwrap();
        let loaded = Settings::load(&store);
        assert!(!loaded.sprites);
        assert_eq!(loaded.last_character.as_deref(), Some("Sam"));

        settings.sprites = true;
        settings.save(&mut store).unwrap();
        assert!(Settings::load(&store).sprites);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let store = MemoryStore::with_value(Settings::STORAGE_KEY, r#"{"last_character":"Isa"}"#);
        let settings = Settings::load(&store);
        assert_eq!(settings.last_character.as_deref(), Some("Isa"));
        assert!(settings.sprites);
    }

    #[test]
    fn test_corrupt_settings_fall_back() {
        let store = MemoryStore::with_value(Settings::STORAGE_KEY, "[1,2");
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
