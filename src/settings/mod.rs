// Game settings - persisted audio output preference
//
// The record is read once at load and written through on every change.
// Persistence failures never reach the caller: they are logged and the
// in-memory value stays authoritative.

pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PitchJumpError, Result};

/// Key of the settings record in the store
pub const STORAGE_KEY: &str = "pitchJumpSettings";

/// Which backend renders notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AudioOutputMode {
    /// Built-in tone synthesizer
    #[default]
    #[serde(rename = "browser", alias = "synth")]
    Synth,
    /// External MIDI device
    #[serde(rename = "midi")]
    Midi,
}

/// The persisted record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettingsData {
    pub audio_output_mode: AudioOutputMode,
    pub selected_midi_output_name: Option<String>,
}

impl GameSettingsData {
    /// Parse a stored record field by field.
    ///
    /// Missing, unknown or malformed fields fall back to their defaults.
    /// Only input that is not a JSON object at all is an error.
    pub fn from_json_lenient(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(fields) = value else {
            return Err(PitchJumpError::Persistence(
                "settings record is not an object".to_string(),
            ));
        };

        let defaults = Self::default();

        let audio_output_mode = fields
            .get("audioOutputMode")
            .and_then(|v| AudioOutputMode::deserialize(v).ok())
            .unwrap_or(defaults.audio_output_mode);

        let selected_midi_output_name = fields
            .get("selectedMidiOutputName")
            .and_then(|v| Option::<String>::deserialize(v).ok())
            .unwrap_or(defaults.selected_midi_output_name);

        Ok(Self {
            audio_output_mode,
            selected_midi_output_name,
        })
    }
}

/// Settings bound to a store
pub struct GameSettings {
    store: Box<dyn KeyValueStore>,
    data: GameSettingsData,
}

impl GameSettings {
    /// Load from `store`, using defaults when the record is missing or unreadable
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let data = match store.get(STORAGE_KEY) {
            Ok(Some(json)) => GameSettingsData::from_json_lenient(&json).unwrap_or_else(|e| {
                log::warn!("Failed to parse settings, using defaults: {}", e);
                GameSettingsData::default()
            }),
            Ok(None) => GameSettingsData::default(),
            Err(e) => {
                log::warn!("Failed to load settings, using defaults: {}", e);
                GameSettingsData::default()
            }
        };

        Self { store, data }
    }

    /// Settings backed by a throwaway in-memory store
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStore::new()))
    }

    fn save(&mut self) {
        let result = serde_json::to_string(&self.data)
            .map_err(PitchJumpError::from)
            .and_then(|json| self.store.set(STORAGE_KEY, &json));

        if let Err(e) = result {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    pub fn data(&self) -> &GameSettingsData {
        &self.data
    }

    pub fn audio_output_mode(&self) -> AudioOutputMode {
        self.data.audio_output_mode
    }

    pub fn set_audio_output_mode(&mut self, mode: AudioOutputMode) {
        self.data.audio_output_mode = mode;
        self.save();
    }

    pub fn selected_midi_output_name(&self) -> Option<&str> {
        self.data.selected_midi_output_name.as_deref()
    }

    pub fn set_selected_midi_output_name(&mut self, name: Option<String>) {
        self.data.selected_midi_output_name = name;
        self.save();
    }

    pub fn use_midi_output(&self) -> bool {
        self.data.audio_output_mode == AudioOutputMode::Midi
    }
}
