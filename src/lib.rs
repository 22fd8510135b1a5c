// Pitch Jump - library exports for the binary and integration tests

pub mod audio;
pub mod connection;
pub mod error;
pub mod game;
pub mod input;
pub mod messaging;
pub mod midi;
pub mod notes;
pub mod settings;
pub mod timer;
pub mod ui;
pub mod world;

// Re-export commonly used types for convenience
pub use audio::{AudioManager, AudioPlatform, NativePlatform, SoundOutput, ToneSink};
pub use error::{PitchJumpError, Result};
pub use game::{GameRound, GameSession, Judgement, Progression, RoundState, SceneRenderer};
pub use input::{InputOrigin, NoteInput, NoteInputHub};
pub use midi::{MidiDeviceInfo, MidiEvent, MidiOutputPorts};
pub use notes::{NoteDefinition, NoteName};
pub use settings::{AudioOutputMode, FileStore, GameSettings, GameSettingsData, KeyValueStore, MemoryStore};
pub use timer::{TimerQueue, TimerToken};
pub use world::{NoteEntry, WorldConfig, generate_note_sequence, get_world, next_world, worlds};
