// World curriculum - ordered stages, each widening the pool of notes

pub mod sequence;

pub use sequence::{NoteEntry, generate_note_sequence};

use crate::error::PitchJumpError;
use crate::notes::NoteName;

/// One stage of the curriculum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    /// 1-based position in the curriculum
    pub number: u32,
    pub name: &'static str,
    pub description: &'static str,
    /// Notes the enemies are drawn from
    pub available_notes: &'static [NoteName],
    /// Total number of targets, wildcards included
    pub enemy_count: usize,
    /// Trailing targets drawn as wildcards
    pub wildcard_count: usize,
}

const FIVE_FINGERS: [NoteName; 5] = [NoteName::C, NoteName::D, NoteName::E, NoteName::F, NoteName::G];

const FULL_OCTAVE: [NoteName; 7] = [
    NoteName::C,
    NoteName::D,
    NoteName::E,
    NoteName::F,
    NoteName::G,
    NoteName::A,
    NoteName::B,
];

pub const WORLDS: [WorldConfig; 6] = [
    WorldConfig {
        number: 1,
        name: "World 1: C Only",
        description: "Learn to hear and find the note C",
        available_notes: &[NoteName::C],
        enemy_count: 10,
        wildcard_count: 1,
    },
    WorldConfig {
        number: 2,
        name: "World 2: C and G",
        description: "Two notes - can you tell them apart?",
        available_notes: &[NoteName::C, NoteName::G],
        enemy_count: 20,
        wildcard_count: 2,
    },
    WorldConfig {
        number: 3,
        name: "World 3: C, E, G",
        description: "The major triad",
        available_notes: &[NoteName::C, NoteName::E, NoteName::G],
        enemy_count: 25,
        wildcard_count: 3,
    },
    WorldConfig {
        number: 4,
        name: "World 4: Five Fingers",
        description: "C, D, E, F, G - the five-finger position",
        available_notes: &FIVE_FINGERS,
        enemy_count: 25,
        wildcard_count: 4,
    },
    WorldConfig {
        number: 5,
        name: "World 5: Full Octave",
        description: "All seven notes - C to B",
        available_notes: &FULL_OCTAVE,
        enemy_count: 30,
        wildcard_count: 5,
    },
    WorldConfig {
        number: 6,
        name: "World 6: Reinforcement",
        description: "Mixed review of all notes",
        available_notes: &FULL_OCTAVE,
        enemy_count: 40,
        wildcard_count: 6,
    },
];

/// The whole curriculum, in order
pub fn worlds() -> &'static [WorldConfig] {
    &WORLDS
}

pub fn get_world(number: u32) -> Result<&'static WorldConfig, PitchJumpError> {
    WORLDS
        .iter()
        .find(|w| w.number == number)
        .ok_or(PitchJumpError::WorldNotFound(number))
}

/// The world after `current`, or `None` when `current` is the last one
pub fn next_world(current: u32) -> Option<&'static WorldConfig> {
    current.checked_add(1).and_then(|n| get_world(n).ok())
}

/// Requested world, falling back to world 1 for unknown numbers
pub fn world_or_first(number: u32) -> &'static WorldConfig {
    get_world(number).unwrap_or(&WORLDS[0])
}
