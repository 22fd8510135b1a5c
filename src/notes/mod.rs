// Note catalog - the 12 semitone classes with their colors and pitches
// Colors match the stickers on the keyboard and the enemy blobs

use std::fmt;
use std::str::FromStr;

use crate::error::PitchJumpError;

/// One of the 12 semitone classes (octave-independent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NoteName {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

/// Static data attached to a note class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteDefinition {
    pub name: NoteName,
    /// MIDI note number in the middle octave (C4 = 60)
    pub midi_note: u8,
    /// 0xRRGGBB
    pub color: u32,
    pub color_name: &'static str,
    /// Fundamental frequency in Hz
    pub frequency: f32,
}

/// Accidentals share a neutral color
const ACCIDENTAL_COLOR: u32 = 0x333333;

/// Catalog indexed by `NoteName as usize` (pitch class order)
pub const NOTES: [NoteDefinition; 12] = [
    NoteDefinition { name: NoteName::C, midi_note: 60, color: 0xff0000, color_name: "Red", frequency: 261.63 },
    NoteDefinition { name: NoteName::CSharp, midi_note: 61, color: ACCIDENTAL_COLOR, color_name: "Black", frequency: 277.18 },
    NoteDefinition { name: NoteName::D, midi_note: 62, color: 0xff8c00, color_name: "Orange", frequency: 293.66 },
    NoteDefinition { name: NoteName::DSharp, midi_note: 63, color: ACCIDENTAL_COLOR, color_name: "Black", frequency: 311.13 },
    NoteDefinition { name: NoteName::E, midi_note: 64, color: 0xffff00, color_name: "Yellow", frequency: 329.63 },
    NoteDefinition { name: NoteName::F, midi_note: 65, color: 0x00ff00, color_name: "Green", frequency: 349.23 },
    NoteDefinition { name: NoteName::FSharp, midi_note: 66, color: ACCIDENTAL_COLOR, color_name: "Black", frequency: 369.99 },
    NoteDefinition { name: NoteName::G, midi_note: 67, color: 0x0000ff, color_name: "Blue", frequency: 392.00 },
    NoteDefinition { name: NoteName::GSharp, midi_note: 68, color: ACCIDENTAL_COLOR, color_name: "Black", frequency: 415.30 },
    NoteDefinition { name: NoteName::A, midi_note: 69, color: 0x8b00ff, color_name: "Purple", frequency: 440.00 },
    NoteDefinition { name: NoteName::ASharp, midi_note: 70, color: ACCIDENTAL_COLOR, color_name: "Black", frequency: 466.16 },
    NoteDefinition { name: NoteName::B, midi_note: 71, color: 0xff69b4, color_name: "Pink", frequency: 493.88 },
];

const NATURAL_NOTES: [NoteName; 7] = [
    NoteName::C,
    NoteName::D,
    NoteName::E,
    NoteName::F,
    NoteName::G,
    NoteName::A,
    NoteName::B,
];

const ALL_NOTES: [NoteName; 12] = [
    NoteName::C,
    NoteName::CSharp,
    NoteName::D,
    NoteName::DSharp,
    NoteName::E,
    NoteName::F,
    NoteName::FSharp,
    NoteName::G,
    NoteName::GSharp,
    NoteName::A,
    NoteName::ASharp,
    NoteName::B,
];

/// The 7 natural notes, C to B
pub fn natural_notes() -> [NoteName; 7] {
    NATURAL_NOTES
}

/// All 12 semitone classes, C to B
pub fn all_notes() -> [NoteName; 12] {
    ALL_NOTES
}

/// Look up a note by its label ("C", "F#", ...)
pub fn lookup(id: &str) -> Result<&'static NoteDefinition, PitchJumpError> {
    id.parse::<NoteName>().map(NoteName::definition)
}

impl NoteName {
    pub fn definition(self) -> &'static NoteDefinition {
        &NOTES[self as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            NoteName::C => "C",
            NoteName::CSharp => "C#",
            NoteName::D => "D",
            NoteName::DSharp => "D#",
            NoteName::E => "E",
            NoteName::F => "F",
            NoteName::FSharp => "F#",
            NoteName::G => "G",
            NoteName::GSharp => "G#",
            NoteName::A => "A",
            NoteName::ASharp => "A#",
            NoteName::B => "B",
        }
    }

    pub fn is_natural(self) -> bool {
        NATURAL_NOTES.contains(&self)
    }

    /// Pitch class of any MIDI note, restricted to naturals.
    /// Accidentals yield `None`.
    pub fn from_midi(midi_note: u8) -> Option<NoteName> {
        let note = Self::from_midi_chromatic(midi_note);
        note.is_natural().then_some(note)
    }

    /// Pitch class of any MIDI note (any octave)
    pub fn from_midi_chromatic(midi_note: u8) -> NoteName {
        ALL_NOTES[(midi_note % 12) as usize]
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NoteName {
    type Err = PitchJumpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_NOTES
            .iter()
            .copied()
            .find(|note| note.label() == s)
            .ok_or_else(|| PitchJumpError::UnknownNote(s.to_string()))
    }
}
