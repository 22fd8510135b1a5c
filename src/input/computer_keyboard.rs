// Computer keyboard - letter keys A to G play the natural notes

use crate::input::{InputOrigin, NoteInput, NoteInputHub};
use crate::notes::NoteName;

#[derive(Debug, Default, Clone, Copy)]
pub struct ComputerKeyboard;

impl ComputerKeyboard {
    pub fn new() -> Self {
        Self
    }

    /// Case-insensitive; anything but a single letter A-G is None
    pub fn note_for_key(key: &str) -> Option<NoteName> {
        let mut chars = key.chars();
        let (Some(letter), None) = (chars.next(), chars.next()) else {
            return None;
        };

        match letter.to_ascii_uppercase() {
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            _ => None,
        }
    }

    /// Returns true when the key mapped to a note and a listener took it
    pub fn key_down(&self, key: &str, hub: &mut NoteInputHub) -> bool {
        match Self::note_for_key(key) {
            Some(note) => hub.dispatch(NoteInput::new(note, InputOrigin::ComputerKeyboard)),
            None => false,
        }
    }
}
