// Input - every note source funnels into one hub with a single listener
//
// Sources: an external MIDI keyboard, the on-screen piano and the computer
// keyboard's letter keys. Consumers never learn which one produced a note
// unless they look at `origin`.

pub mod computer_keyboard;
pub mod midi_keyboard;
pub mod on_screen;

pub use computer_keyboard::ComputerKeyboard;
pub use midi_keyboard::MidiKeyboard;
pub use on_screen::OnScreenKeyboard;

use crate::notes::NoteName;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOrigin {
    MidiKeyboard,
    OnScreen,
    ComputerKeyboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteInput {
    pub note: NoteName,
    pub origin: InputOrigin,
}

impl NoteInput {
    pub fn new(note: NoteName, origin: InputOrigin) -> Self {
        Self { note, origin }
    }
}

pub type NoteListener = Box<dyn FnMut(NoteInput)>;

/// Holds at most one listener. Setting a new one replaces the old.
#[derive(Default)]
pub struct NoteInputHub {
    listener: Option<NoteListener>,
}

impl NoteInputHub {
    pub fn new() -> Self {
        Self { listener: None }
    }

    pub fn set_listener(&mut self, listener: NoteListener) {
        self.listener = Some(listener);
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Deliver to the listener. Returns false (and drops the input) when there is none.
    pub fn dispatch(&mut self, input: NoteInput) -> bool {
        match self.listener.as_mut() {
            Some(listener) => {
                listener(input);
                true
            }
            None => false,
        }
    }
}
