// On-screen keyboard - seven natural keys, clickable

use crate::input::{InputOrigin, NoteInput, NoteInputHub};
use crate::notes::{NoteName, natural_notes};

pub struct OnScreenKeyboard {
    pressed: [bool; 7],
    visible: bool,
}

impl OnScreenKeyboard {
    pub fn new() -> Self {
        Self {
            pressed: [false; 7],
            visible: true,
        }
    }

    /// Keys left to right
    pub fn keys(&self) -> [NoteName; 7] {
        natural_notes()
    }

    fn slot(note: NoteName) -> Option<usize> {
        natural_notes().iter().position(|&n| n == note)
    }

    /// Emits once per press. Held keys and hidden keyboards emit nothing.
    pub fn press(&mut self, note: NoteName, hub: &mut NoteInputHub) -> bool {
        if !self.visible {
            return false;
        }
        let Some(slot) = Self::slot(note) else {
            return false;
        };
        if self.pressed[slot] {
            return false;
        }

        self.pressed[slot] = true;
        hub.dispatch(NoteInput::new(note, InputOrigin::OnScreen))
    }

    pub fn release(&mut self, note: NoteName) {
        if let Some(slot) = Self::slot(note) {
            self.pressed[slot] = false;
        }
    }

    pub fn is_pressed(&self, note: NoteName) -> bool {
        Self::slot(note).is_some_and(|slot| self.pressed[slot])
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.pressed = [false; 7];
    }

    pub fn toggle(&mut self) {
        if self.visible {
            self.hide();
        } else {
            self.show();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Default for OnScreenKeyboard {
    fn default() -> Self {
        Self::new()
    }
}
