// MIDI note events

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8 },
}

impl MidiEvent {
    /// Parse a raw MIDI message. Only note messages are recognized.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 3 {
            return None;
        }

        let status = bytes[0];
        let message_type = status & 0xF0;

        match message_type {
            0x90 => {
                let note = bytes[1];
                let velocity = bytes[2];
                // Velocity 0 = Note Off
                if velocity == 0 {
                    Some(MidiEvent::NoteOff { note })
                } else {
                    Some(MidiEvent::NoteOn { note, velocity })
                }
            }
            0x80 => Some(MidiEvent::NoteOff { note: bytes[1] }),
            _ => None,
        }
    }

    /// Encode for sending; `channel` is 0-based (0 = MIDI channel 1)
    pub fn to_bytes(&self, channel: u8) -> [u8; 3] {
        let channel = channel & 0x0F;
        match *self {
            MidiEvent::NoteOn { note, velocity } => [0x90 | channel, note & 0x7F, velocity & 0x7F],
            MidiEvent::NoteOff { note } => [0x80 | channel, note & 0x7F, 0],
        }
    }
}
