// Module MIDI - event parsing, device listing and output

pub mod device;
pub mod event;
pub mod output;

pub use device::MidiDeviceInfo;
pub use event::MidiEvent;
pub use output::{MidiOutput, MidiOutputPorts, MidirOutputPorts};
