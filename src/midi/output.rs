// MIDI Output - sends prompt and accent notes to an external instrument
//
// Note-offs are not fired from a thread: they sit in a TimerQueue driven by
// the game loop clock and are flushed by `update`.

use std::collections::HashMap;
use std::time::Duration;

use midir::{MidiOutput as MidirOutput, MidiOutputConnection};

use crate::audio::SoundOutput;
use crate::error::{PitchJumpError, Result};
use crate::midi::device::{MidiDeviceInfo, list_outputs, port_names};
use crate::midi::event::MidiEvent;
use crate::notes::NoteName;
use crate::timer::{TimerQueue, TimerToken};

pub const MIDI_VELOCITY: u8 = 100;
/// Channel 1
pub const MIDI_CHANNEL: u8 = 0;
/// How long the accent note is held on a device
pub const JUMP_NOTE_DURATION: Duration = Duration::from_millis(400);

const CLIENT_NAME: &str = "Pitch Jump MIDI Output";
const NOTE_OFF_TOKEN: TimerToken = TimerToken(0);

/// Port access, abstracted so tests can stand in for real devices
pub trait MidiOutputPorts {
    /// Current port names, in enumeration order
    fn port_names(&mut self) -> Vec<String>;
    fn send(&mut self, port: &str, message: &[u8]) -> Result<()>;
}

/// midir-backed ports. One connection per port, opened on first send.
pub struct MidirOutputPorts {
    scanner: MidirOutput,
    connections: HashMap<String, MidiOutputConnection>,
}

impl MidirOutputPorts {
    pub fn new() -> Result<Self> {
        let scanner = MidirOutput::new(CLIENT_NAME)
            .map_err(|e| PitchJumpError::PlatformUnsupported(format!("MIDI output: {}", e)))?;

        Ok(Self {
            scanner,
            connections: HashMap::new(),
        })
    }

    fn connect(&self, port_name: &str) -> Result<MidiOutputConnection> {
        let client = MidirOutput::new(CLIENT_NAME)
            .map_err(|e| PitchJumpError::Initialization(format!("MIDI output: {}", e)))?;

        let port = client
            .ports()
            .into_iter()
            .find(|p| client.port_name(p).is_ok_and(|name| name == port_name))
            .ok_or_else(|| PitchJumpError::DeviceNotFound(port_name.to_string()))?;

        let connection = client
            .connect(&port, "pitch-jump-output")
            .map_err(|e| PitchJumpError::Initialization(format!("MIDI connection: {}", e)))?;

        log::info!("Connected to MIDI output: {}", port_name);
        Ok(connection)
    }
}

impl MidiOutputPorts for MidirOutputPorts {
    fn port_names(&mut self) -> Vec<String> {
        let names = port_names(&self.scanner);
        self.connections.retain(|name, _| {
            let alive = names.contains(name);
            if !alive {
                log::info!("MIDI output disconnected: {}", name);
            }
            alive
        });
        names
    }

    fn send(&mut self, port: &str, message: &[u8]) -> Result<()> {
        if !self.connections.contains_key(port) {
            let connection = self.connect(port)?;
            self.connections.insert(port.to_string(), connection);
        }

        let Some(connection) = self.connections.get_mut(port) else {
            return Err(PitchJumpError::DeviceNotFound(port.to_string()));
        };

        if let Err(e) = connection.send(message) {
            // Force a reconnect next time
            self.connections.remove(port);
            return Err(PitchJumpError::DeviceNotFound(format!("{}: {}", port, e)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingNoteOff {
    port: String,
    pitch: u8,
}

/// Output device registry plus note scheduling
pub struct MidiOutput {
    ports: Option<Box<dyn MidiOutputPorts>>,
    devices: Vec<MidiDeviceInfo>,
    selected: Option<String>,
    note_offs: TimerQueue<PendingNoteOff>,
}

impl MidiOutput {
    /// An output with no MIDI access; every call is a no-op
    pub fn new() -> Self {
        Self {
            ports: None,
            devices: Vec::new(),
            selected: None,
            note_offs: TimerQueue::new(),
        }
    }

    pub fn with_ports(ports: Box<dyn MidiOutputPorts>) -> Self {
        let mut output = Self::new();
        output.attach(ports);
        output
    }

    pub fn attach(&mut self, ports: Box<dyn MidiOutputPorts>) {
        self.ports = Some(ports);
        self.refresh_ports();
    }

    pub fn is_supported(&self) -> bool {
        self.ports.is_some()
    }

    /// Re-enumerate ports, keeping the selection valid
    pub fn refresh_ports(&mut self) -> &[MidiDeviceInfo] {
        let Some(ports) = self.ports.as_mut() else {
            return &self.devices;
        };

        let names = ports.port_names();
        let changed = self.devices.len() != names.len()
            || self.devices.iter().zip(&names).any(|(d, n)| &d.name != n);
        self.devices = list_outputs(&names);

        if changed {
            log::info!("MIDI outputs: {:?}", names);
        }

        if let Some(selected) = &self.selected {
            if !names.contains(selected) {
                log::info!("Selected MIDI output gone: {}", selected);
                self.selected = None;
            }
        }

        // Auto-select the first real device; loopbacks only by explicit choice
        if self.selected.is_none() {
            self.selected = self
                .devices
                .iter()
                .find(|d| !d.is_loopback())
                .map(|d| d.name.clone());
        }

        &self.devices
    }

    pub fn available_outputs(&self) -> &[MidiDeviceInfo] {
        &self.devices
    }

    pub fn has_outputs(&self) -> bool {
        !self.devices.is_empty()
    }

    pub fn selected_output(&self) -> Option<&MidiDeviceInfo> {
        let selected = self.selected.as_deref()?;
        self.devices.iter().find(|d| d.name == selected)
    }

    /// Select by id or name; the current selection is kept on failure
    pub fn select_output(&mut self, identifier: &str) -> Result<&MidiDeviceInfo> {
        let index = self
            .devices
            .iter()
            .position(|d| d.matches(identifier))
            .ok_or_else(|| PitchJumpError::DeviceNotFound(identifier.to_string()))?;

        self.selected = Some(self.devices[index].name.clone());
        Ok(&self.devices[index])
    }

    pub fn select_output_index(&mut self, index: usize) -> bool {
        match self.devices.get(index) {
            Some(device) => {
                self.selected = Some(device.name.clone());
                true
            }
            None => false,
        }
    }

    /// Number of note-offs still waiting
    pub fn pending_note_offs(&self) -> usize {
        self.note_offs.len()
    }

    /// Advance the note-off clock and send what is due
    pub fn update(&mut self, dt: Duration) {
        self.note_offs.advance(dt);

        while let Some((_, pending)) = self.note_offs.pop_due() {
            let Some(ports) = self.ports.as_mut() else {
                continue;
            };
            let message = MidiEvent::NoteOff { note: pending.pitch }.to_bytes(MIDI_CHANNEL);
            if let Err(e) = ports.send(&pending.port, &message) {
                log::warn!("MIDI note-off not delivered: {}", e);
            }
        }
    }

    fn send_note(&mut self, pitch: u8, duration: Duration) {
        let (Some(ports), Some(port)) = (self.ports.as_mut(), self.selected.clone()) else {
            log::debug!("No MIDI output selected, note {} skipped", pitch);
            return;
        };

        let message = MidiEvent::NoteOn {
            note: pitch,
            velocity: MIDI_VELOCITY,
        }
        .to_bytes(MIDI_CHANNEL);

        if let Err(e) = ports.send(&port, &message) {
            log::warn!("MIDI send failed: {}", e);
            return;
        }

        self.note_offs
            .schedule(NOTE_OFF_TOKEN, duration, PendingNoteOff { port, pitch });
    }
}

impl Default for MidiOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundOutput for MidiOutput {
    fn play_note(&mut self, note: NoteName, duration: Duration) {
        self.send_note(note.definition().midi_note, duration);
    }

    fn play_jump_note(&mut self, note: NoteName) {
        // One octave higher = +12 semitones
        let pitch = note.definition().midi_note.saturating_add(12).min(127);
        self.send_note(pitch, JUMP_NOTE_DURATION);
    }

    fn play_wrong_sound(&mut self) {
        // A device has no equivalent cue
        log::debug!("Wrong-answer cue has no MIDI rendering");
    }
}
