// Test doubles for the platform seams

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use pitch_jump::audio::Tone;
use pitch_jump::{
    AudioPlatform, KeyValueStore, MidiOutputPorts, NoteEntry, PitchJumpError, Result,
    SceneRenderer, ToneSink,
};

/// Records every tone and volume change handed to the synth
#[derive(Clone, Default)]
pub struct RecordingSink(pub Rc<RefCell<Vec<Tone>>>, pub Rc<RefCell<Vec<f32>>>);

impl RecordingSink {
    pub fn volumes(&self) -> Vec<f32> {
        self.1.borrow().clone()
    }

    pub fn tones(&self) -> Vec<Tone> {
        self.0.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.0.borrow().len()
    }
}

impl ToneSink for RecordingSink {
    fn play(&mut self, tone: Tone) {
        self.0.borrow_mut().push(tone);
    }

    fn set_volume(&mut self, volume: f32) {
        self.1.borrow_mut().push(volume);
    }
}

#[derive(Default)]
pub struct PortsState {
    pub names: Vec<String>,
    pub sent: Vec<(String, Vec<u8>)>,
}

/// MIDI ports whose device list the test can change at any time
#[derive(Clone, Default)]
pub struct FakePorts(pub Rc<RefCell<PortsState>>);

impl FakePorts {
    pub fn plug(&self, name: &str) {
        self.0.borrow_mut().names.push(name.to_string());
    }

    pub fn unplug_all(&self) {
        self.0.borrow_mut().names.clear();
    }

    pub fn sent(&self) -> Vec<(String, Vec<u8>)> {
        self.0.borrow().sent.clone()
    }
}

impl MidiOutputPorts for FakePorts {
    fn port_names(&mut self) -> Vec<String> {
        self.0.borrow().names.clone()
    }

    fn send(&mut self, port: &str, message: &[u8]) -> Result<()> {
        let mut state = self.0.borrow_mut();
        if !state.names.iter().any(|n| n == port) {
            return Err(PitchJumpError::DeviceNotFound(port.to_string()));
        }
        state.sent.push((port.to_string(), message.to_vec()));
        Ok(())
    }
}

pub struct FakePlatform {
    pub sink: RecordingSink,
    pub ports: FakePorts,
    pub synth_fails: bool,
    pub midi_fails: bool,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            sink: RecordingSink::default(),
            ports: FakePorts::default(),
            synth_fails: false,
            midi_fails: false,
        }
    }
}

impl AudioPlatform for FakePlatform {
    fn open_synth(&mut self) -> Result<Box<dyn ToneSink>> {
        if self.synth_fails {
            return Err(PitchJumpError::Initialization("no audio device".to_string()));
        }
        Ok(Box::new(self.sink.clone()))
    }

    fn open_midi_outputs(&mut self) -> Result<Box<dyn MidiOutputPorts>> {
        if self.midi_fails {
            return Err(PitchJumpError::PlatformUnsupported("no MIDI".to_string()));
        }
        Ok(Box::new(self.ports.clone()))
    }
}

/// Store whose contents stay visible to the test after being boxed
#[derive(Clone, Default)]
pub struct SharedStore(pub Rc<RefCell<HashMap<String, String>>>);

impl SharedStore {
    pub fn value(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.0.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Renderer that keeps the last thing it was told
#[derive(Debug, Default)]
pub struct RecordingView {
    pub player_x: f32,
    pub targets: Vec<(NoteEntry, f32)>,
    pub defeated: Vec<usize>,
    pub prompt: Option<String>,
    pub progress: (usize, usize),
    pub completed: Option<String>,
}

impl SceneRenderer for RecordingView {
    fn move_player_to(&mut self, x: f32) {
        self.player_x = x;
    }

    fn show_target(&mut self, index: usize, entry: NoteEntry, x: f32) {
        assert_eq!(index, self.targets.len());
        self.targets.push((entry, x));
    }

    fn mark_target_defeated(&mut self, index: usize) {
        self.defeated.push(index);
    }

    fn show_prompt(&mut self, text: &str) {
        self.prompt = Some(text.to_string());
    }

    fn hide_prompt(&mut self) {
        self.prompt = None;
    }

    fn show_progress(&mut self, done: usize, total: usize) {
        self.progress = (done, total);
    }

    fn show_world_complete(&mut self, world_name: &str) {
        self.completed = Some(world_name.to_string());
    }
}
