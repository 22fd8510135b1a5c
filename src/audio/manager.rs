// Audio manager - routes game cues to the synth or an external MIDI device
//
// The routing decision is made per call: MIDI only when the player chose it
// AND a selected port exists right now. Everything else falls back to the synth.

use std::time::Duration;

use crate::audio::{DEFAULT_VOLUME, SoundOutput};
use crate::audio::platform::AudioPlatform;
use crate::audio::synth_output::SynthOutput;
use crate::error::Result;
use crate::midi::device::MidiDeviceInfo;
use crate::midi::output::MidiOutput;
use crate::notes::NoteName;
use crate::settings::{AudioOutputMode, GameSettings};

/// How often the device list is re-enumerated
pub const DEVICE_REFRESH_INTERVAL: Duration = Duration::from_secs(2);

pub struct AudioManager {
    settings: GameSettings,
    synth: SynthOutput,
    midi: MidiOutput,
    volume: f32,
    initialized: bool,
    since_refresh: Duration,
}

impl AudioManager {
    pub fn new(settings: GameSettings) -> Self {
        Self {
            settings,
            synth: SynthOutput::new(),
            midi: MidiOutput::new(),
            volume: DEFAULT_VOLUME,
            initialized: false,
            since_refresh: Duration::ZERO,
        }
    }

    /// Open both backends. Safe to call more than once.
    pub fn init(&mut self, platform: &mut dyn AudioPlatform) {
        if self.initialized {
            return;
        }

        match platform.open_synth() {
            Ok(sink) => {
                self.synth.attach(sink);
                self.synth.set_volume(self.volume);
            }
            Err(e) => log::warn!("Synth unavailable, continuing without it: {}", e),
        }

        match platform.open_midi_outputs() {
            Ok(ports) => self.midi.attach(ports),
            Err(e) => log::warn!("MIDI output unavailable: {}", e),
        }

        // Restore selected MIDI output from settings
        if let Some(saved) = self.settings.selected_midi_output_name().map(str::to_string) {
            if let Err(e) = self.midi.select_output(&saved) {
                log::info!("Remembered MIDI output not connected: {}", e);
            }
        }

        self.initialized = true;
        log::info!(
            "Audio ready (synth: {}, MIDI outputs: {})",
            self.synth.is_available(),
            self.midi.available_outputs().len()
        );
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Flush due note-offs; re-enumerate devices periodically
    pub fn update(&mut self, dt: Duration) {
        self.midi.update(dt);

        self.since_refresh += dt;
        if self.since_refresh >= DEVICE_REFRESH_INTERVAL {
            self.since_refresh = Duration::ZERO;
            self.midi.refresh_ports();
        }
    }

    fn routes_to_midi(&mut self) -> bool {
        if !self.settings.use_midi_output() || !self.midi.is_supported() {
            return false;
        }
        self.midi.refresh_ports();
        self.midi.selected_output().is_some()
    }

    fn output(&mut self) -> Option<&mut dyn SoundOutput> {
        if !self.initialized {
            log::warn!("Audio not initialized, cue dropped");
            return None;
        }
        if self.routes_to_midi() {
            Some(&mut self.midi)
        } else {
            Some(&mut self.synth)
        }
    }

    /// Synth master volume; MIDI devices keep their own level
    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.synth.set_volume(self.volume);
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn output_mode(&self) -> AudioOutputMode {
        self.settings.audio_output_mode()
    }

    pub fn set_output_mode(&mut self, mode: AudioOutputMode) {
        self.settings.set_audio_output_mode(mode);
        if mode == AudioOutputMode::Midi {
            self.midi.refresh_ports();
        }
    }

    pub fn available_outputs(&self) -> &[MidiDeviceInfo] {
        self.midi.available_outputs()
    }

    pub fn selected_output(&self) -> Option<&MidiDeviceInfo> {
        self.midi.selected_output()
    }

    pub fn has_outputs(&self) -> bool {
        self.midi.has_outputs()
    }

    pub fn is_midi_supported(&self) -> bool {
        self.midi.is_supported()
    }

    pub fn refresh_outputs(&mut self) -> &[MidiDeviceInfo] {
        self.midi.refresh_ports()
    }

    /// Select by name or id and remember the choice
    pub fn select_output(&mut self, identifier: &str) -> Result<()> {
        self.midi.refresh_ports();
        let name = self.midi.select_output(identifier)?.name.clone();
        log::info!("MIDI output selected: {}", name);
        self.settings.set_selected_midi_output_name(Some(name));
        Ok(())
    }

    pub fn select_output_index(&mut self, index: usize) -> bool {
        if !self.midi.select_output_index(index) {
            return false;
        }
        let name = self.midi.selected_output().map(|d| d.name.clone());
        self.settings.set_selected_midi_output_name(name);
        true
    }
}

impl SoundOutput for AudioManager {
    fn play_note(&mut self, note: NoteName, duration: Duration) {
        if let Some(output) = self.output() {
            output.play_note(note, duration);
        }
    }

    fn play_jump_note(&mut self, note: NoteName) {
        if let Some(output) = self.output() {
            output.play_jump_note(note);
        }
    }

    fn play_wrong_sound(&mut self) {
        if !self.initialized {
            log::warn!("Audio not initialized, cue dropped");
            return;
        }
        // No MIDI equivalent, always synthesized
        self.synth.play_wrong_sound();
    }
}
