// Integration test: output routing between the synth and MIDI devices

mod common;

use std::time::Duration;

use common::{FakePlatform, SharedStore};
use pitch_jump::audio::{PROMPT_NOTE_DURATION, Tone};
use pitch_jump::settings::STORAGE_KEY;
use pitch_jump::{AudioManager, AudioOutputMode, GameSettings, NoteName, PitchJumpError, SoundOutput};

fn manager_with(mode: AudioOutputMode, remembered: Option<&str>) -> (AudioManager, SharedStore) {
    let store = SharedStore::default();
    let mut settings = GameSettings::load(Box::new(store.clone()));
    settings.set_audio_output_mode(mode);
    settings.set_selected_midi_output_name(remembered.map(str::to_string));
    (AudioManager::new(settings), store)
}

#[test]
fn test_device_plugged_mid_round_gets_next_note() {
    let mut platform = FakePlatform::new();
    let (mut audio, _) = manager_with(AudioOutputMode::Midi, None);
    audio.init(&mut platform);

    // No device yet: synth fallback
    audio.play_note(NoteName::C, PROMPT_NOTE_DURATION);
    assert_eq!(platform.sink.count(), 1);
    assert!(platform.ports.sent().is_empty());

    platform.ports.plug("Digital Piano");

    // No re-init: the very next call goes to the device
    audio.play_note(NoteName::G, PROMPT_NOTE_DURATION);
    assert_eq!(platform.sink.count(), 1);
    assert_eq!(
        platform.ports.sent(),
        vec![("Digital Piano".to_string(), vec![0x90, 67, 100])]
    );

    audio.update(Duration::from_millis(1500));
    assert_eq!(platform.ports.sent()[1].1, vec![0x80, 67, 0]);
}

#[test]
fn test_midi_preference_without_devices_uses_synth() {
    let mut platform = FakePlatform::new();
    let (mut audio, _) = manager_with(AudioOutputMode::Midi, None);
    audio.init(&mut platform);

    audio.play_note(NoteName::E, PROMPT_NOTE_DURATION);
    audio.play_jump_note(NoteName::E);

    let tones = platform.sink.tones();
    assert_eq!(tones.len(), 2);
    assert_eq!(tones[1], Tone::jump(NoteName::E.definition().frequency));
}

#[test]
fn test_synth_preference_ignores_devices() {
    let mut platform = FakePlatform::new();
    platform.ports.plug("Digital Piano");
    let (mut audio, _) = manager_with(AudioOutputMode::Synth, None);
    audio.init(&mut platform);

    audio.play_note(NoteName::A, PROMPT_NOTE_DURATION);
    assert_eq!(platform.sink.count(), 1);
    assert!(platform.ports.sent().is_empty());
}

#[test]
fn test_wrong_sound_is_always_synthesized() {
    let mut platform = FakePlatform::new();
    platform.ports.plug("Digital Piano");
    let (mut audio, _) = manager_with(AudioOutputMode::Midi, None);
    audio.init(&mut platform);

    audio.play_wrong_sound();
    assert_eq!(platform.sink.tones(), vec![Tone::wrong()]);
    assert!(platform.ports.sent().is_empty());
}

#[test]
fn test_calls_before_init_are_dropped() {
    let mut platform = FakePlatform::new();
    let (mut audio, _) = manager_with(AudioOutputMode::Synth, None);

    audio.play_note(NoteName::C, PROMPT_NOTE_DURATION);
    audio.play_wrong_sound();
    assert!(!audio.is_initialized());

    audio.init(&mut platform);
    audio.init(&mut platform);
    assert_eq!(platform.sink.count(), 0);
}

#[test]
fn test_failed_backends_degrade_quietly() {
    let mut platform = FakePlatform::new();
    platform.synth_fails = true;
    platform.midi_fails = true;
    let (mut audio, _) = manager_with(AudioOutputMode::Midi, None);
    audio.init(&mut platform);

    audio.play_note(NoteName::C, PROMPT_NOTE_DURATION);
    audio.play_jump_note(NoteName::C);
    audio.play_wrong_sound();

    assert!(!audio.is_midi_supported());
    assert!(!audio.has_outputs());
    assert_eq!(platform.sink.count(), 0);
}

#[test]
fn test_remembered_output_restored_on_init() {
    let mut platform = FakePlatform::new();
    platform.ports.plug("Synth A");
    platform.ports.plug("Synth B");
    let (mut audio, _) = manager_with(AudioOutputMode::Midi, Some("Synth B"));
    audio.init(&mut platform);

    assert_eq!(audio.selected_output().map(|d| d.name.as_str()), Some("Synth B"));

    audio.play_jump_note(NoteName::C);
    assert_eq!(platform.ports.sent()[0], ("Synth B".to_string(), vec![0x90, 72, 100]));
}

#[test]
fn test_selection_is_persisted_by_name() {
    let mut platform = FakePlatform::new();
    platform.ports.plug("Synth A");
    platform.ports.plug("Synth B");
    let (mut audio, store) = manager_with(AudioOutputMode::Midi, None);
    audio.init(&mut platform);

    audio.select_output("midi_out_1").unwrap();
    let saved = store.value(STORAGE_KEY).unwrap();
    assert!(saved.contains("\"selectedMidiOutputName\":\"Synth B\""));

    let err = audio.select_output("Nope").unwrap_err();
    assert!(matches!(err, PitchJumpError::DeviceNotFound(_)));
    assert_eq!(audio.selected_output().map(|d| d.name.as_str()), Some("Synth B"));

    assert!(audio.select_output_index(0));
    assert!(!audio.select_output_index(9));
    assert!(store.value(STORAGE_KEY).unwrap().contains("Synth A"));
}

#[test]
fn test_unplugged_device_falls_back_to_synth() {
    let mut platform = FakePlatform::new();
    platform.ports.plug("Digital Piano");
    let (mut audio, _) = manager_with(AudioOutputMode::Midi, None);
    audio.init(&mut platform);

    audio.play_note(NoteName::D, PROMPT_NOTE_DURATION);
    assert_eq!(platform.ports.sent().len(), 1);

    platform.ports.unplug_all();
    audio.play_note(NoteName::D, PROMPT_NOTE_DURATION);
    assert_eq!(platform.sink.count(), 1);

    // The pending note-off is best-effort and simply lost
    audio.update(Duration::from_secs(2));
    assert_eq!(platform.ports.sent().len(), 1);
}

#[test]
fn test_output_mode_is_persisted() {
    let mut platform = FakePlatform::new();
    let (mut audio, store) = manager_with(AudioOutputMode::Synth, None);
    audio.init(&mut platform);

    audio.set_output_mode(AudioOutputMode::Midi);
    assert_eq!(audio.output_mode(), AudioOutputMode::Midi);
    assert!(store.value(STORAGE_KEY).unwrap().contains("\"audioOutputMode\":\"midi\""));
}

#[test]
fn test_volume_reaches_the_synth() {
    let mut platform = FakePlatform::new();
    let (mut audio, _) = manager_with(AudioOutputMode::Synth, None);

    // Chosen before the stream exists, applied once it opens
    audio.set_volume(0.3);
    audio.init(&mut platform);
    assert_eq!(platform.sink.volumes(), vec![0.3]);

    audio.set_volume(1.7);
    assert_eq!(audio.volume(), 1.0);
    assert_eq!(platform.sink.volumes(), vec![0.3, 1.0]);
}

#[test]
fn test_loopback_port_is_not_auto_selected() {
    let mut platform = FakePlatform::new();
    platform.ports.plug("Midi Through Port-0");
    let (mut audio, _) = manager_with(AudioOutputMode::Midi, None);
    audio.init(&mut platform);

    assert!(audio.has_outputs());
    assert!(audio.selected_output().is_none());

    // Nothing to play on: the synth takes it
    audio.play_note(NoteName::C, PROMPT_NOTE_DURATION);
    assert_eq!(platform.sink.count(), 1);
    assert!(platform.ports.sent().is_empty());

    platform.ports.plug("USB Piano");
    audio.play_note(NoteName::D, PROMPT_NOTE_DURATION);
    assert_eq!(audio.selected_output().map(|d| d.name.as_str()), Some("USB Piano"));
    assert_eq!(platform.ports.sent(), vec![("USB Piano".to_string(), vec![0x90, 62, 100])]);

    // An explicit choice is honored
    audio.select_output("Midi Through Port-0").unwrap();
    audio.play_note(NoteName::E, PROMPT_NOTE_DURATION);
    assert_eq!(platform.ports.sent()[1].0, "Midi Through Port-0");
}
