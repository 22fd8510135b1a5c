// MIDI keyboard input - every connected input port feeds the game
//
// midir callbacks run on their own threads. They parse the message and push
// it into a ringbuf; the game loop drains it in `poll`. Loopback ports are
// never opened.

use std::sync::{Arc, Mutex};

use midir::{MidiInput as MidirInput, MidiInputConnection};
use ringbuf::traits::{Consumer, Producer};

use crate::input::{InputOrigin, NoteInput, NoteInputHub};
use crate::messaging::channels::{MidiEventConsumer, MidiEventProducer, create_midi_event_channel};
use crate::midi::device::{MidiDeviceInfo, is_loopback_port, port_names};
use crate::midi::event::MidiEvent;
use crate::notes::NoteName;

const CLIENT_NAME: &str = "Pitch Jump MIDI Input";
const EVENT_CAPACITY: usize = 256;

type SharedProducer = Arc<Mutex<MidiEventProducer>>;

/// Hand a parsed event to the game loop. Runs on midir threads; every
/// drop is logged, never silent.
fn enqueue_event(event_tx: &Mutex<MidiEventProducer>, event: MidiEvent) -> bool {
    let Ok(mut tx) = event_tx.try_lock() else {
        log::warn!("MIDI input queue busy, {:?} dropped", event);
        return false;
    };
    if tx.try_push(event).is_err() {
        log::warn!("MIDI input buffer full, {:?} dropped", event);
        return false;
    }
    true
}

/// Every connected keyboard feeds the game. Keys map to their pitch class
/// in any octave; black keys are not answers and are ignored.
pub struct MidiKeyboard {
    scanner: Option<MidirInput>,
    connections: Vec<MidiInputConnection<()>>,
    devices: Vec<MidiDeviceInfo>,
    event_tx: SharedProducer,
    event_rx: MidiEventConsumer,
}

impl MidiKeyboard {
    pub fn new() -> Self {
        let (event_tx, event_rx) = create_midi_event_channel(EVENT_CAPACITY);

        Self {
            scanner: None,
            connections: Vec::new(),
            devices: Vec::new(),
            event_tx: Arc::new(Mutex::new(event_tx)),
            event_rx,
        }
    }

    /// Open MIDI access and connect to every input.
    /// Failure leaves the keyboard unsupported with no devices.
    pub fn init(&mut self) -> bool {
        if self.scanner.is_some() {
            return true;
        }

        match MidirInput::new(CLIENT_NAME) {
            Ok(scanner) => {
                self.scanner = Some(scanner);
                self.refresh();
                true
            }
            Err(e) => {
                log::warn!("MIDI input unavailable: {}", e);
                false
            }
        }
    }

    pub fn is_supported(&self) -> bool {
        self.scanner.is_some()
    }

    /// Re-enumerate ports; reconnect everything when the set changed
    pub fn refresh(&mut self) {
        let Some(scanner) = self.scanner.as_ref() else {
            return;
        };

        let names: Vec<String> = port_names(scanner)
            .into_iter()
            .filter(|name| !is_loopback_port(name))
            .collect();
        let unchanged = self.devices.len() == names.len()
            && self.devices.iter().zip(&names).all(|(d, n)| &d.name == n);
        if unchanged {
            return;
        }

        self.connections.clear();
        self.devices = names
            .iter()
            .enumerate()
            .map(|(index, name)| MidiDeviceInfo::input(index, name.clone()))
            .collect();

        for name in &names {
            match self.connect(name) {
                Ok(connection) => self.connections.push(connection),
                Err(e) => log::warn!("Could not open MIDI input {}: {}", name, e),
            }
        }

        if names.is_empty() {
            log::info!("No MIDI input connected");
        } else {
            log::info!("MIDI devices connected: {:?}", names);
        }
    }

    fn connect(&self, port_name: &str) -> Result<MidiInputConnection<()>, String> {
        // connect() consumes the client, so each port gets its own
        let client = MidirInput::new(CLIENT_NAME).map_err(|e| e.to_string())?;
        let port = client
            .ports()
            .into_iter()
            .find(|p| client.port_name(p).is_ok_and(|name| name == port_name))
            .ok_or_else(|| "port vanished".to_string())?;

        let event_tx = Arc::clone(&self.event_tx);
        client
            .connect(
                &port,
                "pitch-jump-input",
                move |_timestamp, message, _| {
                    if let Some(event) = MidiEvent::from_bytes(message) {
                        enqueue_event(&event_tx, event);
                    }
                },
                (),
            )
            .map_err(|e| e.to_string())
    }

    /// Deliver queued events to the hub
    pub fn poll(&mut self, hub: &mut NoteInputHub) {
        while let Some(event) = self.event_rx.try_pop() {
            self.handle_event(event, hub);
        }
    }

    /// Only presses count; releases and velocity-0 note-ons are dropped
    pub fn handle_event(&self, event: MidiEvent, hub: &mut NoteInputHub) -> bool {
        let MidiEvent::NoteOn { note, velocity } = event else {
            return false;
        };
        if velocity == 0 {
            return false;
        }

        match NoteName::from_midi(note) {
            Some(name) => hub.dispatch(NoteInput::new(name, InputOrigin::MidiKeyboard)),
            None => false,
        }
    }

    pub fn devices(&self) -> &[MidiDeviceInfo] {
        &self.devices
    }

    pub fn device_names(&self) -> Vec<String> {
        self.devices.iter().map(|d| d.name.clone()).collect()
    }

    pub fn has_devices(&self) -> bool {
        !self.devices.is_empty()
    }
}

impl Default for MidiKeyboard {
    fn default() -> Self {
        Self::new()
    }
}
