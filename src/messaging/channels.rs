// Lock-free communication channels

use ringbuf::{HeapRb, traits::Split};

use crate::messaging::command::SynthCommand;
use crate::midi::event::MidiEvent;

pub type CommandProducer = ringbuf::HeapProd<SynthCommand>;
pub type CommandConsumer = ringbuf::HeapCons<SynthCommand>;

pub fn create_command_channel(capacity: usize) -> (CommandProducer, CommandConsumer) {
    let rb = HeapRb::<SynthCommand>::new(capacity);
    rb.split()
}

/// Parsed MIDI input, from midir callback threads to the game loop
pub type MidiEventProducer = ringbuf::HeapProd<MidiEvent>;
pub type MidiEventConsumer = ringbuf::HeapCons<MidiEvent>;

pub fn create_midi_event_channel(capacity: usize) -> (MidiEventProducer, MidiEventConsumer) {
    let rb = HeapRb::<MidiEvent>::new(capacity);
    rb.split()
}
