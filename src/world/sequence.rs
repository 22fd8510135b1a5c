// Note sequence generation - expands a world into its ordered targets

use rand::Rng;
use rand::seq::SliceRandom;

use super::WorldConfig;
use crate::notes::NoteName;

/// One target of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEntry {
    pub note: NoteName,
    /// Drawn white instead of the note color. Never affects judgment.
    pub is_wildcard: bool,
}

impl NoteEntry {
    pub fn regular(note: NoteName) -> Self {
        Self { note, is_wildcard: false }
    }

    pub fn wildcard(note: NoteName) -> Self {
        Self { note, is_wildcard: true }
    }
}

/// Build the target list for a world.
///
/// Regular entries come first, the `wildcard_count` wildcards form the
/// trailing block. Every note is drawn uniformly (with replacement) from
/// `available_notes`; a single-note pool yields a constant sequence.
pub fn generate_note_sequence<R: Rng + ?Sized>(world: &WorldConfig, rng: &mut R) -> Vec<NoteEntry> {
    let pool = world.available_notes;
    let Some(&first) = pool.first() else {
        return Vec::new();
    };

    let wildcard_count = world.wildcard_count.min(world.enemy_count);
    let regular_count = world.enemy_count - wildcard_count;

    let mut sequence = Vec::with_capacity(world.enemy_count);

    for _ in 0..regular_count {
        let note = if pool.len() == 1 {
            first
        } else {
            *pool.choose(rng).unwrap_or(&first)
        };
        sequence.push(NoteEntry::regular(note));
    }

    for _ in 0..wildcard_count {
        let note = *pool.choose(rng).unwrap_or(&first);
        sequence.push(NoteEntry::wildcard(note));
    }

    sequence
}
