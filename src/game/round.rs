// Game round - one pass through a world's target sequence
//
// Init → Advancing → AwaitingAnswer → Resolving → (Advancing | Complete)
//
// A wrong answer never leaves AwaitingAnswer and never moves the cursor.
// The cursor moves by exactly one when a correct answer's jump lands.

use std::time::Duration;

use rand::Rng;

use crate::audio::{PRESSED_NOTE_DURATION, PROMPT_NOTE_DURATION, SoundOutput};
use crate::game::player::{PLAYER_START_X, Player};
use crate::game::view::SceneRenderer;
use crate::notes::NoteName;
use crate::timer::{TimerQueue, TimerToken};
use crate::world::{NoteEntry, WorldConfig, generate_note_sequence, next_world, world_or_first};

pub const TARGET_START_X: f32 = 500.0;
pub const TARGET_SPACING: f32 = 300.0;
/// The player stops this far before a target
pub const ARRIVAL_DISTANCE: f32 = 80.0;
pub const WRONG_REPLAY_DELAY: Duration = Duration::from_millis(300);
/// Gap between the pressed note and the accent
pub const JUMP_NOTE_DELAY: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Init,
    Advancing,
    AwaitingAnswer,
    Resolving,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgement {
    Correct,
    Wrong,
}

/// Deferred cues scheduled by a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundTimer {
    /// Replay the prompt of target `index` after a wrong answer
    ReplayPrompt { index: usize },
    /// Accent after a correct answer
    JumpNote(NoteName),
}

/// Collaborators a round drives
pub struct RoundContext<'a> {
    pub audio: &'a mut dyn SoundOutput,
    pub view: &'a mut dyn SceneRenderer,
    pub timers: &'a mut TimerQueue<RoundTimer>,
}

pub fn target_x(index: usize) -> f32 {
    TARGET_START_X + index as f32 * TARGET_SPACING
}

pub fn prompt_text(note: NoteName) -> String {
    format!(
        "Listen... What note is this?\n({} = {})",
        note.definition().color_name,
        note
    )
}

pub struct GameRound {
    world: WorldConfig,
    sequence: Vec<NoteEntry>,
    cursor: usize,
    state: RoundState,
    player: Player,
    token: TimerToken,
}

impl GameRound {
    pub fn new(world: WorldConfig, sequence: Vec<NoteEntry>, token: TimerToken) -> Self {
        Self {
            world,
            sequence,
            cursor: 0,
            state: RoundState::Init,
            player: Player::new(PLAYER_START_X),
            token,
        }
    }

    /// Round for world `number` (world 1 when unknown) with a fresh sequence
    pub fn generate<R: Rng + ?Sized>(number: u32, rng: &mut R, token: TimerToken) -> Self {
        let world = *world_or_first(number);
        let sequence = generate_note_sequence(&world, rng);
        Self::new(world, sequence, token)
    }

    /// Lay out the scene and start walking
    pub fn begin(&mut self, ctx: &mut RoundContext<'_>) {
        if self.state != RoundState::Init {
            return;
        }

        for (index, entry) in self.sequence.iter().enumerate() {
            ctx.view.show_target(index, *entry, target_x(index));
        }
        ctx.view.show_progress(0, self.sequence.len());
        ctx.view.move_player_to(self.player.x());

        if self.sequence.is_empty() {
            self.complete(ctx);
            return;
        }

        self.player.walk();
        self.transition(RoundState::Advancing);
    }

    pub fn update(&mut self, dt: Duration, ctx: &mut RoundContext<'_>) {
        match self.state {
            RoundState::Advancing => {
                self.player.update(dt);
                ctx.view.move_player_to(self.player.x());

                if let Some(entry) = self.current_target() {
                    if self.player.x() >= target_x(self.cursor) - ARRIVAL_DISTANCE {
                        self.arrive(entry, ctx);
                    }
                }
            }
            RoundState::Resolving => {
                let landed = self.player.update(dt);
                ctx.view.move_player_to(self.player.x());
                if landed {
                    self.land(ctx);
                }
            }
            RoundState::Init | RoundState::AwaitingAnswer | RoundState::Complete => {}
        }
    }

    /// Judge a note. Ignored (None) unless a prompt is waiting.
    pub fn handle_note(&mut self, note: NoteName, ctx: &mut RoundContext<'_>) -> Option<Judgement> {
        if self.state != RoundState::AwaitingAnswer {
            return None;
        }
        let target = self.current_target()?;

        if note == target.note {
            ctx.view.hide_prompt();
            ctx.audio.play_note(note, PRESSED_NOTE_DURATION);
            ctx.timers
                .schedule(self.token, JUMP_NOTE_DELAY, RoundTimer::JumpNote(note));
            self.player.jump();
            self.transition(RoundState::Resolving);
            Some(Judgement::Correct)
        } else {
            ctx.audio.play_wrong_sound();
            ctx.timers.schedule(
                self.token,
                WRONG_REPLAY_DELAY,
                RoundTimer::ReplayPrompt { index: self.cursor },
            );
            log::debug!("Wrong answer {} for target {}", note, self.cursor);
            Some(Judgement::Wrong)
        }
    }

    pub fn on_timer(&mut self, timer: RoundTimer, ctx: &mut RoundContext<'_>) {
        match timer {
            RoundTimer::ReplayPrompt { index } => {
                if self.state != RoundState::AwaitingAnswer || self.cursor != index {
                    return;
                }
                if let Some(entry) = self.current_target() {
                    ctx.audio.play_note(entry.note, PROMPT_NOTE_DURATION);
                }
            }
            RoundTimer::JumpNote(note) => ctx.audio.play_jump_note(note),
        }
    }

    fn arrive(&mut self, entry: NoteEntry, ctx: &mut RoundContext<'_>) {
        self.player.stop();
        self.transition(RoundState::AwaitingAnswer);

        ctx.audio.play_note(entry.note, PROMPT_NOTE_DURATION);
        ctx.view.show_prompt(&prompt_text(entry.note));
    }

    fn land(&mut self, ctx: &mut RoundContext<'_>) {
        ctx.view.mark_target_defeated(self.cursor);
        self.cursor += 1;
        ctx.view.show_progress(self.cursor, self.sequence.len());

        if self.cursor >= self.sequence.len() {
            self.complete(ctx);
        } else {
            self.player.walk();
            self.transition(RoundState::Advancing);
        }
    }

    fn complete(&mut self, ctx: &mut RoundContext<'_>) {
        self.transition(RoundState::Complete);
        ctx.view.show_world_complete(self.world.name);
    }

    fn transition(&mut self, next: RoundState) {
        log::debug!(
            "World {} round: {:?} -> {:?} (target {})",
            self.world.number,
            self.state,
            next,
            self.cursor
        );
        self.state = next;
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn sequence(&self) -> &[NoteEntry] {
        &self.sequence
    }

    pub fn world(&self) -> &WorldConfig {
        &self.world
    }

    pub fn player_x(&self) -> f32 {
        self.player.x()
    }

    pub fn token(&self) -> TimerToken {
        self.token
    }

    pub fn current_target(&self) -> Option<NoteEntry> {
        self.sequence.get(self.cursor).copied()
    }

    pub fn progress_text(&self) -> String {
        format!("{} / {}", self.cursor, self.sequence.len())
    }

    pub fn is_complete(&self) -> bool {
        self.state == RoundState::Complete
    }

    pub fn next_world(&self) -> Option<&'static WorldConfig> {
        next_world(self.world.number)
    }
}
