// Game session - owns every collaborator and drives the current round
//
// Inputs never reach the round directly: the hub listener only queues them,
// and `update` delivers them on the loop thread along with due timers.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use rand::Rng;

use crate::audio::{AudioManager, AudioPlatform};
use crate::game::round::{GameRound, Judgement, RoundContext, RoundTimer};
use crate::game::view::SceneRenderer;
use crate::input::{ComputerKeyboard, MidiKeyboard, NoteInput, NoteInputHub, OnScreenKeyboard};
use crate::notes::NoteName;
use crate::settings::GameSettings;
use crate::timer::{TimerQueue, TimerToken};

/// How often MIDI inputs are re-enumerated for hot-plug
pub const INPUT_REFRESH_INTERVAL: Duration = Duration::from_secs(2);

/// Where to go after a completed world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progression {
    NextWorld(u32),
    CurriculumFinished,
}

pub struct GameSession<R: Rng> {
    audio: AudioManager,
    hub: NoteInputHub,
    midi_keyboard: MidiKeyboard,
    computer_keyboard: ComputerKeyboard,
    on_screen: OnScreenKeyboard,
    timers: TimerQueue<RoundTimer>,
    inbox: Rc<RefCell<VecDeque<NoteInput>>>,
    round: Option<GameRound>,
    next_token: u64,
    since_input_refresh: Duration,
    rng: R,
}

impl<R: Rng> GameSession<R> {
    pub fn new(settings: GameSettings, rng: R) -> Self {
        Self {
            audio: AudioManager::new(settings),
            hub: NoteInputHub::new(),
            midi_keyboard: MidiKeyboard::new(),
            computer_keyboard: ComputerKeyboard::new(),
            on_screen: OnScreenKeyboard::new(),
            timers: TimerQueue::new(),
            inbox: Rc::new(RefCell::new(VecDeque::new())),
            round: None,
            next_token: 1,
            since_input_refresh: Duration::ZERO,
            rng,
        }
    }

    /// Open audio outputs and MIDI inputs
    pub fn init(&mut self, platform: &mut dyn AudioPlatform) {
        self.audio.init(platform);
        self.init_midi_input();
    }

    /// Open MIDI inputs only; no devices is not an error
    pub fn init_midi_input(&mut self) {
        if !self.midi_keyboard.init() {
            log::info!("Playing without MIDI input");
        }
    }

    /// Tear down the current round and start world `number` (world 1 if unknown)
    pub fn start_world(&mut self, number: u32, view: &mut dyn SceneRenderer) {
        self.end_round();

        let token = TimerToken(self.next_token);
        self.next_token += 1;

        let round = GameRound::generate(number, &mut self.rng, token);
        log::info!(
            "Starting {} with {} targets",
            round.world().name,
            round.sequence().len()
        );

        let inbox = Rc::clone(&self.inbox);
        self.hub
            .set_listener(Box::new(move |input| inbox.borrow_mut().push_back(input)));

        let round = self.round.insert(round);
        round.begin(&mut RoundContext {
            audio: &mut self.audio,
            view,
            timers: &mut self.timers,
        });
    }

    /// Stop listening first, then invalidate the round's pending timers
    pub fn end_round(&mut self) {
        self.hub.clear_listener();
        self.inbox.borrow_mut().clear();

        if let Some(round) = self.round.take() {
            self.timers.cancel(round.token());
        }
    }

    /// One frame of the game loop: audio, MIDI polling, clock, queued inputs,
    /// due timers, then the round itself
    pub fn update(&mut self, dt: Duration, view: &mut dyn SceneRenderer) {
        self.audio.update(dt);

        self.midi_keyboard.poll(&mut self.hub);
        self.since_input_refresh += dt;
        if self.since_input_refresh >= INPUT_REFRESH_INTERVAL {
            self.since_input_refresh = Duration::ZERO;
            self.midi_keyboard.refresh();
        }

        // Clock first, so timers scheduled by this frame's inputs start from now
        self.timers.advance(dt);
        self.deliver_inputs(view);

        while let Some((token, timer)) = self.timers.pop_due() {
            let Some(round) = self.round.as_mut() else {
                continue;
            };
            if round.token() != token {
                log::debug!("Stale timer {:?} dropped", timer);
                continue;
            }
            round.on_timer(
                timer,
                &mut RoundContext {
                    audio: &mut self.audio,
                    view: &mut *view,
                    timers: &mut self.timers,
                },
            );
        }

        if let Some(round) = self.round.as_mut() {
            round.update(
                dt,
                &mut RoundContext {
                    audio: &mut self.audio,
                    view,
                    timers: &mut self.timers,
                },
            );
        }
    }

    fn deliver_inputs(&mut self, view: &mut dyn SceneRenderer) -> Option<Judgement> {
        let mut last = None;
        loop {
            let Some(input) = self.inbox.borrow_mut().pop_front() else {
                break;
            };
            let Some(round) = self.round.as_mut() else {
                break;
            };
            let judgement = round.handle_note(
                input.note,
                &mut RoundContext {
                    audio: &mut self.audio,
                    view: &mut *view,
                    timers: &mut self.timers,
                },
            );
            last = judgement.or(last);
        }
        last
    }

    /// Letter key from the computer keyboard; judged immediately
    pub fn key_down(&mut self, key: &str, view: &mut dyn SceneRenderer) -> Option<Judgement> {
        if !self.computer_keyboard.key_down(key, &mut self.hub) {
            return None;
        }
        self.deliver_inputs(view)
    }

    pub fn press_on_screen(&mut self, note: NoteName, view: &mut dyn SceneRenderer) -> Option<Judgement> {
        if !self.on_screen.press(note, &mut self.hub) {
            return None;
        }
        self.deliver_inputs(view)
    }

    pub fn release_on_screen(&mut self, note: NoteName) {
        self.on_screen.release(note);
    }

    /// After a world is complete: start the next one, or end the curriculum
    pub fn continue_after_complete(&mut self, view: &mut dyn SceneRenderer) -> Option<Progression> {
        let round = self.round.as_ref()?;
        if !round.is_complete() {
            return None;
        }

        match round.next_world().map(|w| w.number) {
            Some(number) => {
                self.start_world(number, view);
                Some(Progression::NextWorld(number))
            }
            None => {
                self.end_round();
                Some(Progression::CurriculumFinished)
            }
        }
    }

    pub fn round(&self) -> Option<&GameRound> {
        self.round.as_ref()
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    pub fn midi_keyboard(&self) -> &MidiKeyboard {
        &self.midi_keyboard
    }

    pub fn on_screen_keyboard(&self) -> &OnScreenKeyboard {
        &self.on_screen
    }

    pub fn on_screen_keyboard_mut(&mut self) -> &mut OnScreenKeyboard {
        &mut self.on_screen
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_listening(&self) -> bool {
        self.hub.has_listener()
    }
}
