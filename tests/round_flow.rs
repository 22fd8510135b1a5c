// Integration test: a session playing rounds end to end

mod common;

use std::time::Duration;

use common::{FakePlatform, RecordingView};
use pitch_jump::audio::{PRESSED_NOTE_DURATION, PROMPT_NOTE_DURATION, Tone};
use pitch_jump::game::RoundContext;
use pitch_jump::game::round::RoundTimer;
use pitch_jump::{
    GameRound, GameSession, GameSettings, Judgement, NoteEntry, NoteName, Progression, RoundState,
    SoundOutput, TimerQueue, TimerToken, get_world,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const FRAME: Duration = Duration::from_millis(100);

fn session() -> (GameSession<StdRng>, FakePlatform) {
    let mut platform = FakePlatform::new();
    let mut session = GameSession::new(GameSettings::in_memory(), StdRng::seed_from_u64(42));
    session.init(&mut platform);
    (session, platform)
}

fn run_until(
    session: &mut GameSession<StdRng>,
    view: &mut RecordingView,
    state: RoundState,
) -> bool {
    for _ in 0..200 {
        if session.round().map(|r| r.state()) == Some(state) {
            return true;
        }
        session.update(FRAME, view);
    }
    false
}

fn answer(session: &GameSession<StdRng>) -> &'static str {
    let note = session.round().and_then(|r| r.current_target()).unwrap().note;
    note.label()
}

fn piano(note: NoteName, duration: Duration) -> Tone {
    Tone::piano(note.definition().frequency, duration)
}

#[test]
fn test_wrong_then_right_answer() {
    let (mut session, platform) = session();
    let mut view = RecordingView::default();
    session.start_world(1, &mut view);

    assert_eq!(view.targets.len(), 10);
    assert_eq!(view.targets[0].1, 500.0);
    assert_eq!(view.targets[1].1, 800.0);
    assert_eq!(view.progress, (0, 10));

    assert!(run_until(&mut session, &mut view, RoundState::AwaitingAnswer));
    assert_eq!(view.prompt.as_deref(), Some("Listen... What note is this?\n(Red = C)"));
    assert_eq!(platform.sink.tones(), vec![piano(NoteName::C, PROMPT_NOTE_DURATION)]);

    assert_eq!(session.key_down("d", &mut view), Some(Judgement::Wrong));
    let round = session.round().unwrap();
    assert_eq!(round.state(), RoundState::AwaitingAnswer);
    assert_eq!(round.cursor(), 0);
    assert_eq!(platform.sink.tones()[1], Tone::wrong());

    // Prompt replayed after the short delay
    session.update(Duration::from_millis(300), &mut view);
    assert_eq!(platform.sink.tones()[2], piano(NoteName::C, PROMPT_NOTE_DURATION));

    assert_eq!(session.key_down("C", &mut view), Some(Judgement::Correct));
    assert_eq!(session.round().unwrap().state(), RoundState::Resolving);
    assert_eq!(view.prompt, None);
    assert_eq!(platform.sink.tones()[3], piano(NoteName::C, PRESSED_NOTE_DURATION));

    session.update(Duration::from_millis(150), &mut view);
    assert_eq!(platform.sink.tones()[4], Tone::jump(NoteName::C.definition().frequency));

    session.update(Duration::from_millis(350), &mut view);
    let round = session.round().unwrap();
    assert_eq!(round.cursor(), 1);
    assert_eq!(round.state(), RoundState::Advancing);
    assert_eq!(view.defeated, vec![0]);
    assert_eq!(view.progress, (1, 10));
}

#[test]
fn test_inputs_outside_prompt_are_ignored() {
    let (mut session, _platform) = session();
    let mut view = RecordingView::default();
    session.start_world(1, &mut view);

    assert_eq!(session.key_down("C", &mut view), None);
    assert_eq!(session.press_on_screen(NoteName::C, &mut view), None);
    assert_eq!(session.round().unwrap().cursor(), 0);
    assert_eq!(session.key_down("x", &mut view), None);
}

#[test]
fn test_on_screen_key_answers() {
    let (mut session, _platform) = session();
    let mut view = RecordingView::default();
    session.start_world(1, &mut view);
    assert!(run_until(&mut session, &mut view, RoundState::AwaitingAnswer));

    assert_eq!(session.press_on_screen(NoteName::D, &mut view), Some(Judgement::Wrong));
    // Still held: no second event
    assert_eq!(session.press_on_screen(NoteName::D, &mut view), None);
    session.release_on_screen(NoteName::D);
    assert_eq!(session.press_on_screen(NoteName::C, &mut view), Some(Judgement::Correct));
}

#[test]
fn test_world_completion_and_progression() {
    let (mut session, _platform) = session();
    let mut view = RecordingView::default();
    session.start_world(1, &mut view);

    for expected_cursor in 1..=10 {
        assert!(run_until(&mut session, &mut view, RoundState::AwaitingAnswer));
        let key = answer(&session);
        assert_eq!(session.key_down(key, &mut view), Some(Judgement::Correct));
        session.update(Duration::from_millis(500), &mut view);
        assert_eq!(session.round().unwrap().cursor(), expected_cursor);
    }

    let round = session.round().unwrap();
    assert_eq!(round.state(), RoundState::Complete);
    assert_eq!(round.next_world().map(|w| w.number), Some(2));
    assert_eq!(view.completed.as_deref(), Some("World 1: C Only"));

    let mut next_view = RecordingView::default();
    assert_eq!(
        session.continue_after_complete(&mut next_view),
        Some(Progression::NextWorld(2))
    );
    assert_eq!(session.round().unwrap().world().number, 2);
    assert_eq!(next_view.targets.len(), 20);
}

#[test]
fn test_last_world_finishes_curriculum() {
    let (mut session, _platform) = session();
    let mut view = RecordingView::default();
    session.start_world(6, &mut view);
    assert_eq!(session.continue_after_complete(&mut view), None);

    while !session.round().unwrap().is_complete() {
        assert!(run_until(&mut session, &mut view, RoundState::AwaitingAnswer));
        let key = answer(&session);
        session.key_down(key, &mut view);
        session.update(Duration::from_millis(500), &mut view);
    }

    assert!(session.round().unwrap().next_world().is_none());
    assert_eq!(
        session.continue_after_complete(&mut view),
        Some(Progression::CurriculumFinished)
    );
    assert!(session.round().is_none());
    assert!(!session.is_listening());
}

#[test]
fn test_restart_cancels_pending_replay() {
    let (mut session, platform) = session();
    let mut view = RecordingView::default();
    session.start_world(1, &mut view);
    assert!(run_until(&mut session, &mut view, RoundState::AwaitingAnswer));

    session.key_down("D", &mut view);
    assert_eq!(session.pending_timers(), 1);
    let before = platform.sink.count();

    let mut fresh = RecordingView::default();
    session.start_world(2, &mut fresh);
    assert_eq!(session.pending_timers(), 0);
    assert!(session.is_listening());

    session.update(Duration::from_millis(400), &mut fresh);
    assert_eq!(platform.sink.count(), before);
    assert_eq!(session.round().unwrap().state(), RoundState::Advancing);
}

#[test]
fn test_end_round_stops_listening() {
    let (mut session, platform) = session();
    let mut view = RecordingView::default();
    session.start_world(1, &mut view);
    assert!(run_until(&mut session, &mut view, RoundState::AwaitingAnswer));
    session.key_down("E", &mut view);

    session.end_round();
    assert!(!session.is_listening());
    assert!(session.round().is_none());
    assert_eq!(session.key_down("C", &mut view), None);

    let before = platform.sink.count();
    session.update(Duration::from_secs(1), &mut view);
    assert_eq!(platform.sink.count(), before);
}

#[test]
fn test_unknown_world_falls_back_to_first() {
    let (mut session, _platform) = session();
    let mut view = RecordingView::default();
    session.start_world(0, &mut view);
    assert_eq!(session.round().unwrap().world().number, 1);
}

#[derive(Debug, Clone, PartialEq)]
enum Cue {
    Note(NoteName, Duration),
    Jump(NoteName),
    Wrong,
}

#[derive(Default)]
struct CueLog(Vec<Cue>);

impl CueLog {
    fn count(&self, cue: &Cue) -> usize {
        self.0.iter().filter(|c| *c == cue).count()
    }
}

impl SoundOutput for CueLog {
    fn play_note(&mut self, note: NoteName, duration: Duration) {
        self.0.push(Cue::Note(note, duration));
    }
    fn play_jump_note(&mut self, note: NoteName) {
        self.0.push(Cue::Jump(note));
    }
    fn play_wrong_sound(&mut self) {
        self.0.push(Cue::Wrong);
    }
}

#[test]
fn test_wildcards_are_judged_like_regular_targets() {
    let world = *get_world(2).unwrap();
    let sequence = vec![NoteEntry::wildcard(NoteName::G), NoteEntry::regular(NoteName::C)];
    let mut round = GameRound::new(world, sequence, TimerToken(1));

    let mut audio = CueLog::default();
    let mut view = RecordingView::default();
    let mut timers: TimerQueue<RoundTimer> = TimerQueue::new();
    let mut ctx = RoundContext {
        audio: &mut audio,
        view: &mut view,
        timers: &mut timers,
    };

    round.begin(&mut ctx);
    for _ in 0..18 {
        round.update(FRAME, &mut ctx);
    }
    assert_eq!(round.state(), RoundState::AwaitingAnswer);

    assert_eq!(round.handle_note(NoteName::C, &mut ctx), Some(Judgement::Wrong));
    assert_eq!(round.handle_note(NoteName::G, &mut ctx), Some(Judgement::Correct));
    assert_eq!(
        audio.0,
        vec![
            Cue::Note(NoteName::G, PROMPT_NOTE_DURATION),
            Cue::Wrong,
            Cue::Note(NoteName::G, PRESSED_NOTE_DURATION),
        ]
    );
}


struct Outcome {
    state: RoundState,
    cursor: usize,
    cues: CueLog,
    defeated: Vec<usize>,
}

/// Play `sequence` to the end in the session's frame order. With
/// `miss_first`, every target gets one wrong answer and its replay before
/// the right one.
fn play_round(sequence: Vec<NoteEntry>, miss_first: bool) -> Outcome {
    let world = *get_world(5).unwrap();
    let mut round = GameRound::new(world, sequence, TimerToken(1));
    let mut audio = CueLog::default();
    let mut view = RecordingView::default();
    let mut timers: TimerQueue<RoundTimer> = TimerQueue::new();
    let mut missed = None;

    for frame in 0..2000 {
        let mut ctx = RoundContext {
            audio: &mut audio,
            view: &mut view,
            timers: &mut timers,
        };
        if frame == 0 {
            round.begin(&mut ctx);
        }
        if round.is_complete() {
            break;
        }

        ctx.timers.advance(FRAME);
        if round.state() == RoundState::AwaitingAnswer && ctx.timers.is_empty() {
            let target = round.current_target().unwrap().note;
            if miss_first && missed != Some(round.cursor()) {
                let wrong = if target == NoteName::C { NoteName::D } else { NoteName::C };
                assert_eq!(round.handle_note(wrong, &mut ctx), Some(Judgement::Wrong));
                missed = Some(round.cursor());
            } else {
                assert_eq!(round.handle_note(target, &mut ctx), Some(Judgement::Correct));
            }
        }
        while let Some((_, timer)) = ctx.timers.pop_due() {
            round.on_timer(timer, &mut ctx);
        }
        round.update(FRAME, &mut ctx);
    }

    Outcome {
        state: round.state(),
        cursor: round.cursor(),
        cues: audio,
        defeated: view.defeated,
    }
}

const PHRASE: [NoteName; 5] = [NoteName::E, NoteName::C, NoteName::A, NoteName::E, NoteName::B];

fn phrase_of(entry: fn(NoteName) -> NoteEntry) -> Vec<NoteEntry> {
    PHRASE.iter().map(|&note| entry(note)).collect()
}

#[test]
fn test_all_wildcard_round_plays_like_regular_round() {
    let regular = play_round(phrase_of(NoteEntry::regular), false);
    let wildcard = play_round(phrase_of(NoteEntry::wildcard), false);

    assert_eq!(regular.state, RoundState::Complete);
    assert_eq!(wildcard.state, RoundState::Complete);
    assert_eq!(wildcard.cursor, PHRASE.len());
    assert_eq!(wildcard.cursor, regular.cursor);
    assert_eq!(wildcard.defeated, vec![0, 1, 2, 3, 4]);
    assert_eq!(wildcard.defeated, regular.defeated);
    assert_eq!(wildcard.cues.0, regular.cues.0);
    assert_eq!(wildcard.cues.count(&Cue::Wrong), 0);
}

#[test]
fn test_wrong_answer_on_wildcard_replays_like_regular() {
    let regular = play_round(phrase_of(NoteEntry::regular), true);
    let wildcard = play_round(phrase_of(NoteEntry::wildcard), true);

    assert_eq!(wildcard.state, RoundState::Complete);
    assert_eq!(wildcard.cursor, regular.cursor);
    assert_eq!(wildcard.defeated, regular.defeated);
    assert_eq!(wildcard.cues.0, regular.cues.0);

    assert_eq!(wildcard.cues.count(&Cue::Wrong), PHRASE.len());
    // Prompt, wrong cue, replayed prompt, then the answer and its jump accent
    assert_eq!(
        wildcard.cues.0[..5],
        [
            Cue::Note(NoteName::E, PROMPT_NOTE_DURATION),
            Cue::Wrong,
            Cue::Note(NoteName::E, PROMPT_NOTE_DURATION),
            Cue::Note(NoteName::E, PRESSED_NOTE_DURATION),
            Cue::Jump(NoteName::E),
        ]
    );
}
