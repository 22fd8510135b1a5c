// One-shot deferred callbacks driven by the game loop clock
//
// Timers carry a token naming the scope that scheduled them. Cancelling a
// token drops every pending timer of that scope, and consumers compare the
// token of a fired timer against the scope that is still alive.

use std::time::Duration;

/// Validity token of the scope owning a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

#[derive(Debug)]
struct PendingTimer<T> {
    due: Duration,
    /// Insertion order, breaks ties between timers due at the same instant
    sequence: u64,
    token: TimerToken,
    payload: T,
}

/// Queue of one-shot timers relative to an internal clock.
/// The clock only moves when `advance` is called.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_sequence: u64,
    pending: Vec<PendingTimer<T>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_sequence: 0,
            pending: Vec::new(),
        }
    }

    /// Current clock value
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `payload` to fire `delay` after the current clock
    pub fn schedule(&mut self, token: TimerToken, delay: Duration, payload: T) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.pending.push(PendingTimer {
            due: self.now + delay,
            sequence,
            token,
            payload,
        });
    }

    /// Move the clock forward
    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
    }

    /// Remove and return the earliest timer that is due, if any
    pub fn pop_due(&mut self) -> Option<(TimerToken, T)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= self.now)
            .min_by_key(|(_, timer)| (timer.due, timer.sequence))
            .map(|(index, _)| index)?;

        let timer = self.pending.swap_remove(index);
        Some((timer.token, timer.payload))
    }

    /// Drop every pending timer scheduled under `token`
    pub fn cancel(&mut self, token: TimerToken) {
        self.pending.retain(|timer| timer.token != token);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
