//! Deterministic timers on a virtual millisecond clock.
//!
//! Nothing here sleeps or spawns. The owner advances the clock with
//! [`Scheduler::next_fired`] and handles each timer it yields before asking
//! for the next, so a timer can never fire in the middle of another
//! transition.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKind {
    /// The bot at this seat has finished thinking.
    BotTurn { seat: usize },
    /// Step the pending minimum bet up the schedule.
    BlindIncrease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due: u64,
    /// Insertion order; breaks ties between timers due at the same instant.
    seq: u64,
    kind: TimerKind,
    period: Option<u64>,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: u64,
    seq: u64,
    queue: BinaryHeap<Reverse<Entry>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the clock reading in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Fire `kind` once, `delay_ms` from now.
    pub fn schedule_once(&mut self, delay_ms: u64, kind: TimerKind) {
        self.push(self.now.saturating_add(delay_ms), kind, None);
    }

    /// Fire `kind` every `period_ms`, first one period from now. A zero
    /// period is ignored.
    pub fn schedule_every(&mut self, period_ms: u64, kind: TimerKind) {
        if period_ms == 0 {
            return;
        }
        self.push(self.now.saturating_add(period_ms), kind, Some(period_ms));
    }

    fn push(&mut self, due: u64, kind: TimerKind, period: Option<u64>) {
        self.seq += 1;
        self.queue.push(Reverse(Entry { due, seq: self.seq, kind, period }));
    }

    /// Whether a timer of this kind is waiting.
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.queue.iter().any(|Reverse(e)| e.kind == kind)
    }

    /// When the earliest timer is due.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(e)| e.due)
    }

    /// Drop every timer. The clock keeps its reading.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time. Periodic timers are re-armed. When nothing is due the
    /// clock moves to `until` and `None` is returned.
    pub fn next_fired(&mut self, until: u64) -> Option<TimerKind> {
        let due = self.next_due().filter(|&due| due <= until);
        let Some(Reverse(entry)) = due.and_then(|_| self.queue.pop()) else {
            self.now = self.now.max(until);
            return None;
        };
        self.now = self.now.max(entry.due);
        if let Some(period) = entry.period {
            self.push(entry.due.saturating_add(period), entry.kind, Some(period));
        }
        Some(entry.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule_once(500, TimerKind::BotTurn { seat: 2 });
        s.schedule_once(100, TimerKind::BotTurn { seat: 1 });
        assert_eq!(s.next_fired(50), None);
        assert_eq!(s.now(), 50);
        assert_eq!(s.next_fired(1_000), Some(TimerKind::BotTurn { seat: 1 }));
        assert_eq!(s.now(), 100);
        assert_eq!(s.next_fired(1_000), Some(TimerKind::BotTurn { seat: 2 }));
        assert_eq!(s.next_fired(1_000), None);
        assert_eq!(s.now(), 1_000);
    }

    #[test]
    fn same_instant_keeps_insertion_order() {
        let mut s = Scheduler::new();
        s.schedule_once(10, TimerKind::BlindIncrease);
        s.schedule_once(10, TimerKind::BotTurn { seat: 0 });
        assert_eq!(s.next_fired(10), Some(TimerKind::BlindIncrease));
        assert_eq!(s.next_fired(10), Some(TimerKind::BotTurn { seat: 0 }));
    }

    #[test]
    fn periodic_rearms() {
        let mut s = Scheduler::new();
        s.schedule_every(300, TimerKind::BlindIncrease);
        let mut fired = 0;
        while s.next_fired(1_000).is_some() {
            fired += 1;
        }
        assert_eq!(fired, 3);
        assert_eq!(s.next_due(), Some(1_200));
    }

    #[test]
    fn zero_period_is_ignored() {
        let mut s = Scheduler::new();
        s.schedule_every(0, TimerKind::BlindIncrease);
        assert!(!s.is_pending(TimerKind::BlindIncrease));
    }

    #[test]
    fn clear_drops_every_timer() {
        let mut s = Scheduler::new();
        s.schedule_once(10, TimerKind::BotTurn { seat: 3 });
        s.schedule_every(10, TimerKind::BlindIncrease);
        s.clear();
        assert!(!s.is_pending(TimerKind::BlindIncrease));
        assert_eq!(s.next_fired(100), None);
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut s = Scheduler::new();
        s.next_fired(500);
        s.next_fired(100);
        assert_eq!(s.now(), 500);
    }
}
