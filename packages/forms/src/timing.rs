//! Cooldown and debounce bookkeeping.
//!
//! Neither type owns a timer. The UI passes the current time (milliseconds from
//! any monotonic origin) or sleeps itself and asks whether it is still the latest
//! caller, which keeps both usable on wasm and native alike.

use std::time::Duration;

/// Disables a control for a fixed window after each use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cooldown {
    window_ms: u64,
    until_ms: Option<u64>,
}

impl Cooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window_ms: window.as_millis() as u64,
            until_ms: None,
        }
    }

    pub fn is_active(&self, now_ms: u64) -> bool {
        self.until_ms.is_some_and(|until| now_ms < until)
    }

    pub fn remaining(&self, now_ms: u64) -> Duration {
        let left = self.until_ms.map_or(0, |until| until.saturating_sub(now_ms));
        Duration::from_millis(left)
    }

    /// Start the window if the control is available. Returns false while cooling down.
    pub fn trigger(&mut self, now_ms: u64) -> bool {
        self.run_if_ready(now_ms, || true)
    }

    /// Run `start` if the control is available and begin the window only when
    /// it reports that work actually started.
    pub fn run_if_ready(&mut self, now_ms: u64, start: impl FnOnce() -> bool) -> bool {
        if self.is_active(now_ms) || !start() {
            return false;
        }
        self.until_ms = Some(now_ms + self.window_ms);
        true
    }
}

/// Generation counter for "only the last keystroke wins" debouncing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Debouncer {
    generation: u64,
}

impl Debouncer {
    /// Register a new input and get its ticket.
    pub fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Whether `ticket` still belongs to the most recent input.
    pub fn is_latest(&self, ticket: u64) -> bool {
        self.generation == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_blocks_repeat_within_window() {
        let mut quick_add = Cooldown::new(Duration::from_secs(3));
        assert!(quick_add.trigger(1_000));
        assert!(quick_add.is_active(2_000));
        assert!(!quick_add.trigger(3_999));
        assert_eq!(quick_add.remaining(3_000), Duration::from_millis(1_000));
        assert!(quick_add.trigger(4_000));
    }

    #[test]
    fn test_rejected_start_does_not_cool_down() {
        let mut quick_add = Cooldown::new(Duration::from_secs(3));
        assert!(!quick_add.run_if_ready(1_000, || false));
        assert!(!quick_add.is_active(1_001));

        assert!(quick_add.run_if_ready(1_500, || true));
        assert!(quick_add.is_active(2_000));
        let mut ran = false;
        assert!(!quick_add.run_if_ready(2_000, || {
            ran = true;
            true
        }));
        assert!(!ran);
    }

    #[test]
    fn test_cooldown_starts_inactive() {
        let cooldown = Cooldown::new(Duration::from_secs(3));
        assert!(!cooldown.is_active(0));
        assert_eq!(cooldown.remaining(0), Duration::ZERO);
    }

    #[test]
    fn test_debouncer_keeps_only_last_ticket() {
        let mut debouncer = Debouncer::default();
        let first = debouncer.bump();
        let second = debouncer.bump();
        assert!(!debouncer.is_latest(first));
        assert!(debouncer.is_latest(second));
    }
}
