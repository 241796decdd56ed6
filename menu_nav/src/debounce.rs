//! Debounce gate: at most one accepted command per cooldown window.
//!
//! Accepting a command marks the gate busy and schedules its release
//! `cooldown` later.  While busy every candidate is rejected and dropped;
//! nothing is queued.

use std::time::{Duration, Instant};

use tracing::trace;

/// Cooldown for grid and chain screens.
pub const GRID_COOLDOWN: Duration = Duration::from_millis(1000);
/// Cooldown for the two-item choice screen.
pub const BINARY_COOLDOWN: Duration = Duration::from_millis(500);

#[derive(Clone, Debug)]
pub struct DebounceGate {
    cooldown:   Duration,
    busy:       bool,
    release_at: Option<Instant>,
}

impl DebounceGate {
    pub fn new(cooldown: Duration) -> Self {
        DebounceGate { cooldown, busy: false, release_at: None }
    }

    /// Accept or reject a candidate command arriving at `now`.
    pub fn try_fire(&mut self, now: Instant) -> bool {
        self.release_due(now);
        if self.busy {
            trace!(remaining = ?self.release_at.map(|at| at.saturating_duration_since(now)), "gate busy");
            return false;
        }
        self.busy       = true;
        self.release_at = Some(now + self.cooldown);
        true
    }

    /// Run the scheduled release if it has come due.  Returns true if the
    /// gate was released by this call.
    pub fn release_due(&mut self, now: Instant) -> bool {
        match self.release_at {
            Some(at) if now >= at => {
                self.busy       = false;
                self.release_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_busy(&mut self, now: Instant) -> bool {
        self.release_due(now);
        self.busy
    }

    /// Instant of the pending release, if any.
    pub fn deadline(&self) -> Option<Instant> { self.release_at }

    /// Drop the pending release.  Used on screen exit.
    pub fn cancel(&mut self) {
        self.busy       = false;
        self.release_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration { Duration::from_millis(n) }

    #[test]
    fn second_command_inside_cooldown_is_dropped() {
        let t0 = Instant::now();
        let mut gate = DebounceGate::new(GRID_COOLDOWN);
        let accepted = [gate.try_fire(t0), gate.try_fire(t0 + ms(400))];
        assert_eq!(accepted.iter().filter(|&&a| a).count(), 1);
        assert!(accepted[0]);
    }

    #[test]
    fn released_after_cooldown() {
        let t0 = Instant::now();
        let mut gate = DebounceGate::new(GRID_COOLDOWN);
        assert!(gate.try_fire(t0));
        assert!(!gate.try_fire(t0 + ms(999)));
        assert!(gate.try_fire(t0 + ms(1000)));
    }

    #[test]
    fn rejected_commands_do_not_extend_cooldown() {
        let t0 = Instant::now();
        let mut gate = DebounceGate::new(BINARY_COOLDOWN);
        assert!(gate.try_fire(t0));
        assert!(!gate.try_fire(t0 + ms(300)));
        assert!(!gate.try_fire(t0 + ms(450)));
        assert!(gate.try_fire(t0 + ms(500)));
    }

    #[test]
    fn deadline_tracks_release() {
        let t0 = Instant::now();
        let mut gate = DebounceGate::new(GRID_COOLDOWN);
        assert_eq!(gate.deadline(), None);
        gate.try_fire(t0);
        assert_eq!(gate.deadline(), Some(t0 + GRID_COOLDOWN));
        assert!(gate.release_due(t0 + GRID_COOLDOWN));
        assert_eq!(gate.deadline(), None);
    }

    #[test]
    fn cancel_clears_busy() {
        let t0 = Instant::now();
        let mut gate = DebounceGate::new(GRID_COOLDOWN);
        gate.try_fire(t0);
        gate.cancel();
        assert!(!gate.is_busy(t0 + ms(1)));
        assert_eq!(gate.deadline(), None);
    }
}
