#![forbid(unsafe_code)]

//! Recalculation scheduling: one pending, cancellable recomputation.
//!
//! Every trigger (open, step change, resize, scroll) arms a single
//! recomputation that becomes due after a settle delay, giving a best-effort
//! scroll-into-view time to finish before the anchor is measured. Arming
//! replaces any still-pending recomputation, so only the most recent
//! step/viewport state is ever measured and rendered.
//!
//! # Invariants
//!
//! 1. At most one recomputation is pending at a time; the newest trigger
//!    wins.
//! 2. A pending recomputation fires at most once, and only after the settle
//!    delay has elapsed since it was armed.
//! 3. `cancel` is idempotent and drops any pending work without firing it.
//!
//! The scheduler holds no timers of its own: deadlines are data, polled by
//! `tick`. Every time-dependent entry point has an `_at(Instant)` variant so
//! tests can drive the clock deterministically.

use std::time::{Duration, Instant};

/// What caused a recomputation to be scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A tour just opened.
    TourOpened,
    /// The current step index changed.
    StepChanged,
    /// The viewport was resized.
    ViewportResized,
    /// The viewport was scrolled.
    ViewportScrolled,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    trigger: Trigger,
    armed_at: Instant,
}

/// Debounces triggers into a single pending recomputation.
#[derive(Debug)]
pub struct RecalcScheduler {
    settle: Duration,
    pending: Option<Pending>,
}

impl RecalcScheduler {
    /// Create a scheduler with the given settle delay.
    #[must_use]
    pub fn new(settle: Duration) -> Self {
        Self {
            settle,
            pending: None,
        }
    }

    /// The configured settle delay.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.settle
    }

    /// Arm a recomputation for `trigger`, replacing any pending one.
    pub fn schedule(&mut self, trigger: Trigger) {
        self.schedule_at(trigger, Instant::now());
    }

    /// Arm a recomputation as of `now`.
    pub fn schedule_at(&mut self, trigger: Trigger, now: Instant) {
        if let Some(stale) = self.pending.replace(Pending {
            trigger,
            armed_at: now,
        }) {
            tracing::trace!(?stale.trigger, ?trigger, "pending recomputation superseded");
        }
    }

    /// Fire the pending recomputation if its settle delay has elapsed.
    pub fn tick(&mut self) -> Option<Trigger> {
        self.tick_at(Instant::now())
    }

    /// Fire the pending recomputation as of `now`.
    pub fn tick_at(&mut self, now: Instant) -> Option<Trigger> {
        let pending = self.pending?;
        if now.saturating_duration_since(pending.armed_at) < self.settle {
            return None;
        }
        self.pending = None;
        Some(pending.trigger)
    }

    /// Drop any pending recomputation without firing it. Idempotent.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a recomputation is armed but not yet fired.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time remaining until the pending recomputation is due, if any.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        let pending = self.pending?;
        let elapsed = now.saturating_duration_since(pending.armed_at);
        Some(self.settle.saturating_sub(elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTLE: Duration = Duration::from_millis(100);

    #[test]
    fn fires_only_after_settle_delay() {
        let mut scheduler = RecalcScheduler::new(SETTLE);
        let t0 = Instant::now();

        scheduler.schedule_at(Trigger::TourOpened, t0);
        assert!(scheduler.is_pending());
        assert_eq!(scheduler.tick_at(t0 + Duration::from_millis(50)), None);
        assert_eq!(
            scheduler.tick_at(t0 + Duration::from_millis(120)),
            Some(Trigger::TourOpened)
        );
    }

    #[test]
    fn fires_at_most_once_per_arm() {
        let mut scheduler = RecalcScheduler::new(SETTLE);
        let t0 = Instant::now();

        scheduler.schedule_at(Trigger::StepChanged, t0);
        assert!(scheduler.tick_at(t0 + SETTLE).is_some());
        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.tick_at(t0 + SETTLE * 2), None);
    }

    #[test]
    fn newer_trigger_replaces_pending_one() {
        let mut scheduler = RecalcScheduler::new(SETTLE);
        let t0 = Instant::now();

        scheduler.schedule_at(Trigger::StepChanged, t0);
        scheduler.schedule_at(Trigger::ViewportScrolled, t0 + Duration::from_millis(60));

        // The replaced trigger's deadline no longer applies.
        assert_eq!(scheduler.tick_at(t0 + Duration::from_millis(110)), None);
        assert_eq!(
            scheduler.tick_at(t0 + Duration::from_millis(160)),
            Some(Trigger::ViewportScrolled)
        );
    }

    #[test]
    fn cancel_drops_pending_work() {
        let mut scheduler = RecalcScheduler::new(SETTLE);
        let t0 = Instant::now();

        scheduler.schedule_at(Trigger::ViewportResized, t0);
        scheduler.cancel();
        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.tick_at(t0 + SETTLE * 2), None);

        // Idempotent.
        scheduler.cancel();
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn time_until_due_counts_down() {
        let mut scheduler = RecalcScheduler::new(SETTLE);
        let t0 = Instant::now();

        assert_eq!(scheduler.time_until_due(t0), None);

        scheduler.schedule_at(Trigger::TourOpened, t0);
        assert_eq!(
            scheduler.time_until_due(t0 + Duration::from_millis(40)),
            Some(Duration::from_millis(60))
        );
        assert_eq!(
            scheduler.time_until_due(t0 + Duration::from_millis(200)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn zero_settle_fires_immediately() {
        let mut scheduler = RecalcScheduler::new(Duration::ZERO);
        let t0 = Instant::now();

        scheduler.schedule_at(Trigger::ViewportScrolled, t0);
        assert_eq!(scheduler.tick_at(t0), Some(Trigger::ViewportScrolled));
    }
}
