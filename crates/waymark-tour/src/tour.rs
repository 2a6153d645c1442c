#![forbid(unsafe_code)]

//! Tour state machine: an ordered step list, a cursor, and an open flag.
//!
//! # Invariants
//!
//! 1. While open, `0 <= current < steps.len()` and `steps` is non-empty.
//! 2. Opening with an empty step list is a no-op; no tour opens.
//! 3. Advancing past the last step closes the tour and emits `Completed`
//!    exactly once; closing any other way never emits it.
//! 4. Navigation never skips steps: `next`/`prev` move the cursor by one,
//!    `go_to` is validated against the step range.
//!
//! # Example
//!
//! ```ignore
//! use waymark_tour::tour::{Step, TourState};
//! use waymark_tour::placement::Placement;
//!
//! let mut state = TourState::new();
//! state.open(vec![
//!     Step::new("nav-profile", "Your profile").body("Edit your details here."),
//!     Step::new("report-panel", "Reports").placement(Placement::Left),
//! ]);
//! ```

use crate::placement::Placement;

/// A single step of a guided tour.
///
/// Identifies its anchor indirectly by `target_id` so the engine never owns
/// view-tree lifetime; the host resolves the key to a rectangle on every
/// recalculation cycle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// Lookup key for the anchor element.
    pub target_id: String,
    /// Card heading.
    pub title: String,
    /// Card body text.
    pub body: String,
    /// Preferred card side relative to the anchor.
    pub placement: Placement,
}

impl Step {
    /// Create a step anchored to `target_id` with the given title.
    #[must_use]
    pub fn new(target_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            title: title.into(),
            body: String::new(),
            placement: Placement::default(),
        }
    }

    /// Set the body text.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the preferred card side.
    #[must_use]
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}

/// Events emitted by [`TourState`] transitions.
///
/// Exactly one event is pending at a time; callers drain it with
/// [`TourState::take_event`] after each operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourEvent {
    /// A tour opened at step 0.
    Opened,
    /// The cursor moved to a new step.
    StepChanged { index: usize },
    /// `next` on the last step closed the tour.
    Completed,
    /// The tour was closed without completing.
    Closed,
}

/// The tour controller's state: steps, cursor, and open flag.
#[derive(Debug, Clone, Default)]
pub struct TourState {
    steps: Vec<Step>,
    current: usize,
    open: bool,
    pending_event: Option<TourEvent>,
}

impl TourState {
    /// Create a closed state with no steps.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a tour is currently open.
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current step index. Meaningful only while open.
    #[inline]
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The step under the cursor, if a tour is open.
    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        if self.open {
            self.steps.get(self.current)
        } else {
            None
        }
    }

    /// 1-based progress as `(current, total)`, or `(0, 0)` when closed.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        if self.open {
            (self.current + 1, self.steps.len())
        } else {
            (0, 0)
        }
    }

    /// Open a tour at step 0.
    ///
    /// An empty `steps` list violates the caller precondition and is treated
    /// as a documented no-op: nothing opens and `false` is returned. Opening
    /// over an already-open tour replaces it.
    pub fn open(&mut self, steps: Vec<Step>) -> bool {
        if steps.is_empty() {
            return false;
        }
        self.steps = steps;
        self.current = 0;
        self.open = true;
        self.pending_event = Some(TourEvent::Opened);
        true
    }

    /// Advance by one step; on the last step, close and emit `Completed`.
    ///
    /// Returns `false` when no tour is open.
    pub fn next(&mut self) -> bool {
        if !self.open {
            return false;
        }
        if self.current + 1 < self.steps.len() {
            self.current += 1;
            self.pending_event = Some(TourEvent::StepChanged {
                index: self.current,
            });
        } else {
            self.open = false;
            self.current = 0;
            self.pending_event = Some(TourEvent::Completed);
        }
        true
    }

    /// Step back by one. No-op at index 0 or while closed.
    pub fn prev(&mut self) -> bool {
        if !self.open || self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.pending_event = Some(TourEvent::StepChanged {
            index: self.current,
        });
        true
    }

    /// Jump directly to step `index`.
    ///
    /// Rejected (returns `false`) when closed or out of range. Jumping to
    /// the current index succeeds without a transition.
    pub fn go_to(&mut self, index: usize) -> bool {
        if !self.open || index >= self.steps.len() {
            return false;
        }
        if index != self.current {
            self.current = index;
            self.pending_event = Some(TourEvent::StepChanged { index });
        }
        true
    }

    /// Close the tour without emitting `Completed`. No-op while closed.
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.current = 0;
        self.pending_event = Some(TourEvent::Closed);
        true
    }

    /// Take the pending transition event, if any.
    pub fn take_event(&mut self) -> Option<TourEvent> {
        self.pending_event.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_steps() -> Vec<Step> {
        vec![
            Step::new("nav-profile", "Profile").body("First"),
            Step::new("product-list", "Products").body("Second"),
            Step::new("report-panel", "Reports").body("Third"),
        ]
    }

    // ── Step construction ────────────────────────────────────────────────

    #[test]
    fn step_builder() {
        let step = Step::new("save-button", "Save")
            .body("Stores your changes.")
            .placement(Placement::Right);

        assert_eq!(step.target_id, "save-button");
        assert_eq!(step.title, "Save");
        assert_eq!(step.body, "Stores your changes.");
        assert_eq!(step.placement, Placement::Right);
    }

    #[test]
    fn step_defaults_to_bottom_placement() {
        let step = Step::new("x", "X");
        assert_eq!(step.placement, Placement::Bottom);
        assert!(step.body.is_empty());
    }

    // ── Opening ──────────────────────────────────────────────────────────

    #[test]
    fn open_starts_at_step_zero() {
        let mut state = TourState::new();
        assert!(state.open(sample_steps()));
        assert!(state.is_open());
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.progress(), (1, 3));
        assert_eq!(state.take_event(), Some(TourEvent::Opened));
    }

    #[test]
    fn open_with_empty_steps_is_a_noop() {
        let mut state = TourState::new();
        assert!(!state.open(vec![]));
        assert!(!state.is_open());
        assert!(state.take_event().is_none());
        assert_eq!(state.progress(), (0, 0));
    }

    #[test]
    fn reopen_replaces_the_running_tour() {
        let mut state = TourState::new();
        state.open(sample_steps());
        state.next();

        state.open(vec![Step::new("other", "Other")]);
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.progress(), (1, 1));
        assert_eq!(state.take_event(), Some(TourEvent::Opened));
    }

    // ── Navigation ───────────────────────────────────────────────────────

    #[test]
    fn next_advances_one_step() {
        let mut state = TourState::new();
        state.open(sample_steps());
        state.take_event();

        assert!(state.next());
        assert_eq!(state.current_index(), 1);
        assert_eq!(state.take_event(), Some(TourEvent::StepChanged { index: 1 }));
    }

    #[test]
    fn next_on_last_step_completes_once() {
        let mut state = TourState::new();
        state.open(sample_steps());
        state.take_event();

        state.next();
        state.next();
        assert!(state.next());
        assert!(!state.is_open());
        assert_eq!(state.take_event(), Some(TourEvent::Completed));

        // Closed now: further navigation is rejected and emits nothing.
        assert!(!state.next());
        assert!(state.take_event().is_none());
    }

    #[test]
    fn prev_at_zero_leaves_state_unchanged() {
        let mut state = TourState::new();
        state.open(sample_steps());
        state.take_event();

        assert!(!state.prev());
        assert_eq!(state.current_index(), 0);
        assert!(state.take_event().is_none());
    }

    #[test]
    fn prev_steps_back() {
        let mut state = TourState::new();
        state.open(sample_steps());
        state.next();
        state.take_event();

        assert!(state.prev());
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.take_event(), Some(TourEvent::StepChanged { index: 0 }));
    }

    #[test]
    fn completion_fires_once_despite_back_and_forth() {
        let mut state = TourState::new();
        state.open(sample_steps());
        state.take_event();

        for _ in 0..3 {
            state.next();
            state.prev();
        }
        assert!(state.is_open(), "oscillation never nets past the end");

        state.next();
        state.next();
        state.next();
        assert!(!state.is_open());
        assert_eq!(state.take_event(), Some(TourEvent::Completed));

        // Exactly once: the closed machine rejects further advances silently.
        assert!(!state.next());
        assert!(state.take_event().is_none());
    }

    #[test]
    fn go_to_validates_range() {
        let mut state = TourState::new();
        state.open(sample_steps());
        state.take_event();

        assert!(state.go_to(2));
        assert_eq!(state.current_index(), 2);
        assert_eq!(state.take_event(), Some(TourEvent::StepChanged { index: 2 }));

        assert!(!state.go_to(3));
        assert_eq!(state.current_index(), 2);
        assert!(state.take_event().is_none());
    }

    #[test]
    fn go_to_current_index_emits_no_transition() {
        let mut state = TourState::new();
        state.open(sample_steps());
        state.take_event();

        assert!(state.go_to(0));
        assert!(state.take_event().is_none());
    }

    #[test]
    fn go_to_while_closed_is_rejected() {
        let mut state = TourState::new();
        assert!(!state.go_to(0));
    }

    // ── Closing ──────────────────────────────────────────────────────────

    #[test]
    fn close_does_not_complete() {
        let mut state = TourState::new();
        state.open(sample_steps());
        state.next();
        state.take_event();

        assert!(state.close());
        assert!(!state.is_open());
        assert_eq!(state.take_event(), Some(TourEvent::Closed));
        assert_eq!(state.progress(), (0, 0));

        assert!(!state.close());
        assert!(state.take_event().is_none());
    }

    #[test]
    fn current_step_tracks_cursor() {
        let mut state = TourState::new();
        state.open(sample_steps());
        assert_eq!(state.current_step().unwrap().title, "Profile");

        state.next();
        assert_eq!(state.current_step().unwrap().title, "Products");

        state.close();
        assert!(state.current_step().is_none());
    }

    #[test]
    fn event_slot_is_take_once() {
        let mut state = TourState::new();
        state.open(sample_steps());
        assert!(state.take_event().is_some());
        assert!(state.take_event().is_none());
    }
}
