#![forbid(unsafe_code)]

//! The tour engine: navigation, listener lifecycle, and the recomputation
//! pipeline over a host.
//!
//! [`TourEngine`] owns the [`TourState`] and the [`RecalcScheduler`] and
//! talks to the UI surface exclusively through the [`TourHost`] capability
//! traits. Hosts call the navigation entry points from their controls,
//! forward resize/scroll events while listeners are attached, and poll
//! [`tick`](TourEngine::tick) (typically from their frame loop or a timer)
//! to collect committed [`SpotlightScene`]s.
//!
//! # Invariants
//!
//! 1. Every transition into a new `(open, step)` pair arms exactly one
//!    recomputation; resize/scroll re-enter the pipeline without changing
//!    the step.
//! 2. Viewport listeners are attached while a tour is open and detached on
//!    close, completion, and drop — every exit path, including an abrupt
//!    close with a recomputation still pending.
//! 3. Closing cancels pending work; a tick that fires after close commits
//!    nothing.
//! 4. The completion callback runs exactly once per tour run, only when
//!    `next` is triggered on the last step.
//!
//! # Example
//!
//! ```ignore
//! use waymark_tour::{Step, TourEngine};
//!
//! let mut engine = TourEngine::new(host).on_complete(|| mark_tour_seen());
//! engine.open(vec![
//!     Step::new("nav-profile", "Your profile").body("Edit your details here."),
//!     Step::new("report-panel", "Reports").body("Daily numbers live here."),
//! ]);
//! // later, driven by the host's frame loop:
//! if let Some(scene) = engine.tick() {
//!     paint(scene);
//! }
//! ```

use crate::scheduler::{RecalcScheduler, Trigger};
use crate::spotlight::{self, SpotlightConfig, SpotlightScene};
use crate::tour::{Step, TourEvent, TourState};
use std::time::{Duration, Instant};
use tracing::debug;
use waymark_core::capability::TourHost;

/// Engine tuning knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Delay between a trigger and the recomputation it arms, giving a
    /// best-effort scroll-into-view time to finish before measuring.
    pub settle_delay: Duration,
    /// Overlay layout parameters.
    pub spotlight: SpotlightConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(100),
            spotlight: SpotlightConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Set the settle delay.
    #[must_use]
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Set the overlay layout parameters.
    #[must_use]
    pub fn spotlight(mut self, spotlight: SpotlightConfig) -> Self {
        self.spotlight = spotlight;
        self
    }
}

type Callback = Box<dyn FnMut()>;

/// Guided-tour engine over a [`TourHost`].
pub struct TourEngine<H: TourHost> {
    host: H,
    state: TourState,
    scheduler: RecalcScheduler,
    spotlight: SpotlightConfig,
    last_scene: Option<SpotlightScene>,
    on_complete: Option<Callback>,
    on_close: Option<Callback>,
    listeners_attached: bool,
}

impl<H: TourHost> TourEngine<H> {
    /// Create an engine with default configuration.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self::with_config(host, EngineConfig::default())
    }

    /// Create an engine with the given configuration.
    #[must_use]
    pub fn with_config(host: H, config: EngineConfig) -> Self {
        Self {
            host,
            state: TourState::new(),
            scheduler: RecalcScheduler::new(config.settle_delay),
            spotlight: config.spotlight,
            last_scene: None,
            on_complete: None,
            on_close: None,
            listeners_attached: false,
        }
    }

    /// Set the completion callback, invoked exactly once when `next` is
    /// triggered on the last step.
    #[must_use]
    pub fn on_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Set the close callback, invoked when the tour is dismissed without
    /// completing.
    #[must_use]
    pub fn on_close(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    // ── Navigation ───────────────────────────────────────────────────────

    /// Open a tour at step 0. No-op (returns `false`) for an empty list.
    pub fn open(&mut self, steps: Vec<Step>) -> bool {
        self.open_at(steps, Instant::now())
    }

    /// Open a tour as of `now`.
    pub fn open_at(&mut self, steps: Vec<Step>, now: Instant) -> bool {
        let opened = self.state.open(steps);
        self.apply_transition(now);
        opened
    }

    /// Advance one step; on the last step, close and fire the completion
    /// callback.
    pub fn next(&mut self) -> bool {
        self.next_at(Instant::now())
    }

    /// Advance as of `now`.
    pub fn next_at(&mut self, now: Instant) -> bool {
        let moved = self.state.next();
        self.apply_transition(now);
        moved
    }

    /// Step back one step. No-op at index 0.
    pub fn prev(&mut self) -> bool {
        self.prev_at(Instant::now())
    }

    /// Step back as of `now`.
    pub fn prev_at(&mut self, now: Instant) -> bool {
        let moved = self.state.prev();
        self.apply_transition(now);
        moved
    }

    /// Jump to step `index`; rejected when closed or out of range.
    pub fn go_to(&mut self, index: usize) -> bool {
        self.go_to_at(index, Instant::now())
    }

    /// Jump as of `now`.
    pub fn go_to_at(&mut self, index: usize, now: Instant) -> bool {
        let moved = self.state.go_to(index);
        self.apply_transition(now);
        moved
    }

    /// Dismiss the tour without completing it.
    pub fn close(&mut self) -> bool {
        let closed = self.state.close();
        self.apply_transition(Instant::now());
        closed
    }

    // ── Viewport events (forwarded by the host while attached) ───────────

    /// The viewport was resized.
    pub fn viewport_resized(&mut self) {
        self.viewport_resized_at(Instant::now());
    }

    /// Resize as of `now`.
    pub fn viewport_resized_at(&mut self, now: Instant) {
        if self.state.is_open() {
            self.scheduler.schedule_at(Trigger::ViewportResized, now);
        }
    }

    /// The viewport was scrolled.
    pub fn viewport_scrolled(&mut self) {
        self.viewport_scrolled_at(Instant::now());
    }

    /// Scroll as of `now`.
    pub fn viewport_scrolled_at(&mut self, now: Instant) {
        if self.state.is_open() {
            self.scheduler.schedule_at(Trigger::ViewportScrolled, now);
        }
    }

    // ── Recomputation ────────────────────────────────────────────────────

    /// Run the pending recomputation if it is due.
    ///
    /// Resolves the current anchor, computes the clamped card position, and
    /// commits a fresh [`SpotlightScene`]. At most one scene is committed
    /// per fired trigger; a tick against a closed tour commits nothing.
    pub fn tick(&mut self) -> Option<&SpotlightScene> {
        self.tick_at(Instant::now())
    }

    /// Run the pipeline as of `now`.
    pub fn tick_at(&mut self, now: Instant) -> Option<&SpotlightScene> {
        let trigger = self.scheduler.tick_at(now)?;
        // Cancellation on close is the primary defense; this guard catches
        // a trigger armed in the same tick window as a close.
        if !self.state.is_open() {
            return None;
        }
        let step = self.state.current_step()?;
        let anchor = self.host.resolve(&step.target_id);
        let viewport = self.host.viewport();
        let scene = spotlight::build_scene(
            step,
            self.state.progress(),
            anchor,
            viewport,
            &self.spotlight,
        );
        debug!(
            ?trigger,
            step = self.state.current_index(),
            anchor_found = anchor.is_some(),
            "recomputation committed"
        );
        self.last_scene = Some(scene);
        self.last_scene.as_ref()
    }

    /// Time until the pending recomputation is due, for hosts that schedule
    /// their next poll instead of ticking every frame.
    #[must_use]
    pub fn time_until_recalc(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_due(now)
    }

    // ── State accessors ──────────────────────────────────────────────────

    /// Whether a tour is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// The step under the cursor, if open.
    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        self.state.current_step()
    }

    /// 1-based `(current, total)` progress, or `(0, 0)` when closed.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        self.state.progress()
    }

    /// The most recently committed scene, for hosts that re-paint without
    /// forcing a recomputation. Cleared when the tour closes.
    #[must_use]
    pub fn last_scene(&self) -> Option<&SpotlightScene> {
        self.last_scene.as_ref()
    }

    /// Shared access to the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Exclusive access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // ── Internal transitions ─────────────────────────────────────────────

    fn apply_transition(&mut self, now: Instant) {
        let Some(event) = self.state.take_event() else {
            return;
        };
        match event {
            TourEvent::Opened => {
                debug!(total = self.state.progress().1, "tour opened");
                self.attach_listeners();
                self.scroll_to_current();
                self.scheduler.schedule_at(Trigger::TourOpened, now);
            }
            TourEvent::StepChanged { index } => {
                debug!(index, "step changed");
                self.scroll_to_current();
                self.scheduler.schedule_at(Trigger::StepChanged, now);
            }
            TourEvent::Completed => {
                debug!("tour completed");
                self.teardown();
                if let Some(callback) = self.on_complete.as_mut() {
                    callback();
                }
            }
            TourEvent::Closed => {
                debug!("tour closed");
                self.teardown();
                if let Some(callback) = self.on_close.as_mut() {
                    callback();
                }
            }
        }
    }

    /// Request that the current step's anchor be brought into view. The
    /// settle delay absorbs the time this takes.
    fn scroll_to_current(&mut self) {
        let target = self
            .state
            .current_step()
            .map(|step| step.target_id.clone());
        if let Some(target) = target {
            self.host.scroll_into_view(&target);
        }
    }

    /// Release everything the open tour held: pending work, listeners, and
    /// the committed scene.
    fn teardown(&mut self) {
        self.scheduler.cancel();
        self.detach_listeners();
        self.last_scene = None;
    }

    fn attach_listeners(&mut self) {
        if !self.listeners_attached {
            self.host.attach();
            self.listeners_attached = true;
        }
    }

    fn detach_listeners(&mut self) {
        if self.listeners_attached {
            self.host.detach();
            self.listeners_attached = false;
        }
    }
}

impl<H: TourHost> Drop for TourEngine<H> {
    fn drop(&mut self) {
        self.scheduler.cancel();
        self.detach_listeners();
    }
}
