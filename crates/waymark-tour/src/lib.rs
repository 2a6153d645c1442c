#![forbid(unsafe_code)]

//! Guided-tour engine: step-by-step spotlight walkthroughs over any host
//! UI surface.
//!
//! # Role in Waymark
//! `waymark-tour` is the logic layer. It owns the tour state machine, the
//! tooltip placement and viewport clamping geometry, the debounced
//! recomputation scheduler, and the spotlight scene builder. It reaches the
//! outside world only through the capability traits in `waymark-core`.
//!
//! # Pipeline
//! Navigation or a viewport event arms the scheduler; once the settle delay
//! elapses, the engine resolves the current step's anchor, computes the
//! clamped card position, and commits a [`SpotlightScene`] for the host to
//! paint. A stale pending recomputation is always superseded by a newer
//! trigger, so the scene never lags behind the latest step or viewport
//! state.
//!
//! # Example
//!
//! ```ignore
//! use waymark_tour::{Placement, Step, TourEngine};
//!
//! let mut engine = TourEngine::new(host);
//! engine.open(vec![
//!     Step::new("nav-profile", "Your profile").body("Edit your details here."),
//!     Step::new("report-panel", "Reports").placement(Placement::Left),
//! ]);
//! ```

pub mod engine;
pub mod placement;
pub mod scheduler;
pub mod spotlight;
pub mod tour;

pub use engine::{EngineConfig, TourEngine};
pub use placement::{Alignment, Placement, PlacementResult};
pub use scheduler::{RecalcScheduler, Trigger};
pub use spotlight::{CardScene, NextControl, SpotlightConfig, SpotlightScene};
pub use tour::{Step, TourEvent, TourState};
