#![forbid(unsafe_code)]

//! Core: geometry primitives and host capability traits for Waymark.
//!
//! # Role in Waymark
//! `waymark-core` is the boundary layer. It owns the viewport-relative
//! geometry types and the narrow capability traits through which the tour
//! engine talks to whatever UI surface hosts it.
//!
//! # Primary responsibilities
//! - **Geometry**: `Point`, `Size`, `Rect` in viewport-relative pixels.
//! - **Capabilities**: anchor lookup, viewport measurement, and viewport
//!   event listener lifecycle, each behind its own trait.
//! - **MockHost** (feature `test-helpers`): a scriptable host double so the
//!   placement and engine logic can be exercised without a real view tree.
//!
//! # How it fits in the system
//! The engine (`waymark-tour`) consumes these traits and never touches a
//! concrete view tree. Hosts implement the three capability traits once and
//! get the whole tour pipeline; everything above this crate is pure logic.

pub mod capability;
pub mod geometry;

pub use capability::{AnchorLocator, TourHost, ViewportListeners, ViewportProvider};
pub use geometry::{Point, Rect, Size};

#[cfg(any(test, feature = "test-helpers"))]
pub use capability::MockHost;
