#![forbid(unsafe_code)]

//! Host capability traits: the only bridge between the tour engine and a
//! concrete UI surface.
//!
//! The engine never holds a reference to a view-tree element. It identifies
//! anchors indirectly by string key and asks the host to measure them on
//! every recalculation cycle, so the host retains full ownership of element
//! lifetime.
//!
//! # Invariants
//!
//! 1. `resolve` reports the target's rectangle *as currently laid out*; the
//!    result is only valid for the cycle that requested it.
//! 2. `scroll_into_view` is best effort and bounded; it may still be in
//!    flight when it returns. Callers that need a settled position must wait
//!    before measuring (the engine's settle delay exists for exactly this).
//! 3. `attach`/`detach` are idempotent: attaching twice registers one set of
//!    listeners, detaching without a prior attach is a no-op.
//!
//! # Example
//!
//! ```ignore
//! struct DomHost { /* handles into the real view tree */ }
//!
//! impl AnchorLocator for DomHost {
//!     fn scroll_into_view(&mut self, target_id: &str) { /* element.scrollIntoView */ }
//!     fn resolve(&self, target_id: &str) -> Option<Rect> { /* getBoundingClientRect */ }
//! }
//! ```

use crate::geometry::{Rect, Size};

/// Resolves a step's target key to an on-screen rectangle.
pub trait AnchorLocator {
    /// Ask the host to bring the target into (ideally centered) view.
    ///
    /// Best effort: unknown targets are ignored and the scroll may complete
    /// asynchronously after this returns.
    fn scroll_into_view(&mut self, target_id: &str);

    /// Measure the target's current viewport-relative rectangle.
    ///
    /// Returns `None` when no element matches `target_id`; the pipeline
    /// treats that as a soft failure, not an error.
    fn resolve(&self, target_id: &str) -> Option<Rect>;
}

/// Reports the current viewport dimensions.
pub trait ViewportProvider {
    /// Current viewport size in pixels.
    fn viewport(&self) -> Size;
}

/// Lifecycle for the host-side resize/scroll listeners.
///
/// The engine calls [`attach`](ViewportListeners::attach) when a tour opens
/// and [`detach`](ViewportListeners::detach) when it closes or is dropped.
/// While attached, the host is expected to forward resize/scroll events to
/// the engine's `viewport_resized`/`viewport_scrolled` entry points.
pub trait ViewportListeners {
    /// Register resize/scroll listeners. Idempotent.
    fn attach(&mut self);

    /// Remove previously registered listeners. Idempotent.
    fn detach(&mut self);
}

/// Umbrella trait for everything the engine needs from a host.
///
/// Blanket-implemented; hosts implement the three capability traits and get
/// this for free.
pub trait TourHost: AnchorLocator + ViewportProvider + ViewportListeners {}

impl<T: AnchorLocator + ViewportProvider + ViewportListeners> TourHost for T {}

#[cfg(any(test, feature = "test-helpers"))]
pub use mock::MockHost;

#[cfg(any(test, feature = "test-helpers"))]
mod mock {
    use super::{AnchorLocator, Rect, Size, ViewportListeners, ViewportProvider};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Debug)]
    struct MockHostInner {
        anchors: HashMap<String, Rect>,
        viewport: Size,
        scrolled: Vec<String>,
        attached: bool,
        attach_count: usize,
        detach_count: usize,
    }

    /// Scriptable host double for exercising the engine without a view tree.
    ///
    /// Clones share the same interior, so a test can keep one handle for
    /// assertions while the engine owns another.
    #[derive(Debug, Clone)]
    pub struct MockHost {
        inner: Rc<RefCell<MockHostInner>>,
    }

    impl Default for MockHost {
        fn default() -> Self {
            Self::new(Size::new(1024.0, 768.0))
        }
    }

    impl MockHost {
        /// Create a host with the given viewport and no anchors.
        #[must_use]
        pub fn new(viewport: Size) -> Self {
            Self {
                inner: Rc::new(RefCell::new(MockHostInner {
                    anchors: HashMap::new(),
                    viewport,
                    scrolled: Vec::new(),
                    attached: false,
                    attach_count: 0,
                    detach_count: 0,
                })),
            }
        }

        /// Register (or move) an anchor rectangle under `id`.
        pub fn set_anchor(&self, id: impl Into<String>, rect: Rect) {
            self.inner.borrow_mut().anchors.insert(id.into(), rect);
        }

        /// Remove an anchor, simulating an element that left the tree.
        pub fn remove_anchor(&self, id: &str) {
            self.inner.borrow_mut().anchors.remove(id);
        }

        /// Change the viewport size, simulating a resize.
        pub fn set_viewport(&self, viewport: Size) {
            self.inner.borrow_mut().viewport = viewport;
        }

        /// Target ids passed to `scroll_into_view`, in call order.
        #[must_use]
        pub fn scrolled_targets(&self) -> Vec<String> {
            self.inner.borrow().scrolled.clone()
        }

        /// Whether listeners are currently attached.
        #[must_use]
        pub fn listeners_attached(&self) -> bool {
            self.inner.borrow().attached
        }

        /// Number of effective (non-idempotent) attach calls.
        #[must_use]
        pub fn attach_count(&self) -> usize {
            self.inner.borrow().attach_count
        }

        /// Number of effective (non-idempotent) detach calls.
        #[must_use]
        pub fn detach_count(&self) -> usize {
            self.inner.borrow().detach_count
        }
    }

    impl AnchorLocator for MockHost {
        fn scroll_into_view(&mut self, target_id: &str) {
            self.inner.borrow_mut().scrolled.push(target_id.to_string());
        }

        fn resolve(&self, target_id: &str) -> Option<Rect> {
            self.inner.borrow().anchors.get(target_id).copied()
        }
    }

    impl ViewportProvider for MockHost {
        fn viewport(&self) -> Size {
            self.inner.borrow().viewport
        }
    }

    impl ViewportListeners for MockHost {
        fn attach(&mut self) {
            let mut inner = self.inner.borrow_mut();
            if !inner.attached {
                inner.attached = true;
                inner.attach_count += 1;
            }
        }

        fn detach(&mut self) {
            let mut inner = self.inner.borrow_mut();
            if inner.attached {
                inner.attached = false;
                inner.detach_count += 1;
            }
        }
    }
}
