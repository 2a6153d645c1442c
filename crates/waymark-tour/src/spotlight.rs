#![forbid(unsafe_code)]

//! Spotlight scene construction: dimmed backdrop, anchor cutout, and the
//! positioned tooltip card.
//!
//! A [`SpotlightScene`] is pure geometry plus content — no colors, no
//! easing. The host paints it however it likes; this module only decides
//! *where* everything goes and *what* the card says.
//!
//! # Invariants
//!
//! 1. The backdrop always covers the full viewport.
//! 2. A cutout exists iff the anchor was resolved; it is the anchor rect
//!    expanded by a fixed margin.
//! 3. An unresolved anchor produces a viewport-centered card and no cutout;
//!    the tour is not aborted.
//! 4. The card's Next control reads `Finish` exactly on the last step.

use crate::placement::{self, Alignment, PlacementResult};
use crate::tour::Step;
use waymark_core::geometry::{Rect, Size};

/// Fixed layout parameters for the overlay.
#[derive(Debug, Clone)]
pub struct SpotlightConfig {
    /// Distance between the anchor edge and the card, in pixels.
    pub gap: f64,
    /// Minimum distance kept between the card and the viewport edges.
    pub edge_padding: f64,
    /// How far the cutout extends past the anchor on each side.
    pub cutout_margin: f64,
    /// Fixed card dimensions.
    pub card_size: Size,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            gap: 16.0,
            edge_padding: 20.0,
            cutout_margin: 8.0,
            card_size: Size::new(320.0, 200.0),
        }
    }
}

impl SpotlightConfig {
    /// Set the anchor-to-card gap.
    #[must_use]
    pub fn gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Set the viewport edge padding.
    #[must_use]
    pub fn edge_padding(mut self, padding: f64) -> Self {
        self.edge_padding = padding;
        self
    }

    /// Set the cutout margin.
    #[must_use]
    pub fn cutout_margin(mut self, margin: f64) -> Self {
        self.cutout_margin = margin;
        self
    }

    /// Set the card dimensions.
    #[must_use]
    pub fn card_size(mut self, size: Size) -> Self {
        self.card_size = size;
        self
    }
}

/// Label of the card's forward control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextControl {
    /// More steps remain.
    Next,
    /// This is the last step; advancing completes the tour.
    Finish,
}

/// The tooltip card: position, content, and navigation controls.
#[derive(Debug, Clone, PartialEq)]
pub struct CardScene {
    /// Final card rectangle after clamping.
    pub rect: Rect,
    /// Step heading.
    pub title: String,
    /// Step body text.
    pub body: String,
    /// 1-based step counter as `(current, total)`.
    pub counter: (usize, usize),
    /// Whether the Back control is enabled.
    pub back_enabled: bool,
    /// Forward control label.
    pub next: NextControl,
    /// Clamp branch that produced the card position.
    pub alignment: Alignment,
}

/// One rendered overlay frame: backdrop, optional cutout, card.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotlightScene {
    /// Full-viewport dimmed backdrop.
    pub backdrop: Rect,
    /// Bordered cutout over the anchor; `None` when the anchor is absent.
    pub cutout: Option<Rect>,
    /// The positioned tooltip card.
    pub card: CardScene,
}

/// Build the overlay scene for one recalculation cycle.
///
/// `progress` is the 1-based `(current, total)` pair; `anchor` is the
/// freshly measured rectangle, or `None` when the target could not be
/// located.
#[must_use]
pub fn build_scene(
    step: &Step,
    progress: (usize, usize),
    anchor: Option<Rect>,
    viewport: Size,
    config: &SpotlightConfig,
) -> SpotlightScene {
    let PlacementResult { x, y, alignment } = placement::place(
        anchor.as_ref(),
        step.placement,
        config.card_size,
        viewport,
        config.gap,
        config.edge_padding,
    );

    let (current, total) = progress;
    SpotlightScene {
        backdrop: Rect::from_size(viewport),
        cutout: anchor.map(|rect| rect.expand(config.cutout_margin)),
        card: CardScene {
            rect: Rect::new(x, y, config.card_size.width, config.card_size.height),
            title: step.title.clone(),
            body: step.body.clone(),
            counter: progress,
            back_enabled: current > 1,
            next: if current == total {
                NextControl::Finish
            } else {
                NextControl::Next
            },
            alignment,
        },
    }
}
