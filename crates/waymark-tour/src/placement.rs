#![forbid(unsafe_code)]

//! Tooltip card placement: pure geometry from anchor rectangle to final
//! card position.
//!
//! Two stages, both pure functions over [`waymark_core::geometry`] values:
//!
//! 1. [`preferred_position`] computes the unclamped position for the
//!    requested side of the anchor.
//! 2. [`clamp_to_viewport`] translates that position so the card stays
//!    inside the viewport's padding bounds, recording which branch fired.
//!
//! # Invariants
//!
//! 1. The clamp is translation-only: it never re-selects the side, even
//!    when the requested side has insufficient room.
//! 2. Horizontally-centered placements (`Top`/`Bottom`) are shifted along
//!    the horizontal axis only; side placements are shifted back just far
//!    enough to clear their own viewport edge.
//! 3. Vertically, only the top edge is guarded (`y >= padding`); bottom
//!    overflow in small viewports is left as-is.
//! 4. `alignment` agrees with the final coordinates: `Centered` means the
//!    unclamped position survived, `FlushStart`/`FlushEnd` mean the card
//!    was pinned to the leading/trailing padding bound.
//!
//! An absent anchor short-circuits to a viewport-centered sentinel via
//! [`place`], regardless of the requested side.

use waymark_core::geometry::{Point, Rect, Size};

/// Preferred card side relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Placement {
    /// Above the anchor, horizontally centered.
    Top,
    /// Below the anchor, horizontally centered.
    #[default]
    Bottom,
    /// Left of the anchor, vertically centered.
    Left,
    /// Right of the anchor, vertically centered.
    Right,
}

/// Which horizontal clamp branch produced the final position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// The unclamped position fit; no horizontal shift was applied.
    Centered,
    /// Pinned to the leading (left) padding bound.
    FlushStart,
    /// Pinned to the trailing (right) padding bound.
    FlushEnd,
}

/// Final card position after clamping.
///
/// Transient: recomputed on every recalculation cycle and held only for the
/// current render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementResult {
    /// Card left edge.
    pub x: f64,
    /// Card top edge.
    pub y: f64,
    /// Clamp branch taken for the horizontal axis.
    pub alignment: Alignment,
}

/// Unclamped card position for `placement` relative to `rect`.
///
/// `Top` anchors the card's bottom edge `gap` above the anchor; `Left`
/// anchors the card's right edge `gap` left of it. The centered axes use
/// the anchor's midpoint.
#[must_use]
pub fn preferred_position(rect: &Rect, placement: Placement, card: Size, gap: f64) -> Point {
    match placement {
        Placement::Bottom => Point::new(rect.center_x() - card.width / 2.0, rect.bottom() + gap),
        Placement::Top => Point::new(
            rect.center_x() - card.width / 2.0,
            rect.y - gap - card.height,
        ),
        Placement::Left => Point::new(
            rect.x - gap - card.width,
            rect.center_y() - card.height / 2.0,
        ),
        Placement::Right => Point::new(rect.right() + gap, rect.center_y() - card.height / 2.0),
    }
}

/// Sentinel position for an unresolvable anchor: card centered on the
/// viewport.
#[must_use]
pub fn viewport_centered(card: Size, viewport: Size) -> Point {
    Point::new(
        (viewport.width - card.width) / 2.0,
        (viewport.height - card.height) / 2.0,
    )
}

/// Clamp an unclamped position so the card stays inside the padding bounds.
///
/// `placement` selects the clamp shape: `Top`/`Bottom` guard both horizontal
/// edges, `Left` guards only the leading edge, `Right` only the trailing
/// edge. `None` is the viewport-centered sentinel and clamps like a centered
/// placement.
#[must_use]
pub fn clamp_to_viewport(
    pos: Point,
    placement: Option<Placement>,
    card: Size,
    viewport: Size,
    padding: f64,
) -> PlacementResult {
    let min_x = padding;
    let max_x = viewport.width - padding - card.width;

    let (x, alignment) = match placement {
        Some(Placement::Top) | Some(Placement::Bottom) | None => {
            if pos.x < min_x {
                (min_x, Alignment::FlushStart)
            } else if pos.x > max_x {
                (max_x, Alignment::FlushEnd)
            } else {
                (pos.x, Alignment::Centered)
            }
        }
        Some(Placement::Left) => {
            if pos.x < min_x {
                (min_x, Alignment::FlushStart)
            } else {
                (pos.x, Alignment::Centered)
            }
        }
        Some(Placement::Right) => {
            if pos.x > max_x {
                (max_x, Alignment::FlushEnd)
            } else {
                (pos.x, Alignment::Centered)
            }
        }
    };

    // Top edge only; bottom overflow is left uncorrected.
    let y = pos.y.max(padding);

    PlacementResult { x, y, alignment }
}

/// Full placement pipeline: anchor (or absent) to final card position.
#[must_use]
pub fn place(
    rect: Option<&Rect>,
    placement: Placement,
    card: Size,
    viewport: Size,
    gap: f64,
    padding: f64,
) -> PlacementResult {
    match rect {
        Some(rect) => clamp_to_viewport(
            preferred_position(rect, placement, card, gap),
            Some(placement),
            card,
            viewport,
            padding,
        ),
        None => clamp_to_viewport(
            viewport_centered(card, viewport),
            None,
            card,
            viewport,
            padding,
        ),
    }
}
