//! Property-based invariant tests for the geometry primitives.
//!
//! 1. Derived edges always agree with origin + size.
//! 2. `expand` preserves the center and is inverse-symmetric for margins
//!    that keep dimensions non-negative.
//! 3. A non-empty rect contains its own center and corners.

use proptest::prelude::*;
use waymark_core::geometry::{Point, Rect};

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (
        -1000.0f64..=1000.0,
        -1000.0f64..=1000.0,
        0.0f64..=500.0,
        0.0f64..=500.0,
    )
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn edges_agree_with_origin_and_size(rect in rect_strategy()) {
        prop_assert_eq!(rect.right(), rect.x + rect.width);
        prop_assert_eq!(rect.bottom(), rect.y + rect.height);
        prop_assert_eq!(rect.center_x(), rect.x + rect.width / 2.0);
        prop_assert_eq!(rect.center_y(), rect.y + rect.height / 2.0);
    }

    #[test]
    fn expand_preserves_center(rect in rect_strategy(), margin in -100.0f64..=100.0) {
        let expanded = rect.expand(margin);
        // Shrinking past zero degenerates; only compare centers otherwise.
        if rect.width + margin * 2.0 >= 0.0 && rect.height + margin * 2.0 >= 0.0 {
            prop_assert!((expanded.center_x() - rect.center_x()).abs() < 1e-9);
            prop_assert!((expanded.center_y() - rect.center_y()).abs() < 1e-9);
        }
        prop_assert!(expanded.width >= 0.0);
        prop_assert!(expanded.height >= 0.0);
    }

    #[test]
    fn expand_round_trips_for_safe_margins(rect in rect_strategy(), margin in 0.0f64..=100.0) {
        let back = rect.expand(margin).expand(-margin);
        prop_assert!((back.x - rect.x).abs() < 1e-9);
        prop_assert!((back.y - rect.y).abs() < 1e-9);
        prop_assert!((back.width - rect.width).abs() < 1e-9);
        prop_assert!((back.height - rect.height).abs() < 1e-9);
    }

    #[test]
    fn rect_contains_its_center_and_corners(rect in rect_strategy()) {
        prop_assert!(rect.contains(rect.center()));
        prop_assert!(rect.contains(Point::new(rect.x, rect.y)));
        prop_assert!(rect.contains(Point::new(rect.right(), rect.bottom())));
    }
}
