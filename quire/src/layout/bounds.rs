// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::kurbo::{Point, Rect, Shape};

/// Tolerance used when testing rectangle corners against a shape.
const INSET: f64 = 1e-6;

/// A region that lines are wrapped into.
///
/// Implemented for every [`Shape`], so circles, rounded rectangles and
/// arbitrary paths can all be used as bounds.
pub trait WrapBounds {
    /// Whether `rect` lies entirely inside the region.
    fn contains_rect(&self, rect: Rect) -> bool;

    /// The smallest rectangle enclosing the region.
    fn bounding_box(&self) -> Rect;
}

impl<S: Shape> WrapBounds for S {
    fn contains_rect(&self, rect: Rect) -> bool {
        let rect = rect.inset(-INSET);
        if rect.width() < 0.0 || rect.height() < 0.0 {
            return false;
        }
        [
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x0, rect.y1),
            Point::new(rect.x1, rect.y1),
        ]
        .into_iter()
        .all(|corner| self.contains(corner))
    }

    fn bounding_box(&self) -> Rect {
        Shape::bounding_box(self)
    }
}

/// Finds the horizontal extent available to a line occupying `y..y + height`.
///
/// The left edge is the first unit strip inside the region, scanning right;
/// the right edge is the furthest point for which the whole span from the
/// left edge stays inside. When no strip at this height is inside, the
/// bounding box is used.
pub(crate) fn scan_extent(bounds: &dyn WrapBounds, y: f64, height: f64) -> (f64, f64) {
    let bbox = bounds.bounding_box();
    let strip = |x0: f64, x1: f64| Rect::new(x0, y, x1, y + height.max(INSET * 4.0));
    let mut x = bbox.x0.floor();
    let left = loop {
        if x >= bbox.x1 {
            return (bbox.x0, bbox.x1);
        }
        if bounds.contains_rect(strip(x, x + 1.0)) {
            break x;
        }
        x += 1.0;
    };
    let mut right = left + 1.0;
    while right + 1.0 <= bbox.x1.ceil() && bounds.contains_rect(strip(left, right + 1.0)) {
        right += 1.0;
    }
    (left, right)
}

#[cfg(test)]
mod tests {
    use super::{scan_extent, WrapBounds};
    use peniko::kurbo::{Circle, Rect};

    #[test]
    fn rect_contains_its_own_edges() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(
            bounds.contains_rect(Rect::new(0.0, 0.0, 100.0, 50.0)),
            "edges are inside"
        );
        assert!(
            !bounds.contains_rect(Rect::new(0.0, 0.0, 101.0, 10.0)),
            "one unit past the right edge"
        );
    }

    #[test]
    fn circle_extent_narrows_towards_the_poles() {
        let circle = Circle::new((50.0, 50.0), 50.0);
        let (left, right) = scan_extent(&circle, 45.0, 10.0);
        let (top_left, top_right) = scan_extent(&circle, 5.0, 10.0);
        assert!(right - left > 90.0, "near the diameter: {left}..{right}");
        assert!(top_right - top_left < right - left, "narrower near the top");
        assert!(top_left > left, "starts further right near the top");
    }

    #[test]
    fn outside_falls_back_to_bounding_box() {
        let circle = Circle::new((50.0, 50.0), 10.0);
        assert_eq!(scan_extent(&circle, 200.0, 10.0), (40.0, 60.0));
    }
}
