//! Segment geometry primitives
//!
//! The collision loop and the (external) wall editor's pointer hit-test
//! both reduce to the same question: how far is a point from a line
//! segment, and in which direction?

use glam::Vec2;

/// Contact information for a circle overlapping a segment
#[derive(Debug, Clone, Copy)]
pub struct SegmentContact {
    /// Closest point on the segment to the circle center
    pub point: Vec2,
    /// Distance from the circle center to that point
    pub distance: f32,
    /// Unit vector from the closest point toward the circle center.
    /// Zero when the center lies exactly on the segment; the resolver
    /// substitutes its documented fallback normal in that case.
    pub normal: Vec2,
}

/// Closest point on segment `a`-`b` to `point`, with the clamped
/// projection parameter `t` in [0, 1].
///
/// Callers must skip degenerate (zero-length) segments; this returns
/// `(a, 0.0)` for them so the pointer hit-test still gets a sane answer.
pub fn closest_point_on_segment(point: Vec2, a: Vec2, b: Vec2) -> (Vec2, f32) {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-6 {
        return (a, 0.0);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t, t)
}

/// Check whether a circle overlaps segment `a`-`b`.
///
/// Returns contact info iff the squared distance from the center to the
/// closest segment point is below `radius²`.
pub fn circle_overlaps_segment(
    center: Vec2,
    radius: f32,
    a: Vec2,
    b: Vec2,
) -> Option<SegmentContact> {
    let (point, _t) = closest_point_on_segment(center, a, b);
    let offset = center - point;
    if offset.length_squared() >= radius * radius {
        return None;
    }
    let distance = offset.length();
    Some(SegmentContact {
        point,
        distance,
        normal: offset.normalize_or_zero(),
    })
}
