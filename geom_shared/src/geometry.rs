//! Projection and closest-point queries.

use serde::{Deserialize, Serialize};

use crate::{error::GeomError, math::Vec3};

/// Bounded segment: `origin` to `origin + diff`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Segment {
    pub origin: Vec3,
    pub diff: Vec3,
}

impl Segment {
    pub const fn new(origin: Vec3, diff: Vec3) -> Self {
        Self { origin, diff }
    }

    pub fn end(&self) -> Vec3 {
        self.origin + self.diff
    }

    /// A zero `diff` collapses the segment to its origin.
    pub fn is_degenerate(&self) -> bool {
        self.diff.max_abs() == 0.0
    }
}

/// Result of [`closest_point`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClosestPoint {
    pub position: Vec3,
    /// Clamped segment parameter in `[0, 1]`.
    pub t: f32,
    /// Set when the segment had no length and `position` is its origin.
    pub degenerate: bool,
}

/// Orthogonal projection of `v1` onto the direction of `v2`.
///
/// Zero when `v2` is the zero vector.
pub fn project(v1: Vec3, v2: Vec3) -> Vec3 {
    try_project(v1, v2).unwrap_or(Vec3::ZERO)
}

pub fn try_project(v1: Vec3, v2: Vec3) -> Result<Vec3, GeomError> {
    let dir = v2.try_normalize()?;
    Ok(dir * v1.dot(dir))
}

/// Point on `segment` closest to `point`.
///
/// A degenerate segment yields its origin with `t = 0` and `degenerate` set.
pub fn closest_point(point: Vec3, segment: &Segment) -> ClosestPoint {
    match try_closest_point(point, segment) {
        Ok(hit) => hit,
        Err(_) => ClosestPoint {
            position: segment.origin,
            t: 0.0,
            degenerate: true,
        },
    }
}

pub fn try_closest_point(point: Vec3, segment: &Segment) -> Result<ClosestPoint, GeomError> {
    if segment.is_degenerate() {
        return Err(GeomError::ZeroLengthSegment);
    }
    // Both operands are scaled by the largest `diff` component so the dot
    // products stay finite for very long or very short segments.
    let scale = segment.diff.max_abs();
    let dir = segment.diff / scale;
    let t = (((point - segment.origin) / scale).dot(dir) / dir.length_squared()).clamp(0.0, 1.0);
    Ok(ClosestPoint {
        position: segment.origin + segment.diff * t,
        t,
        degenerate: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment() -> Segment {
        Segment::new(Vec3::new(-2.0, -1.0, 0.0), Vec3::new(3.0, 2.0, 2.0))
    }

    #[test]
    fn closest_point_interior() {
        let hit = closest_point(Vec3::new(-1.5, 0.6, 0.6), &segment());
        // t = dot((0.5, 1.6, 0.6), (3, 2, 2)) / 17 = 5.9 / 17
        assert!((hit.t - 5.9 / 17.0).abs() < 1e-5);
        let expected = Vec3::new(-2.0 + 3.0 * hit.t, -1.0 + 2.0 * hit.t, 2.0 * hit.t);
        assert!((hit.position - expected).length() < 1e-5);
        assert!(!hit.degenerate);
    }

    #[test]
    fn closest_point_clamps_to_ends() {
        let s = segment();
        let before = closest_point(s.origin - s.diff, &s);
        assert_eq!(before.t, 0.0);
        assert_eq!(before.position, s.origin);

        let after = closest_point(s.end() + s.diff, &s);
        assert_eq!(after.t, 1.0);
        assert!((after.position - s.end()).length() < 1e-6);
    }

    #[test]
    fn closest_point_of_origin_is_origin() {
        let s = segment();
        assert_eq!(closest_point(s.origin, &s).position, s.origin);
    }

    #[test]
    fn degenerate_segment_collapses_to_origin() {
        let s = Segment::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
        let hit = closest_point(Vec3::new(5.0, 5.0, 5.0), &s);
        assert!(hit.degenerate);
        assert_eq!(hit.position, s.origin);
        assert_eq!(hit.t, 0.0);
        assert_eq!(try_closest_point(Vec3::ZERO, &s), Err(GeomError::ZeroLengthSegment));
    }

    #[test]
    fn closest_point_on_huge_segment() {
        let s = Segment::new(Vec3::ZERO, Vec3::new(1e20, 1e20, 0.0));
        let hit = closest_point(Vec3::new(9e19, 9e19, 0.0), &s);
        assert!(!hit.degenerate);
        assert!((hit.t - 0.9).abs() < 1e-5);
        assert!((hit.position - Vec3::new(9e19, 9e19, 0.0)).length() < 1e14);
    }

    #[test]
    fn closest_point_on_tiny_segment() {
        let s = Segment::new(Vec3::ZERO, Vec3::new(1e-23, 0.0, 0.0));
        assert!(!s.is_degenerate());
        let hit = closest_point(Vec3::new(2.5e-24, 1.0, 0.0), &s);
        assert!(!hit.degenerate);
        assert!((hit.t - 0.25).abs() < 1e-5);
    }

    #[test]
    fn project_onto_zero_is_zero() {
        assert_eq!(project(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO), Vec3::ZERO);
        assert!(try_project(Vec3::ONE, Vec3::ZERO).is_err());
    }

    #[test]
    fn project_onto_axis() {
        let p = project(Vec3::new(2.0, 3.0, 4.0), Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(p, Vec3::new(0.0, 3.0, 0.0));
    }
}
