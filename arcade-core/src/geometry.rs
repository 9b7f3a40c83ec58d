//! Plane math: vectors, hitbox rectangles and edge wrapping.

use core::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector for a heading in degrees, 0 = up, clockwise positive.
    #[inline]
    pub fn from_heading(degrees: f32) -> Self {
        let rad = degrees.to_radians();
        Self::new(rad.sin(), -rad.cos())
    }

    /// Unit vector for a plain math angle in radians.
    #[inline]
    pub fn from_angle(radians: f32) -> Self {
        Self::new(radians.cos(), radians.sin())
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// `None` when the vector is too short to carry a direction.
    #[inline]
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len > f32::EPSILON {
            Some(Self::new(self.x / len, self.y / len))
        } else {
            None
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Heading in degrees (0 = up) pointing along this vector.
    #[inline]
    pub fn heading(self) -> f32 {
        self.x.atan2(-self.y).to_degrees()
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle in screen space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    #[inline]
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        let hw = width * 0.5;
        let hh = height * 0.5;
        Self {
            left: center.x - hw,
            top: center.y - hh,
            right: center.x + hw,
            bottom: center.y + hh,
        }
    }

    #[inline]
    pub fn from_origin(origin: Vec2, width: f32, height: f32) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + width,
            bottom: origin.y + height,
        }
    }

    /// Edge contact counts as overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(other.left > self.right
            || other.right < self.left
            || other.top > self.bottom
            || other.bottom < self.top)
    }

    /// Strict interior overlap; touching edges do not count.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Teleports a point that left `[0, dimension]` to the opposite edge.
    #[inline]
    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        Vec2::new(wrap_axis(pos.x, self.width), wrap_axis(pos.y, self.height))
    }

    /// Wrap for anchored sprites: the live band is `[-margin, dimension]` and
    /// an exit on one side re-enters on the other, offset by the margin.
    #[inline]
    pub fn wrap_with_margin(&self, pos: Vec2, margin: f32) -> Vec2 {
        Vec2::new(
            wrap_axis_with_margin(pos.x, self.width, margin),
            wrap_axis_with_margin(pos.y, self.height, margin),
        )
    }

    #[inline]
    pub fn is_outside(&self, pos: Vec2, padding: f32) -> bool {
        pos.x < -padding
            || pos.x > self.width + padding
            || pos.y < -padding
            || pos.y > self.height + padding
    }
}

#[inline]
fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}

#[inline]
fn wrap_axis_with_margin(value: f32, extent: f32, margin: f32) -> f32 {
    if value < -margin {
        extent
    } else if value > extent {
        -margin
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn heading_zero_points_up() {
        let up = Vec2::from_heading(0.0);
        assert!(up.x.abs() < 1e-6);
        assert!((up.y + 1.0).abs() < 1e-6);

        let right = Vec2::from_heading(90.0);
        assert!((right.x - 1.0).abs() < 1e-6);
        assert!(right.y.abs() < 1e-6);
    }

    #[test]
    fn heading_roundtrips_through_vector() {
        for deg in [0.0f32, 45.0, 90.0, 135.0, -90.0, 170.0] {
            let back = Vec2::from_heading(deg).heading();
            assert!((back - deg).abs() < 1e-3, "{deg} -> {back}");
        }
    }

    #[test]
    fn wrapping_in_bounds_point_is_noop() {
        for pos in [
            Vec2::new(0.0, 0.0),
            Vec2::new(400.0, 300.0),
            Vec2::new(800.0, 600.0),
        ] {
            assert_eq!(VIEW.wrap(pos), pos);
            assert_eq!(VIEW.wrap(VIEW.wrap(pos)), pos);
        }
    }

    #[test]
    fn wrapping_teleports_to_opposite_edge() {
        assert_eq!(VIEW.wrap(Vec2::new(-0.5, 10.0)), Vec2::new(800.0, 10.0));
        assert_eq!(VIEW.wrap(Vec2::new(800.5, 10.0)), Vec2::new(0.0, 10.0));
        assert_eq!(VIEW.wrap(Vec2::new(10.0, -1.0)), Vec2::new(10.0, 600.0));
        assert_eq!(VIEW.wrap(Vec2::new(10.0, 601.0)), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn margin_wrap_keeps_band_and_reenters_offset() {
        let margin = 100.0;
        let inside = Vec2::new(-99.0, 599.0);
        assert_eq!(VIEW.wrap_with_margin(inside, margin), inside);
        assert_eq!(
            VIEW.wrap_with_margin(Vec2::new(-101.0, 0.0), margin),
            Vec2::new(800.0, 0.0)
        );
        assert_eq!(
            VIEW.wrap_with_margin(Vec2::new(0.0, 601.0), margin),
            Vec2::new(0.0, -100.0)
        );
    }

    #[test]
    fn overlap_counts_touching_edges_but_intersect_does_not() {
        let a = Rect::from_origin(Vec2::new(0.0, 0.0), 10.0, 10.0);
        let b = Rect::from_origin(Vec2::new(10.0, 0.0), 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(!a.intersects(&b));

        let c = Rect::centered(Vec2::new(5.0, 5.0), 2.0, 2.0);
        assert!(a.overlaps(&c));
        assert!(a.intersects(&c));
    }

    #[test]
    fn offscreen_uses_padding() {
        assert!(!VIEW.is_outside(Vec2::new(-10.0, 300.0), 10.0));
        assert!(VIEW.is_outside(Vec2::new(-10.5, 300.0), 10.0));
        assert!(VIEW.is_outside(Vec2::new(400.0, 610.5), 10.0));
    }
}
