//! Play-area rectangle
//!
//! Board coordinates have their origin at the top-left corner of the frame,
//! with y growing away from the header strip.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;

/// Padding removed from each edge of the frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

/// Axis-aligned containment rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Frame of `size` shrunk by `insets`
    pub fn from_frame(size: Vec2, insets: Insets) -> Self {
        Self {
            min: Vec2::new(insets.left, insets.top),
            max: Vec2::new(size.x - insets.right, size.y - insets.bottom),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Keep a body's circle inside the rectangle.
    ///
    /// Contact is fully inelastic: the velocity component along each clamped
    /// axis is zeroed rather than reflected. Returns true if the body touched
    /// an edge.
    pub fn contain(&self, body: &mut Body) -> bool {
        let r = body.radius();
        let (x, hit_x) = clamp_axis(body.pos.x, self.min.x, self.max.x, r);
        let (y, hit_y) = clamp_axis(body.pos.y, self.min.y, self.max.y, r);

        body.pos = Vec2::new(x, y);
        if hit_x {
            body.vel.x = 0.0;
        }
        if hit_y {
            body.vel.y = 0.0;
        }
        hit_x || hit_y
    }
}

/// Clamp a center coordinate so the circle fits in [lo, hi].
/// An axis narrower than a diameter pins the center to its midpoint.
fn clamp_axis(value: f32, lo: f32, hi: f32, radius: f32) -> (f32, bool) {
    let inner_lo = lo + radius;
    let inner_hi = hi - radius;
    if inner_lo > inner_hi {
        let mid = (lo + hi) * 0.5;
        return (mid, value != mid);
    }
    if value < inner_lo {
        (inner_lo, true)
    } else if value > inner_hi {
        (inner_hi, true)
    } else {
        (value, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_bounds() -> Bounds {
        Bounds::from_frame(
            Vec2::new(400.0, 600.0),
            Insets {
                top: 100.0,
                left: 0.0,
                bottom: 0.0,
                right: 50.0,
            },
        )
    }

    #[test]
    fn test_from_frame_applies_insets() {
        let b = board_bounds();
        assert_eq!(b.min, Vec2::new(0.0, 100.0));
        assert_eq!(b.max, Vec2::new(350.0, 600.0));
        assert_eq!(b.width(), 350.0);
        assert_eq!(b.height(), 500.0);
    }

    #[test]
    fn test_contain_inside_is_untouched() {
        let b = board_bounds();
        let mut body = Body::new(Vec2::new(200.0, 300.0), 25.0);
        body.vel = Vec2::new(3.0, -2.0);
        assert!(!b.contain(&mut body));
        assert_eq!(body.pos, Vec2::new(200.0, 300.0));
        assert_eq!(body.vel, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_contain_clamps_and_zeroes_contact_axis() {
        let b = board_bounds();
        let mut body = Body::new(Vec2::new(-10.0, 300.0), 25.0);
        body.vel = Vec2::new(-40.0, 12.0);
        assert!(b.contain(&mut body));
        assert_eq!(body.pos, Vec2::new(25.0, 300.0));
        // No bounce on the contact axis, free motion along the wall
        assert_eq!(body.vel, Vec2::new(0.0, 12.0));
    }

    #[test]
    fn test_contain_corner_zeroes_both_axes() {
        let b = board_bounds();
        let mut body = Body::new(Vec2::new(500.0, 900.0), 25.0);
        body.vel = Vec2::new(10.0, 10.0);
        assert!(b.contain(&mut body));
        assert_eq!(body.pos, Vec2::new(325.0, 575.0));
        assert_eq!(body.vel, Vec2::ZERO);
        assert!(b.contains(body.pos));
    }

    #[test]
    fn test_narrow_axis_pins_to_midpoint() {
        let b = Bounds::new(Vec2::ZERO, Vec2::new(30.0, 200.0));
        let mut body = Body::new(Vec2::new(2.0, 100.0), 25.0);
        b.contain(&mut body);
        assert_eq!(body.pos.x, 15.0);
        assert!(b.contains(body.pos));
    }
}
