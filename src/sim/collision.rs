//! Collision detection and response between marbles
//!
//! Marbles are equal-mass circles. Contacts are resolved in two parts:
//! positional correction (push overlapping bodies apart) and a velocity
//! impulse that cancels the approach speed along the contact normal.

use glam::Vec2;

use super::body::Body;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Collision point (if hit)
    pub point: Vec2,
    /// Contact normal, pointing from the second body toward the first
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between two circles
pub fn circle_circle_collision(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> CollisionResult {
    let delta = a_pos - b_pos;
    let dist_sq = delta.length_squared();
    let reach = a_radius + b_radius;

    if dist_sq >= reach * reach {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    // Coincident centers: pick a fixed axis so the result stays deterministic
    let normal = if dist > f32::EPSILON { delta / dist } else { Vec2::Y };

    CollisionResult {
        hit: true,
        point: b_pos + normal * b_radius,
        normal,
        penetration: reach - dist,
    }
}

/// Separate two overlapping bodies and cancel their approach speed.
///
/// Returns true if the bodies were in contact.
pub fn resolve_contact(a: &mut Body, b: &mut Body) -> bool {
    let result = circle_circle_collision(a.pos, a.radius(), b.pos, b.radius());
    if !result.hit {
        return false;
    }

    // Equal mass: each body takes half the correction
    let correction = result.normal * (result.penetration * 0.5);
    a.pos += correction;
    b.pos -= correction;

    let relative = a.vel - b.vel;
    a.apply_contact(result.normal, relative, 0.5);
    b.apply_contact(-result.normal, -relative, 0.5);

    true
}
