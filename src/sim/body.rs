//! Circular rigid body
//!
//! Bodies have no angular state: rotation is locked, so gravity and contacts
//! only ever move the center.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Surface response coefficients (both zero by default)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Fraction of approach speed returned on contact (0 = fully inelastic)
    pub restitution: f32,
    /// Fraction of tangential speed removed on contact (0 = frictionless)
    pub friction: f32,
}

/// A circular body with unit mass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
    pub material: Material,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            material: Material::default(),
        }
    }

    /// Radius is fixed at creation
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Semi-implicit Euler: velocity first, then position
    pub fn integrate(&mut self, gravity: Vec2, dt: f32) {
        self.vel += gravity * dt;
        self.pos += self.vel * dt;
    }

    /// Apply a contact along `normal` (pointing away from the other body).
    ///
    /// `relative` is this body's velocity minus the other body's, taken
    /// before either body responds. Nothing happens unless the bodies are
    /// approaching. Only this body's `share` of the response is applied.
    pub fn apply_contact(&mut self, normal: Vec2, relative: Vec2, share: f32) {
        let approach = relative.dot(normal);
        if approach >= 0.0 {
            return;
        }
        let impulse = -(1.0 + self.material.restitution) * approach * share;
        self.vel += normal * impulse;

        if self.material.friction > 0.0 {
            let tangent = Vec2::new(-normal.y, normal.x);
            let slip = relative.dot(tangent);
            self.vel -= tangent * slip * self.material.friction.min(1.0) * share;
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}
