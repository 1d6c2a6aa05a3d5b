use glam::Vec3;

use crate::entity::{Camera, Viewport};
use crate::math;

/// Upper bound on the projection scale. The sole guard against the scale
/// blowing up as the camera-relative depth approaches zero.
pub const MAX_SCALE: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

/// Projects a world point through the camera onto the viewport.
///
/// The point is translated into camera-relative coordinates, scaled by the
/// clamped perspective factor, and mapped from [-1, 1] onto screen space
/// with the vertical axis inverted (screen Y grows downward).
pub fn project(point: Vec3, camera: &Camera, viewport: Viewport) -> Projected {
    let rel = point - camera.position;

    let scale = MAX_SCALE.min((1.0 / (camera.fov / 2.0).to_radians().tan() / rel.z).abs());

    Projected {
        x: math::map_range(rel.x * scale, -1.0, 1.0, 0.0, viewport.width),
        y: math::map_range(rel.y * scale, 1.0, -1.0, 0.0, viewport.height),
        scale,
    }
}
