//! Collision detection for balls against oriented rectangles
//!
//! Paddle and blocks are rectangles (optionally rotated), balls are circles.
//! The test is discrete: it runs once per fixed step on the ball's current
//! position, and only looks at the ball's direction to reject contacts that
//! are already separating and to recover from tunneling.

use glam::Vec2;

use crate::rotate;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point on the rectangle outline (world space)
    pub point: Vec2,
    /// Unit surface normal pointing out of the rectangle (world space)
    pub normal: Vec2,
    /// The sphere center had already crossed into the rectangle
    pub inside: bool,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            inside: false,
        }
    }
}

/// Check collision between a moving sphere and a rotated rectangle
///
/// The sphere center is moved into the rectangle's local frame. Then:
/// - outside on both axes: the nearest corner is the test point
/// - outside on one axis: the nearest point on that face is the test point
/// - inside: the face the sphere entered through is found by marching
///   backward along its direction
///
/// Outside contacts only count while the sphere is moving toward the
/// rectangle. The inside case always counts.
pub fn sphere_collides_rectangle(
    sphere_pos: Vec2,
    sphere_dir: Vec2,
    sphere_radius: f32,
    rect_pos: Vec2,
    rect_size: Vec2,
    rect_rotation: f32,
) -> CollisionResult {
    let half = rect_size * 0.5;
    let local = rotate(sphere_pos - rect_pos, -rect_rotation);
    let local_dir = rotate(sphere_dir, -rect_rotation);
    let to_world = |p: Vec2| rect_pos + rotate(p, rect_rotation);

    let (side_x, clamp_x) = if local.x < -half.x {
        (-1.0, -half.x)
    } else if local.x > half.x {
        (1.0, half.x)
    } else {
        (0.0, local.x)
    };
    let (side_y, clamp_y) = if local.y < -half.y {
        (-1.0, -half.y)
    } else if local.y > half.y {
        (1.0, half.y)
    } else {
        (0.0, local.y)
    };

    if side_x == 0.0 && side_y == 0.0 {
        let normal = entry_face_normal(local, local_dir, half);
        let point = if normal.x != 0.0 {
            Vec2::new(normal.x * half.x, local.y)
        } else {
            Vec2::new(local.x, normal.y * half.y)
        };
        return CollisionResult {
            hit: true,
            point: to_world(point),
            normal: rotate(normal, rect_rotation),
            inside: true,
        };
    }

    let test_point = Vec2::new(clamp_x, clamp_y);
    let offset = local - test_point;
    if offset.length_squared() > sphere_radius * sphere_radius {
        return CollisionResult::miss();
    }

    let normal = if side_x != 0.0 && side_y != 0.0 {
        offset
            .try_normalize()
            .unwrap_or_else(|| Vec2::new(side_x, side_y).normalize())
    } else {
        Vec2::new(side_x, side_y)
    };

    // Already separating
    if normal.dot(local_dir) > 0.0 {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        point: to_world(test_point),
        normal: rotate(normal, rect_rotation),
        inside: false,
    }
}

/// Local-space normal of the face a backward ray from `local` exits first
fn entry_face_normal(local: Vec2, dir: Vec2, half: Vec2) -> Vec2 {
    let back = -dir;
    let mut best: Option<(f32, Vec2)> = None;

    // Axes with a zero component never reach their faces
    if back.x.abs() > f32::EPSILON {
        let (face, normal) = if back.x > 0.0 {
            (half.x, Vec2::X)
        } else {
            (-half.x, Vec2::NEG_X)
        };
        let t = (face - local.x) / back.x;
        if t >= 0.0 {
            best = Some((t, normal));
        }
    }
    if back.y.abs() > f32::EPSILON {
        let (face, normal) = if back.y > 0.0 {
            (half.y, Vec2::Y)
        } else {
            (-half.y, Vec2::NEG_Y)
        };
        let t = (face - local.y) / back.y;
        if t >= 0.0 && best.is_none_or(|(best_t, _)| t < best_t) {
            best = Some((t, normal));
        }
    }

    best.map(|(_, normal)| normal)
        .unwrap_or_else(|| nearest_face_normal(local, half))
}

/// Fallback for a motionless sphere: push out through the closest face
fn nearest_face_normal(local: Vec2, half: Vec2) -> Vec2 {
    let dx = half.x - local.x.abs();
    let dy = half.y - local.y.abs();
    if dx < dy {
        Vec2::new(local.x.signum(), 0.0)
    } else {
        Vec2::new(0.0, local.y.signum())
    }
}

/// Check overlap between two spheres
#[inline]
pub fn sphere_collides_sphere(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    let combined = radius_a + radius_b;
    pos_a.distance_squared(pos_b) <= combined * combined
}
