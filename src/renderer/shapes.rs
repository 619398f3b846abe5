//! Shape generation for 2D primitives
//!
//! All shapes are triangle lists in play-field pixels (origin top-left,
//! y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};

/// Axis-aligned rectangle in a flat colour
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::solid(min.x, min.y, color),
        Vertex::solid(max.x, min.y, color),
        Vertex::solid(min.x, max.y, color),
        Vertex::solid(min.x, max.y, color),
        Vertex::solid(max.x, min.y, color),
        Vertex::solid(max.x, max.y, color),
    ]
}

/// Axis-aligned rectangle showing a whole sprite, optionally upside down
pub fn sprite_rect(min: Vec2, size: Vec2, flip_y: bool) -> Vec<Vertex> {
    let max = min + size;
    let (v_top, v_bottom) = if flip_y { (1.0, 0.0) } else { (0.0, 1.0) };
    let c = colors::WHITE;
    vec![
        Vertex::new(min.x, min.y, 0.0, v_top, c),
        Vertex::new(max.x, min.y, 1.0, v_top, c),
        Vertex::new(min.x, max.y, 0.0, v_bottom, c),
        Vertex::new(min.x, max.y, 0.0, v_bottom, c),
        Vertex::new(max.x, min.y, 1.0, v_top, c),
        Vertex::new(max.x, max.y, 1.0, v_bottom, c),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::solid(center.x, center.y, color));
        vertices.push(Vertex::solid(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::solid(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());
        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::solid(inner1.x, inner1.y, color));
        vertices.push(Vertex::solid(outer1.x, outer1.y, color));
        vertices.push(Vertex::solid(inner2.x, inner2.y, color));

        vertices.push(Vertex::solid(inner2.x, inner2.y, color));
        vertices.push(Vertex::solid(outer1.x, outer1.y, color));
        vertices.push(Vertex::solid(outer2.x, outer2.y, color));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_corners() {
        let verts = rect(Vec2::new(10.0, 20.0), Vec2::new(60.0, 100.0), colors::WHITE);
        assert_eq!(verts.len(), 6);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 70.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 120.0);
    }

    #[test]
    fn test_sprite_flip() {
        let upright = sprite_rect(Vec2::ZERO, Vec2::ONE, false);
        let flipped = sprite_rect(Vec2::ZERO, Vec2::ONE, true);
        // First vertex is the top-left corner
        assert_eq!(upright[0].uv, [0.0, 0.0]);
        assert_eq!(flipped[0].uv, [0.0, 1.0]);
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let verts = circle(Vec2::new(80.0, 300.0), 20.0, colors::WHITE, 24);
        assert_eq!(verts.len(), 72);
        for v in verts {
            let d = Vec2::from(v.position) - Vec2::new(80.0, 300.0);
            assert!(d.length() <= 20.0 + 1e-3);
        }
    }
}
