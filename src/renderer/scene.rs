//! Frame scene assembly
//!
//! Turns simulation state plus resolved skin looks into draw batches. Each
//! batch is drawn with one texture; consecutive shapes that share a texture
//! are merged.

use glam::Vec2;

use super::shapes;
use super::skin::{AvatarLook, ObstacleLook, ResolvedSkin, SegmentLook, SpriteId};
use super::vertex::Vertex;
use crate::sim::SimulationState;

/// Segments used for the solid avatar disc
const DISC_SEGMENTS: u32 = 32;
/// Outline thickness of the solid avatar disc
const OUTLINE_WIDTH: f32 = 2.0;

/// Triangles sharing one texture (`None` = blank, colour only)
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub sprite: Option<SpriteId>,
    pub vertices: Vec<Vertex>,
}

/// Everything drawn in a frame, back to front
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub batches: Vec<Batch>,
}

impl Scene {
    pub fn push(&mut self, sprite: Option<SpriteId>, vertices: Vec<Vertex>) {
        if vertices.is_empty() {
            return;
        }
        match self.batches.last_mut() {
            Some(last) if last.sprite == sprite => last.vertices.extend(vertices),
            _ => self.batches.push(Batch { sprite, vertices }),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.batches.iter().map(|b| b.vertices.len()).sum()
    }
}

/// Build the scene for the current state
pub fn build_scene(state: &SimulationState, look: &ResolvedSkin) -> Scene {
    let mut scene = Scene::default();
    push_obstacles(&mut scene, state, &look.obstacle);
    push_avatar(&mut scene, state, &look.avatar);
    scene
}

fn push_segment(scene: &mut Scene, min: Vec2, size: Vec2, look: SegmentLook, flip: bool) {
    if size.y <= 0.0 {
        return;
    }
    match look {
        SegmentLook::Sprite(id) => scene.push(Some(id), shapes::sprite_rect(min, size, flip)),
        SegmentLook::Solid(color) => scene.push(None, shapes::rect(min, size, color)),
    }
}

fn push_obstacles(scene: &mut Scene, state: &SimulationState, look: &ObstacleLook) {
    let t = &state.tuning;
    for obstacle in &state.obstacles {
        let gap_bottom = obstacle.gap_bottom(t.gap_size);

        // Top segment hangs from the ceiling, mirrored
        push_segment(
            scene,
            Vec2::new(obstacle.x, 0.0),
            Vec2::new(t.obstacle_width, obstacle.gap_top),
            look.top,
            true,
        );
        push_segment(
            scene,
            Vec2::new(obstacle.x, gap_bottom),
            Vec2::new(t.obstacle_width, t.field_height - gap_bottom),
            look.bottom,
            false,
        );
    }
}

fn push_avatar(scene: &mut Scene, state: &SimulationState, look: &AvatarLook) {
    let t = &state.tuning;
    let center = Vec2::new(t.avatar_x, state.avatar.y);
    let radius = t.avatar_size / 2.0;

    match *look {
        AvatarLook::Sprite(id) => {
            let size = Vec2::splat(t.avatar_size);
            scene.push(Some(id), shapes::sprite_rect(center - size / 2.0, size, false));
        }
        AvatarLook::Disc { fill, outline } => {
            scene.push(None, shapes::circle(center, radius, fill, DISC_SEGMENTS));
            scene.push(
                None,
                shapes::ring(
                    center,
                    radius - OUTLINE_WIDTH / 2.0,
                    radius + OUTLINE_WIDTH / 2.0,
                    outline,
                    DISC_SEGMENTS,
                ),
            );
        }
    }
}
