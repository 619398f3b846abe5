//! Collision checks between the avatar, obstacles and the field edges
//!
//! Everything is axis-aligned: the avatar is a square hit box centred on a
//! fixed column, obstacles are two rectangles sharing a left edge.

use super::state::{Avatar, Obstacle};
use crate::tuning::Tuning;

/// True if the avatar's column strictly overlaps the obstacle's column
pub fn overlaps_horizontally(obstacle: &Obstacle, tuning: &Tuning) -> bool {
    let half = tuning.avatar_size / 2.0;
    tuning.avatar_x + half > obstacle.x
        && tuning.avatar_x - half < obstacle.trailing_edge(tuning.obstacle_width)
}

/// True if the avatar touches either segment of the obstacle
///
/// Only obstacles in the avatar's column can hit; inside it, the avatar's
/// whole extent must lie within the gap.
pub fn avatar_hits_obstacle(avatar: &Avatar, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    if !overlaps_horizontally(obstacle, tuning) {
        return false;
    }
    let (top, bottom) = avatar.extent(tuning.avatar_size);
    top < obstacle.gap_top || bottom > obstacle.gap_bottom(tuning.gap_size)
}

/// True while the avatar's extent is within `[0, field_height]`
pub fn avatar_in_bounds(avatar: &Avatar, tuning: &Tuning) -> bool {
    let (top, bottom) = avatar.extent(tuning.avatar_size);
    top >= 0.0 && bottom <= tuning.field_height
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(x: f32, gap_top: f32) -> Obstacle {
        Obstacle { x, gap_top }
    }

    #[test]
    fn test_no_hit_outside_column() {
        let t = Tuning::default();
        // Avatar column is 60..100
        let avatar = Avatar::new(0.0);
        assert!(!avatar_hits_obstacle(&avatar, &obstacle(100.0, 200.0), &t));
        assert!(!avatar_hits_obstacle(&avatar, &obstacle(0.0, 200.0), &t));
    }

    #[test]
    fn test_hit_top_segment() {
        let t = Tuning::default();
        let avatar = Avatar::new(210.0); // extent 190..230, gap 200..350
        assert!(avatar_hits_obstacle(&avatar, &obstacle(70.0, 200.0), &t));
    }

    #[test]
    fn test_hit_bottom_segment() {
        let t = Tuning::default();
        let avatar = Avatar::new(340.0); // extent 320..360, gap 200..350
        assert!(avatar_hits_obstacle(&avatar, &obstacle(70.0, 200.0), &t));
    }

    #[test]
    fn test_inside_gap_is_safe() {
        let t = Tuning::default();
        let avatar = Avatar::new(275.0);
        assert!(!avatar_hits_obstacle(&avatar, &obstacle(70.0, 200.0), &t));
        // Touching the gap edges exactly is still inside
        let flush = Avatar::new(220.0);
        assert!(!avatar_hits_obstacle(&flush, &obstacle(70.0, 200.0), &t));
    }

    #[test]
    fn test_bounds() {
        let t = Tuning::default();
        assert!(avatar_in_bounds(&Avatar::new(300.0), &t));
        assert!(avatar_in_bounds(&Avatar::new(20.0), &t));
        assert!(!avatar_in_bounds(&Avatar::new(19.0), &t));
        assert!(!avatar_in_bounds(&Avatar::new(581.0), &t));
    }
}
