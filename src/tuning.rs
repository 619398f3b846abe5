//! Physics tuning
//!
//! Bundles the per-frame constants the simulation reads so tests can run
//! with alternate field sizes. Values are fixed for a round; nothing here is
//! adjustable while the game is running.

use crate::consts::*;

/// Reasons a tuning cannot drive a round
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TuningError {
    #[error("gap {gap_size} plus two segments of {min_segment} does not fit a field {field_height} high")]
    GapDoesNotFit {
        gap_size: f32,
        min_segment: f32,
        field_height: f32,
    },
    #[error("obstacle window must hold at least one obstacle")]
    EmptyWindow,
    #[error("{0} must be positive")]
    NonPositive(&'static str),
}

/// Simulation constants for one round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,
    pub gravity: f32,
    pub flap_velocity: f32,
    pub avatar_size: f32,
    pub avatar_x: f32,
    pub obstacle_width: f32,
    pub gap_size: f32,
    pub min_segment: f32,
    pub obstacle_spacing: f32,
    pub obstacle_count: usize,
    pub scroll_speed: f32,
    pub score_cap: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,
            avatar_size: AVATAR_SIZE,
            avatar_x: AVATAR_X,
            obstacle_width: OBSTACLE_WIDTH,
            gap_size: GAP_SIZE,
            min_segment: MIN_SEGMENT_HEIGHT,
            obstacle_spacing: OBSTACLE_SPACING,
            obstacle_count: OBSTACLE_COUNT,
            scroll_speed: SCROLL_SPEED,
            score_cap: SCORE_CAP,
        }
    }
}

impl Tuning {
    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("avatar_size", self.avatar_size),
            ("obstacle_width", self.obstacle_width),
            ("gap_size", self.gap_size),
            ("obstacle_spacing", self.obstacle_spacing),
            ("scroll_speed", self.scroll_speed),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| v.is_nan() || *v <= 0.0) {
            return Err(TuningError::NonPositive(*name));
        }
        if self.obstacle_count == 0 {
            return Err(TuningError::EmptyWindow);
        }
        if self.gap_size + 2.0 * self.min_segment >= self.field_height {
            return Err(TuningError::GapDoesNotFit {
                gap_size: self.gap_size,
                min_segment: self.min_segment,
                field_height: self.field_height,
            });
        }
        Ok(())
    }

    /// Vertical centre the avatar starts each round at
    pub fn avatar_start_y(&self) -> f32 {
        self.field_height / 2.0
    }
}
