//! Flappy Zolder - a Flappy Bird style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacle recycling, collisions)
//! - `driver`: Game loop state machine (input queue, scheduling, leaderboard hand-off)
//! - `highscores`: Persisted leaderboard
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `platform`: Input events and frame scheduling
//! - `renderer`: Skin resolution and WebGPU rendering
//! - `settings`: Persisted player preferences
//! - `tuning`: Validated physics configuration

pub mod driver;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::{GameDriver, Phase, RoundSummary};
pub use highscores::{LeaderboardEntry, Leaderboard};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// All distances are in play-field pixels, all rates are per frame.
pub mod consts {
    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Downward acceleration added to the avatar's velocity every frame
    pub const GRAVITY: f32 = 0.5;
    /// Velocity set by a flap (negative = up)
    pub const FLAP_VELOCITY: f32 = -8.0;

    /// Avatar hit box (square) and its fixed horizontal centre
    pub const AVATAR_SIZE: f32 = 40.0;
    pub const AVATAR_X: f32 = 80.0;

    /// Obstacle geometry
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const GAP_SIZE: f32 = 150.0;
    /// Minimum height of the top and bottom obstacle segments
    pub const MIN_SEGMENT_HEIGHT: f32 = 60.0;
    /// Horizontal distance between consecutive obstacles
    pub const OBSTACLE_SPACING: f32 = 200.0;
    /// Obstacles visible at once
    pub const OBSTACLE_COUNT: usize = 3;
    /// Leftward obstacle speed
    pub const SCROLL_SPEED: f32 = 2.0;

    /// Score at which a round ends as cleared
    pub const SCORE_CAP: u32 = 300;
}
