//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-frame step only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{avatar_in_bounds, avatar_hits_obstacle};
pub use spawn::random_gap_top;
pub use state::{Avatar, Obstacle, RoundOutcome, SimulationState};
pub use tick::{TickReport, flap, step};
