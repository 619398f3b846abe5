//! Game state and core simulation types

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::spawn::random_gap_top;
use crate::tuning::Tuning;

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Hit an obstacle or left the field
    Crashed,
    /// Reached the score cap
    Cleared,
}

/// The player-controlled avatar (moves vertically only)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Avatar {
    /// Vertical centre, y grows downward
    pub y: f32,
    /// Vertical velocity per frame
    pub velocity: f32,
}

impl Avatar {
    pub fn new(y: f32) -> Self {
        Self { y, velocity: 0.0 }
    }

    /// Top and bottom edges of the hit box
    pub fn extent(&self, size: f32) -> (f32, f32) {
        let half = size / 2.0;
        (self.y - half, self.y + half)
    }
}

/// A pair of obstacle segments with a gap between them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Height of the top segment (where the gap begins)
    pub gap_top: f32,
}

impl Obstacle {
    /// Where the gap ends and the bottom segment begins
    pub fn gap_bottom(&self, gap_size: f32) -> f32 {
        self.gap_top + gap_size
    }

    /// Right edge
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub tuning: Tuning,
    pub avatar: Avatar,
    /// Active obstacles, front is leftmost. Never empty.
    pub obstacles: VecDeque<Obstacle>,
    pub score: u32,
    /// Frames stepped this round
    pub ticks: u64,
    /// Set once the round is over
    pub outcome: Option<RoundOutcome>,
    rng: Pcg32,
}

impl SimulationState {
    /// Create a fresh round. `tuning` must pass [`Tuning::validate`].
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut state = Self {
            tuning,
            avatar: Avatar::new(tuning.avatar_start_y()),
            obstacles: VecDeque::with_capacity(tuning.obstacle_count),
            score: 0,
            ticks: 0,
            outcome: None,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.spawn_initial_obstacles();
        state
    }

    /// Start a new round, continuing the RNG stream
    pub fn reset(&mut self) {
        self.avatar = Avatar::new(self.tuning.avatar_start_y());
        self.score = 0;
        self.ticks = 0;
        self.outcome = None;
        self.spawn_initial_obstacles();
    }

    /// True once the round has ended; the state no longer changes until reset
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Record the end of the round. The first cause recorded wins.
    pub fn end(&mut self, outcome: RoundOutcome) {
        if self.outcome.is_none() {
            self.outcome = Some(outcome);
        }
    }

    /// Generate an obstacle at the given horizontal position
    pub fn spawn_obstacle(&mut self, x: f32) -> Obstacle {
        let t = &self.tuning;
        let gap_top = random_gap_top(&mut self.rng, t.field_height, t.gap_size, t.min_segment);
        Obstacle { x, gap_top }
    }

    fn spawn_initial_obstacles(&mut self) {
        self.obstacles.clear();
        for i in 0..self.tuning.obstacle_count {
            let x = self.tuning.field_width + i as f32 * self.tuning.obstacle_spacing;
            let obstacle = self.spawn_obstacle(x);
            self.obstacles.push_back(obstacle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round_layout() {
        let tuning = Tuning::default();
        let state = SimulationState::new(tuning, 1);

        assert_eq!(state.obstacles.len(), tuning.obstacle_count);
        assert_eq!(state.avatar.y, tuning.field_height / 2.0);
        assert_eq!(state.avatar.velocity, 0.0);
        assert_eq!(state.score, 0);
        assert!(!state.is_terminal());

        let xs: Vec<f32> = state.obstacles.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![400.0, 600.0, 800.0]);
    }

    #[test]
    fn test_reset_clears_round() {
        let mut state = SimulationState::new(Tuning::default(), 1);
        state.score = 12;
        state.avatar.y = -50.0;
        state.obstacles.pop_front();
        state.end(RoundOutcome::Crashed);

        state.reset();

        assert_eq!(state.score, 0);
        assert_eq!(state.obstacles.len(), 3);
        assert!(!state.is_terminal());
        assert_eq!(state.avatar, Avatar::new(300.0));
    }

    #[test]
    fn test_first_outcome_wins() {
        let mut state = SimulationState::new(Tuning::default(), 1);
        state.end(RoundOutcome::Cleared);
        state.end(RoundOutcome::Crashed);
        assert_eq!(state.outcome, Some(RoundOutcome::Cleared));
    }

    #[test]
    fn test_extent() {
        let avatar = Avatar::new(100.0);
        assert_eq!(avatar.extent(40.0), (80.0, 120.0));
    }
}
