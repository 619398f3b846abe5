//! Per-frame simulation step
//!
//! Advances the round by exactly one display frame. Order matters:
//! integrate, scroll, recycle, collide, bounds. Recycling and collision both
//! read the same post-scroll obstacle list.

use super::collision::{avatar_hits_obstacle, avatar_in_bounds};
use super::state::{RoundOutcome, SimulationState};

/// What happened during a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// An obstacle was passed and recycled
    pub scored: bool,
    /// The round ended this step
    pub ended: Option<RoundOutcome>,
}

/// Advance the round by one frame. No-op once the round is over.
pub fn step(state: &mut SimulationState) -> TickReport {
    let mut report = TickReport::default();
    if state.is_terminal() {
        return report;
    }

    let t = state.tuning;
    state.ticks += 1;

    // Explicit Euler
    state.avatar.velocity += t.gravity;
    state.avatar.y += state.avatar.velocity;

    for obstacle in state.obstacles.iter_mut() {
        obstacle.x -= t.scroll_speed;
    }

    // Recycle the leftmost obstacle once it is fully off-screen. The
    // replacement is generated before eviction so the queue is never empty.
    let front_passed = state
        .obstacles
        .front()
        .is_some_and(|o| o.trailing_edge(t.obstacle_width) < 0.0);
    if front_passed {
        let spawn_x = state
            .obstacles
            .back()
            .map_or(t.field_width, |o| o.x + t.obstacle_spacing);
        let fresh = state.spawn_obstacle(spawn_x);
        state.obstacles.pop_front();
        state.obstacles.push_back(fresh);

        state.score += 1;
        report.scored = true;
        log::debug!(
            "tick {}: obstacle passed, score {}, next gap at {:.1}",
            state.ticks,
            state.score,
            fresh.gap_top
        );

        if state.score >= t.score_cap {
            state.end(RoundOutcome::Cleared);
        }
    }

    if state
        .obstacles
        .iter()
        .any(|o| avatar_hits_obstacle(&state.avatar, o, &t))
    {
        state.end(RoundOutcome::Crashed);
    }

    if !avatar_in_bounds(&state.avatar, &t) {
        state.end(RoundOutcome::Crashed);
    }

    report.ended = state.outcome;
    report
}

/// Flap: override the avatar's velocity with the flap impulse
pub fn flap(state: &mut SimulationState) {
    if state.is_terminal() {
        return;
    }
    state.avatar.velocity = state.tuning.flap_velocity;
}
