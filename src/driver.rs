//! Game loop driver
//!
//! Owns the round and everything around it: the input queue, the frame
//! scheduler and the leaderboard. Input handlers call [`GameDriver::push`];
//! the host calls [`GameDriver::on_frame`] whenever the scheduler fires.
//! A round keeps asking for frames while it runs and simply stops asking
//! once it ends.

use crate::highscores::{Leaderboard, LeaderboardEntry};
use crate::persistence::KeyValueStore;
use crate::platform::{FrameScheduler, InputEvent, InputQueue};
use crate::renderer::RenderTarget;
use crate::renderer::skin::SkinId;
use crate::sim::{self, RoundOutcome, SimulationState};
use crate::tuning::{Tuning, TuningError};

/// Where the game is between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No character chosen yet
    Menu,
    /// Round armed, waiting for the first flap
    Idle,
    Running,
    /// Round over. `prompt` is set while the name entry blocks input.
    Terminal { prompt: bool },
}

/// Result of the last finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub score: u32,
    pub outcome: RoundOutcome,
    /// Score made the leaderboard
    pub qualifies: bool,
}

pub struct GameDriver<S: KeyValueStore, F: FrameScheduler> {
    state: SimulationState,
    leaderboard: Leaderboard<S>,
    queue: InputQueue,
    scheduler: F,
    phase: Phase,
    skin: Option<SkinId>,
    /// A frame has been requested and not yet run
    frame_pending: bool,
    last_summary: Option<RoundSummary>,
}

impl<S: KeyValueStore, F: FrameScheduler> GameDriver<S, F> {
    /// Create a driver in the menu. Refuses tunings the simulation cannot run.
    pub fn new(tuning: Tuning, store: S, scheduler: F, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        log::info!("Driver ready (seed {})", seed);
        Ok(Self {
            state: SimulationState::new(tuning, seed),
            leaderboard: Leaderboard::new(store),
            queue: InputQueue::new(),
            scheduler,
            phase: Phase::Menu,
            skin: None,
            frame_pending: false,
            last_summary: None,
        })
    }

    /// Queue an input event; it takes effect on the next frame
    pub fn push(&mut self, event: InputEvent) {
        log::debug!("Queued {:?}", event);
        self.queue.push(event);
        self.schedule();
    }

    /// Run one frame: apply queued input, advance a running round, render
    pub fn on_frame(&mut self, target: &mut dyn RenderTarget) {
        self.frame_pending = false;

        for event in self.queue.drain() {
            self.apply(event);
        }

        if self.phase == Phase::Running {
            let report = sim::step(&mut self.state);
            if let Some(outcome) = report.ended {
                self.finish_round(outcome);
            }
        }

        target.render(&self.state, self.skin.as_ref());

        if self.phase == Phase::Running {
            self.schedule();
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// What space or a tap means right now
    ///
    /// `None` in the menu and while the name prompt owns the keyboard.
    pub fn tap_event(&self) -> Option<InputEvent> {
        match self.phase {
            Phase::Idle | Phase::Running => Some(InputEvent::Flap),
            Phase::Terminal { prompt: false } => Some(InputEvent::Restart),
            Phase::Menu | Phase::Terminal { prompt: true } => None,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn skin(&self) -> Option<&SkinId> {
        self.skin.as_ref()
    }

    pub fn last_summary(&self) -> Option<RoundSummary> {
        self.last_summary
    }

    /// Leaderboard as shown to the player
    pub fn leaderboard_top(&self) -> Vec<LeaderboardEntry> {
        self.leaderboard.top()
    }

    pub fn leaderboard(&self) -> &Leaderboard<S> {
        &self.leaderboard
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    fn schedule(&mut self) {
        if !self.frame_pending {
            self.frame_pending = true;
            self.scheduler.request_frame();
        }
    }

    fn apply(&mut self, event: InputEvent) {
        match (self.phase, event) {
            (Phase::Menu | Phase::Idle, InputEvent::SelectCharacter(skin)) => {
                log::info!("Character selected: {}", skin);
                self.skin = Some(skin);
                self.arm();
            }
            (Phase::Idle, InputEvent::Flap) => {
                log::info!("Round started");
                self.phase = Phase::Running;
            }
            (Phase::Running, InputEvent::Flap) => sim::flap(&mut self.state),
            (Phase::Terminal { prompt: true }, InputEvent::SubmitName(name)) => {
                self.submit(&name);
                self.phase = Phase::Terminal { prompt: false };
            }
            (Phase::Terminal { prompt: false }, InputEvent::Restart) => {
                log::info!("Restarting");
                self.arm();
            }
            (Phase::Terminal { .. }, InputEvent::DismissLeaderboard) => {
                self.phase = Phase::Menu;
            }
            (phase, event) => log::debug!("Ignored {:?} in {:?}", event, phase),
        }
    }

    fn arm(&mut self) {
        self.state.reset();
        self.phase = Phase::Idle;
    }

    fn finish_round(&mut self, outcome: RoundOutcome) {
        let score = self.state.score;
        let qualifies = self.leaderboard.is_high_score(score);
        log::info!(
            "Round over after {} ticks: {:?}, score {}{}",
            self.state.ticks,
            outcome,
            score,
            if qualifies { " (high score)" } else { "" }
        );
        self.last_summary = Some(RoundSummary {
            score,
            outcome,
            qualifies,
        });
        self.phase = Phase::Terminal { prompt: qualifies };
    }

    fn submit(&mut self, name: &str) {
        let Some(summary) = self.last_summary else {
            return;
        };
        if let Err(e) = self.leaderboard.record(name, summary.score) {
            log::warn!("Could not save high score: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::ANONYMOUS;
    use crate::persistence::{MemoryStore, StorageError};
    use crate::platform::ManualScheduler;

    #[derive(Default)]
    struct Recorder {
        frames: u32,
        last_skin: Option<SkinId>,
        last_score: u32,
    }

    impl RenderTarget for Recorder {
        fn render(&mut self, state: &SimulationState, skin: Option<&SkinId>) {
            self.frames += 1;
            self.last_skin = skin.cloned();
            self.last_score = state.score;
        }
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            })
        }
    }

    type TestDriver<S> = GameDriver<S, ManualScheduler>;

    fn driver(tuning: Tuning) -> TestDriver<MemoryStore> {
        GameDriver::new(tuning, MemoryStore::new(), ManualScheduler::new(), 42).unwrap()
    }

    /// No gravity and a gap covering the avatar: every obstacle is passed
    fn cruising(score_cap: u32) -> Tuning {
        Tuning {
            gravity: 0.0,
            gap_size: 460.0,
            scroll_speed: 20.0,
            score_cap,
            ..Tuning::default()
        }
    }

    /// Run scheduled frames until none is requested
    fn pump<S: KeyValueStore>(driver: &mut TestDriver<S>, target: &mut Recorder) -> u32 {
        let mut frames = 0;
        while driver.scheduler_mut().take_request() {
            driver.on_frame(target);
            frames += 1;
            assert!(frames < 10_000, "round never ended");
        }
        frames
    }

    fn start<S: KeyValueStore>(driver: &mut TestDriver<S>, target: &mut Recorder) {
        driver.push(InputEvent::SelectCharacter(SkinId::new("Sam")));
        driver.push(InputEvent::Flap);
        driver.scheduler_mut().take_request();
        driver.on_frame(target);
    }

    #[test]
    fn test_rejects_invalid_tuning() {
        let tuning = Tuning {
            obstacle_count: 0,
            ..Tuning::default()
        };
        let result = GameDriver::new(tuning, MemoryStore::new(), ManualScheduler::new(), 1);
        assert!(matches!(result, Err(TuningError::EmptyWindow)));
    }

    #[test]
    fn test_push_merges_frame_requests() {
        let mut d = driver(Tuning::default());
        d.push(InputEvent::Flap);
        d.push(InputEvent::Flap);
        d.push(InputEvent::Restart);
        assert_eq!(d.scheduler().total_requests(), 1);
    }

    #[test]
    fn test_menu_ignores_flap() {
        let mut d = driver(Tuning::default());
        let mut target = Recorder::default();
        d.push(InputEvent::Flap);
        pump(&mut d, &mut target);

        assert_eq!(d.phase(), Phase::Menu);
        assert_eq!(d.state().ticks, 0);
        assert_eq!(target.frames, 1);
    }

    #[test]
    fn test_select_arms_round() {
        let mut d = driver(Tuning::default());
        let mut target = Recorder::default();
        d.push(InputEvent::SelectCharacter(SkinId::new("Sam")));
        let frames = pump(&mut d, &mut target);

        assert_eq!(frames, 1);
        assert_eq!(d.phase(), Phase::Idle);
        assert_eq!(d.skin(), Some(&SkinId::new("Sam")));
        assert_eq!(target.last_skin, Some(SkinId::new("Sam")));
        assert!(!d.scheduler().is_requested());
    }

    #[test]
    fn test_starting_flap_gives_no_impulse() {
        let mut d = driver(Tuning::default());
        let mut target = Recorder::default();
        start(&mut d, &mut target);

        assert_eq!(d.phase(), Phase::Running);
        assert_eq!(d.state().ticks, 1);
        assert_eq!(d.state().avatar.velocity, Tuning::default().gravity);
        // Running rounds keep themselves scheduled
        assert!(d.scheduler().is_requested());
    }

    #[test]
    fn test_flap_while_running() {
        let mut d = driver(Tuning::default());
        let mut target = Recorder::default();
        start(&mut d, &mut target);

        d.push(InputEvent::Flap);
        assert!(d.scheduler_mut().take_request());
        d.on_frame(&mut target);

        let t = Tuning::default();
        assert_eq!(d.state().avatar.velocity, t.flap_velocity + t.gravity);
    }

    #[test]
    fn test_crash_with_zero_score_skips_prompt() {
        let mut d = driver(Tuning::default());
        let mut target = Recorder::default();
        start(&mut d, &mut target);
        pump(&mut d, &mut target);

        // Free fall reaches the floor long before the first obstacle
        assert_eq!(d.phase(), Phase::Terminal { prompt: false });
        let summary = d.last_summary().unwrap();
        assert_eq!(summary.outcome, RoundOutcome::Crashed);
        assert_eq!(summary.score, 0);
        assert!(!summary.qualifies);
        assert!(!d.scheduler().is_requested());
    }

    #[test]
    fn test_high_score_prompt_and_submit() {
        let mut d = driver(cruising(2));
        let mut target = Recorder::default();
        start(&mut d, &mut target);
        pump(&mut d, &mut target);

        assert_eq!(d.phase(), Phase::Terminal { prompt: true });
        let summary = d.last_summary().unwrap();
        assert_eq!(summary.outcome, RoundOutcome::Cleared);
        assert_eq!(summary.score, 2);
        assert_eq!(target.last_score, 2);

        // Restart is blocked while the prompt is open
        d.push(InputEvent::Restart);
        pump(&mut d, &mut target);
        assert_eq!(d.phase(), Phase::Terminal { prompt: true });

        d.push(InputEvent::SubmitName("  Ann ".to_string()));
        pump(&mut d, &mut target);
        assert_eq!(d.phase(), Phase::Terminal { prompt: false });
        assert_eq!(
            d.leaderboard_top(),
            vec![LeaderboardEntry {
                name: "Ann".to_string(),
                score: 2
            }]
        );
    }

    #[test]
    fn test_blank_name_records_anonymous() {
        let mut d = driver(cruising(1));
        let mut target = Recorder::default();
        start(&mut d, &mut target);
        pump(&mut d, &mut target);

        d.push(InputEvent::SubmitName(String::new()));
        pump(&mut d, &mut target);
        assert_eq!(d.leaderboard_top()[0].name, ANONYMOUS);
    }

    #[test]
    fn test_restart_keeps_skin_and_resets() {
        let mut d = driver(Tuning::default());
        let mut target = Recorder::default();
        start(&mut d, &mut target);
        pump(&mut d, &mut target);

        d.push(InputEvent::Restart);
        pump(&mut d, &mut target);
        assert_eq!(d.phase(), Phase::Idle);
        assert_eq!(d.skin(), Some(&SkinId::new("Sam")));
        assert!(!d.state().is_terminal());
        assert_eq!(d.state().ticks, 0);
        assert_eq!(d.state().avatar.y, Tuning::default().avatar_start_y());
    }

    #[test]
    fn test_dismiss_returns_to_menu() {
        let mut d = driver(Tuning::default());
        let mut target = Recorder::default();
        start(&mut d, &mut target);
        pump(&mut d, &mut target);

        d.push(InputEvent::DismissLeaderboard);
        pump(&mut d, &mut target);
        assert_eq!(d.phase(), Phase::Menu);

        // Flap does nothing until a character is chosen again
        d.push(InputEvent::Flap);
        pump(&mut d, &mut target);
        assert_eq!(d.phase(), Phase::Menu);
    }

    #[test]
    fn test_select_ignored_mid_round() {
        let mut d = driver(Tuning::default());
        let mut target = Recorder::default();
        start(&mut d, &mut target);

        d.push(InputEvent::SelectCharacter(SkinId::new("Lisa")));
        d.scheduler_mut().take_request();
        d.on_frame(&mut target);
        assert_eq!(d.phase(), Phase::Running);
        assert_eq!(d.skin(), Some(&SkinId::new("Sam")));
    }

    #[test]
    fn test_tap_follows_phase() {
        let mut d = driver(cruising(1));
        let mut target = Recorder::default();
        assert_eq!(d.tap_event(), None);

        d.push(InputEvent::SelectCharacter(SkinId::new("Sam")));
        pump(&mut d, &mut target);
        assert_eq!(d.tap_event(), Some(InputEvent::Flap));

        d.push(InputEvent::Flap);
        d.scheduler_mut().take_request();
        d.on_frame(&mut target);
        assert_eq!(d.tap_event(), Some(InputEvent::Flap));

        pump(&mut d, &mut target);
        assert_eq!(d.phase(), Phase::Terminal { prompt: true });
        assert_eq!(d.tap_event(), None);

        d.push(InputEvent::SubmitName("Ann".to_string()));
        pump(&mut d, &mut target);
        assert_eq!(d.tap_event(), Some(InputEvent::Restart));
    }

    #[test]
    fn test_tapping_through_a_round() {
        let mut d = driver(cruising(1));
        let mut target = Recorder::default();
        d.push(InputEvent::SelectCharacter(SkinId::new("Sam")));
        pump(&mut d, &mut target);

        // Taps drive the round from start to the name prompt
        while let Some(tap) = d.tap_event() {
            d.push(tap);
            pump(&mut d, &mut target);
        }
        assert_eq!(d.phase(), Phase::Terminal { prompt: true });

        d.push(InputEvent::SubmitName("Ann".to_string()));
        pump(&mut d, &mut target);
        assert_eq!(d.leaderboard_top()[0].name, "Ann");

        // Next tap restarts with the same character
        let tap = d.tap_event().unwrap();
        d.push(tap);
        pump(&mut d, &mut target);
        assert_eq!(d.phase(), Phase::Idle);
        assert_eq!(d.skin(), Some(&SkinId::new("Sam")));
    }

    #[test]
    fn test_failed_save_still_closes_prompt() {
        let mut d =
            GameDriver::new(cruising(1), ReadOnlyStore, ManualScheduler::new(), 7).unwrap();
        let mut target = Recorder::default();
        start(&mut d, &mut target);
        pump(&mut d, &mut target);
        assert_eq!(d.phase(), Phase::Terminal { prompt: true });

        d.push(InputEvent::SubmitName("Ann".to_string()));
        pump(&mut d, &mut target);
        assert_eq!(d.phase(), Phase::Terminal { prompt: false });
        assert!(d.leaderboard_top().is_empty());
    }
}
