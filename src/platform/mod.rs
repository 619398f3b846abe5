//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (queued, drained once per frame)
//! - Frame scheduling (requestAnimationFrame on web, manual elsewhere)

pub mod input;
pub mod scheduler;

pub use input::{InputEvent, InputQueue};
pub use scheduler::{FrameScheduler, ManualScheduler};

#[cfg(target_arch = "wasm32")]
pub use scheduler::AnimationFrameScheduler;
