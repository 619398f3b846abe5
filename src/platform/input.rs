//! Input events
//!
//! Event handlers never touch game state directly. They push onto the queue,
//! and the driver drains it at the start of the next frame.

use std::collections::VecDeque;

use crate::renderer::skin::SkinId;

/// A discrete player action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Space / tap: start the round, or flap while running
    Flap,
    /// Start over after a round ended
    Restart,
    /// Character picked in the menu; arms a round with that skin
    SelectCharacter(SkinId),
    /// Name entered in the high score prompt
    SubmitName(String),
    /// Close the leaderboard and return to the menu
    DismissLeaderboard,
}

/// FIFO of pending input events
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> Vec<InputEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::Flap);
        queue.push(InputEvent::SubmitName("Sam".to_string()));
        queue.push(InputEvent::Restart);
        assert_eq!(queue.len(), 3);

        assert_eq!(
            queue.drain(),
            vec![
                InputEvent::Flap,
                InputEvent::SubmitName("Sam".to_string()),
                InputEvent::Restart
            ]
        );
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }
}
