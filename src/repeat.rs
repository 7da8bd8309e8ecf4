//! Held-key repeat scheduling.
//!
//! A field tracks three repeat channels (delete, left arrow, right arrow). Each
//! simulation step advances the active channel; once its hold count passes the
//! threshold the channel fires and starts counting again with the shorter delay.

use serde::{Deserialize, Serialize};

use crate::editable::{MoveTarget, TextEditMsg};

/// Delays (in simulation steps) before a held key repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatDelays {
    /// Steps a key must be held before the first repeat
    #[serde(default = "default_first_delay")]
    pub first_delay_steps: u32,
    /// Steps between subsequent repeats
    #[serde(default = "default_next_delay")]
    pub next_delay_steps: u32,
}

fn default_first_delay() -> u32 {
    30
}

fn default_next_delay() -> u32 {
    2
}

impl Default for RepeatDelays {
    fn default() -> Self {
        Self {
            first_delay_steps: default_first_delay(),
            next_delay_steps: default_next_delay(),
        }
    }
}

impl RepeatDelays {
    pub const fn new(first_delay_steps: u32, next_delay_steps: u32) -> Self {
        Self {
            first_delay_steps,
            next_delay_steps,
        }
    }
}

/// The action a repeat channel performs when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepeatAction {
    DeleteBackward,
    MoveLeft,
    MoveRight,
}

impl RepeatAction {
    const ALL: [RepeatAction; 3] = [
        RepeatAction::DeleteBackward,
        RepeatAction::MoveLeft,
        RepeatAction::MoveRight,
    ];

    const fn index(self) -> usize {
        match self {
            RepeatAction::DeleteBackward => 0,
            RepeatAction::MoveLeft => 1,
            RepeatAction::MoveRight => 2,
        }
    }

    /// The edit a firing of this action performs
    pub fn edit_msg(self) -> TextEditMsg {
        match self {
            RepeatAction::DeleteBackward => TextEditMsg::DeleteBackward,
            RepeatAction::MoveLeft => TextEditMsg::Move(MoveTarget::Left),
            RepeatAction::MoveRight => TextEditMsg::Move(MoveTarget::Right),
        }
    }
}

/// Hold state of one key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepeatChannel {
    /// Steps since press or last repeat (None = key not held)
    held_steps: Option<u32>,
    first_repeat_done: bool,
}

impl RepeatChannel {
    pub fn is_held(&self) -> bool {
        self.held_steps.is_some()
    }

    pub fn held_steps(&self) -> Option<u32> {
        self.held_steps
    }

    pub fn first_repeat_done(&self) -> bool {
        self.first_repeat_done
    }

    fn press(&mut self) {
        self.held_steps = Some(0);
        self.first_repeat_done = false;
    }

    fn release(&mut self) {
        self.held_steps = None;
        self.first_repeat_done = false;
    }

    /// Advance one step. Returns true when the channel fires.
    fn tick(&mut self, delays: RepeatDelays) -> bool {
        let Some(held) = self.held_steps.as_mut() else {
            return false;
        };

        *held += 1;

        let threshold = if self.first_repeat_done {
            delays.next_delay_steps
        } else {
            delays.first_delay_steps
        };

        if *held > threshold {
            *held = 0;
            self.first_repeat_done = true;
            true
        } else {
            false
        }
    }
}

/// The three repeat channels of a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepeatScheduler {
    channels: [RepeatChannel; 3],
}

impl RepeatScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel(&self, action: RepeatAction) -> &RepeatChannel {
        &self.channels[action.index()]
    }

    /// Check if any key is currently held
    pub fn is_active(&self) -> bool {
        self.channels.iter().any(RepeatChannel::is_held)
    }

    /// Start holding a key. Every other channel is released.
    pub fn press(&mut self, action: RepeatAction) {
        for (i, channel) in self.channels.iter_mut().enumerate() {
            if i == action.index() {
                channel.press();
            } else {
                channel.release();
            }
        }
    }

    /// Stop holding a key
    pub fn release(&mut self, action: RepeatAction) {
        self.channels[action.index()].release();
    }

    /// Release every channel (as if all keys went up)
    pub fn release_all(&mut self) {
        for channel in &mut self.channels {
            channel.release();
        }
    }

    /// Advance every held channel by one step, calling `fire` for each repeat.
    pub fn tick(&mut self, delays: RepeatDelays, mut fire: impl FnMut(RepeatAction)) {
        for action in RepeatAction::ALL {
            if self.channels[action.index()].tick(delays) {
                tracing::trace!(?action, "key repeat");
                fire(action);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_fires(scheduler: &mut RepeatScheduler, delays: RepeatDelays, steps: u32) -> usize {
        let mut fired = 0;
        for _ in 0..steps {
            scheduler.tick(delays, |_| fired += 1);
        }
        fired
    }

    #[test]
    fn test_idle_scheduler_never_fires() {
        let mut s = RepeatScheduler::new();
        assert_eq!(count_fires(&mut s, RepeatDelays::default(), 100), 0);
        assert!(!s.is_active());
    }

    #[test]
    fn test_first_repeat_after_first_delay() {
        let delays = RepeatDelays::new(3, 1);
        let mut s = RepeatScheduler::new();
        s.press(RepeatAction::DeleteBackward);

        assert_eq!(count_fires(&mut s, delays, 3), 0);
        assert_eq!(count_fires(&mut s, delays, 1), 1);
        assert!(s.channel(RepeatAction::DeleteBackward).first_repeat_done());
        assert_eq!(s.channel(RepeatAction::DeleteBackward).held_steps(), Some(0));
    }

    #[test]
    fn test_subsequent_repeats_use_next_delay() {
        let delays = RepeatDelays::new(3, 1);
        let mut s = RepeatScheduler::new();
        s.press(RepeatAction::MoveLeft);

        assert_eq!(count_fires(&mut s, delays, 4), 1);
        // next_delay + 1 steps per repeat
        assert_eq!(count_fires(&mut s, delays, 2), 1);
        assert_eq!(count_fires(&mut s, delays, 6), 3);
    }

    #[test]
    fn test_press_clears_other_channels() {
        let mut s = RepeatScheduler::new();
        s.press(RepeatAction::MoveLeft);
        s.press(RepeatAction::DeleteBackward);

        assert!(!s.channel(RepeatAction::MoveLeft).is_held());
        assert!(s.channel(RepeatAction::DeleteBackward).is_held());

        s.press(RepeatAction::MoveRight);
        assert!(!s.channel(RepeatAction::DeleteBackward).is_held());
    }

    #[test]
    fn test_release_stops_repeat() {
        let delays = RepeatDelays::new(1, 1);
        let mut s = RepeatScheduler::new();
        s.press(RepeatAction::MoveRight);
        s.release(RepeatAction::MoveRight);

        assert_eq!(count_fires(&mut s, delays, 10), 0);
        assert!(!s.channel(RepeatAction::MoveRight).first_repeat_done());
    }

    #[test]
    fn test_fired_action_matches_channel() {
        let delays = RepeatDelays::new(0, 0);
        let mut s = RepeatScheduler::new();
        s.press(RepeatAction::MoveRight);

        let mut fired = Vec::new();
        s.tick(delays, |a| fired.push(a));
        assert_eq!(fired, vec![RepeatAction::MoveRight]);
    }
}
