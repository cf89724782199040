use crate::api::config::TunableChange;
use crate::rules::mode::GameMode;

/// Commands the table understands.
/// The UI layer decodes pointers and buttons into these; the table applies
/// them between frames, before physics runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Launch the cue ball with velocity (vx, vy) in units/s.
    Strike { vx: f32, vy: f32 },
    /// Move the cue ball to (x, y) while it is being placed.
    ProposeCue { x: f32, y: f32 },
    /// Accept the last proposed cue position.
    ConfirmPlacement,
    SelectMode(GameMode),
    /// Rack again in the current mode.
    Restart,
    SetTunable(TunableChange),
}

/// A queue of table commands.
/// JS writes commands into the queue; Rust drains them once per frame.
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Drain all pending commands. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Iterate over pending commands without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_in_order() {
        let mut q = CommandQueue::new();
        q.push(Command::SelectMode(GameMode::NineBall));
        q.push(Command::Strike { vx: 400.0, vy: 0.0 });
        assert_eq!(q.len(), 2);
        let commands = q.drain();
        assert_eq!(commands[0], Command::SelectMode(GameMode::NineBall));
        assert!(matches!(commands[1], Command::Strike { vx, .. } if vx == 400.0));
        assert!(q.is_empty());
    }

    #[test]
    fn iter_does_not_consume() {
        let mut q = CommandQueue::new();
        q.push(Command::SetTunable(TunableChange::GravityEnabled(false)));
        assert_eq!(q.iter().count(), 1);
        assert_eq!(q.len(), 1);
    }
}
