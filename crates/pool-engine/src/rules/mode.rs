use serde::{Deserialize, Serialize};

use crate::api::types::{Group, Player};
use crate::rules::fouls::Foul;

/// Top-level game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    ModeSelect,
    /// Cue ball placement restricted to the kitchen.
    Breaking,
    Playing,
    /// Cue ball may be placed anywhere valid, or behind the head string
    /// after a scratch.
    BallInHand,
    Won,
    Lost,
}

impl GameState {
    /// The cue ball is waiting to be placed.
    pub fn is_placing(self) -> bool {
        matches!(self, GameState::Breaking | GameState::BallInHand)
    }

    pub fn is_over(self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }
}

/// Which rule set the table runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    FreePlay,
    EightBall,
    NineBall,
}

/// Per-mode constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeConfig {
    pub ball_count: u32,
    pub check_scratch: bool,
    pub check_win_lose: bool,
}

impl GameMode {
    pub fn config(self) -> ModeConfig {
        match self {
            GameMode::FreePlay => ModeConfig { ball_count: 15, check_scratch: false, check_win_lose: false },
            GameMode::EightBall => ModeConfig { ball_count: 15, check_scratch: true, check_win_lose: true },
            GameMode::NineBall => ModeConfig { ball_count: 9, check_scratch: true, check_win_lose: true },
        }
    }

    /// Mode by UI index (0 free play, 1 8-ball, 2 9-ball).
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(GameMode::FreePlay),
            1 => Some(GameMode::EightBall),
            2 => Some(GameMode::NineBall),
            _ => None,
        }
    }
}

/// Turn, group and outcome bookkeeping for the current rack.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    pub mode: GameMode,
    pub state: GameState,
    /// Player at the table.
    pub player: Player,
    /// Assigned 8-ball groups, indexed by [`Player::index`].
    pub groups: [Option<Group>; 2],
    pub is_break_shot: bool,
    pub winner: Option<Player>,
    pub last_foul: Option<Foul>,
    pub last_scratch: bool,
}

impl MatchState {
    pub fn new() -> Self {
        Self {
            mode: GameMode::FreePlay,
            state: GameState::ModeSelect,
            player: Player::One,
            groups: [None, None],
            is_break_shot: false,
            winner: None,
            last_foul: None,
            last_scratch: false,
        }
    }

    /// Reset for a fresh rack of `mode`, player one to break.
    pub fn start(&mut self, mode: GameMode) {
        *self = Self {
            mode,
            state: GameState::Breaking,
            is_break_shot: true,
            ..Self::new()
        };
    }

    pub fn group_of(&self, player: Player) -> Option<Group> {
        self.groups[player.index()]
    }

    pub fn shooter_group(&self) -> Option<Group> {
        self.group_of(self.player)
    }

    pub fn groups_assigned(&self) -> bool {
        self.groups[0].is_some()
    }

    /// Give `group` to the shooter and the other group to the opponent.
    /// Returns false (and changes nothing) once groups are already fixed.
    pub fn assign_groups(&mut self, group: Group) -> bool {
        if self.groups_assigned() {
            return false;
        }
        self.groups[self.player.index()] = Some(group);
        self.groups[self.player.other().index()] = Some(group.other());
        log::info!("player {} takes {:?}", self.player.number(), group);
        true
    }

    pub fn switch_turn(&mut self) {
        self.player = self.player.other();
    }

    /// Cue placement is limited to the kitchen: while breaking, and for
    /// ball in hand after a scratch.
    pub fn kitchen_only(&self) -> bool {
        match self.state {
            GameState::Breaking => true,
            GameState::BallInHand => self.last_scratch,
            _ => false,
        }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_table() {
        assert_eq!(GameMode::FreePlay.config().ball_count, 15);
        assert!(!GameMode::FreePlay.config().check_scratch);
        assert!(GameMode::EightBall.config().check_win_lose);
        assert_eq!(GameMode::NineBall.config().ball_count, 9);
        assert_eq!(GameMode::from_index(2), Some(GameMode::NineBall));
        assert_eq!(GameMode::from_index(3), None);
    }

    #[test]
    fn start_resets_everything() {
        let mut m = MatchState::new();
        m.player = Player::Two;
        m.groups = [Some(Group::Stripes), Some(Group::Solids)];
        m.winner = Some(Player::Two);
        m.start(GameMode::EightBall);
        assert_eq!(m.state, GameState::Breaking);
        assert_eq!(m.player, Player::One);
        assert!(m.is_break_shot);
        assert!(!m.groups_assigned());
        assert!(m.winner.is_none());
        assert!(m.kitchen_only());
    }

    #[test]
    fn groups_are_assigned_once() {
        let mut m = MatchState::new();
        m.start(GameMode::EightBall);
        m.switch_turn();
        assert!(m.assign_groups(Group::Solids));
        assert_eq!(m.group_of(Player::Two), Some(Group::Solids));
        assert_eq!(m.group_of(Player::One), Some(Group::Stripes));

        m.switch_turn();
        assert!(!m.assign_groups(Group::Solids));
        assert_eq!(m.shooter_group(), Some(Group::Stripes));
    }

    #[test]
    fn scratch_keeps_ball_in_hand_behind_the_line() {
        let mut m = MatchState::new();
        m.start(GameMode::NineBall);
        m.state = GameState::BallInHand;
        assert!(!m.kitchen_only());
        m.last_scratch = true;
        assert!(m.kitchen_only());
        m.state = GameState::Playing;
        assert!(!m.kitchen_only());
    }

    #[test]
    fn state_predicates() {
        assert!(GameState::BallInHand.is_placing());
        assert!(!GameState::Playing.is_placing());
        assert!(GameState::Lost.is_over());
    }
}
