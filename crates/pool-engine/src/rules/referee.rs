//! Post-shot judgement: turns a finished [`ShotData`] into the next game state.
//!
//! `judge` is pure. The table applies the returned [`ShotOutcome`] (switching
//! the turn, assigning groups, respotting the cue ball or re-racking).

use crate::api::types::{BallId, Group, Player};
use crate::core::ball_set::BallSet;
use crate::rules::fouls::{check_foul, group_cleared_before_shot, Foul};
use crate::rules::mode::{GameMode, GameState, MatchState};
use crate::rules::shot::ShotData;

/// Everything the table needs to apply after a shot.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotOutcome {
    pub next_state: GameState,
    pub foul: Option<Foul>,
    /// Cue ball went down.
    pub scratch: bool,
    pub turn_passes: bool,
    /// Group that the shooter takes as a result of this shot.
    pub assigned: Option<Group>,
    pub winner: Option<Player>,
    /// The 8 dropped on the break: rack again.
    pub rerack: bool,
    /// Put the cue ball back on the cue spot.
    pub respot_cue: bool,
}

impl ShotOutcome {
    fn continue_play(scratch: bool) -> Self {
        Self {
            next_state: GameState::Playing,
            foul: None,
            scratch,
            turn_passes: false,
            assigned: None,
            winner: None,
            rerack: false,
            respot_cue: false,
        }
    }

    pub fn is_foul(&self) -> bool {
        self.foul.is_some() || self.scratch
    }
}

/// Decide what a finished shot means. `balls` is the table after it settled.
pub fn judge(shot: &ShotData, game: &MatchState, balls: &BallSet) -> ShotOutcome {
    let scratch = !balls.is_active(BallId::CUE);
    let shooter = game.player;

    if !game.mode.config().check_win_lose {
        return ShotOutcome {
            respot_cue: scratch,
            ..ShotOutcome::continue_play(scratch)
        };
    }

    let foul = check_foul(shot, game, balls);
    let fouled = foul.is_some() || (scratch && game.mode.config().check_scratch);

    match game.mode {
        GameMode::EightBall if shot.pocketed_ball(BallId::EIGHT) => {
            if game.is_break_shot {
                return ShotOutcome {
                    next_state: GameState::Breaking,
                    foul,
                    rerack: true,
                    ..ShotOutcome::continue_play(scratch)
                };
            }
            let cleared = game
                .shooter_group()
                .is_some_and(|group| group_cleared_before_shot(group, shot, balls));
            let (state, winner) = if fouled || !cleared {
                (GameState::Lost, shooter.other())
            } else {
                (GameState::Won, shooter)
            };
            return ShotOutcome {
                next_state: state,
                foul,
                winner: Some(winner),
                ..ShotOutcome::continue_play(scratch)
            };
        }
        GameMode::NineBall if shot.pocketed_ball(BallId::NINE) && !fouled => {
            return ShotOutcome {
                next_state: GameState::Won,
                winner: Some(shooter),
                ..ShotOutcome::continue_play(scratch)
            };
        }
        _ => {}
    }

    if fouled {
        let next_state = if game.is_break_shot {
            GameState::Breaking
        } else {
            GameState::BallInHand
        };
        return ShotOutcome {
            next_state,
            foul,
            turn_passes: true,
            respot_cue: scratch || game.is_break_shot,
            ..ShotOutcome::continue_play(scratch)
        };
    }

    let assigned = if game.mode == GameMode::EightBall && !game.is_break_shot && !game.groups_assigned() {
        shot.pocketed.iter().find_map(|id| Group::of(*id))
    } else {
        None
    };

    let target_group = assigned.or(match game.mode {
        GameMode::EightBall => game.shooter_group(),
        _ => None,
    });
    let keeps_turn = match target_group {
        Some(group) => shot.pocketed.iter().any(|id| group.contains(*id)),
        None => !shot.pocketed.is_empty(),
    };

    ShotOutcome {
        turn_passes: !keeps_turn,
        assigned,
        ..ShotOutcome::continue_play(scratch)
    }
}
