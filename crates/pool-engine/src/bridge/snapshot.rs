//! Read-only view of the table for the HUD and renderer.
//!
//! Captured on demand after a frame; capturing never mutates the table.

use glam::Vec2;
use serde::Serialize;

use crate::api::aim::{aim_feedback, AimFeedback};
use crate::api::table::Table;
use crate::api::types::{BallId, Group, Player};
use crate::components::ball::{BallColor, BallDef};
use crate::rules::fouls::Foul;
use crate::rules::mode::{GameMode, GameState};

/// One ball as drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallView {
    pub id: BallId,
    pub pos: Vec2,
    pub radius: f32,
    pub color: BallColor,
    pub label: Option<String>,
    pub stripe: bool,
}

/// Everything the HUD shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSnapshot {
    pub mode: GameMode,
    pub state: GameState,
    pub player: Player,
    pub groups: [Option<Group>; 2],
    pub target: Option<BallId>,
    pub winner: Option<Player>,
    pub last_foul: Option<Foul>,
    pub last_scratch: bool,
    pub placement_valid: bool,
    pub moving: bool,
    pub balls: Vec<BallView>,
}

impl TableSnapshot {
    pub fn capture(table: &Table) -> Self {
        let game = table.game();
        let balls = table
            .balls()
            .active()
            .map(|ball| {
                let def = BallDef::of(ball.id);
                BallView {
                    id: ball.id,
                    pos: ball.pos,
                    radius: ball.radius,
                    color: def.color,
                    label: def.label(),
                    stripe: ball.is_stripe(),
                }
            })
            .collect();

        Self {
            mode: game.mode,
            state: game.state,
            player: game.player,
            groups: game.groups,
            target: table.target_ball(),
            winner: game.winner,
            last_foul: game.last_foul,
            last_scratch: game.last_scratch,
            placement_valid: table.placement_valid(),
            moving: table.is_moving(),
            balls,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Power meter state for a drag, serialized for the HUD.
pub fn aim_json(table: &Table, drag: Vec2) -> String {
    let aim: AimFeedback = aim_feedback(drag, table.tunables());
    serde_json::to_string(&aim).unwrap_or_default()
}
