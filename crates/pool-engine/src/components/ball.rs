//! Pool ball data: identity, kind, colours and per-ball motion state.

use glam::Vec2;
use serde::Serialize;

use crate::api::types::{BallId, Group};

/// Ball kind: cue, solid (1-7), the 8-ball, or striped (9-15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BallKind {
    Cue,
    Solid,
    Eight,
    Stripe,
}

impl BallKind {
    pub fn of(id: BallId) -> Self {
        match id.0 {
            0 => BallKind::Cue,
            8 => BallKind::Eight,
            1..=7 => BallKind::Solid,
            _ => BallKind::Stripe,
        }
    }

    pub fn group(self) -> Option<Group> {
        match self {
            BallKind::Solid => Some(Group::Solids),
            BallKind::Stripe => Some(Group::Stripes),
            BallKind::Cue | BallKind::Eight => None,
        }
    }
}

/// Linear RGB in 0..1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl BallColor {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Static appearance of a numbered ball.
#[derive(Debug, Clone, Copy)]
pub struct BallDef {
    pub number: u8,
    pub kind: BallKind,
    pub color: BallColor,
}

const YELLOW: BallColor = BallColor::rgb(1.0, 0.84, 0.0);
const BLUE: BallColor = BallColor::rgb(0.0, 0.0, 1.0);
const RED: BallColor = BallColor::rgb(1.0, 0.0, 0.0);
const PURPLE: BallColor = BallColor::rgb(0.5, 0.0, 0.5);
const ORANGE: BallColor = BallColor::rgb(1.0, 0.55, 0.0);
const GREEN: BallColor = BallColor::rgb(0.0, 0.5, 0.0);
const MAROON: BallColor = BallColor::rgb(0.5, 0.0, 0.0);

/// Cue ball plus 15 numbered balls; stripes reuse the solid palette.
pub const BALL_DEFS: [BallDef; 16] = [
    BallDef { number: 0, kind: BallKind::Cue, color: BallColor::rgb(1.0, 1.0, 1.0) },
    BallDef { number: 1, kind: BallKind::Solid, color: YELLOW },
    BallDef { number: 2, kind: BallKind::Solid, color: BLUE },
    BallDef { number: 3, kind: BallKind::Solid, color: RED },
    BallDef { number: 4, kind: BallKind::Solid, color: PURPLE },
    BallDef { number: 5, kind: BallKind::Solid, color: ORANGE },
    BallDef { number: 6, kind: BallKind::Solid, color: GREEN },
    BallDef { number: 7, kind: BallKind::Solid, color: MAROON },
    BallDef { number: 8, kind: BallKind::Eight, color: BallColor::rgb(0.0, 0.0, 0.0) },
    BallDef { number: 9, kind: BallKind::Stripe, color: YELLOW },
    BallDef { number: 10, kind: BallKind::Stripe, color: BLUE },
    BallDef { number: 11, kind: BallKind::Stripe, color: RED },
    BallDef { number: 12, kind: BallKind::Stripe, color: PURPLE },
    BallDef { number: 13, kind: BallKind::Stripe, color: ORANGE },
    BallDef { number: 14, kind: BallKind::Stripe, color: GREEN },
    BallDef { number: 15, kind: BallKind::Stripe, color: MAROON },
];

impl BallDef {
    pub fn of(id: BallId) -> &'static BallDef {
        &BALL_DEFS[(id.0 as usize).min(BALL_DEFS.len() - 1)]
    }

    /// Number printed on the ball; the cue ball has none.
    pub fn label(&self) -> Option<String> {
        (self.number > 0).then(|| self.number.to_string())
    }
}

/// A ball on (or off) the table. Every ball shares this one shape;
/// behaviour differs only through `id` and `active`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub id: BallId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// False once pocketed. Inactive balls skip motion, collision and pocket checks.
    pub active: bool,
}

impl Ball {
    pub fn new(id: BallId, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius,
            active: true,
        }
    }

    pub fn kind(&self) -> BallKind {
        BallKind::of(self.id)
    }

    pub fn is_stripe(&self) -> bool {
        self.kind() == BallKind::Stripe
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Active and faster than `min_speed`.
    pub fn is_moving(&self, min_speed: f32) -> bool {
        self.active && self.speed() > min_speed
    }

    /// Take the ball off the table.
    pub fn pocket(&mut self) {
        self.active = false;
        self.vel = Vec2::ZERO;
    }

    /// Put the ball back on the table at rest.
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.active = true;
    }
}
