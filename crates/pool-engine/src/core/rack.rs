use glam::Vec2;

use crate::api::types::BallId;
use crate::components::ball::Ball;
use crate::components::table::TableGeometry;
use crate::core::rng::Rng;
use crate::rules::mode::GameMode;

/// Gap factor between racked balls (centre spacing in radii / 2).
const RACK_SPACING: f32 = 2.05;

/// Balls per row, apex first.
const TRIANGLE_ROWS: [usize; 5] = [1, 2, 3, 4, 5];
const DIAMOND_ROWS: [usize; 5] = [1, 2, 3, 2, 1];

/// Slot that holds the fixed centre ball (8 in the triangle, 9 in the diamond).
const CENTER_SLOT: usize = 4;

/// Slot positions for a rack with the apex at `apex`, opening toward +x.
pub fn rack_slots(rows: &[usize], apex: Vec2, radius: f32) -> Vec<Vec2> {
    let spacing = radius * RACK_SPACING;
    let row_step = spacing * 3f32.sqrt() / 2.0;
    let mut slots = Vec::with_capacity(rows.iter().sum());
    for (row, &count) in rows.iter().enumerate() {
        let x = apex.x + row as f32 * row_step;
        for i in 0..count {
            let offset = i as f32 - (count as f32 - 1.0) / 2.0;
            slots.push(Vec2::new(x, apex.y + offset * spacing));
        }
    }
    slots
}

/// Fresh set of balls for `mode`: the cue ball on its spot plus the rack.
///
/// The 1 always sits at the apex and the 8 (or 9) in the centre; the rest are
/// shuffled with `rng`.
pub fn rack_balls(mode: GameMode, table: &TableGeometry, rng: &mut Rng) -> Vec<Ball> {
    let radius = table.ball_radius;
    let (rows, center_ball): (&[usize], BallId) = match mode {
        GameMode::NineBall => (&DIAMOND_ROWS, BallId::NINE),
        GameMode::FreePlay | GameMode::EightBall => (&TRIANGLE_ROWS, BallId::EIGHT),
    };
    let ball_count = mode.config().ball_count as u8;

    let mut rest: Vec<BallId> = (2..=ball_count)
        .map(BallId)
        .filter(|id| *id != center_ball)
        .collect();
    rng.shuffle(&mut rest);

    let slots = rack_slots(rows, table.foot_spot, radius);
    let mut order = Vec::with_capacity(slots.len());
    order.push(BallId(1));
    let mut rest = rest.into_iter();
    for slot in 1..slots.len() {
        if slot == CENTER_SLOT {
            order.push(center_ball);
        } else if let Some(id) = rest.next() {
            order.push(id);
        }
    }

    let mut balls = Vec::with_capacity(slots.len() + 1);
    balls.push(Ball::new(BallId::CUE, table.cue_spot, radius));
    balls.extend(
        order
            .into_iter()
            .zip(slots)
            .map(|(id, pos)| Ball::new(id, pos, radius)),
    );

    log::info!("racked {} object balls for {:?}", balls.len() - 1, mode);
    balls
}
