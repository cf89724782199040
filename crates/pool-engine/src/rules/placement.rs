use glam::Vec2;

use crate::components::table::TableGeometry;
use crate::core::ball_set::BallSet;

/// Why a cue ball position was refused.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlacementError {
    #[error("position ({x}, {y}) is off the playing field")]
    OffTable { x: f32, y: f32 },
    #[error("position is inside pocket {0}")]
    InPocket(usize),
    #[error("position overlaps ball {0}")]
    Overlaps(u8),
    #[error("break placement must stay behind the head string")]
    OutsideKitchen,
}

/// Validate a cue ball position against the table and the other active balls.
pub fn check_placement(
    pos: Vec2,
    table: &TableGeometry,
    balls: &BallSet,
    kitchen_only: bool,
) -> Result<(), PlacementError> {
    let r = table.ball_radius;

    if !pos.is_finite() || !table.field.inset(r).contains(pos) {
        return Err(PlacementError::OffTable { x: pos.x, y: pos.y });
    }

    if let Some(i) = table
        .pockets
        .iter()
        .position(|p| pos.distance(p.center) < p.capture_radius + r)
    {
        return Err(PlacementError::InPocket(i));
    }

    if let Some(other) = balls
        .active()
        .filter(|b| !b.id.is_cue())
        .find(|b| pos.distance(b.pos) < r + b.radius)
    {
        return Err(PlacementError::Overlaps(other.id.0));
    }

    if kitchen_only && pos.x > table.kitchen_x {
        return Err(PlacementError::OutsideKitchen);
    }

    Ok(())
}

pub fn is_valid_placement(pos: Vec2, table: &TableGeometry, balls: &BallSet, kitchen_only: bool) -> bool {
    check_placement(pos, table, balls, kitchen_only).is_ok()
}

/// Where to put the cue ball back on the table.
///
/// Tries the cue spot first, then walks outward along the spot's row and
/// back toward the head rail until a free position turns up.
pub fn respot_position(table: &TableGeometry, balls: &BallSet) -> Vec2 {
    let spot = table.cue_spot;
    if is_valid_placement(spot, table, balls, true) {
        return spot;
    }

    let step = table.ball_radius * 2.0;
    let field = table.field.inset(table.ball_radius);
    let mut x = spot.x;
    while x >= field.min.x {
        for k in 0.. {
            let dy = k as f32 * step;
            if dy > field.height() {
                break;
            }
            for candidate in [Vec2::new(x, spot.y + dy), Vec2::new(x, spot.y - dy)] {
                if is_valid_placement(candidate, table, balls, true) {
                    return candidate;
                }
            }
        }
        x -= step;
    }

    log::warn!("no free spot behind the head string; respotting on the cue spot");
    spot
}
