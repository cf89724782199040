use glam::Vec2;
use serde::Serialize;

use crate::api::config::Tunables;

/// Launch speeds below this are treated as an aborted aim.
pub const MIN_SHOT_POWER: f32 = 30.0;

/// Derived aim state for the HUD power meter. Never stored on the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AimFeedback {
    /// Unit shot direction (zero when the drag is degenerate).
    pub direction: Vec2,
    /// Launch speed in units/s.
    pub power: f32,
    /// Power as a fraction of `max_power`, 0..=1.
    pub percent: f32,
}

/// Power and direction for a drag vector (pull-back already resolved to the shot direction).
pub fn aim_feedback(drag: Vec2, tunables: &Tunables) -> AimFeedback {
    let t = tunables.clamped();
    let length = drag.length();
    if !length.is_finite() || length <= f32::EPSILON {
        return AimFeedback {
            direction: Vec2::ZERO,
            power: 0.0,
            percent: 0.0,
        };
    }
    let power = (length * t.power_scale).min(t.max_power);
    AimFeedback {
        direction: drag / length,
        power,
        percent: power / t.max_power,
    }
}

/// Cue ball velocity for a drag, or `None` if the shot is too weak to count.
pub fn launch_velocity(drag: Vec2, tunables: &Tunables) -> Option<Vec2> {
    let aim = aim_feedback(drag, tunables);
    (aim.power >= MIN_SHOT_POWER).then(|| aim.direction * aim.power)
}
