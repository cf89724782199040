use serde::{Deserialize, Serialize};

/// Errors raised while loading a table configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid table config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("table geometry does not fit: {0}")]
    Geometry(String),
}

/// Parameters the UI may adjust while the table is running.
/// Read by the integrator every step; out-of-range values are clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Velocity retained per 1/60 s at cruising speed.
    pub high_speed_friction: f32,
    /// Velocity retained per 1/60 s near rest (lower = stronger braking).
    pub low_speed_friction: f32,
    /// Upper bound on cue ball launch speed (units/s).
    pub max_power: f32,
    /// Launch speed per unit of aim drag.
    pub power_scale: f32,
    pub gravity_enabled: bool,
}

impl Tunables {
    const FRICTION_RANGE: (f32, f32) = (0.5, 1.0);
    const MAX_POWER_RANGE: (f32, f32) = (60.0, 3000.0);
    const POWER_SCALE_RANGE: (f32, f32) = (0.5, 60.0);

    /// Copy with every value forced into its stable range.
    pub fn clamped(&self) -> Self {
        Self {
            high_speed_friction: clamp_finite(self.high_speed_friction, Self::FRICTION_RANGE),
            low_speed_friction: clamp_finite(self.low_speed_friction, Self::FRICTION_RANGE),
            max_power: clamp_finite(self.max_power, Self::MAX_POWER_RANGE),
            power_scale: clamp_finite(self.power_scale, Self::POWER_SCALE_RANGE),
            gravity_enabled: self.gravity_enabled,
        }
    }

    /// Apply a single change coming from a UI control.
    pub fn apply(&mut self, change: TunableChange) {
        match change {
            TunableChange::HighSpeedFriction(v) => self.high_speed_friction = v,
            TunableChange::LowSpeedFriction(v) => self.low_speed_friction = v,
            TunableChange::MaxPower(v) => self.max_power = v,
            TunableChange::PowerScale(v) => self.power_scale = v,
            TunableChange::GravityEnabled(on) => self.gravity_enabled = on,
        }
        *self = self.clamped();
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            high_speed_friction: 0.992,
            low_speed_friction: 0.96,
            max_power: 1200.0,
            power_scale: 9.0,
            gravity_enabled: true,
        }
    }
}

/// One adjustment to a [`Tunables`] field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TunableChange {
    HighSpeedFriction(f32),
    LowSpeedFriction(f32),
    MaxPower(f32),
    PowerScale(f32),
    GravityEnabled(bool),
}

fn clamp_finite(value: f32, (lo, hi): (f32, f32)) -> f32 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        hi
    }
}

/// Table configuration, fixed for a session.
/// All lengths are in world units (the default table is 800x450).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub width: f32,
    pub height: f32,
    /// Rail thickness between the table edge and the felt.
    pub cushion: f32,
    pub ball_radius: f32,
    /// Pocket capture radius.
    pub pocket_radius: f32,
    /// Distance from a felt corner to the corner pocket jaws.
    pub corner_jaw: f32,
    /// Half-width of a side pocket mouth at the rail face.
    pub side_jaw: f32,
    /// How far side pocket centers sit behind the rail face.
    pub side_pocket_offset: f32,
    /// Gravity well pull (acceleration times distance squared). Zero disables the well.
    pub gravity_strength: f32,
    pub gravity_radius: f32,
    pub ball_restitution: f32,
    /// Seed for rack shuffling.
    pub seed: u64,
    pub tunables: Tunables,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 450.0,
            cushion: 20.0,
            ball_radius: 12.0,
            pocket_radius: 20.0,
            corner_jaw: 34.0,
            side_jaw: 26.0,
            side_pocket_offset: 5.0,
            gravity_strength: 3_000_000.0,
            gravity_radius: 25.0,
            ball_restitution: 1.0,
            seed: 0x5EED_CAFE,
            tunables: Tunables::default(),
        }
    }
}

impl TableConfig {
    /// Parse and validate a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the geometry leaves room to play.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.ball_radius > 0.0 && self.pocket_radius > 0.0 && self.cushion > 0.0) {
            return Err(ConfigError::Geometry(
                "ball radius, pocket radius and cushion must be positive".into(),
            ));
        }
        // Room for a 15-ball rack plus the kitchen.
        let min_felt = self.ball_radius * 12.0;
        if self.width - 2.0 * self.cushion < min_felt * 2.0 || self.height - 2.0 * self.cushion < min_felt {
            return Err(ConfigError::Geometry(format!(
                "felt {}x{} is too small for ball radius {}",
                self.width - 2.0 * self.cushion,
                self.height - 2.0 * self.cushion,
                self.ball_radius
            )));
        }
        if self.side_jaw <= self.ball_radius || self.corner_jaw <= self.ball_radius {
            return Err(ConfigError::Geometry("pocket mouths narrower than a ball".into()));
        }
        Ok(())
    }
}
