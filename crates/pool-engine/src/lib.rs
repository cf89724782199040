pub mod api;
pub mod core;
pub mod components;
pub mod rules;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::table::Table;
pub use api::config::{TableConfig, Tunables, TunableChange, ConfigError};
pub use api::types::{BallId, BallMask, Group, Player};
pub use api::aim::{AimFeedback, aim_feedback, launch_velocity, MIN_SHOT_POWER};
pub use components::ball::{Ball, BallColor, BallDef, BallKind, BALL_DEFS};
pub use components::table::{Bounds, GravityWell, Pocket, RailPolygon, RailSegment, TableGeometry};
pub use core::ball_set::BallSet;
pub use core::physics::{Integrator, PhysicsEvent};
pub use core::rng::Rng;
pub use core::time::{FrameClock, MAX_DT};
pub use rules::{Foul, GameMode, GameState, MatchState, PlacementError, ShotData, ShotOutcome, ShotTracker};
pub use renderer::instance::{BallInstance, BallBuffer};
pub use input::queue::{Command, CommandQueue};
pub use bridge::snapshot::{BallView, TableSnapshot};
