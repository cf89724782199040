// rules/mod.rs
//
// Everything that turns a finished shot into a game decision.
// Pure functions over ShotData + MatchState + BallSet; the Table applies the results.

pub mod fouls;
pub mod mode;
pub mod placement;
pub mod referee;
pub mod shot;

pub use fouls::{check_foul, Foul};
pub use mode::{GameMode, GameState, MatchState, ModeConfig};
pub use placement::{check_placement, is_valid_placement, PlacementError};
pub use referee::{judge, ShotOutcome};
pub use shot::{ShotData, ShotTracker};
