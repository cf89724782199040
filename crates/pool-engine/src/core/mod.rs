pub mod ball_set;
pub mod easing;
pub mod physics;
pub mod rack;
pub mod rng;
pub mod time;
