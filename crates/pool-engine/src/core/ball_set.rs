use crate::api::types::BallId;
use crate::components::ball::Ball;

/// Ball storage using a flat Vec.
/// At most 16 balls, so lookups are linear scans.
#[derive(Debug, Clone, Default)]
pub struct BallSet {
    balls: Vec<Ball>,
}

impl BallSet {
    pub fn new() -> Self {
        Self {
            balls: Vec::with_capacity(16),
        }
    }

    pub fn from_balls(balls: Vec<Ball>) -> Self {
        Self { balls }
    }

    /// Replace the contents (used when racking).
    pub fn replace(&mut self, balls: Vec<Ball>) {
        self.balls = balls;
    }

    pub fn get(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BallId) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.id == id)
    }

    pub fn cue(&self) -> Option<&Ball> {
        self.get(BallId::CUE)
    }

    pub fn cue_mut(&mut self) -> Option<&mut Ball> {
        self.get_mut(BallId::CUE)
    }

    /// Whether the ball exists and is still on the table.
    pub fn is_active(&self, id: BallId) -> bool {
        self.get(id).is_some_and(|b| b.active)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }

    /// Balls still on the table.
    pub fn active(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter().filter(|b| b.active)
    }

    /// Mutable slice for the integrator's pairwise pass.
    pub fn as_mut_slice(&mut self) -> &mut [Ball] {
        &mut self.balls
    }

    /// True while any active ball is faster than `min_speed`.
    /// This is the single authority for "the shot has ended".
    pub fn any_moving(&self, min_speed: f32) -> bool {
        self.balls.iter().any(|b| b.is_moving(min_speed))
    }

    /// Lowest-numbered object ball still on the table.
    pub fn lowest_active_object(&self) -> Option<BallId> {
        self.active().map(|b| b.id).filter(|id| !id.is_cue()).min()
    }
}
