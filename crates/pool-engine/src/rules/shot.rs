use crate::api::types::{BallId, BallMask};
use crate::core::physics::PhysicsEvent;

/// What happened during one shot, from strike until every ball is at rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShotData {
    /// First object ball the cue ball touched.
    pub first_hit: Option<BallId>,
    /// Balls that touched a cushion after the first contact.
    pub cushion_after_contact: BallMask,
    /// Object balls pocketed, in order.
    pub pocketed: Vec<BallId>,
    pub cue_hit_cushion: bool,
}

impl ShotData {
    pub fn pocketed_ball(&self, id: BallId) -> bool {
        self.pocketed.contains(&id)
    }

    pub fn any_cushion_after_contact(&self) -> bool {
        !self.cushion_after_contact.is_empty()
    }
}

/// Folds integrator events into a [`ShotData`] while a shot is in progress.
#[derive(Debug, Clone, Default)]
pub struct ShotTracker {
    data: ShotData,
    in_progress: bool,
}

impl ShotTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new shot.
    pub fn reset_shot(&mut self) {
        self.data = ShotData::default();
        self.in_progress = true;
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn data(&self) -> &ShotData {
        &self.data
    }

    pub fn record(&mut self, event: &PhysicsEvent) {
        if !self.in_progress {
            return;
        }
        match *event {
            PhysicsEvent::Contact { a, b } => {
                if self.data.first_hit.is_none() {
                    if a.is_cue() {
                        self.data.first_hit = Some(b);
                    } else if b.is_cue() {
                        self.data.first_hit = Some(a);
                    }
                }
            }
            PhysicsEvent::Cushion { ball } => {
                if ball.is_cue() {
                    self.data.cue_hit_cushion = true;
                }
                if self.data.first_hit.is_some() {
                    self.data.cushion_after_contact.insert(ball);
                }
            }
            PhysicsEvent::Pocketed { ball, .. } => {
                if !ball.is_cue() && !self.data.pocketed.contains(&ball) {
                    self.data.pocketed.push(ball);
                }
            }
        }
    }

    /// End the shot and hand back what was recorded.
    pub fn finish(&mut self) -> Option<ShotData> {
        if !self.in_progress {
            return None;
        }
        self.in_progress = false;
        Some(std::mem::take(&mut self.data))
    }
}
