use glam::Vec2;

use crate::api::config::Tunables;
use crate::api::types::BallId;
use crate::components::ball::Ball;
use crate::components::table::{Bounds, GravityWell, RailSegment, TableGeometry};
use crate::core::easing::{lerp, smoothstep};
use crate::core::time::clamp_dt;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Below this speed (units/s) a ball counts as stopped and is snapped to rest.
pub const MIN_SPEED: f32 = 6.0;
/// Speeds at which friction blends from the low-speed to the high-speed coefficient.
pub const SLOW_SPEED: f32 = 30.0;
pub const FAST_SPEED: f32 = 300.0;
/// Friction coefficients are expressed as retention per frame at this rate.
pub const REFERENCE_FPS: f32 = 60.0;
/// Each sub-step moves a ball at most this fraction of its radius.
pub const SUBSTEP_FRACTION: f32 = 0.5;
pub const MAX_SUBSTEPS: u32 = 64;
pub const CUSHION_RESTITUTION: f32 = 0.9;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Something the integrator observed during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsEvent {
    /// Two balls touched.
    Contact { a: BallId, b: BallId },
    /// A ball bounced off a cushion or the outer border.
    Cushion { ball: BallId },
    /// A ball dropped into pocket `pocket` and is now inactive.
    Pocketed { ball: BallId, pocket: usize },
}

// ---------------------------------------------------------------------------
// Integrator
// ---------------------------------------------------------------------------

/// Advances every active ball by one frame.
#[derive(Debug, Clone, Copy)]
pub struct Integrator {
    ball_restitution: f32,
    cushion_restitution: f32,
}

impl Integrator {
    pub fn new(ball_restitution: f32) -> Self {
        Self {
            ball_restitution: ball_restitution.clamp(0.0, 1.0),
            cushion_restitution: CUSHION_RESTITUTION,
        }
    }

    /// Step the table and append what happened to `events`.
    ///
    /// Gravity is applied once per frame. The frame is then split into
    /// sub-steps sized for the fastest ball; each sub-step moves every ball
    /// (pocket check, then cushions) and resolves every unordered pair.
    /// Friction is applied once at the end.
    pub fn step_into(
        &self,
        balls: &mut [Ball],
        table: &TableGeometry,
        tunables: &Tunables,
        dt: f32,
        events: &mut Vec<PhysicsEvent>,
    ) {
        let dt = clamp_dt(dt);
        if dt <= 0.0 {
            return;
        }
        let tunables = tunables.clamped();

        if tunables.gravity_enabled {
            if let Some(well) = &table.gravity_well {
                for ball in balls.iter_mut().filter(|b| b.active && b.is_moving(MIN_SPEED)) {
                    apply_gravity(ball, well, dt);
                }
            }
        }

        let steps = balls
            .iter()
            .filter(|b| b.active)
            .map(|b| substep_count(b.speed() * dt, b.radius))
            .max()
            .unwrap_or(1);
        let sub_dt = dt / steps as f32;
        let first_event = events.len();

        for _ in 0..steps {
            for ball in balls.iter_mut().filter(|b| b.active) {
                self.advance(ball, table, sub_dt, events);
            }
            self.resolve_ball_pairs(balls, events, first_event);
        }

        for ball in balls.iter_mut().filter(|b| b.active) {
            apply_friction(ball, &tunables, dt);
        }
    }

    /// Move one ball through a single sub-step.
    fn advance(&self, ball: &mut Ball, table: &TableGeometry, sub_dt: f32, events: &mut Vec<PhysicsEvent>) {
        ball.pos += ball.vel * sub_dt;

        if let Some(pocket) = table.pocket_capturing(ball.pos, ball.radius) {
            ball.pocket();
            log::debug!("ball {} dropped into pocket {}", ball.id.0, pocket);
            events.push(PhysicsEvent::Pocketed { ball: ball.id, pocket });
            return;
        }

        let mut hit = false;
        for segment in table.segments() {
            hit |= self.collide_segment(ball, segment);
        }
        hit |= self.bounce_border(ball, table.bounds);
        if hit {
            events.push(PhysicsEvent::Cushion { ball: ball.id });
        }
    }

    /// Push the ball out of a cushion segment and reflect its inbound velocity.
    /// Returns true if the ball bounced.
    fn collide_segment(&self, ball: &mut Ball, segment: &RailSegment) -> bool {
        let closest = segment.closest_point(ball.pos);
        let offset = ball.pos - closest;
        let dist_sq = offset.length_squared();
        if dist_sq >= ball.radius * ball.radius {
            return false;
        }

        // Out along center - closest; the face normal only when the centre lies on the segment.
        let dist = dist_sq.sqrt();
        let normal = if dist > 1e-4 { offset / dist } else { segment.normal };
        ball.pos = closest + normal * ball.radius;

        let into = ball.vel.dot(normal);
        if into < 0.0 {
            ball.vel -= normal * into * (1.0 + self.cushion_restitution);
            true
        } else {
            false
        }
    }

    /// Straight-edge fallback against the outer table edge, catching balls
    /// that slip into the gaps around pocket mouths.
    fn bounce_border(&self, ball: &mut Ball, bounds: Bounds) -> bool {
        let inner = bounds.inset(ball.radius);
        let e = self.cushion_restitution;
        let mut hit = false;

        if ball.pos.x < inner.min.x {
            ball.pos.x = inner.min.x;
            if ball.vel.x < 0.0 {
                ball.vel.x = -ball.vel.x * e;
                hit = true;
            }
        } else if ball.pos.x > inner.max.x {
            ball.pos.x = inner.max.x;
            if ball.vel.x > 0.0 {
                ball.vel.x = -ball.vel.x * e;
                hit = true;
            }
        }

        if ball.pos.y < inner.min.y {
            ball.pos.y = inner.min.y;
            if ball.vel.y < 0.0 {
                ball.vel.y = -ball.vel.y * e;
                hit = true;
            }
        } else if ball.pos.y > inner.max.y {
            ball.pos.y = inner.max.y;
            if ball.vel.y > 0.0 {
                ball.vel.y = -ball.vel.y * e;
                hit = true;
            }
        }

        hit
    }

    /// One `Contact` per pair per frame; `events[since..]` is this frame so far.
    fn resolve_ball_pairs(&self, balls: &mut [Ball], events: &mut Vec<PhysicsEvent>, since: usize) {
        for i in 0..balls.len() {
            let (head, tail) = balls.split_at_mut(i + 1);
            let a = &mut head[i];
            if !a.active {
                continue;
            }
            for b in tail.iter_mut().filter(|b| b.active) {
                if resolve_contact(a, b, self.ball_restitution) {
                    let contact = PhysicsEvent::Contact { a: a.id, b: b.id };
                    if !events[since..].contains(&contact) {
                        events.push(contact);
                    }
                }
            }
        }
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(1.0)
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Sub-steps needed so a ball travelling `distance` this frame never moves
/// more than `SUBSTEP_FRACTION` of its radius at once.
pub fn substep_count(distance: f32, radius: f32) -> u32 {
    let per_step = (radius * SUBSTEP_FRACTION).max(1e-3);
    let n = (distance / per_step).ceil();
    if n.is_finite() {
        (n as u32).clamp(1, MAX_SUBSTEPS)
    } else {
        MAX_SUBSTEPS
    }
}

/// Resolve an overlapping pair as an equal-mass collision along the contact normal.
///
/// Velocities change only while the pair is closing; overlap is always split
/// evenly. Returns true if the balls were touching. Coincident centres are skipped.
pub fn resolve_contact(a: &mut Ball, b: &mut Ball, restitution: f32) -> bool {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let min_dist = a.radius + b.radius;
    if dist >= min_dist || dist <= 0.0 {
        return false;
    }

    let normal = delta / dist;
    let closing = (b.vel - a.vel).dot(normal);
    if closing < 0.0 {
        let impulse = normal * (closing * (1.0 + restitution) * 0.5);
        a.vel += impulse;
        b.vel -= impulse;
    }

    let separation = normal * ((min_dist - dist) * 0.5);
    a.pos -= separation;
    b.pos += separation;
    true
}

/// Inverse-square pull toward the well, faded out for balls that are both
/// slow and far away so settled balls are not re-animated.
fn apply_gravity(ball: &mut Ball, well: &GravityWell, dt: f32) {
    let to_well = well.center - ball.pos;
    let dist = to_well.length();
    if dist < 1e-3 {
        return;
    }

    let floored = dist.max(well.radius);
    let accel = well.strength / (floored * floored);

    let near = 1.0 - smoothstep(well.radius * 2.0, well.radius * 8.0, dist);
    let fast = smoothstep(MIN_SPEED, MIN_SPEED * 10.0, ball.speed());
    let scale = 1.0 - (1.0 - near) * (1.0 - fast);

    ball.vel += to_well / dist * (accel * scale * dt);
}

/// Speed-dependent rolling friction, applied once per frame.
fn apply_friction(ball: &mut Ball, tunables: &Tunables, dt: f32) {
    let speed = ball.speed();
    let blend = smoothstep(SLOW_SPEED, FAST_SPEED, speed);
    let retention = lerp(tunables.low_speed_friction, tunables.high_speed_friction, blend);
    ball.vel *= retention.powf(dt * REFERENCE_FPS);

    if ball.speed() < MIN_SPEED {
        ball.vel = Vec2::ZERO;
    }
}
