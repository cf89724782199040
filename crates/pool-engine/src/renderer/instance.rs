use bytemuck::{Pod, Zeroable};

use crate::components::ball::{BallDef, BallKind};
use crate::core::ball_set::BallSet;

/// Per-ball render data read directly from wasm memory by the TypeScript renderer.
/// Must match the TypeScript protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BallInstance {
    /// X position in world space.
    pub x: f32,
    /// Y position in world space.
    pub y: f32,
    pub radius: f32,
    /// Ball number (0 = cue ball).
    pub number: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// 1.0 for striped balls, 0.0 otherwise.
    pub stripe: f32,
}

impl BallInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Packed instances for every ball still on the table.
pub struct BallBuffer {
    pub instances: Vec<BallInstance>,
}

impl BallBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(16),
        }
    }

    /// Refill from the active balls, in ball order.
    pub fn rebuild(&mut self, balls: &BallSet) {
        self.instances.clear();
        self.instances.extend(balls.active().map(|ball| {
            let def = BallDef::of(ball.id);
            BallInstance {
                x: ball.pos.x,
                y: ball.pos.y,
                radius: ball.radius,
                number: def.number as f32,
                r: def.color.r,
                g: def.color.g,
                b: def.color.b,
                stripe: if def.kind == BallKind::Stripe { 1.0 } else { 0.0 },
            }
        }));
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Flat float view of the buffer.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for reads from JS.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for BallBuffer {
    fn default() -> Self {
        Self::new()
    }
}
