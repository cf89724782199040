/// Upper bound on a single integration step, in seconds.
/// Larger frame gaps (tab switches, hitches) are truncated rather than replayed.
pub const MAX_DT: f32 = 0.02;

/// Clamp an externally supplied frame delta to the integrator's stable range.
/// Negative or non-finite deltas collapse to zero.
pub fn clamp_dt(dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        0.0
    } else {
        dt.min(MAX_DT)
    }
}

/// Turns display-refresh timestamps into frame deltas.
pub struct FrameClock {
    /// Timestamp of the previous frame in milliseconds.
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Record a frame timestamp (ms) and return the clamped delta in seconds.
    /// The first frame yields zero.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        clamp_dt(dt)
    }

    /// Forget the previous timestamp (e.g. after the page was hidden).
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
