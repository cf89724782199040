// core/easing.rs
//
// Scalar blends shared by the friction and gravity models.
// No dependencies on balls or tables, just math.

/// Linear interpolation between `a` and `b` at `t` (unclamped).
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep: 0 at or below `edge0`, 1 at or above `edge1`,
/// with zero slope at both ends.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothstep_endpoints() {
        assert_eq!(smoothstep(10.0, 20.0, 5.0), 0.0);
        assert_eq!(smoothstep(10.0, 20.0, 25.0), 1.0);
        assert!((smoothstep(10.0, 20.0, 15.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn smoothstep_is_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = smoothstep(0.0, 1.0, i as f32 / 100.0);
            assert!(v >= prev, "smoothstep dipped at step {}", i);
            prev = v;
        }
    }

    #[test]
    fn degenerate_edges_become_a_step() {
        assert_eq!(smoothstep(3.0, 3.0, 2.9), 0.0);
        assert_eq!(smoothstep(3.0, 3.0, 3.0), 1.0);
    }

    #[test]
    fn lerp_midpoint() {
        assert_eq!(lerp(0.96, 0.992, 0.0), 0.96);
        assert!((lerp(2.0, 4.0, 0.5) - 3.0).abs() < 1e-6);
    }
}
