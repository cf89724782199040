//! Static table geometry: felt bounds, cushion polygons, pockets and the gravity well.
//!
//! Everything here is built once from a [`TableConfig`] and never mutated.
//! Cushions are convex polygons; their edges become collision segments whose
//! normals point away from the polygon, i.e. into the playing field.

use glam::Vec2;

use crate::api::config::TableConfig;

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Shrink by `d` on every side.
    pub fn inset(&self, d: f32) -> Self {
        Self::new(self.min + Vec2::splat(d), self.max - Vec2::splat(d))
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// One cushion edge with its outward unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RailSegment {
    pub a: Vec2,
    pub b: Vec2,
    pub normal: Vec2,
}

impl RailSegment {
    /// Closest point on the segment to `p`.
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let edge = self.b - self.a;
        let len_sq = edge.length_squared();
        if len_sq < 1e-6 {
            return self.a;
        }
        let t = ((p - self.a).dot(edge) / len_sq).clamp(0.0, 1.0);
        self.a + edge * t
    }
}

/// Convex cushion outline.
#[derive(Debug, Clone, PartialEq)]
pub struct RailPolygon {
    pub points: Vec<Vec2>,
}

impl RailPolygon {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    fn centroid(&self) -> Vec2 {
        let sum: Vec2 = self.points.iter().copied().sum();
        sum / self.points.len().max(1) as f32
    }

    /// One segment per edge, normal facing away from the polygon.
    pub fn segments(&self) -> Vec<RailSegment> {
        let centroid = self.centroid();
        let n = self.points.len();
        (0..n)
            .filter_map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                let edge = b - a;
                if edge.length_squared() < 1e-6 {
                    return None;
                }
                let mut normal = edge.perp().normalize();
                if normal.dot((a + b) * 0.5 - centroid) < 0.0 {
                    normal = -normal;
                }
                Some(RailSegment { a, b, normal })
            })
            .collect()
    }
}

/// A pocket: capture circle plus the two jaw points framing its mouth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pocket {
    pub center: Vec2,
    pub capture_radius: f32,
    pub jaws: [Vec2; 2],
    /// Which side of the jaw line the pocket center lies on (+1 or -1).
    pub mouth_sign: f32,
}

impl Pocket {
    pub fn new(center: Vec2, capture_radius: f32, jaws: [Vec2; 2]) -> Self {
        let side = (jaws[1] - jaws[0]).perp_dot(center - jaws[0]);
        Self {
            center,
            capture_radius,
            jaws,
            mouth_sign: if side < 0.0 { -1.0 } else { 1.0 },
        }
    }

    /// True when `p` has crossed the mouth line between the jaws.
    pub fn is_past_mouth(&self, p: Vec2) -> bool {
        let [j0, j1] = self.jaws;
        let mouth = j1 - j0;
        let len_sq = mouth.length_squared();
        if len_sq < 1e-6 {
            return false;
        }
        let t = (p - j0).dot(mouth) / len_sq;
        let side = mouth.perp_dot(p - j0) * self.mouth_sign;
        (0.0..=1.0).contains(&t) && side > 0.0
    }

    /// Whether a ball centred at `p` drops into this pocket.
    pub fn captures(&self, p: Vec2, ball_radius: f32) -> bool {
        let dist = p.distance(self.center);
        dist < self.capture_radius
            || (dist < self.capture_radius + ball_radius && self.is_past_mouth(p))
    }
}

/// Central attractor that bends rolling balls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityWell {
    pub center: Vec2,
    pub radius: f32,
    pub strength: f32,
}

/// Immutable description of the whole table.
#[derive(Debug, Clone)]
pub struct TableGeometry {
    /// Outer table edge, cushions included.
    pub bounds: Bounds,
    /// Felt inside the cushion faces.
    pub field: Bounds,
    pub rails: Vec<RailPolygon>,
    pub pockets: Vec<Pocket>,
    pub gravity_well: Option<GravityWell>,
    /// Head string: kitchen placement requires x at or below this.
    pub kitchen_x: f32,
    pub cue_spot: Vec2,
    /// Apex of the rack.
    pub foot_spot: Vec2,
    pub ball_radius: f32,
    segments: Vec<RailSegment>,
}

impl TableGeometry {
    pub fn from_config(config: &TableConfig) -> Self {
        let w = config.width;
        let h = config.height;
        let c = config.cushion;
        let cj = config.corner_jaw;
        let sj = config.side_jaw;
        let mid = w / 2.0;

        let bounds = Bounds::new(Vec2::ZERO, Vec2::new(w, h));
        let field = Bounds::new(Vec2::new(c, c), Vec2::new(w - c, h - c));

        let flip_x = |p: Vec2| Vec2::new(w - p.x, p.y);
        let flip_y = |p: Vec2| Vec2::new(p.x, h - p.y);

        // Top-left cushion: corner jaw cut at 45 degrees, side jaw narrowing toward the pocket.
        let top_left = vec![
            Vec2::new(cj, 0.0),
            Vec2::new(mid - sj * 0.7, 0.0),
            Vec2::new(mid - sj, c),
            Vec2::new(c + cj, c),
        ];
        let left = vec![
            Vec2::new(0.0, cj),
            Vec2::new(c, c + cj),
            Vec2::new(c, h - c - cj),
            Vec2::new(0.0, h - cj),
        ];
        let top_right: Vec<Vec2> = top_left.iter().map(|p| flip_x(*p)).collect();
        let bottom_left: Vec<Vec2> = top_left.iter().map(|p| flip_y(*p)).collect();
        let bottom_right: Vec<Vec2> = top_left.iter().map(|p| flip_y(flip_x(*p))).collect();
        let right: Vec<Vec2> = left.iter().map(|p| flip_x(*p)).collect();

        let rails: Vec<RailPolygon> = [top_left, top_right, bottom_left, bottom_right, left, right]
            .into_iter()
            .map(RailPolygon::new)
            .collect();

        let r = config.pocket_radius;
        let corner = |center: Vec2, along_x: Vec2, along_y: Vec2| Pocket::new(center, r, [along_x, along_y]);
        let pockets = vec![
            corner(Vec2::new(c, c), Vec2::new(c + cj, c), Vec2::new(c, c + cj)),
            corner(Vec2::new(w - c, c), Vec2::new(w - c - cj, c), Vec2::new(w - c, c + cj)),
            corner(Vec2::new(c, h - c), Vec2::new(c + cj, h - c), Vec2::new(c, h - c - cj)),
            corner(Vec2::new(w - c, h - c), Vec2::new(w - c - cj, h - c), Vec2::new(w - c, h - c - cj)),
            Pocket::new(
                Vec2::new(mid, c - config.side_pocket_offset),
                r,
                [Vec2::new(mid - sj, c), Vec2::new(mid + sj, c)],
            ),
            Pocket::new(
                Vec2::new(mid, h - c + config.side_pocket_offset),
                r,
                [Vec2::new(mid - sj, h - c), Vec2::new(mid + sj, h - c)],
            ),
        ];

        let gravity_well = (config.gravity_strength > 0.0).then(|| GravityWell {
            center: bounds.center(),
            radius: config.gravity_radius.max(1.0),
            strength: config.gravity_strength,
        });

        let segments = rails.iter().flat_map(|rail| rail.segments()).collect();

        Self {
            bounds,
            field,
            rails,
            pockets,
            gravity_well,
            kitchen_x: field.min.x + field.width() * 0.25,
            cue_spot: Vec2::new(w * 0.25, h / 2.0),
            foot_spot: Vec2::new(w * 0.7, h / 2.0),
            ball_radius: config.ball_radius,
            segments,
        }
    }

    /// All cushion collision segments.
    pub fn segments(&self) -> &[RailSegment] {
        &self.segments
    }

    /// Index of the pocket that captures a ball centred at `p`, if any.
    pub fn pocket_capturing(&self, p: Vec2, ball_radius: f32) -> Option<usize> {
        self.pockets.iter().position(|pocket| pocket.captures(p, ball_radius))
    }
}

impl Default for TableGeometry {
    fn default() -> Self {
        Self::from_config(&TableConfig::default())
    }
}
