//! Curved path synthesis (§4.5): turns a straight start→target line into
//! a handful of waypoints bowed off that line, in one of six styles.

use std::f64::consts::PI;

use rand::Rng;

use catsim_core::{Boundaries, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurvedPathStyle {
    SineWave,
    ProgressiveCurve,
    RandomOffset,
    Zigzag,
    SharpTurn,
    Spiral,
}

impl CurvedPathStyle {
    pub const WANDERING: [CurvedPathStyle; 3] =
        [CurvedPathStyle::SineWave, CurvedPathStyle::ProgressiveCurve, CurvedPathStyle::RandomOffset];
    pub const PLAYING: [CurvedPathStyle; 3] =
        [CurvedPathStyle::Zigzag, CurvedPathStyle::SharpTurn, CurvedPathStyle::Spiral];

    pub fn random_wandering(rng: &mut impl Rng) -> Self {
        Self::WANDERING[rng.gen_range(0..Self::WANDERING.len())]
    }

    pub fn random_playing(rng: &mut impl Rng) -> Self {
        Self::PLAYING[rng.gen_range(0..Self::PLAYING.len())]
    }

    fn offset(&self, t: f64, zigzag_sign: &mut f64, rng: &mut impl Rng) -> f64 {
        match self {
            CurvedPathStyle::SineWave => (2.0 * PI * t).sin() * rng.gen_range(30.0..=60.0),
            CurvedPathStyle::ProgressiveCurve => (t * t - 0.5) * rng.gen_range(40.0..=80.0),
            CurvedPathStyle::RandomOffset => rng.gen_range(-70.0..=70.0),
            CurvedPathStyle::Zigzag => {
                *zigzag_sign = -*zigzag_sign;
                *zigzag_sign * rng.gen_range(40.0..=80.0)
            }
            CurvedPathStyle::SharpTurn => {
                if (t - 0.5).abs() < 0.15 {
                    rng.gen_range(60.0..=120.0)
                } else {
                    0.0
                }
            }
            CurvedPathStyle::Spiral => (4.0 * PI * t).sin() * t * rng.gen_range(30.0..=60.0),
        }
    }
}

/// Synthesizes a curved path of `ceil(dist / 150)` (±1) waypoints
/// between `start` and `target`, always ending with `target` exactly.
pub fn synthesize_path(
    start: Position,
    target: Position,
    style: CurvedPathStyle,
    rng: &mut impl Rng,
) -> Vec<Position> {
    let dx = target.x - start.x;
    let dy = target.y - start.y;
    let dist = (dx * dx + dy * dy).sqrt();

    if dist < f64::EPSILON {
        return vec![target];
    }

    let (px, py) = (-dy / dist, dx / dist);

    let base_count = (dist / 150.0).ceil() as i64;
    let jitter = rng.gen_range(-1_i64..=1);
    let waypoint_count = (base_count + jitter).max(1) as usize;

    let mut zigzag_sign = 1.0_f64;
    let mut points = Vec::with_capacity(waypoint_count + 1);
    for i in 1..=waypoint_count {
        let t = i as f64 / (waypoint_count + 1) as f64;
        let offset = style.offset(t, &mut zigzag_sign, rng);
        points.push(Position::new(start.x + dx * t + px * offset, start.y + dy * t + py * offset));
    }
    points.push(target);
    points
}

/// A uniformly random point inside `bounds`.
pub fn random_target_in(bounds: Boundaries, rng: &mut impl Rng) -> Position {
    Position::new(
        rng.gen_range(bounds.min_x..=bounds.max_x),
        rng.gen_range(bounds.min_y..=bounds.max_y),
    )
}

/// Distance from `p` to its closest point in `visited`, or `f64::INFINITY`
/// if `visited` is empty.
pub fn min_distance_to_visited(p: Position, visited: &[Position]) -> f64 {
    visited.iter().map(|v| p.distance_to(v)).fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_always_ends_at_target_exactly() {
        let mut rng = rand::thread_rng();
        let start = Position::new(0.0, 0.0);
        let target = Position::new(300.0, 400.0);
        for style in CurvedPathStyle::WANDERING.iter().chain(CurvedPathStyle::PLAYING.iter()) {
            let path = synthesize_path(start, target, *style, &mut rng);
            assert_eq!(*path.last().unwrap(), target);
        }
    }

    #[test]
    fn waypoint_count_scales_with_distance() {
        let mut rng = rand::thread_rng();
        let start = Position::new(0.0, 0.0);
        let near = synthesize_path(start, Position::new(100.0, 0.0), CurvedPathStyle::RandomOffset, &mut rng);
        let far = synthesize_path(start, Position::new(3000.0, 0.0), CurvedPathStyle::RandomOffset, &mut rng);
        assert!(far.len() > near.len());
    }

    #[test]
    fn zero_distance_returns_single_point_at_target() {
        let mut rng = rand::thread_rng();
        let p = Position::new(10.0, 10.0);
        let path = synthesize_path(p, p, CurvedPathStyle::SineWave, &mut rng);
        assert_eq!(path, vec![p]);
    }

    #[test]
    fn min_distance_to_empty_visited_is_infinite() {
        assert_eq!(min_distance_to_visited(Position::new(0.0, 0.0), &[]), f64::INFINITY);
    }
}
