// Pure math behind the animation: the parametric heart curve, the two
// inward-scatter displacements used at generation time, and the periodic
// waveform that drives the pulse.

use crate::rng::Rng32;
use std::f32::consts::TAU;

/// Scale factor from curve units to screen pixels.
pub const IMAGE_ENLARGE: f32 = 11.0;

/// Floor for squared center distances. A point sitting exactly on the
/// center would otherwise divide by zero and turn its force into NaN;
/// with the floor the force saturates instead.
pub const MIN_DIST_SQ: f32 = 1e-6;

/// Evaluate the heart curve at angle `t` (periodic over [0, 2π)), scaled
/// and translated into screen space around (center_x, center_y).
/// The -2cos(3t) and -cos(3t) terms are separate on purpose; folding them
/// into -3cos(3t) draws a different lobe.
pub fn heart_curve(t: f32, center_x: f32, center_y: f32) -> (f32, f32) {
    let x = 17.0 * t.sin().powi(3);
    let y = -(16.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (3.0 * t).cos());
    (x * IMAGE_ENLARGE + center_x, y * IMAGE_ENLARGE + center_y)
}

/// Pull (x,y) toward the center by two independent exponentially
/// distributed ratios (-beta·ln U per axis). Densifies the interior from
/// a point on the outline.
pub fn scatter_inside(
    x: f32,
    y: f32,
    center_x: f32,
    center_y: f32,
    beta: f32,
    rng: &mut Rng32,
) -> (f32, f32) {
    // The uniform draw is floored away from 0 so ln stays finite.
    let ratio_x = -beta * rng.next_f32().max(f32::MIN_POSITIVE).ln();
    let ratio_y = -beta * rng.next_f32().max(f32::MIN_POSITIVE).ln();
    let dx = ratio_x * (x - center_x);
    let dy = ratio_y * (y - center_y);
    (x - dx, y - dy)
}

/// Displace (x,y) along its center offset by an inverse-power attraction,
/// strongest near the center. `ratio` scales the pull.
pub fn shrink(x: f32, y: f32, center_x: f32, center_y: f32, ratio: f32) -> (f32, f32) {
    let dx = x - center_x;
    let dy = y - center_y;
    let dist_sq = (dx * dx + dy * dy).max(MIN_DIST_SQ);
    let force = -1.0 / dist_sq.powf(0.6);
    (x - ratio * force * dx, y - ratio * force * dy)
}

/// Instantaneous beat signal. Periodic in `phase` with period π/2,
/// magnitude bounded by 4/π.
pub fn beat_wave(phase: f32) -> f32 {
    2.0 * (2.0 * (4.0 * phase).sin()) / TAU
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn heart_curve_is_periodic() {
        for i in 0..16 {
            let t = i as f32 * TAU / 16.0;
            let (x0, y0) = heart_curve(t, 100.0, 100.0);
            let (x1, y1) = heart_curve(t + TAU, 100.0, 100.0);
            assert!((x0 - x1).abs() < 1e-2, "x diverged at t={t}");
            assert!((y0 - y1).abs() < 1e-2, "y diverged at t={t}");
        }
    }

    #[test]
    fn heart_curve_top_of_lobe_at_zero() {
        // t=0: sin³ = 0, cos terms collapse to -(16 - 5 - 2 - 1) = -8,
        // scaled by 11 → -88, translated by the center.
        let (x, y) = heart_curve(0.0, 400.0, 300.0);
        assert!((x - 400.0).abs() < 1e-3);
        assert!((y - 212.0).abs() < 1e-3);
    }

    #[test]
    fn beat_wave_bounds_and_period() {
        let limit = 4.0 / PI;
        for i in 0..1000 {
            let p = i as f32 * 0.01;
            let b = beat_wave(p);
            assert!(b.abs() <= limit + 1e-5);
            let b_next = beat_wave(p + PI / 2.0);
            assert!((b - b_next).abs() < 1e-4, "period broken at phase {p}");
        }
    }

    #[test]
    fn beat_wave_zero_at_origin() {
        assert_eq!(beat_wave(0.0), 0.0);
    }

    #[test]
    fn shrink_finite_at_center() {
        let (x, y) = shrink(400.0, 300.0, 400.0, 300.0, 10.0);
        assert!(x.is_finite() && y.is_finite());
    }

    #[test]
    fn scatter_finite_at_center() {
        let mut rng = Rng32::from_seed(5);
        for _ in 0..100 {
            let (x, y) = scatter_inside(400.0, 300.0, 400.0, 300.0, 0.27, &mut rng);
            assert!(x.is_finite() && y.is_finite());
        }
    }

    #[test]
    fn scatter_moves_toward_center_on_average() {
        let mut rng = Rng32::from_seed(9);
        let (cx, cy) = (0.0, 0.0);
        let mut closer = 0;
        for _ in 0..500 {
            let (x, y) = scatter_inside(100.0, 50.0, cx, cy, 0.27, &mut rng);
            assert!(x.is_finite() && y.is_finite());
            if x.hypot(y) < 100.0f32.hypot(50.0) {
                closer += 1;
            }
        }
        // Exponential pull is inward essentially always for positive beta.
        assert!(closer > 450);
    }
}
