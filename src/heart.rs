// The beating heart itself: a fixed cloud of base points generated once
// per window size, redrawn every frame with a pulse-driven displacement,
// plus a fresh ring of halo sparks synthesized per frame and thrown away.

use crate::draw::{self, glow_text_centered};
use crate::gamma::GammaLut;
use crate::geometry::{beat_wave, heart_curve, scatter_inside, shrink, MIN_DIST_SQ};
use crate::rng::Rng32;
use crate::types::{BasePoint, FrameBuffer, PointKind, PINK, PURPLE};
use std::f32::consts::{PI, TAU};

/// Text drawn in the middle of the heart.
pub const LABEL: &str = "HEART BEAT";

const OUTLINE_COUNT: usize = 1000;
const EDGE_PER_OUTLINE: usize = 3;
const CENTER_COUNT: usize = 4000;

/// Everything the beat signal decides for one frame.
#[derive(Clone, Copy, Debug)]
pub struct Pulse {
    pub beat: f32,
    pub ratio: f32,        // outward displacement scale for stored points
    pub halo_radius: f32,  // shrink ratio applied to halo sparks
    pub halo_count: usize, // sparks synthesized this frame
    pub text_scale: f32,
    pub text_opacity: f32,
}

impl Pulse {
    /// Derive the frame's scalars from the driver's time counter.
    pub fn at(time: f32) -> Self {
        let phase = (time / 10.0) * PI;
        let beat = beat_wave(phase);
        Self {
            beat,
            ratio: 15.0 * beat,
            halo_radius: 4.0 + 6.0 * (1.0 + beat),
            halo_count: (1000.0 + 1000.0 * beat * beat) as usize,
            text_scale: 1.0 - beat * 0.2,
            text_opacity: (0.7 + beat * 0.3).clamp(0.0, 1.0),
        }
    }
}

fn pick_color(rng: &mut Rng32) -> u32 {
    if rng.next_f32() < 0.8 { PURPLE } else { PINK }
}

pub struct HeartSystem {
    center_x: f32,
    center_y: f32,
    base_points: Vec<BasePoint>,
}

impl HeartSystem {
    /// Generate the full point cloud for a surface of the given size.
    /// The cloud is immutable afterwards; a size change means building a
    /// whole new system, never editing this one.
    pub fn new(width: f32, height: f32, rng: &mut Rng32) -> Self {
        let center_x = width / 2.0;
        let center_y = height / 2.0;

        let mut base_points =
            Vec::with_capacity(OUTLINE_COUNT * (1 + EDGE_PER_OUTLINE) + CENTER_COUNT);

        // 1. Outline: points sampled directly on the curve.
        for _ in 0..OUTLINE_COUNT {
            let t = rng.range(0.0, TAU);
            let (x, y) = heart_curve(t, center_x, center_y);
            base_points.push(BasePoint {
                x,
                y,
                size: rng.range(1.0, 3.0),
                color: pick_color(rng),
                kind: PointKind::Outline,
            });
        }

        // Snapshot of the outline; later pushes must not change the pool
        // the edge and center phases sample from.
        let outline = base_points.clone();

        // 2. Edge: a thin scatter just inside the outline.
        for p in &outline {
            for _ in 0..EDGE_PER_OUTLINE {
                let (x, y) = scatter_inside(p.x, p.y, center_x, center_y, 0.05, rng);
                base_points.push(BasePoint {
                    x,
                    y,
                    size: rng.range(1.0, 2.5),
                    color: pick_color(rng),
                    kind: PointKind::Edge,
                });
            }
        }

        // 3. Center fill: a deep scatter from random outline points.
        for _ in 0..CENTER_COUNT {
            let pick = outline[(rng.next_f32() * outline.len() as f32) as usize];
            let (x, y) = scatter_inside(pick.x, pick.y, center_x, center_y, 0.27, rng);
            base_points.push(BasePoint {
                x,
                y,
                size: rng.range(1.0, 2.5),
                color: pick_color(rng),
                kind: PointKind::Center,
            });
        }

        Self { center_x, center_y, base_points }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.center_x, self.center_y)
    }

    pub fn base_points(&self) -> &[BasePoint] {
        &self.base_points
    }

    /// Draw one frame at the given time counter. Reads the stored points,
    /// never rewrites them; everything per-frame lives on the stack.
    pub fn render(&self, fb: &mut FrameBuffer, time: f32, rng: &mut Rng32, lut: &GammaLut) {
        let pulse = Pulse::at(time);

        draw::clear(fb, 0x0000_0000);

        // Stored points, displaced outward by the pulse plus a 1px jitter.
        for p in &self.base_points {
            let dx = p.x - self.center_x;
            let dy = p.y - self.center_y;
            let dist_sq = (dx * dx + dy * dy).max(MIN_DIST_SQ);
            // Softer falloff than the generation-time shrink, so the live
            // swell reads as breathing rather than collapse.
            let force = 1.0 / dist_sq.powf(0.42);
            let disp_x = pulse.ratio * force * dx + rng.range(-1.0, 1.0);
            let disp_y = pulse.ratio * force * dy + rng.range(-1.0, 1.0);
            draw::fill_square(fb, p.x - disp_x, p.y - disp_y, p.size, p.color);
        }

        // Halo sparks: regenerated from scratch every frame so the fringe
        // keeps its static-noise shimmer. Nothing here survives the frame.
        for _ in 0..pulse.halo_count {
            let t = rng.range(0.0, TAU);
            let (x, y) = heart_curve(t, self.center_x, self.center_y);
            let (x, y) = shrink(x, y, self.center_x, self.center_y, pulse.halo_radius);
            let spark = BasePoint {
                x: x + rng.range(-60.0, 60.0),
                y: y + rng.range(-60.0, 60.0),
                size: if rng.next_f32() < 0.5 { 1.0 } else { 2.0 },
                color: pick_color(rng),
                kind: PointKind::Halo,
            };
            draw::fill_square(fb, spark.x, spark.y, spark.size, spark.color);
        }

        // Label, shrinking and brightening against the beat.
        glow_text_centered(
            fb,
            self.center_x,
            self.center_y,
            LABEL,
            pulse.text_scale,
            pulse.text_opacity,
            lut,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_produces_the_full_cloud() {
        let mut rng = Rng32::from_seed(1);
        let heart = HeartSystem::new(800.0, 600.0, &mut rng);
        let points = heart.base_points();
        assert_eq!(points.len(), 8000);
        assert_eq!(heart.center(), (400.0, 300.0));

        let outline = points.iter().filter(|p| p.kind == PointKind::Outline).count();
        let edge = points.iter().filter(|p| p.kind == PointKind::Edge).count();
        let center = points.iter().filter(|p| p.kind == PointKind::Center).count();
        assert_eq!((outline, edge, center), (1000, 3000, 4000));

        // Stored order is outline, then edge, then center.
        assert_eq!(points[0].kind, PointKind::Outline);
        assert_eq!(points[1000].kind, PointKind::Edge);
        assert_eq!(points[4000].kind, PointKind::Center);

        for p in points {
            assert!(p.x.is_finite() && p.y.is_finite());
            assert!(p.size >= 1.0 && p.size < 3.0);
            assert!(p.color == PURPLE || p.color == PINK);
        }
    }

    #[test]
    fn degenerate_surface_still_constructs() {
        let mut rng = Rng32::from_seed(2);
        for (w, h) in [(0.0, 0.0), (-100.0, -50.0)] {
            let heart = HeartSystem::new(w, h, &mut rng);
            assert_eq!(heart.base_points().len(), 8000);
            assert!(heart.base_points().iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        }
    }

    #[test]
    fn pulse_at_time_zero() {
        let pulse = Pulse::at(0.0);
        assert_eq!(pulse.beat, 0.0);
        assert_eq!(pulse.ratio, 0.0);
        assert_eq!(pulse.halo_radius, 10.0);
        assert_eq!(pulse.halo_count, 1000);
        assert_eq!(pulse.text_scale, 1.0);
        assert!((pulse.text_opacity - 0.7).abs() < 1e-6);
    }

    #[test]
    fn pulse_opacity_stays_clamped() {
        for i in 0..200 {
            let pulse = Pulse::at(i as f32 * 0.37);
            assert!(pulse.text_opacity >= 0.0 && pulse.text_opacity <= 1.0);
        }
    }

    #[test]
    fn render_is_deterministic_for_equal_seeds() {
        let mut rng = Rng32::from_seed(11);
        let heart = HeartSystem::new(320.0, 240.0, &mut rng);
        let lut = GammaLut::new();

        let mut fb_a = FrameBuffer::new(320, 240);
        let mut fb_b = FrameBuffer::new(320, 240);
        let mut rng_a = Rng32::from_seed(99);
        let mut rng_b = Rng32::from_seed(99);

        heart.render(&mut fb_a, 3.7, &mut rng_a, &lut);
        heart.render(&mut fb_b, 3.7, &mut rng_b, &lut);
        assert_eq!(fb_a.pixels, fb_b.pixels);
    }

    #[test]
    fn render_leaves_stored_points_untouched() {
        let mut rng = Rng32::from_seed(13);
        let heart = HeartSystem::new(320.0, 240.0, &mut rng);
        let before = heart.base_points().to_vec();

        let lut = GammaLut::new();
        let mut fb = FrameBuffer::new(320, 240);
        heart.render(&mut fb, 1.0, &mut rng, &lut);
        heart.render(&mut fb, 2.0, &mut rng, &lut);

        assert_eq!(heart.base_points(), &before[..]);
    }

    #[test]
    fn render_tolerates_zero_area_surface() {
        let mut rng = Rng32::from_seed(17);
        let heart = HeartSystem::new(800.0, 600.0, &mut rng);
        let lut = GammaLut::new();
        let mut fb = FrameBuffer::new(0, 0);
        heart.render(&mut fb, 5.0, &mut rng, &lut);
    }

    #[test]
    fn reconstruction_replaces_the_cloud() {
        let mut rng = Rng32::from_seed(19);
        let old = HeartSystem::new(800.0, 600.0, &mut rng);
        let old_points = old.base_points().to_vec();

        let fresh = HeartSystem::new(400.0, 400.0, &mut rng);
        assert_eq!(fresh.center(), (200.0, 200.0));
        assert_eq!(fresh.base_points().len(), 8000);
        assert_ne!(fresh.base_points(), &old_points[..]);
    }
}
