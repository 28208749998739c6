// What you SEE:
// • A black window with a heart-shaped particle cloud pulsing to a beat.
// • A shimmering halo of sparks around the outline, denser on the beat.
// • A glowing "HEART BEAT" label breathing in the middle. ESC quits.
// Dragging the window edges rebuilds the whole cloud for the new size.

mod draw;
mod error;
mod gamma;
mod geometry;
mod heart;
mod rng;
mod types;

use draw::{draw_text_5x7, Drawer};
use error::Error;
use gamma::GammaLut;
use heart::HeartSystem;
use rng::Rng32;
use std::time::{Duration, Instant};
use types::FrameBuffer;

const INITIAL_WIDTH: usize = 800;
const INITIAL_HEIGHT: usize = 600;

// The time counter is an opaque beat phase, not wall clock: it advances by
// a fixed 1/15 per frame no matter how fast frames actually come.
const TIME_STEP: f32 = 1.0 / 15.0;

/// Owns the window, the screen buffer, the particle system and the time
/// counter. All loop state lives in one place so the whole animation has
/// one explicit lifecycle: `new` then `run`.
struct App {
    drawer: Drawer,
    screen: FrameBuffer,
    heart: HeartSystem,
    rng: Rng32,
    lut: GammaLut,
    time: f32,
}

impl App {
    fn new() -> Result<Self, Error> {
        let drawer = Drawer::new("Heart Beat — Particle Field", INITIAL_WIDTH, INITIAL_HEIGHT)?;
        let (w, h) = drawer.size();
        let mut rng = Rng32::from_seed(0xBEA7_1DEA);
        let heart = HeartSystem::new(w as f32, h as f32, &mut rng);
        Ok(Self {
            drawer,
            screen: FrameBuffer::new(w, h),
            heart,
            rng,
            lut: GammaLut::new(),
            time: 0.0,
        })
    }

    /// Throw away the old system and build a fresh one when the window
    /// size changed. The old cloud is never patched in place.
    fn rebuild_on_resize(&mut self) {
        let (w, h) = self.drawer.size();
        if w != self.screen.width || h != self.screen.height {
            self.screen = FrameBuffer::new(w, h);
            self.heart = HeartSystem::new(w as f32, h as f32, &mut self.rng);
        }
    }

    fn run(&mut self) -> Result<(), Error> {
        /* --- FPS bookkeeping ---
           Visual: small HUD line in the corner + one terminal line per second. */
        let mut last_fps_time = Instant::now();
        let mut frames_this_second: u32 = 0;
        let mut hud_fps_text = String::from("FPS: 0.0");

        while self.drawer.is_open() && !self.drawer.esc_pressed() {
            self.rebuild_on_resize();

            self.heart.render(&mut self.screen, self.time, &mut self.rng, &self.lut);
            self.time += TIME_STEP;

            draw_text_5x7(&mut self.screen, 8, 8, &hud_fps_text, 0x00FF_FFFF);

            self.drawer.present(&self.screen)?;

            frames_this_second += 1;
            let now = Instant::now();
            if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
                let secs = now.duration_since(last_fps_time).as_secs_f32();
                let fps = frames_this_second as f32 / secs;
                println!("FPS: {fps:.1}");
                hud_fps_text = format!("FPS: {fps:.1}");
                frames_this_second = 0;
                last_fps_time = now;
            }
        }

        Ok(())
    }
}

fn main() -> Result<(), Error> {
    App::new()?.run()
}
