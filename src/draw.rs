// Window + software drawing utilities.
// Visual effects provided here:
// 1) A resizable window that shows the particle field.
// 2) Filled squares — the only mark the particles themselves use.
// 3) A tiny 5x7 bitmap font, drawn small for the HUD and scaled up with a
//    layered red glow for the pulsing center label.

use crate::error::Error;
use crate::gamma::GammaLut;
use crate::types::FrameBuffer;
use minifb::{Key, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a resizable window.
    /// Visual: a new black window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let opts = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, opts)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new frame.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current client-area size in pixels. Changes when the user drags the
    /// window edges; the driver rebuilds the particle system when it does.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }
}

/* ---------- Software drawing: pixels, squares, additive glow ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Fill the whole frame with one color.
/// Visual: wipes the previous frame; we call this with black every frame.
pub fn clear(fb: &mut FrameBuffer, color: u32) {
    fb.pixels.fill(color);
}

/// Draw a filled axis-aligned square with its top-left corner at (x,y).
/// Sub-pixel positions are snapped; off-screen parts are clipped.
pub fn fill_square(fb: &mut FrameBuffer, x: f32, y: f32, size: f32, color: u32) {
    let side = size.round().max(1.0) as i32;
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    for yy in y0..y0 + side {
        for xx in x0..x0 + side {
            put_pixel(fb, xx, yy, color);
        }
    }
}

/// Additive blend one RGB triplet at (x,y) with saturation to 255.
/// Visual: the pixel gets brighter; repeated stamps stack toward white.
#[inline]
fn add_rgb_saturating(fb: &mut FrameBuffer, x: i32, y: i32, r: u8, g: u8, b: u8) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    let old = fb.pixels[idx];

    let or = ((old >> 16) & 0xFF) as u16;
    let og = ((old >> 8) & 0xFF) as u16;
    let ob = (old & 0xFF) as u16;

    let nr = (or + r as u16).min(255) as u32;
    let ng = (og + g as u16).min(255) as u32;
    let nb = (ob + b as u16).min(255) as u32;

    fb.pixels[idx] = (nr << 16) | (ng << 8) | nb;
}

/// Stamp a soft round glow disc centered at (cx,cy) with additive blending.
/// `radius` in pixels; `strength` scales brightness; gaussian falloff from
/// the center so overlapping stamps fuse into one continuous halo.
fn draw_additive_disc(
    fb: &mut FrameBuffer,
    cx: i32,
    cy: i32,
    radius: i32,
    base_r: u8,
    base_g: u8,
    base_b: u8,
    strength: f32,
) {
    if radius <= 0 || strength <= 0.0 {
        return;
    }
    let r2 = (radius * radius) as f32;
    let sigma = radius as f32 * 0.5;
    let denom = 2.0 * sigma * sigma;

    // Scan just the bounding box (fast enough for small radii)
    for y in (cy - radius)..=(cy + radius) {
        for x in (cx - radius)..=(cx + radius) {
            let dx = (x - cx) as f32;
            let dy = (y - cy) as f32;
            let d2 = dx * dx + dy * dy;
            if d2 > r2 {
                continue;
            }
            let w = (-d2 / denom).exp() * strength;
            let r = (base_r as f32 * w).round().clamp(0.0, 255.0) as u8;
            let g = (base_g as f32 * w).round().clamp(0.0, 255.0) as u8;
            let b = (base_b as f32 * w).round().clamp(0.0, 255.0) as u8;
            add_rgb_saturating(fb, x, y, r, g, b);
        }
    }
}

/* ---------- 5x7 bitmap font ---------- */

/// Return a 5x7 glyph bitmap for the character set we render.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Uppercase letters for the label and the HUD: H E A R T B F P S
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),

        // Punctuation: space, colon, dot
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y).
/// Visual: a tiny glyph appears with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass: offset by (1,1) in black to improve readability
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32 + 1, y + ry as i32 + 1, 0x00000000);
                }
            }
        }

        // Foreground pass: actual glyph in chosen color
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs at native size (HUD).
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

/// Collect the screen-space origin of every lit font pixel of `text`,
/// centered on (cx,cy), with `px` screen pixels per font pixel.
fn lit_cells(text: &str, cx: f32, cy: f32, px: f32) -> Vec<(f32, f32)> {
    let advance = 6.0 * px; // 5 font pixels + 1 spacing, scaled
    let total_w = text.len() as f32 * advance - px;
    let total_h = 7.0 * px;
    let ox = cx - total_w / 2.0;
    let oy = cy - total_h / 2.0;

    let mut cells = Vec::new();
    for (ci, ch) in text.chars().enumerate() {
        if let Some(rows) = glyph5x7(ch) {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        cells.push((
                            ox + ci as f32 * advance + rx as f32 * px,
                            oy + ry as f32 * px,
                        ));
                    }
                }
            }
        }
    }
    cells
}

/// Draw `text` centered at (cx,cy), scaled by `scale`, in three passes:
/// a tight red glow, a wider red glow, then a sharp near-white fill
/// alpha-blended at `opacity`. All passes land on the same spot, so the
/// glyphs appear to float inside their own halo.
pub fn glow_text_centered(
    fb: &mut FrameBuffer,
    cx: f32,
    cy: f32,
    text: &str,
    scale: f32,
    opacity: f32,
    lut: &GammaLut,
) {
    // Base cell of 6px per font pixel ≈ a 42px-tall line at scale 1.
    let px = 6.0 * scale;
    if px <= 0.0 {
        return;
    }
    let opacity = opacity.clamp(0.0, 1.0);
    let cells = lit_cells(text, cx, cy, px);
    let half = px / 2.0;

    // Pass 1: tight red glow around every lit cell.
    for &(x, y) in &cells {
        draw_additive_disc(fb, (x + half) as i32, (y + half) as i32, 15, 255, 0, 0, 0.10 * opacity);
    }

    // Pass 2: wider, softer red glow on top of the first.
    for &(x, y) in &cells {
        draw_additive_disc(fb, (x + half) as i32, (y + half) as i32, 30, 255, 0, 0, 0.05 * opacity);
    }

    // Pass 3: sharp near-white glyphs, gamma-correct alpha blend.
    let white = 0x00FF_DCDC;
    for &(x, y) in &cells {
        let x0 = x.round() as i32;
        let y0 = y.round() as i32;
        let x1 = (x + px).round() as i32;
        let y1 = (y + px).round() as i32;
        for yy in y0..y1 {
            for xx in x0..x1 {
                if xx < 0 || yy < 0 {
                    continue;
                }
                let (ux, uy) = (xx as usize, yy as usize);
                if ux >= fb.width || uy >= fb.height {
                    continue;
                }
                let idx = uy * fb.width + ux;
                fb.pixels[idx] = lut.blend_u32(fb.pixels[idx], white, opacity);
            }
        }
    }
}
