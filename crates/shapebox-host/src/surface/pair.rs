use super::{DrawColor, PixelBuffer};

/// The off-screen/on-screen buffer pair plus the current fill color.
///
/// All drawing primitives touch only the `draw` side; [`present`] is the one
/// operation that copies it onto `screen`. The color is per-draw state: the
/// simulation sets it before each fill it cares about, and nothing here
/// retains it across a frame on its behalf.
///
/// [`present`]: SurfacePair::present
#[derive(Debug)]
pub struct SurfacePair {
    draw: PixelBuffer,
    screen: PixelBuffer,
    color: DrawColor,
}

impl SurfacePair {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            draw: PixelBuffer::new(width, height),
            screen: PixelBuffer::new(width, height),
            color: DrawColor::default(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.draw.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.draw.height()
    }

    pub fn draw(&self) -> &PixelBuffer {
        &self.draw
    }

    pub fn screen(&self) -> &PixelBuffer {
        &self.screen
    }

    /// Sets the fill color for subsequent fills.
    pub fn set_color(&mut self, color: DrawColor) {
        self.color = color;
    }

    /// Fills a rectangle on the off-screen buffer with the current color.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.draw.fill_rect(x, y, w, h, self.color);
    }

    /// Fills the entire off-screen buffer with the current color.
    pub fn clear(&mut self) {
        self.draw.fill(self.color);
    }

    /// Copies the off-screen buffer onto the on-screen buffer, unscaled at
    /// the origin. Nothing drawn is visible until this is called.
    pub fn present(&mut self) {
        self.screen.copy_from(&self.draw);
    }

    /// Resizes both buffers to `(width, height)`. The buffers are never
    /// resized independently.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.draw.resize(width, height);
        self.screen.resize(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(r: i32, g: i32, b: i32, a: i32) -> DrawColor {
        DrawColor::from_channels(r, g, b, a)
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_keeps_both_buffers_in_lockstep() {
        let mut pair = SurfacePair::new(800, 600);
        for &(w, h) in &[(1024, 768), (320, 200), (1, 1)] {
            pair.resize(w, h);
            assert_eq!((pair.draw().width(), pair.draw().height()), (w, h));
            assert_eq!((pair.screen().width(), pair.screen().height()), (w, h));
        }
    }

    // ── present ───────────────────────────────────────────────────────────

    #[test]
    fn drawing_without_present_never_changes_screen() {
        let mut pair = SurfacePair::new(8, 8);
        pair.set_color(color(255, 255, 255, 255));
        pair.clear();
        pair.fill_rect(1, 1, 3, 3);

        assert!(pair.screen().pixels().iter().all(|&px| px == 0));
    }

    #[test]
    fn present_makes_screen_bit_identical_to_draw() {
        let mut pair = SurfacePair::new(8, 8);
        pair.set_color(color(40, 80, 120, 255));
        pair.clear();
        pair.set_color(color(255, 0, 0, 128));
        pair.fill_rect(2, 2, 4, 4);
        pair.present();

        assert_eq!(pair.screen().pixels(), pair.draw().pixels());
    }

    #[test]
    fn present_snapshots_draw_at_call_time() {
        let mut pair = SurfacePair::new(4, 4);
        pair.set_color(color(255, 255, 255, 255));
        pair.clear();
        pair.present();
        let snapshot = pair.screen().pixels().to_vec();

        pair.set_color(color(0, 255, 0, 255));
        pair.fill_rect(0, 0, 4, 4);
        assert_eq!(pair.screen().pixels(), &snapshot[..]);
    }

    // ── drawing state ─────────────────────────────────────────────────────

    #[test]
    fn clear_uses_the_current_color() {
        let mut pair = SurfacePair::new(2, 2);
        pair.set_color(color(0, 0, 255, 255));
        pair.clear();

        let expected = color(0, 0, 255, 255).over(0);
        assert!(pair.draw().pixels().iter().all(|&px| px == expected));
    }

    #[test]
    fn translucent_fill_composites_over_existing_pixels() {
        let mut pair = SurfacePair::new(1, 1);
        pair.set_color(color(255, 255, 255, 255));
        pair.clear();
        pair.set_color(color(0, 0, 0, 128));
        pair.clear();

        let base = color(255, 255, 255, 255).over(0);
        let expected = color(0, 0, 0, 128).over(base);
        assert_eq!(pair.draw().get(0, 0), Some(expected));
    }
}
