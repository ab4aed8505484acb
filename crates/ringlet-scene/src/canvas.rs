//! Transparent 2D drawing surface for the starfield layer.

use ringlet_core::{Rgb, Viewport};

use crate::color::blend;

/// A color with straight (non-premultiplied) opacity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub color: Rgb,
    pub alpha: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        color: Rgb::BLACK,
        alpha: 0.0,
    };

    pub fn new(color: Rgb, alpha: f32) -> Self {
        Self {
            color,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Source-over compositing of `src` on top of `self`.
    pub fn under(self, src: Rgba) -> Rgba {
        let alpha = src.alpha + self.alpha * (1.0 - src.alpha);
        if alpha <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        // Weight of the source in the resulting straight color.
        let weight = src.alpha / alpha;
        Rgba {
            color: blend(self.color, src.color, weight),
            alpha,
        }
    }

    /// Flatten onto an opaque backdrop.
    pub fn over_opaque(self, backdrop: Rgb) -> Rgb {
        blend(backdrop, self.color, self.alpha)
    }
}

/// RGBA pixel grid, cleared to transparent.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Canvas {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            width: viewport.width(),
            height: viewport.height(),
            pixels: vec![Rgba::TRANSPARENT; viewport.area()],
        }
    }

    /// Match the viewport size. Like an HTML canvas, resizing drops the contents.
    pub fn resize(&mut self, viewport: Viewport) {
        *self = Self::new(viewport);
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[self.index(x, y)])
    }

    /// Fill a disc whose opacity falls linearly from 1 at the center to 0 at `radius`.
    ///
    /// Pixels are sampled at their centers. Parts of the disc outside the
    /// canvas are skipped.
    pub fn fill_radial_gradient(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb) {
        if !(cx.is_finite() && cy.is_finite()) || radius <= 0.0 {
            return;
        }

        let x0 = (cx - radius).floor().max(0.0);
        let y0 = (cy - radius).floor().max(0.0);
        let x1 = (cx + radius).ceil().min(self.width as f32);
        let y1 = (cy + radius).ceil().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for y in y0 as u32..y1 as u32 {
            for x in x0 as u32..x1 as u32 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let distance = (dx * dx + dy * dy).sqrt();
                if distance > radius {
                    continue;
                }
                let idx = self.index(x, y);
                let src = Rgba::new(color, 1.0 - distance / radius);
                self.pixels[idx] = self.pixels[idx].under(src);
            }
        }
    }

    /// Number of pixels with any opacity.
    pub fn painted_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p.alpha > 0.0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(width: u32, height: u32) -> Canvas {
        Canvas::new(Viewport::new(width, height).unwrap())
    }

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = canvas(10, 8);
        assert_eq!(canvas.painted_pixels(), 0);
        assert_eq!(canvas.get(9, 7), Some(Rgba::TRANSPARENT));
        assert_eq!(canvas.get(10, 0), None);
    }

    #[test]
    fn test_gradient_opaque_center_transparent_edge() {
        let mut canvas = canvas(20, 20);
        canvas.fill_radial_gradient(10.0, 10.0, 4.0, Rgb::WHITE);

        let center = canvas.get(10, 10).unwrap();
        let near_edge = canvas.get(13, 10).unwrap();
        assert_eq!(center.color, Rgb::WHITE);
        assert!(center.alpha > 0.8);
        assert!(near_edge.alpha < center.alpha);
        assert_eq!(canvas.get(15, 10).unwrap().alpha, 0.0);
        assert_eq!(canvas.get(10, 4).unwrap().alpha, 0.0);
    }

    #[test]
    fn test_gradient_clipped_at_edges() {
        let mut canvas = canvas(10, 10);
        canvas.fill_radial_gradient(-1.0, 0.5, 2.0, Rgb::WHITE);
        assert!(canvas.get(0, 0).unwrap().alpha > 0.0);

        canvas.clear();
        canvas.fill_radial_gradient(25.0, 25.0, 2.0, Rgb::WHITE);
        canvas.fill_radial_gradient(f32::NAN, 5.0, 2.0, Rgb::WHITE);
        assert_eq!(canvas.painted_pixels(), 0);
    }

    #[test]
    fn test_overlapping_discs_accumulate() {
        let mut canvas = canvas(10, 10);
        canvas.fill_radial_gradient(5.0, 5.0, 2.0, Rgb::WHITE);
        let once = canvas.get(5, 5).unwrap().alpha;
        canvas.fill_radial_gradient(5.0, 5.0, 2.0, Rgb::WHITE);
        let twice = canvas.get(5, 5).unwrap().alpha;
        assert!(twice > once);
        assert!(twice <= 1.0);
    }

    #[test]
    fn test_resize_clears() {
        let mut canvas = canvas(10, 10);
        canvas.fill_radial_gradient(5.0, 5.0, 2.0, Rgb::WHITE);
        canvas.resize(Viewport::new(30, 20).unwrap());
        assert_eq!((canvas.width(), canvas.height()), (30, 20));
        assert_eq!(canvas.painted_pixels(), 0);
    }

    #[test]
    fn test_flatten_over_backdrop() {
        let half = Rgba::new(Rgb::WHITE, 0.5);
        assert_eq!(half.over_opaque(Rgb::BLACK), Rgb::new(128, 128, 128));
        assert_eq!(Rgba::TRANSPARENT.over_opaque(Rgb::new(1, 2, 3)), Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_index_matches_viewport_area() {
        let viewport = Viewport::new(9, 5).unwrap();
        let canvas = Canvas::new(viewport);
        assert_eq!(canvas.index(8, 4), viewport.area() - 1);
        assert_eq!(canvas.get(8, 4), Some(Rgba::TRANSPARENT));
    }
}
