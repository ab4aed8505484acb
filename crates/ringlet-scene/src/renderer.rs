//! Ray-cast renderer for the planet scene.

use glam::Vec2;
use ringlet_core::{Rgb, Viewport};

use crate::camera::{PerspectiveCamera, Ray, pixel_to_ndc};
use crate::planet::{AmbientLight, Planet};

/// Opaque RGB pixel grid.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    pub fn new(viewport: Viewport, fill: Rgb) -> Self {
        Self {
            width: viewport.width(),
            height: viewport.height(),
            pixels: vec![fill; viewport.area()],
        }
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

    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[self.index(x, y)])
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Count pixels of exactly `color`.
    pub fn count(&self, color: Rgb) -> usize {
        self.pixels.iter().filter(|p| **p == color).count()
    }
}

/// Draws the planet and ring into a [`PixelBuffer`].
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    buffer: PixelBuffer,
    clear_color: Rgb,
}

impl SceneRenderer {
    pub fn new(viewport: Viewport, clear_color: Rgb) -> Self {
        Self {
            buffer: PixelBuffer::new(viewport, clear_color),
            clear_color,
        }
    }

    /// Reallocate the output buffer for a new viewport.
    pub fn set_size(&mut self, viewport: Viewport) {
        self.buffer = PixelBuffer::new(viewport, self.clear_color);
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Cast one ray per pixel center and shade the nearest hit.
    pub fn render(&mut self, camera: &PerspectiveCamera, light: &AmbientLight, planet: &Planet) {
        let inverse = camera.view_projection().inverse();
        let Ok(viewport) = Viewport::new(self.buffer.width, self.buffer.height) else {
            return;
        };

        for y in 0..self.buffer.height {
            for x in 0..self.buffer.width {
                let ndc: Vec2 = pixel_to_ndc(x as f32 + 0.5, y as f32 + 0.5, viewport);
                let ray = Ray::through_ndc(inverse, ndc);
                let color = planet
                    .hit(&ray)
                    .map_or(self.clear_color, |hit| light.illuminate(hit.albedo));
                let idx = self.buffer.index(x, y);
                self.buffer.pixels[idx] = color;
            }
        }
    }
}
