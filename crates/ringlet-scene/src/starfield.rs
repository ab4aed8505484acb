//! Shooting stars drifting from the top-right to the bottom-left.

use rand::Rng;
use ringlet_config::StarConfig;
use ringlet_core::{Rgb, Viewport};

use crate::canvas::Canvas;
use crate::ticker::Animate;

/// A single star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    /// Disc radius in pixels, fixed for the star's lifetime.
    pub size: f32,
    /// Pixels moved along each axis per frame, fixed for the star's lifetime.
    pub speed: f32,
    /// How many times the star has wrapped back off-screen.
    pub respawns: u32,
}

impl Star {
    /// A star somewhere inside the viewport.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, config: &StarConfig, viewport: Viewport) -> Self {
        Self {
            x: sample(rng, 0.0, viewport.width_f32()),
            y: sample(rng, 0.0, viewport.height_f32()),
            size: sample(rng, config.size_min, config.size_max),
            speed: sample(rng, config.speed_min, config.speed_max),
            respawns: 0,
        }
    }

    /// Move one frame diagonally down and to the left.
    pub fn advance(&mut self) {
        self.x -= self.speed;
        self.y += self.speed;
    }

    /// Past the left or bottom edge.
    pub fn is_out_of_view(&self, viewport: Viewport) -> bool {
        self.x < 0.0 || self.y > viewport.height_f32()
    }

    /// Re-enter above and to the right of the viewport, in
    /// `[w, 2w) x [-h, 0)`. Size and speed are kept.
    pub fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R, viewport: Viewport) {
        let width = viewport.width_f32();
        let height = viewport.height_f32();
        self.x = sample(rng, width, 2.0 * width);
        self.y = sample(rng, -height, 0.0);
        self.respawns += 1;
    }
}

/// Uniform sample from `[min, max)`, or `min` when the range is empty.
fn sample<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if min < max {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// The starfield layer: a fixed set of stars and the canvas they are drawn on.
#[derive(Debug)]
pub struct Starfield<R> {
    stars: Vec<Star>,
    canvas: Canvas,
    color: Rgb,
    rng: R,
}

impl<R: Rng> Starfield<R> {
    pub fn new(config: &StarConfig, viewport: Viewport, mut rng: R) -> Self {
        let stars = (0..config.count)
            .map(|_| Star::spawn(&mut rng, config, viewport))
            .collect();
        Self {
            stars,
            canvas: Canvas::new(viewport),
            color: config.color,
            rng,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}

impl<R: Rng> Animate for Starfield<R> {
    /// Redraw every star at its current position, then move it and wrap it
    /// if it left the viewport.
    fn frame(&mut self, viewport: Viewport) {
        self.canvas.clear();
        for star in &mut self.stars {
            self.canvas
                .fill_radial_gradient(star.x, star.y, star.size, self.color);
            star.advance();
            if star.is_out_of_view(viewport) {
                star.respawn(&mut self.rng, viewport);
                tracing::trace!(x = star.x, y = star.y, respawns = star.respawns, "star respawned");
            }
        }
    }

    /// Stars keep their positions; only the canvas follows the viewport.
    fn resize(&mut self, viewport: Viewport) {
        self.canvas.resize(viewport);
    }
}
