//! Glyphs circling the planet.

use std::f32::consts::TAU;

use glam::{Mat4, Vec2, Vec3};
use ringlet_config::TextConfig;
use ringlet_core::{Rgb, Viewport};

use crate::camera::project_to_pixel;

/// One glyph on the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPoint {
    pub glyph: char,
    /// Angle around the Y axis in radians. Grows without bound.
    pub angle: f32,
    /// Pixel position of the glyph center, unset until the first frame.
    pub anchor: Option<Vec2>,
}

impl TextPoint {
    /// World position on a horizontal circle of the given radius.
    pub fn position(&self, radius: f32) -> Vec3 {
        let (sin, cos) = self.angle.sin_cos();
        Vec3::new(cos * radius, 0.0, sin * radius)
    }
}

/// The message laid out around a circle in the planet's equatorial plane.
#[derive(Debug, Clone)]
pub struct TextRing {
    points: Vec<TextPoint>,
    radius: f32,
    step: f32,
    color: Rgb,
}

impl TextRing {
    /// Spread `config.count` glyphs evenly, repeating the message as needed.
    pub fn new(config: &TextConfig, step: f32) -> Self {
        let message: Vec<char> = config.message.chars().collect();
        let points = (0..config.count)
            .map(|i| TextPoint {
                glyph: glyph_at(&message, i),
                angle: i as f32 / config.count as f32 * TAU,
                anchor: None,
            })
            .collect();

        Self {
            points,
            radius: config.radius,
            step,
            color: config.color,
        }
    }

    /// Move every glyph one step around the circle and re-project it.
    pub fn advance(&mut self, view_projection: Mat4, viewport: Viewport) {
        for point in &mut self.points {
            point.angle += self.step;
            let position = point.position(self.radius);
            point.anchor = Some(project_to_pixel(position, view_projection, viewport));
        }
    }

    pub fn points(&self) -> &[TextPoint] {
        &self.points
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}

/// Glyph for ring position `index`, cycling through the message.
pub fn glyph_at(message: &[char], index: usize) -> char {
    if message.is_empty() {
        ' '
    } else {
        message[index % message.len()]
    }
}
