//! The 3D scene layer: camera, light, planet with ring, and the text ring.

use ringlet_config::Config;
use ringlet_core::Viewport;

use crate::camera::PerspectiveCamera;
use crate::planet::{AmbientLight, Planet, Ring};
use crate::renderer::{PixelBuffer, SceneRenderer};
use crate::text_ring::TextRing;
use crate::ticker::Animate;

/// Owns the scene graph and its renderer.
#[derive(Debug, Clone)]
pub struct SceneComponent {
    camera: PerspectiveCamera,
    light: AmbientLight,
    planet: Planet,
    text_ring: TextRing,
    renderer: SceneRenderer,
}

impl SceneComponent {
    /// Build the scene graph once for the given viewport.
    pub fn new(config: &Config, viewport: Viewport) -> Self {
        let planet = Planet::new(&config.planet, Ring::new(&config.ring));
        let text_ring = TextRing::new(&config.text, planet.spin_step());
        Self {
            camera: PerspectiveCamera::from_config(&config.camera, viewport.aspect()),
            light: AmbientLight::from_config(&config.light),
            planet,
            text_ring,
            renderer: SceneRenderer::new(viewport, config.display.background),
        }
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn planet(&self) -> &Planet {
        &self.planet
    }

    pub fn text_ring(&self) -> &TextRing {
        &self.text_ring
    }

    /// Last rendered frame.
    pub fn buffer(&self) -> &PixelBuffer {
        self.renderer.buffer()
    }
}

impl Animate for SceneComponent {
    /// Spin the planet, move and re-project the glyphs, then render.
    fn frame(&mut self, viewport: Viewport) {
        self.planet.advance();
        self.text_ring
            .advance(self.camera.view_projection(), viewport);
        self.renderer.render(&self.camera, &self.light, &self.planet);
    }

    fn resize(&mut self, viewport: Viewport) {
        self.camera.aspect = viewport.aspect();
        self.camera.update_projection_matrix();
        self.renderer.set_size(viewport);
    }
}
