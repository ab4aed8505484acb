//! The whole animated stage: both layers, their tickers, and the viewport.

use std::time::Duration;

use rand::Rng;
use ratatui::{Frame, widgets::Paragraph};
use ringlet_config::Config;
use ringlet_core::Viewport;

use crate::compose::compose;
use crate::scene::SceneComponent;
use crate::starfield::Starfield;
use crate::ticker::{Animate, Clock, Ticker};

/// Frames run by one call to [`Stage::pump`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pumped {
    pub scene: u32,
    pub stars: u32,
}

/// Both animation layers sharing one viewport.
///
/// The viewport is only replaced by [`Stage::resize`]; the frame loops read
/// a copy of it.
#[derive(Debug)]
pub struct Stage<R, C> {
    scene: SceneComponent,
    starfield: Starfield<R>,
    scene_ticker: Ticker<C>,
    star_ticker: Ticker<C>,
    viewport: Viewport,
}

impl<R: Rng, C: Clock + Clone> Stage<R, C> {
    pub fn new(config: &Config, viewport: Viewport, rng: R, clock: C) -> Self {
        let fps = config.display.fps;
        let catch_up = config.display.max_catch_up;
        Self {
            scene: SceneComponent::new(config, viewport),
            starfield: Starfield::new(&config.stars, viewport, rng),
            scene_ticker: Ticker::from_fps(clock.clone(), fps, catch_up),
            star_ticker: Ticker::from_fps(clock, fps, catch_up),
            viewport,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scene(&self) -> &SceneComponent {
        &self.scene
    }

    pub fn starfield(&self) -> &Starfield<R> {
        &self.starfield
    }

    /// Apply a new viewport to both layers. Stars and glyphs are not moved.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        tracing::debug!(from = %self.viewport, to = %viewport, "resizing stage");
        self.viewport = viewport;
        self.scene.resize(viewport);
        self.starfield.resize(viewport);
    }

    /// Run whatever frames each layer has due.
    pub fn pump(&mut self) -> Pumped {
        Pumped {
            scene: self.scene_ticker.run(&mut self.scene, self.viewport),
            stars: self.star_ticker.run(&mut self.starfield, self.viewport),
        }
    }

    /// Time until either layer wants another frame.
    pub fn until_next(&self) -> Duration {
        self.scene_ticker
            .until_next()
            .min(self.star_ticker.until_next())
    }

    /// Draw the latest frame of both layers over the whole terminal.
    pub fn render(&self, frame: &mut Frame) {
        let lines = compose(
            self.scene.buffer(),
            self.starfield.canvas(),
            self.scene.text_ring(),
        );
        frame.render_widget(Paragraph::new(lines), frame.area());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticker::ManualClock;
    use rand::{SeedableRng, rngs::StdRng};
    use ratatui::{Terminal, backend::TestBackend};

    fn stage(viewport: Viewport, clock: ManualClock) -> Stage<StdRng, ManualClock> {
        Stage::new(
            &Config::default(),
            viewport,
            StdRng::seed_from_u64(42),
            clock,
        )
    }

    #[test]
    fn test_pump_runs_both_layers_independently() {
        let clock = ManualClock::new();
        let viewport = Viewport::new(80, 60).unwrap();
        let mut stage = stage(viewport, clock.clone());

        assert_eq!(stage.pump(), Pumped { scene: 1, stars: 1 });
        assert_eq!(stage.pump(), Pumped::default());

        clock.advance(Duration::from_millis(70));
        // 30 fps: two frame intervals have elapsed.
        assert_eq!(stage.pump(), Pumped { scene: 2, stars: 2 });
        assert!((stage.scene().planet().yaw() - 0.006).abs() < 1e-6);
        assert!(stage.until_next() > Duration::ZERO);
    }

    #[test]
    fn test_resize_scenario() {
        let clock = ManualClock::new();
        let mut stage = stage(Viewport::new(800, 600).unwrap(), clock.clone());
        stage.pump();

        let bigger = Viewport::new(1200, 800).unwrap();
        stage.resize(bigger);
        assert_eq!(stage.viewport(), bigger);
        assert_eq!(stage.scene().camera().aspect, 1200.0 / 800.0);
        assert_eq!(stage.scene().buffer().width(), 1200);
        assert_eq!(stage.scene().buffer().height(), 800);
        assert_eq!(stage.starfield().canvas().width(), 1200);
        assert_eq!(stage.starfield().canvas().height(), 800);

        clock.advance(Duration::from_secs(1) / 30);
        assert_eq!(stage.pump(), Pumped { scene: 1, stars: 1 });
        let anchor = stage.scene().text_ring().points()[0].anchor.unwrap();
        assert!(anchor.x > 600.0, "projected against the new width");
    }

    #[test]
    fn test_render_fills_terminal() {
        let clock = ManualClock::new();
        let viewport = Viewport::from_cells(40, 20).unwrap();
        let mut stage = stage(viewport, clock);
        stage.pump();

        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        terminal.draw(|frame| stage.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let glyph_cells = buffer
            .content()
            .iter()
            .filter(|cell| cell.symbol() != "▀")
            .count();
        assert!(glyph_cells > 0, "text ring is drawn");
        assert!(glyph_cells <= 50);
    }
}
