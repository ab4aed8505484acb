//! Planet, text ring and shooting-star animation.
//!
//! The scene layer ray-casts a ringed planet and projects a circle of
//! glyphs around it; the starfield layer paints drifting stars on a
//! transparent canvas. Each layer advances on its own [`Ticker`], and
//! [`Stage`] composes both into terminal cells for ratatui.

mod camera;
mod canvas;
mod color;
mod compose;
mod planet;
mod renderer;
mod scene;
mod stage;
mod starfield;
mod text_ring;
mod ticker;

pub use camera::{PerspectiveCamera, Ray, pixel_to_ndc, project_to_pixel};
pub use canvas::{Canvas, Rgba};
pub use compose::{HALF_BLOCK, compose};
pub use planet::{AmbientLight, Planet, Ring, SurfaceHit};
pub use renderer::{PixelBuffer, SceneRenderer};
pub use scene::SceneComponent;
pub use stage::{Pumped, Stage};
pub use starfield::{Star, Starfield};
pub use text_ring::{TextPoint, TextRing, glyph_at};
pub use ticker::{Animate, Clock, ManualClock, SystemClock, Ticker};
