//! Flattening the layers into terminal cells.
//!
//! Every cell shows two pixels with the upper half block: the foreground
//! paints the top pixel, the background the bottom one. Glyphs from the
//! text ring replace whole cells on top of everything else.

use std::collections::HashMap;

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use ringlet_core::Rgb;

use crate::canvas::Canvas;
use crate::color::average;
use crate::renderer::PixelBuffer;
use crate::text_ring::{TextPoint, TextRing};

/// Character drawing the top pixel of a cell in the foreground color.
pub const HALF_BLOCK: char = '▀';

/// Compose the scene, the star canvas over it, and the glyphs over both.
pub fn compose(scene: &PixelBuffer, stars: &Canvas, text: &TextRing) -> Vec<Line<'static>> {
    let cols = scene.width();
    let rows = scene.height().div_ceil(2);
    let glyphs = glyph_cells(text.points(), cols, rows);

    (0..rows)
        .map(|row| {
            let spans: Vec<Span> = (0..cols)
                .map(|col| {
                    let top = pixel(scene, stars, col, row * 2);
                    let bottom = if row * 2 + 1 < scene.height() {
                        pixel(scene, stars, col, row * 2 + 1)
                    } else {
                        top
                    };
                    match glyphs.get(&(col, row)) {
                        Some(glyph) => Span::styled(
                            glyph.to_string(),
                            Style::new()
                                .fg(text.color().into())
                                .bg(average(top, bottom).into()),
                        ),
                        None => Span::styled(
                            HALF_BLOCK.to_string(),
                            Style::new().fg(top.into()).bg(bottom.into()),
                        ),
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Star canvas flattened over the scene at one pixel.
fn pixel(scene: &PixelBuffer, stars: &Canvas, x: u32, y: u32) -> Rgb {
    let base = scene.get(x, y).unwrap_or_default();
    match stars.get(x, y) {
        Some(star) => star.over_opaque(base),
        None => base,
    }
}

/// Cells covered by a glyph. Later points win when several share a cell.
fn glyph_cells(points: &[TextPoint], cols: u32, rows: u32) -> HashMap<(u32, u32), char> {
    points
        .iter()
        .filter_map(|point| {
            let anchor = point.anchor?;
            if !(anchor.x.is_finite() && anchor.y.is_finite()) || anchor.x < 0.0 || anchor.y < 0.0
            {
                return None;
            }
            let col = anchor.x.floor() as u32;
            let row = (anchor.y / 2.0).floor() as u32;
            (col < cols && row < rows).then_some(((col, row), point.glyph))
        })
        .collect()
}
