//! Color utility functions for shading and compositing.

use ringlet_core::Rgb;

/// Scale a color by a light factor, saturating at white.
pub fn scale(color: Rgb, factor: f32) -> Rgb {
    let factor = factor.max(0.0);
    Rgb::new(
        channel(color.r as f32 * factor),
        channel(color.g as f32 * factor),
        channel(color.b as f32 * factor),
    )
}

/// Multiply two colors channel by channel (albedo times light color).
pub fn modulate(a: Rgb, b: Rgb) -> Rgb {
    Rgb::new(
        ((a.r as u16 * b.r as u16) / 255) as u8,
        ((a.g as u16 * b.g as u16) / 255) as u8,
        ((a.b as u16 * b.b as u16) / 255) as u8,
    )
}

/// Blend `src` over `dst` with the given opacity.
pub fn blend(dst: Rgb, src: Rgb, alpha: f32) -> Rgb {
    let alpha = alpha.clamp(0.0, 1.0);
    Rgb::new(
        mix_channel(dst.r, src.r, alpha),
        mix_channel(dst.g, src.g, alpha),
        mix_channel(dst.b, src.b, alpha),
    )
}

/// Midpoint of two colors.
pub fn average(a: Rgb, b: Rgb) -> Rgb {
    blend(a, b, 0.5)
}

fn mix_channel(dst: u8, src: u8, alpha: f32) -> u8 {
    channel(dst as f32 + (src as f32 - dst as f32) * alpha)
}

fn channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
