//! Procedural tray icons.
//!
//! A disc filled with the loudness color, with a white record glyph on top.
//! Drawn at runtime so every color/glyph combination is available without
//! shipping image assets.

use crate::{Glyph, TrayView};

use image::{Rgba, RgbaImage};

/// Icon edge length in pixels.
pub(crate) const ICON_SIZE: u32 = 32;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const WHITE: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);

const DISC_RADIUS: f32 = 15.5;
const CIRCLE_GLYPH_RADIUS: f32 = 8.0;
const STOP_GLYPH_RADIUS: f32 = 10.0;
const STOP_SQUARE_HALF: f32 = 4.0;

/// Draw the icon for `view`.
pub(crate) fn render_icon(view: &TrayView) -> RgbaImage {
    let [r, g, b] = view.color.rgb();
    let fill = Rgba([r, g, b, 0xFF]);
    let center = ICON_SIZE as f32 / 2.0;

    RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist > DISC_RADIUS {
            return TRANSPARENT;
        }

        match view.glyph {
            Glyph::Circle if dist <= CIRCLE_GLYPH_RADIUS => WHITE,
            Glyph::StopCircle if dist <= STOP_GLYPH_RADIUS => {
                if dx.abs() <= STOP_SQUARE_HALF && dy.abs() <= STOP_SQUARE_HALF {
                    fill
                } else {
                    WHITE
                }
            }
            _ => fill,
        }
    })
}
