//! Centering an icon on a fixed-size solid canvas.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::crop;
use crate::error::{Error, Result};

/// Options for [`center_on_canvas`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconOptions {
    /// Canvas edge length in pixels.
    pub size: u32,
    /// Canvas fill color.
    pub background: Rgba<u8>,
}

impl Default for IconOptions {
    fn default() -> Self {
        Self {
            size: 1024,
            background: Rgba([30, 95, 143, 255]),
        }
    }
}

impl IconOptions {
    /// Reject a zero-sized canvas.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when `size` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidParameter(
                "canvas size must be at least 1 pixel".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for any other shape.
pub fn parse_hex_color(s: &str) -> Result<Rgba<u8>> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    let invalid = || Error::InvalidParameter(format!("invalid hex color: {s}"));
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return Err(invalid());
    }
    let mut channels = [255_u8; 4];
    for (i, ch) in channels.iter_mut().take(hex.len() / 2).enumerate() {
        *ch = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
    }
    Ok(Rgba(channels))
}

/// Dimensions after shrinking to fit inside `size x size`. Never enlarges.
#[must_use]
pub fn shrink_to_fit(width: u32, height: u32, size: u32) -> (u32, u32) {
    if width <= size && height <= size {
        return (width, height);
    }
    let ratio = (f64::from(size) / f64::from(width)).min(f64::from(size) / f64::from(height));
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let fit = |side: u32| ((f64::from(side) * ratio).round() as u32).clamp(1, size);
    (fit(width), fit(height))
}

/// Trim transparent margins, shrink to fit and center on a solid canvas.
///
/// The icon is alpha-blended over the canvas color.
#[must_use]
pub fn center_on_canvas(image: RgbaImage, opts: &IconOptions) -> RgbaImage {
    let (trimmed, _) = crop::crop_to_content(image, 0, 0);
    let (w, h) = trimmed.dimensions();
    let (nw, nh) = shrink_to_fit(w, h, opts.size);
    let icon = if (nw, nh) == (w, h) {
        trimmed
    } else {
        tracing::debug!(from_w = w, from_h = h, to_w = nw, to_h = nh, "shrinking icon");
        imageops::resize(&trimmed, nw, nh, FilterType::Lanczos3)
    };

    let mut canvas = RgbaImage::from_pixel(opts.size, opts.size, opts.background);
    let x = (opts.size - icon.width()) / 2;
    let y = (opts.size - icon.height()) / 2;
    imageops::overlay(&mut canvas, &icon, i64::from(x), i64::from(y));
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_color("#1e5f8f").unwrap(), Rgba([30, 95, 143, 255]));
        assert_eq!(parse_hex_color("FF000080").unwrap(), Rgba([255, 0, 0, 128]));
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
        assert!(parse_hex_color("#ééé").is_err());
    }

    #[test]
    fn shrink_never_enlarges() {
        assert_eq!(shrink_to_fit(100, 50, 1024), (100, 50));
        assert_eq!(shrink_to_fit(2048, 1024, 1024), (1024, 512));
        assert_eq!(shrink_to_fit(300, 600, 100), (50, 100));
    }

    #[test]
    fn zero_size_is_invalid() {
        let opts = IconOptions {
            size: 0,
            ..IconOptions::default()
        };
        assert!(opts.validate().is_err());
        assert!(IconOptions::default().validate().is_ok());
    }

    #[test]
    fn icon_is_centered_over_background() {
        let mut img = RgbaImage::from_pixel(50, 50, Rgba([0, 0, 0, 0]));
        for y in 10..20 {
            for x in 10..30 {
                img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }
        let opts = IconOptions {
            size: 40,
            ..IconOptions::default()
        };
        let out = center_on_canvas(img, &opts);

        assert_eq!(out.dimensions(), (40, 40));
        // 20x10 icon lands at (10, 15).
        assert_eq!(out.get_pixel(10, 15), &Rgba([255, 255, 255, 255]));
        assert_eq!(out.get_pixel(29, 24), &Rgba([255, 255, 255, 255]));
        assert_eq!(out.get_pixel(9, 15), &opts.background);
        assert_eq!(out.get_pixel(10, 25), &opts.background);
    }

    #[test]
    fn transparent_icon_shows_background() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0]));
        let opts = IconOptions {
            size: 16,
            ..IconOptions::default()
        };
        let out = center_on_canvas(img, &opts);
        assert!(out.pixels().all(|p| *p == opts.background));
    }
}
