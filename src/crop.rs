//! Content bounding boxes and cropping.

use image::{imageops, RgbaImage};

/// Inclusive pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Leftmost column.
    pub min_x: u32,
    /// Topmost row.
    pub min_y: u32,
    /// Rightmost column (inclusive).
    pub max_x: u32,
    /// Bottom row (inclusive).
    pub max_y: u32,
}

impl Bounds {
    /// A single-pixel rectangle at `(x, y)`.
    #[must_use]
    pub fn point(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    /// Grow the rectangle to cover `(x, y)`.
    pub fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Horizontal span, `max_x - min_x + 1`.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    /// Vertical span, `max_y - min_y + 1`.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Expand by `pad` pixels on every side, clamped to a `width x height` canvas.
    #[must_use]
    pub fn padded(self, pad: u32, width: u32, height: u32) -> Self {
        Self {
            min_x: self.min_x.saturating_sub(pad),
            min_y: self.min_y.saturating_sub(pad),
            max_x: self.max_x.saturating_add(pad).min(width.saturating_sub(1)),
            max_y: self.max_y.saturating_add(pad).min(height.saturating_sub(1)),
        }
    }
}

/// Bounding box of every pixel whose alpha is strictly above `alpha_threshold`.
///
/// Returns `None` when no pixel qualifies.
#[must_use]
pub fn content_bounds(image: &RgbaImage, alpha_threshold: u8) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;
    for (x, y, px) in image.enumerate_pixels() {
        if px[3] > alpha_threshold {
            match bounds.as_mut() {
                Some(b) => b.include(x, y),
                None => bounds = Some(Bounds::point(x, y)),
            }
        }
    }
    bounds
}

/// Crop `image` to its content box, expanded by `pad` pixels.
///
/// An image without content is returned as-is together with `None`.
#[must_use]
pub fn crop_to_content(
    image: RgbaImage,
    alpha_threshold: u8,
    pad: u32,
) -> (RgbaImage, Option<Bounds>) {
    let Some(bounds) = content_bounds(&image, alpha_threshold) else {
        return (image, None);
    };
    let bounds = bounds.padded(pad, image.width(), image.height());
    if bounds.width() == image.width() && bounds.height() == image.height() {
        return (image, Some(bounds));
    }
    let cropped = imageops::crop_imm(
        &image,
        bounds.min_x,
        bounds.min_y,
        bounds.width(),
        bounds.height(),
    )
    .to_image();
    (cropped, Some(bounds))
}
