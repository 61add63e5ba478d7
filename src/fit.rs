//! Transparent-margin trimming and aspect-preserving resize.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::crop;
use crate::error::{Error, Result};

/// Which side of the output is pinned to an exact size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitTarget {
    /// The longest side becomes this many pixels.
    Longest(u32),
    /// The output is exactly this wide.
    Width(u32),
    /// The output is exactly this tall.
    Height(u32),
}

impl FitTarget {
    /// Build a target from at most one of the three CLI choices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when more than one is set or a value is zero.
    pub fn from_choices(
        fit: Option<u32>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<Option<Self>> {
        let target = match (fit, width, height) {
            (None, None, None) => return Ok(None),
            (Some(n), None, None) => Self::Longest(n),
            (None, Some(n), None) => Self::Width(n),
            (None, None, Some(n)) => Self::Height(n),
            _ => {
                return Err(Error::InvalidParameter(
                    "use only one of --fit, --width or --height".to_string(),
                ))
            }
        };
        if target.value() == 0 {
            return Err(Error::InvalidParameter(
                "resize target must be at least 1 pixel".to_string(),
            ));
        }
        Ok(Some(target))
    }

    fn value(self) -> u32 {
        match self {
            Self::Longest(n) | Self::Width(n) | Self::Height(n) => n,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale(side: u32, ratio: f64) -> u32 {
    ((f64::from(side) * ratio).round() as u32).max(1)
}

/// Output dimensions for a `width x height` image resized to `target`.
///
/// The pinned side gets the exact value; the other is rounded and at least 1.
#[must_use]
pub fn target_dimensions(width: u32, height: u32, target: FitTarget) -> (u32, u32) {
    match target {
        FitTarget::Longest(n) => {
            let ratio = f64::from(n) / f64::from(width.max(height));
            (scale(width, ratio), scale(height, ratio))
        }
        FitTarget::Width(n) => (n, scale(height, f64::from(n) / f64::from(width))),
        FitTarget::Height(n) => (scale(width, f64::from(n) / f64::from(height)), n),
    }
}

/// Resize with Lanczos3 keeping the aspect ratio. `None` returns a copy.
#[must_use]
pub fn resize_keep_aspect(image: &RgbaImage, target: Option<FitTarget>) -> RgbaImage {
    let (w, h) = image.dimensions();
    let Some(target) = target else {
        return image.clone();
    };
    if w == 0 || h == 0 {
        return image.clone();
    }
    let (nw, nh) = target_dimensions(w, h, target);
    tracing::debug!(from_w = w, from_h = h, to_w = nw, to_h = nh, "resizing");
    imageops::resize(image, nw, nh, FilterType::Lanczos3)
}

/// Trim margins whose alpha is at most `alpha_threshold`, then resize.
#[must_use]
pub fn trim_and_fit(
    image: RgbaImage,
    alpha_threshold: u8,
    target: Option<FitTarget>,
) -> RgbaImage {
    let (trimmed, bounds) = crop::crop_to_content(image, alpha_threshold, 0);
    if bounds.is_none() {
        tracing::debug!("no content above alpha threshold, trim skipped");
    }
    resize_keep_aspect(&trimmed, target)
}
