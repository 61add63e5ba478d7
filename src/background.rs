//! Background color estimation and background-likeness classification.
//!
//! The background is the mean color of four edge strips. A pixel is
//! background-like when its Euclidean RGB distance to that mean is at most the
//! configured threshold.

use image::{Rgba, RgbaImage};

/// Largest possible Euclidean distance between two RGB colors, `255 * sqrt(3)`.
pub const MAX_RGB_DISTANCE: f64 = 441.672_955_930_063_7;

/// Floating point RGB triple.
pub type Rgb64 = [f64; 3];

/// Mean color of the `strip`-deep bands along all four image edges.
///
/// Bands overlap at the corners and those pixels are counted once per band.
/// The depth is clamped to the dimension it runs along, so on tiny images a
/// band may cover the whole canvas. An empty image yields black.
#[must_use]
pub fn estimate_background(image: &RgbaImage, strip: u32) -> Rgb64 {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return [0.0; 3];
    }
    let rows = strip.min(h);
    let cols = strip.min(w);

    let mut sum = [0.0_f64; 3];
    let mut count = 0_u64;
    let mut add = |px: &Rgba<u8>| {
        for (acc, &c) in sum.iter_mut().zip(&px.0[..3]) {
            *acc += f64::from(c);
        }
        count += 1;
    };

    for y in (0..rows).chain(h - rows..h) {
        for x in 0..w {
            add(image.get_pixel(x, y));
        }
    }
    for x in (0..cols).chain(w - cols..w) {
        for y in 0..h {
            add(image.get_pixel(x, y));
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let n = count as f64;
    sum.map(|s| s / n)
}

/// Euclidean distance between a pixel's RGB channels and `background`.
#[must_use]
pub fn rgb_distance(px: &Rgba<u8>, background: &Rgb64) -> f64 {
    px.0[..3]
        .iter()
        .zip(background)
        .map(|(&c, &b)| (f64::from(c) - b).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Row-major boolean grid marking background-like pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl BackgroundMask {
    /// Mark every pixel within `threshold` of `background` (inclusive).
    #[must_use]
    pub fn classify(image: &RgbaImage, background: &Rgb64, threshold: f64) -> Self {
        let cells = image
            .pixels()
            .map(|px| rgb_distance(px, background) <= threshold)
            .collect();
        Self {
            width: image.width(),
            height: image.height(),
            cells,
        }
    }

    /// Build a mask directly from row-major cells.
    ///
    /// # Panics
    ///
    /// Panics if `cells.len() != width * height`.
    #[must_use]
    pub fn from_cells(width: u32, height: u32, cells: Vec<bool>) -> Self {
        assert_eq!(
            cells.len(),
            width as usize * height as usize,
            "mask cell count must match dimensions"
        );
        Self {
            width,
            height,
            cells,
        }
    }

    /// Mask width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `(x, y)` is background-like. Out-of-range coordinates are not.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.cells[self.index(x, y)]
    }

    /// Number of background-like pixels.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(w: u32, h: u32, rgb: [u8; 3]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([rgb[0], rgb[1], rgb[2], 255]))
    }

    #[test]
    fn uniform_image_estimates_its_own_color() {
        let img = uniform(40, 30, [250, 248, 240]);
        assert_eq!(estimate_background(&img, 8), [250.0, 248.0, 240.0]);
    }

    #[test]
    fn interior_pixels_do_not_affect_estimate() {
        let mut img = uniform(40, 40, [10, 20, 30]);
        for y in 8..32 {
            for x in 8..32 {
                img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }
        assert_eq!(estimate_background(&img, 8), [10.0, 20.0, 30.0]);
    }

    #[test]
    fn corner_overlap_is_counted_per_strip() {
        // 2x2 image with strip 1: top, bottom, left and right each sample two
        // pixels, so every pixel is counted exactly twice.
        let mut img = uniform(2, 2, [0, 0, 0]);
        img.put_pixel(0, 0, Rgba([100, 0, 0, 255]));
        let bg = estimate_background(&img, 1);
        assert!((bg[0] - 25.0).abs() < 1e-9);
    }

    #[test]
    fn strip_larger_than_image_covers_everything() {
        let mut img = uniform(3, 3, [0, 0, 0]);
        img.put_pixel(1, 1, Rgba([90, 90, 90, 255]));
        let bg = estimate_background(&img, 8);
        assert!((bg[0] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn empty_image_estimates_black() {
        assert_eq!(estimate_background(&RgbaImage::new(0, 0), 8), [0.0; 3]);
    }

    #[test]
    fn distance_matches_euclidean_norm() {
        let d = rgb_distance(&Rgba([3, 4, 12, 0]), &[0.0, 0.0, 0.0]);
        assert!((d - 13.0).abs() < 1e-12);
        let max = rgb_distance(&Rgba([255, 255, 255, 255]), &[0.0, 0.0, 0.0]);
        assert!((max - MAX_RGB_DISTANCE).abs() < 1e-9);
    }

    #[test]
    fn classification_threshold_is_inclusive() {
        let mut img = uniform(3, 1, [100, 100, 100]);
        img.put_pixel(1, 0, Rgba([112, 100, 100, 255]));
        img.put_pixel(2, 0, Rgba([113, 100, 100, 255]));
        let mask = BackgroundMask::classify(&img, &[100.0, 100.0, 100.0], 12.0);
        assert!(mask.get(0, 0));
        assert!(mask.get(1, 0));
        assert!(!mask.get(2, 0));
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn alpha_is_ignored_by_classifier() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([50, 50, 50, 0]));
        let mask = BackgroundMask::classify(&img, &[50.0, 50.0, 50.0], 0.0);
        assert_eq!(mask.count(), 4);
    }

    #[test]
    fn out_of_range_lookup_is_false() {
        let mask = BackgroundMask::from_cells(1, 1, vec![true]);
        assert!(mask.get(0, 0));
        assert!(!mask.get(1, 0));
        assert!(!mask.get(0, 1));
    }
}
