//! Alpha compositing for removed regions.

use image::RgbaImage;

use crate::regions::RegionMap;

/// Zero the alpha of every pixel whose region is flagged in `remove`.
///
/// Unlabeled pixels and RGB channels are never touched. Returns the number of
/// pixels cleared.
///
/// # Panics
///
/// Panics if `regions` was built for an image of different dimensions.
pub fn clear_regions(image: &mut RgbaImage, regions: &RegionMap, remove: &[bool]) -> usize {
    assert_eq!(
        image.dimensions(),
        (regions.width(), regions.height()),
        "region map must match image dimensions"
    );
    let mut cleared = 0;
    for (x, y, label) in regions.iter_labeled() {
        if remove.get(label).copied().unwrap_or(false) {
            image.get_pixel_mut(x, y)[3] = 0;
            cleared += 1;
        }
    }
    cleared
}
