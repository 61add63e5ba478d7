//! Border removal pipeline.

use std::path::Path;

use image::RgbaImage;

use crate::background::{self, BackgroundMask, Rgb64, MAX_RGB_DISTANCE};
use crate::codec;
use crate::composite;
use crate::crop::{self, Bounds};
use crate::error::{Error, Result};
use crate::regions::RegionMap;

/// Options controlling border removal.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderOptions {
    /// Maximum RGB distance to the edge color for a pixel to count as background.
    pub threshold: f64,
    /// Regions whose bounding box is at most this thick in either axis are removed.
    pub min_thickness: u32,
    /// Depth of the edge strips sampled for the background estimate.
    pub strip: u32,
    /// Crop the result to the remaining non-transparent pixels.
    pub crop: bool,
    /// Extra pixels kept around the crop box.
    pub pad: u32,
    /// Keep border-connected regions that are thick in both axes. When false,
    /// every border-connected background-like pixel is cleared.
    pub preserve_thick: bool,
}

impl Default for BorderOptions {
    fn default() -> Self {
        Self {
            threshold: 12.0,
            min_thickness: 4,
            strip: 8,
            crop: false,
            pad: 0,
            preserve_thick: true,
        }
    }
}

impl BorderOptions {
    /// Reject out-of-domain values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] naming the offending option.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=MAX_RGB_DISTANCE).contains(&self.threshold) {
            return Err(Error::InvalidParameter(format!(
                "threshold must be between 0 and {MAX_RGB_DISTANCE:.2}, got {}",
                self.threshold
            )));
        }
        if self.min_thickness == 0 {
            return Err(Error::InvalidParameter(
                "minimum thickness must be at least 1".to_string(),
            ));
        }
        if self.strip == 0 {
            return Err(Error::InvalidParameter(
                "edge strip depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Summary of one border removal run.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovalReport {
    /// Estimated edge color.
    pub background: Rgb64,
    /// Number of border-connected background-like regions.
    pub regions: usize,
    /// Number of those regions that were cleared.
    pub removed_regions: usize,
    /// Number of pixels whose alpha was set to zero.
    pub cleared_pixels: usize,
    /// Crop box applied to the output, if cropping happened.
    pub crop: Option<Bounds>,
}

/// Border removal engine.
///
/// Create once with [`BorderEngine::new()`] and reuse for multiple images.
#[derive(Debug, Clone)]
pub struct BorderEngine {
    options: BorderOptions,
}

impl BorderEngine {
    /// Create an engine after validating `options`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if any option is out of range.
    pub fn new(options: BorderOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The options this engine runs with.
    #[must_use]
    pub fn options(&self) -> &BorderOptions {
        &self.options
    }

    /// Clear the border in place by zeroing alpha of thin border regions.
    ///
    /// Never crops; see [`BorderEngine::process`].
    pub fn remove(&self, image: &mut RgbaImage) -> RemovalReport {
        let opts = &self.options;
        let bg = background::estimate_background(image, opts.strip);
        tracing::debug!(
            r = bg[0],
            g = bg[1],
            b = bg[2],
            "estimated background color"
        );

        let mask = BackgroundMask::classify(image, &bg, opts.threshold);
        tracing::debug!(
            pixels = mask.count(),
            threshold = opts.threshold,
            "classified background-like pixels"
        );

        let regions = RegionMap::label(&mask);
        let remove = if opts.preserve_thick {
            regions.thin_regions(opts.min_thickness)
        } else {
            vec![true; regions.regions().len()]
        };
        let removed_regions = remove.iter().filter(|&&r| r).count();
        tracing::debug!(
            regions = regions.regions().len(),
            labeled = regions.labeled_pixels(),
            removed = removed_regions,
            min_thickness = opts.min_thickness,
            "labeled border regions"
        );

        let cleared_pixels = composite::clear_regions(image, &regions, &remove);

        RemovalReport {
            background: bg,
            regions: regions.regions().len(),
            removed_regions,
            cleared_pixels,
            crop: None,
        }
    }

    /// Clear the border, then crop to the remaining content if enabled.
    #[must_use]
    pub fn process(&self, mut image: RgbaImage) -> (RgbaImage, RemovalReport) {
        let mut report = self.remove(&mut image);
        if !self.options.crop {
            return (image, report);
        }
        let (cropped, bounds) = crop::crop_to_content(image, 0, self.options.pad);
        match bounds {
            Some(b) => tracing::debug!(
                x = b.min_x,
                y = b.min_y,
                width = b.width(),
                height = b.height(),
                "cropped to content"
            ),
            None => tracing::debug!("no opaque content left, crop skipped"),
        }
        report.crop = bounds;
        (cropped, report)
    }

    /// Load `input`, remove its border and write the result to `output`.
    ///
    /// The output file is written only after the whole result is computed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Input`] if the source cannot be decoded,
    /// [`Error::UnsupportedFormat`] if `output` cannot store transparency and
    /// [`Error::Output`] if writing fails.
    pub fn process_file(&self, input: &Path, output: &Path) -> Result<RemovalReport> {
        codec::output_format(output)?;
        let image = codec::load_rgba(input)?;
        let (w, h) = image.dimensions();

        let (result, report) = self.process(image);
        codec::save_rgba(&result, output)?;

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            width = w,
            height = h,
            cleared = report.cleared_pixels,
            "border removed"
        );
        Ok(report)
    }
}
