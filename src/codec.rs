//! Loading and saving RGBA images.

use std::io::{Cursor, Write};
use std::path::Path;

use image::{ImageFormat, ImageReader, RgbaImage};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Open any decodable image and promote it to RGBA8.
///
/// The decoder is chosen from the file contents, so a missing or misleading
/// extension does not matter. Images without an alpha channel become fully
/// opaque.
///
/// # Errors
///
/// Returns [`Error::Input`] if the file is missing, unreadable or corrupt.
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let input_err = |source: image::ImageError| Error::Input {
        path: path.to_path_buf(),
        source,
    };
    let img = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| input_err(image::ImageError::IoError(e)))?
        .decode()
        .map_err(input_err)?;
    Ok(img.to_rgba8())
}

/// Resolve the output format from the path extension.
///
/// Only formats that can store an alpha channel are accepted.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] for unknown extensions and for formats
/// without alpha support such as JPEG.
pub fn output_format(path: &Path) -> Result<ImageFormat> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;
    match format {
        ImageFormat::Png
        | ImageFormat::WebP
        | ImageFormat::Tiff
        | ImageFormat::Bmp
        | ImageFormat::Ico
        | ImageFormat::Qoi => Ok(format),
        _ => Err(Error::UnsupportedFormat(format!(
            "{format:?} cannot store transparency"
        ))),
    }
}

/// Encode `img` fully in memory, then atomically replace `path` with it.
///
/// The bytes go to a temporary file in the destination directory which is
/// renamed over `path` only once complete. On failure an existing file at
/// `path` is left untouched and the temporary file is removed.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] if the extension is not an
/// alpha-capable format, or [`Error::Output`] if encoding or writing fails.
pub fn save_rgba(img: &RgbaImage, path: &Path) -> Result<()> {
    let format = output_format(path)?;
    let output_err = |source: image::ImageError| Error::Output {
        path: path.to_path_buf(),
        source,
    };
    let io_err = |e: std::io::Error| output_err(image::ImageError::IoError(e));

    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).map_err(output_err)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(buf.get_ref()).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

/// Check if a file has a supported input image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(
            ext.to_lowercase().as_str(),
            "jpg" | "jpeg" | "png" | "webp" | "bmp" | "gif" | "tif" | "tiff" | "ico" | "qoi"
        ),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_accepts_alpha_formats() {
        assert_eq!(output_format(Path::new("a.png")).unwrap(), ImageFormat::Png);
        assert_eq!(output_format(Path::new("a.WEBP")).unwrap(), ImageFormat::WebP);
        assert_eq!(output_format(Path::new("a.tiff")).unwrap(), ImageFormat::Tiff);
    }

    #[test]
    fn output_format_rejects_jpeg_and_unknown() {
        assert!(matches!(
            output_format(Path::new("a.jpg")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            output_format(Path::new("a.txt")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            output_format(Path::new("noext")),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn is_supported_image_accepts_common_formats() {
        assert!(is_supported_image(Path::new("photo.jpg")));
        assert!(is_supported_image(Path::new("photo.JPEG")));
        assert!(is_supported_image(Path::new("photo.png")));
        assert!(is_supported_image(Path::new("photo.webp")));
        assert!(is_supported_image(Path::new("photo.bmp")));
    }

    #[test]
    fn is_supported_image_rejects_unsupported_formats() {
        assert!(!is_supported_image(Path::new("photo.txt")));
        assert!(!is_supported_image(Path::new("photo.svg")));
        assert!(!is_supported_image(Path::new("photo")));
    }

    #[test]
    fn load_detects_format_from_contents() {
        let dir = tempfile::tempdir().unwrap();
        let mut png = Cursor::new(Vec::new());
        RgbaImage::from_pixel(3, 2, image::Rgba([9, 8, 7, 6]))
            .write_to(&mut png, ImageFormat::Png)
            .unwrap();

        for name in ["map", "map.jpg"] {
            let path = dir.path().join(name);
            std::fs::write(&path, png.get_ref()).unwrap();
            let img = load_rgba(&path).unwrap();
            assert_eq!(img.dimensions(), (3, 2), "{name}");
            assert_eq!(img.get_pixel(0, 0), &image::Rgba([9, 8, 7, 6]), "{name}");
        }
    }

    #[test]
    fn failed_save_keeps_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.ico");
        std::fs::write(&path, b"previous").unwrap();

        // ICO cannot hold images wider than 256 pixels.
        let err = save_rgba(&RgbaImage::new(300, 10), &path).unwrap_err();
        assert!(matches!(err, Error::Output { .. }));
        assert_eq!(std::fs::read(&path).unwrap(), b"previous");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn save_replaces_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        std::fs::write(&path, b"previous").unwrap();

        save_rgba(&RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 4])), &path).unwrap();
        let img = load_rgba(&path).unwrap();
        assert_eq!(img.dimensions(), (4, 4));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn save_into_missing_directory_is_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        let err = save_rgba(&RgbaImage::new(2, 2), &path).unwrap_err();
        assert!(matches!(err, Error::Output { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn load_missing_file_is_input_error() {
        let err = load_rgba(Path::new("/nonexistent/dir/missing.png")).unwrap_err();
        assert!(matches!(err, Error::Input { .. }));
        assert!(err.to_string().contains("missing.png"));
    }
}
