//! Logo asset loading. A missing or unreadable logo is never an error: the page
//! template falls back to a placeholder rectangle.

use std::path::Path;

use image::DynamicImage;
use tracing::{debug, warn};

/// A decoded logo, ready to embed as a PDF image XObject.
///
/// Sample data is zlib-compressed so the encoder can write it with `FlateDecode`
/// as-is. `alpha` is only present when at least one pixel is not fully opaque.
#[derive(Debug, Clone)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

impl LogoImage {
    /// Loads and decodes the logo at `path`. Returns `None` (and logs why) if the
    /// file is absent or cannot be decoded.
    pub fn load(path: &Path) -> Option<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "Logo not found, using placeholder");
            return None;
        }
        match image::open(path) {
            Ok(decoded) => {
                let logo = Self::from_image(&decoded);
                debug!(path = %path.display(), width = logo.width, height = logo.height, "Logo loaded");
                Some(logo)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Logo could not be decoded, using placeholder");
                None
            }
        }
    }

    pub fn from_image(decoded: &DynamicImage) -> Self {
        let rgba = decoded.to_rgba8();
        let (width, height) = (rgba.width(), rgba.height());

        let rgb: Vec<u8> = rgba
            .pixels()
            .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
            .collect();

        let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);
        let alpha = has_alpha.then(|| {
            let samples: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
            miniz_oxide::deflate::compress_to_vec_zlib(&samples, 6)
        });

        LogoImage {
            width,
            height,
            rgb: miniz_oxide::deflate::compress_to_vec_zlib(&rgb, 6),
            alpha,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_png(dir: &Path, name: &str, alpha: u8) -> std::path::PathBuf {
        let path = dir.join(name);
        let img = RgbaImage::from_pixel(8, 6, Rgba([106, 90, 205, alpha]));
        img.save(&path).expect("write png fixture");
        path
    }

    #[test]
    fn test_missing_logo_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LogoImage::load(&dir.path().join("nope.png")).is_none());
    }

    #[test]
    fn test_undecodable_logo_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(LogoImage::load(&path).is_none());
    }

    #[test]
    fn test_opaque_png_has_no_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "logo.png", 255);
        let logo = LogoImage::load(&path).expect("logo decodes");
        assert_eq!((logo.width, logo.height), (8, 6));
        assert!(logo.alpha.is_none());
        let raw = miniz_oxide::inflate::decompress_to_vec_zlib(&logo.rgb).unwrap();
        assert_eq!(raw.len(), 8 * 6 * 3);
        assert_eq!(&raw[..3], &[106, 90, 205]);
    }

    #[test]
    fn test_translucent_png_keeps_soft_mask() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "logo.png", 128);
        let logo = LogoImage::load(&path).expect("logo decodes");
        let alpha = logo.alpha.expect("alpha present");
        let raw = miniz_oxide::inflate::decompress_to_vec_zlib(&alpha).unwrap();
        assert_eq!(raw.len(), 8 * 6);
        assert!(raw.iter().all(|&a| a == 128));
    }
}
