//! qr2scad - Convert QR code images to OpenSCAD solid models
//!
//! For each dark module in the input bitmap, the emitted script places one
//! cube. The result can be subtracted from a flat surface with
//! `difference()` and the holes inked after printing.
//!
//! The pipeline is a single forward pass: normalize the bitmap to inverted
//! grayscale, detect the true module grid inside it, and emit a
//! parametrized OpenSCAD script.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// QR module grid detection (bounding box, module size, resampling)
pub mod detector;
/// QR bitmap synthesis for generate mode
pub mod encode;
/// Error taxonomy shared by all pipeline stages
pub mod error;
/// Core data structures (BoundingBox, ModuleGrid)
pub mod models;
/// Luminance conversion and polarity inversion
pub mod normalize;
/// OpenSCAD script generation
pub mod scad;

pub use detector::{GridDetector, ModuleSizeEstimator, PDP_SIDE, PdpEdgeScan};
pub use encode::{EncodeSettings, encode_qr_image};
pub use error::{ConvertError, Result};
pub use models::{BoundingBox, ModuleGrid};
pub use normalize::normalize;
pub use scad::{ScadSettings, generate_scad};

use std::fs;
use std::path::Path;

use image::DynamicImage;

/// Settings threaded through the whole conversion.
#[derive(Debug, Clone, Copy)]
pub struct ConvertSettings {
    /// Width of the position-detection pattern in modules.
    pub pdp_side: u32,
    /// Geometry emitter parameters.
    pub scad: ScadSettings,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            pdp_side: PDP_SIDE,
            scad: ScadSettings::default(),
        }
    }
}

/// Convert a decoded bitmap into an OpenSCAD script.
///
/// # Arguments
/// * `image` - Decoded input bitmap in any channel layout
/// * `settings` - Detector and emitter parameters
///
/// # Returns
/// The full script text, or the first stage failure.
pub fn convert(image: &DynamicImage, settings: &ConvertSettings) -> Result<String> {
    // Step 1: Collapse to grayscale and invert so ink is foreground
    let gray = normalize(image);

    // Step 2: Detect the module grid
    let detector = GridDetector::with_estimator(Box::new(PdpEdgeScan::new(settings.pdp_side)));
    let grid = detector.detect(&gray)?;

    // Step 3: Emit the geometry script
    Ok(generate_scad(&grid, &settings.scad))
}

/// Convert an image file into an OpenSCAD script file.
///
/// The script text is both written to `outfile` and returned, so callers
/// can inspect it without re-reading the file. The output handle is scoped
/// to this call and closed on every path.
pub fn convert_file(infile: &Path, outfile: &Path, settings: &ConvertSettings) -> Result<String> {
    let image = image::open(infile)?;
    let script = convert(&image, settings)?;
    fs::write(outfile, &script)?;
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn test_convert_blank_image() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 8, Luma([255u8])));
        let err = convert(&img, &ConvertSettings::default()).unwrap_err();
        assert!(matches!(err, ConvertError::EmptyImage));
    }

    #[test]
    fn test_convert_single_block() {
        // A solid dark square crops to an all-foreground region: the edge
        // scan never finds a light pixel and the module size is undefined.
        let mut img = GrayImage::from_pixel(9, 9, Luma([255u8]));
        for y in 1..8 {
            for x in 1..8 {
                img.put_pixel(x, y, Luma([0u8]));
            }
        }
        let err = convert(&DynamicImage::ImageLuma8(img), &ConvertSettings::default()).unwrap_err();
        assert!(matches!(err, ConvertError::ZeroModuleSize));
    }
}
