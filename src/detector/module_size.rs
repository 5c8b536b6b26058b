//! Module size estimation from the position-detection pattern.

use image::GrayImage;

use crate::error::{ConvertError, Result};

/// Number of modules along one edge of a position-detection pattern.
pub const PDP_SIDE: u32 = 7;

/// Strategy for measuring how many source pixels one QR module spans.
///
/// The estimator sees the cropped, inverted image (foreground non-zero) and
/// returns the module size in pixels. Implementations can be swapped into
/// [`GridDetector`](crate::detector::GridDetector) without touching the
/// crop/resample/threshold stages.
pub trait ModuleSizeEstimator {
    /// Estimate the module size in pixels for a cropped QR image.
    fn estimate(&self, image: &GrayImage) -> Result<u32>;
}

/// Default estimator: raster-scan to the first light pixel.
///
/// The crop starts inside the top-left position-detection pattern, whose
/// outer ring is a solid dark run [`PDP_SIDE`] modules wide, so the pixel
/// offset of the first zero-intensity pixel divided by [`PDP_SIDE`] is the
/// module size. This is an edge-finding heuristic, not a fiducial detector:
/// it assumes the initial dark run is unbroken by noise or anti-aliasing.
#[derive(Debug, Clone, Copy)]
pub struct PdpEdgeScan {
    /// Width of the position-detection pattern in modules.
    pub pdp_side: u32,
}

impl PdpEdgeScan {
    /// Create an estimator with a custom PDP width.
    pub fn new(pdp_side: u32) -> Self {
        Self { pdp_side }
    }
}

impl Default for PdpEdgeScan {
    fn default() -> Self {
        Self { pdp_side: PDP_SIDE }
    }
}

impl ModuleSizeEstimator for PdpEdgeScan {
    fn estimate(&self, image: &GrayImage) -> Result<u32> {
        let run = image
            .pixels()
            .position(|p| p[0] == 0)
            .ok_or(ConvertError::ZeroModuleSize)?;

        let module_size = (run as f64 / self.pdp_side as f64).round() as u32;
        if module_size == 0 {
            return Err(ConvertError::ZeroModuleSize);
        }
        Ok(module_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn image_with_leading_run(run: u32, width: u32) -> GrayImage {
        let mut img = GrayImage::from_pixel(width, width, Luma([0u8]));
        for i in 0..run {
            img.put_pixel(i % width, i / width, Luma([255u8]));
        }
        img
    }

    #[test]
    fn test_exact_run() {
        // 70 dark pixels before the first light one: 7 modules of 10px
        let img = image_with_leading_run(70, 210);
        let size = PdpEdgeScan::default().estimate(&img).unwrap();
        assert_eq!(size, 10);
    }

    #[test]
    fn test_rounds_to_nearest() {
        // 73 / 7 = 10.43 rounds down, 74 / 7 = 10.57 rounds up
        let img = image_with_leading_run(73, 210);
        assert_eq!(PdpEdgeScan::default().estimate(&img).unwrap(), 10);
        let img = image_with_leading_run(74, 210);
        assert_eq!(PdpEdgeScan::default().estimate(&img).unwrap(), 11);
    }

    #[test]
    fn test_first_pixel_light() {
        let img = image_with_leading_run(0, 14);
        let err = PdpEdgeScan::default().estimate(&img).unwrap_err();
        assert!(matches!(err, ConvertError::ZeroModuleSize));
    }

    #[test]
    fn test_no_light_pixel() {
        let img = GrayImage::from_pixel(8, 8, Luma([255u8]));
        let err = PdpEdgeScan::default().estimate(&img).unwrap_err();
        assert!(matches!(err, ConvertError::ZeroModuleSize));
    }
}
