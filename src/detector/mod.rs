//! Grid detection: locate the QR symbol inside a normalized image and
//! reduce it to one pixel per module.

pub mod module_size;

pub use module_size::{ModuleSizeEstimator, PDP_SIDE, PdpEdgeScan};

use image::{GrayImage, Luma, imageops};

use crate::error::{ConvertError, Result};
use crate::models::{BoundingBox, ModuleGrid};

/// Detects the module grid of a QR symbol in an inverted grayscale image.
///
/// The module-size heuristic is pluggable via [`ModuleSizeEstimator`]; the
/// bounding box, crop, resample and threshold stages are fixed.
pub struct GridDetector {
    estimator: Box<dyn ModuleSizeEstimator>,
}

impl GridDetector {
    /// Create a detector using the default PDP edge-scan estimator.
    pub fn new() -> Self {
        Self::with_estimator(Box::new(PdpEdgeScan::default()))
    }

    /// Create a detector with a custom module-size estimator.
    pub fn with_estimator(estimator: Box<dyn ModuleSizeEstimator>) -> Self {
        Self { estimator }
    }

    /// Extract the module grid from a normalized (inverted) image.
    ///
    /// Fails with [`ConvertError::EmptyImage`] when the image has no
    /// foreground, [`ConvertError::NonSquareInput`] when the foreground
    /// region is not square, and [`ConvertError::ZeroModuleSize`] when the
    /// module size cannot be measured.
    pub fn detect(&self, image: &GrayImage) -> Result<ModuleGrid> {
        // Step 1: Tight bounding box of the foreground
        let bbox = bounding_box(image).ok_or(ConvertError::EmptyImage)?;

        // Step 2: Crop to it; QR symbols are square, so the crop must be too
        let cropped =
            imageops::crop_imm(image, bbox.left, bbox.top, bbox.width(), bbox.height()).to_image();
        let (width, height) = cropped.dimensions();
        if width != height {
            return Err(ConvertError::NonSquareInput { width, height });
        }

        // Step 3: Pixels per module from the top-left PDP edge
        let module_size = self.estimator.estimate(&cropped)?;

        // Step 4: Resample down to one pixel per module
        let side = (width as f64 / module_size as f64).round() as u32;
        if side == 0 {
            return Err(ConvertError::ZeroModuleSize);
        }
        let resampled = box_resample(&cropped, side);

        // Step 5: Threshold into the boolean grid
        let mut grid = ModuleGrid::new(side as usize);
        for (x, y, p) in resampled.enumerate_pixels() {
            grid.set(x as usize, y as usize, p[0] != 0);
        }
        Ok(grid)
    }
}

impl Default for GridDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the minimal rectangle enclosing all non-zero pixels.
///
/// Returns `None` when the image is entirely background.
pub fn bounding_box(image: &GrayImage) -> Option<BoundingBox> {
    let (width, height) = image.dimensions();
    let mut left = width;
    let mut top = height;
    let mut right = 0u32;
    let mut bottom = 0u32;
    let mut found = false;

    for (x, y, p) in image.enumerate_pixels() {
        if p[0] != 0 {
            found = true;
            left = left.min(x);
            top = top.min(y);
            right = right.max(x);
            bottom = bottom.max(y);
        }
    }

    if !found {
        return None;
    }
    Some(BoundingBox::new(left, top, right + 1, bottom + 1))
}

/// Downsample with a box filter: each target pixel is the mean of its source
/// window. The `image` crate's resize kernels all have support wider than one
/// module at large minification ratios, which smears ink into adjacent light
/// modules and would flip them under the non-zero threshold.
fn box_resample(image: &GrayImage, side: u32) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut out = GrayImage::new(side, side);

    for cy in 0..side {
        let y0 = (cy as u64 * height as u64 / side as u64) as u32;
        let y1 = (((cy as u64 + 1) * height as u64 / side as u64) as u32).max(y0 + 1);
        for cx in 0..side {
            let x0 = (cx as u64 * width as u64 / side as u64) as u32;
            let x1 = (((cx as u64 + 1) * width as u64 / side as u64) as u32).max(x0 + 1);

            let mut sum = 0u64;
            for y in y0..y1.min(height) {
                for x in x0..x1.min(width) {
                    sum += image.get_pixel(x, y)[0] as u64;
                }
            }
            let area = (y1.min(height) - y0) as u64 * (x1.min(width) - x0) as u64;
            let mean = (sum as f64 / area as f64).round() as u8;
            out.put_pixel(cx, cy, Luma([mean]));
        }
    }

    out
}
