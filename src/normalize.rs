//! Image normalization: collapse to a single luminance channel and fix
//! polarity so that code ink is the non-zero foreground.

use image::imageops::colorops;
use image::{DynamicImage, GrayImage};

/// Convert a decoded bitmap into an inverted grayscale image.
///
/// QR codes are printed dark-on-light, so before inversion the sparse
/// non-zero pixels would be the background, not the code. Inverting makes
/// the background intensity 0, which is what the bounding-box scan in the
/// detector treats as "not foreground".
pub fn normalize(image: &DynamicImage) -> GrayImage {
    let mut gray = image.to_luma8();
    colorops::invert(&mut gray);
    gray
}
