//! QR bitmap synthesis for generate mode.
//!
//! Produces a dark-on-light grayscale bitmap with intact position-detection
//! patterns, suitable as pipeline input without any external image file.

use image::{GrayImage, Luma};
use qrcode::{Color, EcLevel, QrCode};

use crate::error::Result;

/// Parameters for synthesizing a QR bitmap.
#[derive(Debug, Clone, Copy)]
pub struct EncodeSettings {
    /// Error correction level of the generated symbol.
    pub ec_level: EcLevel,
    /// Rendered size of one module in pixels.
    pub module_pixels: u32,
    /// Quiet zone around the symbol, in modules.
    pub border: u32,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            ec_level: EcLevel::L,
            module_pixels: 10,
            border: 4,
        }
    }
}

/// Encode a payload into a dark-on-light QR bitmap.
///
/// Dark modules render as intensity 0 on a 255 background, matching what a
/// printed code looks like to the normalizer.
pub fn encode_qr_image(payload: &str, settings: &EncodeSettings) -> Result<GrayImage> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), settings.ec_level)?;
    let modules = code.to_colors();
    let count = code.width() as u32;

    let scale = settings.module_pixels.max(1);
    let size = (count + 2 * settings.border) * scale;
    let mut img = GrayImage::from_pixel(size, size, Luma([255u8]));

    for (i, color) in modules.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let col = (i as u32 % count + settings.border) * scale;
        let row = (i as u32 / count + settings.border) * scale;
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(col + dx, row + dy, Luma([0u8]));
            }
        }
    }

    Ok(img)
}
