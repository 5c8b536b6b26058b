//! Error taxonomy for the conversion pipeline.
//!
//! Every failure aborts the whole conversion; there is no partial-result or
//! retry path. The library only returns these typed errors — presenting them
//! (and choosing an exit status) is the caller's job.

use thiserror::Error;

/// Errors that can abort a QR-to-OpenSCAD conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The image codec failed to decode or encode a bitmap.
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// The QR encoder rejected the payload in generate mode.
    #[error("QR encoding failed: {0}")]
    QrEncode(#[from] qrcode::types::QrError),

    /// The normalized image contains no foreground pixels at all.
    #[error("no foreground pixels found in image")]
    EmptyImage,

    /// The foreground bounding box is not square. QR symbols are square by
    /// definition, so this indicates a detection or input error upstream.
    #[error("QR code region must be square, found {width}x{height}")]
    NonSquareInput {
        /// Width of the cropped region in pixels.
        width: u32,
        /// Height of the cropped region in pixels.
        height: u32,
    },

    /// The module size could not be determined from the position-detection
    /// pattern, or rounded to zero.
    #[error("detected module size is zero")]
    ZeroModuleSize,

    /// Writing the generated script failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConvertError>;
