//! # Decode Module
//!
//! Turns raw file bytes into pixels and a render-ready preview.
//!
//! JPEG goes through zune-jpeg (1.5-2x faster than the image crate),
//! everything else through the image crate. A full decode is done on
//! purpose so truncated or corrupt payloads are caught at ingestion.

mod preview;

pub use preview::{DisplayImage, PreviewRenderer, DEFAULT_PREVIEW_EDGE};

use crate::error::FileError;
use image::{DynamicImage, ImageBuffer, Luma, Rgb, Rgba};
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// Container formats the decoder distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    Other,
}

impl SourceFormat {
    /// Sniff the format from magic bytes, ignoring the declared MIME type
    pub fn sniff(bytes: &[u8]) -> Self {
        match image::guess_format(bytes) {
            Ok(image::ImageFormat::Jpeg) => SourceFormat::Jpeg,
            _ => SourceFormat::Other,
        }
    }
}

/// Decode image bytes. `name` is only used for error context.
pub fn decode_image(name: &str, bytes: &[u8]) -> Result<DynamicImage, FileError> {
    if bytes.is_empty() {
        return Err(FileError::EmptyImage {
            name: name.to_string(),
        });
    }

    let image = match SourceFormat::sniff(bytes) {
        SourceFormat::Jpeg => decode_jpeg(name, bytes).or_else(|_| decode_fallback(name, bytes))?,
        SourceFormat::Other => decode_fallback(name, bytes)?,
    };

    if image.width() == 0 || image.height() == 0 {
        return Err(FileError::EmptyImage {
            name: name.to_string(),
        });
    }

    Ok(image)
}

fn decode_jpeg(name: &str, bytes: &[u8]) -> Result<DynamicImage, FileError> {
    let decode_error = |reason: String| FileError::Decode {
        name: name.to_string(),
        reason,
    };

    let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
    let mut decoder = JpegDecoder::new_with_options(bytes, options);

    let pixels = decoder
        .decode()
        .map_err(|e| decode_error(format!("zune-jpeg decode failed: {:?}", e)))?;

    let info = decoder
        .info()
        .ok_or_else(|| decode_error("missing JPEG header info".to_string()))?;
    let width = info.width as u32;
    let height = info.height as u32;

    let image = match decoder.get_output_colorspace().unwrap_or(ColorSpace::RGB) {
        ColorSpace::RGB => ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(width, height, pixels)
            .map(DynamicImage::ImageRgb8),
        ColorSpace::RGBA => ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(width, height, pixels)
            .map(DynamicImage::ImageRgba8),
        ColorSpace::Luma => ImageBuffer::<Luma<u8>, Vec<u8>>::from_raw(width, height, pixels)
            .map(DynamicImage::ImageLuma8),
        other => return Err(decode_error(format!("unsupported colorspace {:?}", other))),
    };

    image.ok_or_else(|| decode_error("pixel buffer does not match dimensions".to_string()))
}

fn decode_fallback(name: &str, bytes: &[u8]) -> Result<DynamicImage, FileError> {
    image::load_from_memory(bytes).map_err(|e| FileError::Decode {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
pub(crate) mod test_images {
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
    use std::io::Cursor;

    pub fn gradient(width: u32, height: u32) -> DynamicImage {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            Rgb([r, g, 128])
        });
        DynamicImage::ImageRgb8(img)
    }

    pub fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        gradient(width, height).write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }
}
