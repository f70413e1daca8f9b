// ============================================================================
// IMAGE IO — decode on load, encode on export, native file dialogs
// ============================================================================

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageError, RgbaImage};
use rfd::FileDialog;
use std::io::Cursor;
use std::path::PathBuf;

/// JPEG export quality (0-100).
const JPEG_QUALITY: u8 = 90;

/// Image extensions offered by the open dialog (lowercase).
pub const OPEN_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif", "tif", "tiff"];

/// Encodings the editor can export to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Jpeg => "JPEG",
        }
    }
}

/// Decode raw file bytes into an RGBA raster. Malformed or unsupported input
/// surfaces as `ImageError`; the caller decides what happens to the current
/// session (it keeps the prior image).
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, ImageError> {
    Ok(image::load_from_memory(bytes)?.into_rgba8())
}

/// Encode a composited raster to an in-memory payload.
///
/// JPEG has no alpha channel, so the raster is flattened to RGB first. A
/// failed encode is local to this one attempt — nothing else is mutated.
pub fn encode_image(image: &RgbaImage, format: ExportFormat) -> Result<Vec<u8>, ImageError> {
    let mut payload = Vec::new();
    let mut writer = Cursor::new(&mut payload);

    match format {
        ExportFormat::Png => {
            let encoder = PngEncoder::new(&mut writer);
            #[allow(deprecated)]
            encoder.encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ColorType::Rgba8,
            )?;
        }
        ExportFormat::Jpeg => {
            let rgb_image = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            let mut encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
            encoder.encode(
                rgb_image.as_raw(),
                rgb_image.width(),
                rgb_image.height(),
                image::ColorType::Rgb8,
            )?;
        }
    }

    Ok(payload)
}

/// Native open dialog filtered to the supported image types.
pub fn pick_open_path() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("Images", OPEN_EXTENSIONS)
        .pick_file()
}

/// Native save dialog preset for `format`.
pub fn pick_export_path(format: ExportFormat) -> Option<PathBuf> {
    FileDialog::new()
        .add_filter(format.label(), &[format.extension()])
        .set_file_name(&format!("edited-image.{}", format.extension()))
        .save_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn png_payload_round_trips_losslessly() {
        let img = RgbaImage::from_fn(9, 7, |x, y| Rgba([x as u8 * 20, y as u8 * 30, 5, 255]));
        let payload = encode_image(&img, ExportFormat::Png).unwrap();
        let decoded = decode_image(&payload).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn jpeg_payload_decodes_with_matching_dimensions() {
        let img = RgbaImage::from_pixel(16, 12, Rgba([120, 80, 40, 255]));
        let payload = encode_image(&img, ExportFormat::Jpeg).unwrap();
        let decoded = decode_image(&payload).unwrap();
        assert_eq!(decoded.dimensions(), (16, 12));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(decode_image(b"definitely not an image").is_err());
        assert!(decode_image(&[]).is_err());
    }
}
