//! Signature image loading and embedding.

use crate::error::PdfError;
use lopdf::{Dictionary, Object, Stream};
use std::path::Path;

/// A decoded signature image, flattened to 8-bit RGB.
///
/// Decoded once per batch run and reused for every composed page.
#[derive(Clone)]
pub struct SignatureImage {
    rgb: Vec<u8>,
    width: u32,
    height: u32,
}

impl SignatureImage {
    /// Decode an image file (PNG, JPEG, ...) from disk.
    pub fn load(path: &Path) -> Result<Self, PdfError> {
        let decoded = image::open(path).map_err(|e| PdfError::Image(e.to_string()))?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        Ok(Self {
            rgb: rgb.into_raw(),
            width,
            height,
        })
    }

    /// Build a signature from raw RGB8 pixel data, row-major.
    pub fn from_rgb8(width: u32, height: u32, rgb: Vec<u8>) -> Result<Self, PdfError> {
        if width == 0 || height == 0 || rgb.len() != (width * height * 3) as usize {
            return Err(PdfError::Image(format!(
                "RGB buffer of {} bytes does not match {}x{} pixels",
                rgb.len(),
                width,
                height
            )));
        }
        Ok(Self { rgb, width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Image XObject stream embedding the raw pixels as DeviceRGB.
    pub fn to_xobject(&self) -> Stream {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", Object::Integer(self.width as i64));
        dict.set("Height", Object::Integer(self.height as i64));
        dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
        dict.set("BitsPerComponent", Object::Integer(8));
        Stream::new(dict, self.rgb.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb8_accepts_matching_buffer() {
        let signature = SignatureImage::from_rgb8(4, 2, vec![0xFF; 24]).unwrap();
        assert_eq!(signature.width(), 4);
        assert_eq!(signature.height(), 2);
        assert_eq!(signature.aspect_ratio(), 2.0);
    }

    #[test]
    fn test_from_rgb8_rejects_wrong_buffer_size() {
        assert!(SignatureImage::from_rgb8(4, 2, vec![0; 10]).is_err());
        assert!(SignatureImage::from_rgb8(0, 2, vec![]).is_err());
    }

    #[test]
    fn test_xobject_dimensions() {
        let signature = SignatureImage::from_rgb8(3, 5, vec![0; 45]).unwrap();
        let stream = signature.to_xobject();
        assert_eq!(stream.dict.get(b"Width").unwrap().as_i64().unwrap(), 3);
        assert_eq!(stream.dict.get(b"Height").unwrap().as_i64().unwrap(), 5);
        assert_eq!(stream.content.len(), 45);
    }

    #[test]
    fn test_load_round_trips_through_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signature.png");
        image::RgbImage::from_pixel(6, 3, image::Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let signature = SignatureImage::load(&path).unwrap();
        assert_eq!(signature.width(), 6);
        assert_eq!(signature.height(), 3);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = SignatureImage::load(Path::new("/nonexistent/sig.png"));
        assert!(matches!(result, Err(PdfError::Image(_))));
    }
}
