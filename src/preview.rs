//! Local preview of the selected X-ray file.
//!
//! Holds the raw bytes (reused for the multipart upload) plus the decoded
//! pixel dimensions. The preview persists across refreshes since it reflects
//! the input file, not the response; replacing it drops the previous one so
//! only a single copy of the image is ever held.

use std::path::Path;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Preview {
    name: String,
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl Preview {
    /// Decode in-memory image bytes, capturing their pixel dimensions.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let img = image::load_from_memory(&bytes)
            .map_err(|e| Error::Preview(format!("image decode failed: {e}")))?;

        Ok(Self {
            name: name.into(),
            width: img.width(),
            height: img.height(),
            bytes,
        })
    }

    /// Read an image file from disk and decode it.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        Self::from_bytes(name, bytes)
    }

    /// Test helper: build a preview without decoding the bytes.
    #[cfg(test)]
    pub(crate) fn from_bytes_unchecked(
        name: impl Into<String>,
        bytes: Vec<u8>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            name: name.into(),
            bytes,
            width,
            height,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::new(width, height);
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_dimensions_and_keeps_bytes() {
        let bytes = png_bytes(2, 3);
        let preview = Preview::from_bytes("wrist.png", bytes.clone()).unwrap();

        assert_eq!(preview.name(), "wrist.png");
        assert_eq!(preview.width(), 2);
        assert_eq!(preview.height(), 3);
        assert_eq!(preview.bytes(), &bytes[..]);
    }

    #[test]
    fn undecodable_bytes_are_a_preview_error() {
        let err = Preview::from_bytes("junk.bin", vec![1, 2, 3, 4]).unwrap_err();
        assert!(matches!(err, Error::Preview(_)));
    }
}
