//! Image probing and normalization for embedding in presentation documents.

use std::io::Cursor;

use image::ImageFormat;

use crate::error::AssetError;

/// Formats the presentation backend can embed directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
}

impl ImageKind {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ImageKind::Png => "png",
            ImageKind::Jpeg => "jpeg",
            ImageKind::Gif => "gif",
        }
    }

    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            ImageKind::Png => "image/png",
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Gif => "image/gif",
        }
    }
}

/// A decoded-and-verified image ready to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub bytes: Vec<u8>,
    pub kind: ImageKind,
    pub width: u32,
    pub height: u32,
}

impl ImageAsset {
    /// Width divided by height; 1.0 for degenerate images.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            f64::from(self.width) / f64::from(self.height)
        }
    }
}

/// Decode `bytes` and return an embeddable asset.
///
/// PNG, JPEG and GIF are kept byte-for-byte. Any other format the `image`
/// crate can decode is re-encoded as PNG.
///
/// # Errors
///
/// Returns [`AssetError::Decode`] if the bytes are not a decodable image and
/// [`AssetError::Encode`] if PNG re-encoding fails.
pub fn normalize_image(bytes: Vec<u8>) -> Result<ImageAsset, AssetError> {
    let format = image::guess_format(&bytes).map_err(AssetError::Decode)?;
    let decoded = image::load_from_memory_with_format(&bytes, format).map_err(AssetError::Decode)?;
    let (width, height) = (decoded.width(), decoded.height());

    let kind = match format {
        ImageFormat::Png => Some(ImageKind::Png),
        ImageFormat::Jpeg => Some(ImageKind::Jpeg),
        ImageFormat::Gif => Some(ImageKind::Gif),
        _ => None,
    };

    if let Some(kind) = kind {
        return Ok(ImageAsset {
            bytes,
            kind,
            width,
            height,
        });
    }

    let mut png = Vec::new();
    decoded
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(AssetError::Encode)?;
    tracing::debug!(?format, width, height, "re-encoded image asset as PNG");

    Ok(ImageAsset {
        bytes: png,
        kind: ImageKind::Png,
        width,
        height,
    })
}
