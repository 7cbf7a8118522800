//! Image value object, used for application icons and profile pictures.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Jpeg,
    Png,
    Gif,
    Bmp,
}

impl ImageType {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub width: u32,
    pub height: u32,
}

/// Raw image bytes plus optional metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub image_type: Option<ImageType>,

    pub data: Vec<u8>,

    pub dimension: Option<Dimension>,
}

impl Image {
    pub fn new(image_type: ImageType, data: impl Into<Vec<u8>>) -> Self {
        Self {
            image_type: Some(image_type),
            data: data.into(),
            dimension: None,
        }
    }

    pub fn size_in_bytes(&self) -> usize {
        self.data.len()
    }
}
