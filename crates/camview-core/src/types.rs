use bytes::Bytes;
use serde::{Deserialize, Serialize};

// MARK: - Resolution

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const VGA: Self = Self { width: 640, height: 480 };
    pub const HD: Self = Self { width: 1280, height: 720 };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_zero(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

// MARK: - PixelFormat

/// Raw layouts a CPU-side frame may arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Bgr,
    Bgrx,
    Bgra,
    Rgb,
    Rgba,
    Gray8,
}

impl PixelFormat {
    /// Name used in `video/x-raw` caps.
    pub fn caps_name(&self) -> &'static str {
        match self {
            Self::Bgr => "BGR",
            Self::Bgrx => "BGRx",
            Self::Bgra => "BGRA",
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
            Self::Gray8 => "GRAY8",
        }
    }

    pub fn from_caps_name(name: &str) -> Option<Self> {
        match name {
            "BGR" => Some(Self::Bgr),
            "BGRx" => Some(Self::Bgrx),
            "BGRA" => Some(Self::Bgra),
            "RGB" => Some(Self::Rgb),
            "RGBA" => Some(Self::Rgba),
            "GRAY8" => Some(Self::Gray8),
            _ => None,
        }
    }
}

// MARK: - Frame

/// One decoded frame held in CPU memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

impl Frame {
    pub fn new(data: Bytes, width: u32, height: u32, format: PixelFormat) -> Self {
        Self { data, width, height, format }
    }

    /// What a capture hands back once it can no longer produce frames.
    pub fn empty() -> Self {
        Self { data: Bytes::new(), width: 0, height: 0, format: PixelFormat::Bgr }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty() || self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_frame_is_empty() {
        assert!(Frame::empty().is_empty());
    }

    #[test]
    fn frame_without_dimensions_is_empty() {
        let frame = Frame::new(Bytes::from_static(&[1, 2, 3]), 0, 1, PixelFormat::Bgr);
        assert!(frame.is_empty());
    }

    #[test]
    fn populated_frame_is_not_empty() {
        let frame = Frame::new(Bytes::from(vec![0u8; 12]), 2, 2, PixelFormat::Bgr);
        assert!(!frame.is_empty());
    }

    #[test]
    fn caps_names_match_gstreamer_spelling() {
        for format in [
            PixelFormat::Bgr,
            PixelFormat::Bgrx,
            PixelFormat::Bgra,
            PixelFormat::Rgb,
            PixelFormat::Rgba,
            PixelFormat::Gray8,
        ] {
            assert_eq!(PixelFormat::from_caps_name(format.caps_name()), Some(format));
        }
        assert_eq!(PixelFormat::from_caps_name("NV12"), None);
    }
}
