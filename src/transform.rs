/// Presentation variants and their server-side transform parameters
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of presentation variants for media assets.
///
/// The variant selects the transformation the media host applies when
/// delivering the asset (dimensions, crop strategy, focal point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaVariant {
    /// Original asset, no resize
    #[default]
    Raw,
    /// Inspection certificate scan, document aspect
    Certificate,
    /// Inspector signature capture
    Signature,
    /// Profile portrait, square
    Face,
}

impl MediaVariant {
    /// Stable wire name for this variant
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaVariant::Raw => "raw",
            MediaVariant::Certificate => "certificate",
            MediaVariant::Signature => "signature",
            MediaVariant::Face => "face",
        }
    }

    /// Transform parameters for this variant, or `None` for untransformed
    /// delivery
    pub fn transform(&self) -> Option<Transform> {
        match self {
            MediaVariant::Raw => None,
            MediaVariant::Certificate => Some(Transform {
                width: 600,
                height: 800,
                crop: CropMode::Fill,
                gravity: None,
            }),
            MediaVariant::Signature => Some(Transform {
                width: 400,
                height: 200,
                crop: CropMode::Crop,
                gravity: Some(Gravity::Face),
            }),
            MediaVariant::Face => Some(Transform {
                width: 256,
                height: 256,
                crop: CropMode::Crop,
                gravity: Some(Gravity::Face),
            }),
        }
    }
}

impl fmt::Display for MediaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Crop strategy applied by the media host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropMode {
    /// Scale to fill the target dimensions, cropping overflow
    Fill,
    /// Extract a region of the target dimensions
    Crop,
}

impl CropMode {
    fn as_str(&self) -> &'static str {
        match self {
            CropMode::Fill => "c_fill",
            CropMode::Crop => "c_crop",
        }
    }
}

/// Focal-point strategy for cropping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    /// Center the crop on a detected face
    Face,
}

impl Gravity {
    fn as_str(&self) -> &'static str {
        match self {
            Gravity::Face => "g_face",
        }
    }
}

/// Server-side transformation descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transform {
    pub width: u32,
    pub height: u32,
    pub crop: CropMode,
    pub gravity: Option<Gravity>,
}

impl Transform {
    /// Render the transform as a delivery URL path segment,
    /// e.g. `c_crop,g_face,w_256,h_256`
    pub fn url_segment(&self) -> String {
        let mut parts = vec![self.crop.as_str().to_string()];
        if let Some(gravity) = self.gravity {
            parts.push(gravity.as_str().to_string());
        }
        parts.push(format!("w_{}", self.width));
        parts.push(format!("h_{}", self.height));
        parts.join(",")
    }
}
