//! Export configuration recognized by the rasterization collaborator.
//!
//! # Invariants
//! - `destination_name` is a bare file name, never a path.
//! - `raster_scale` is finite and positive.
//! - `content_density.quality` lies in `(0, 1]`.
//! - Margins are finite and non-negative.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static DESTINATION_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._ -]*$").expect("valid destination name regex")
});

/// Default output file name.
pub const DEFAULT_DESTINATION_NAME: &str = "resume.pdf";

/// Physical page format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    #[default]
    Letter,
    Legal,
    A4,
}

impl PageSize {
    /// CSS `@page` size keyword.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Letter => "letter",
            Self::Legal => "legal",
            Self::A4 => "A4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    #[default]
    In,
    Mm,
    Pt,
}

impl LengthUnit {
    pub fn css_name(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Mm => "mm",
            Self::Pt => "pt",
        }
    }
}

/// Page margins on all four sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMargins {
    pub unit: LengthUnit,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl PageMargins {
    /// Same margin on all four sides.
    pub fn uniform(value: f32, unit: LengthUnit) -> Self {
        Self {
            unit,
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// CSS `margin` shorthand (`top right bottom left`).
    pub fn css_value(&self) -> String {
        let unit = self.unit.css_name();
        format!(
            "{}{unit} {}{unit} {}{unit} {}{unit}",
            self.top, self.right, self.bottom, self.left
        )
    }

    fn sides(&self) -> [f32; 4] {
        [self.top, self.right, self.bottom, self.left]
    }
}

impl Default for PageMargins {
    fn default() -> Self {
        Self::uniform(1.0, LengthUnit::In)
    }
}

/// Intermediate image encoding used for rasterized pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    #[default]
    Jpeg,
    Png,
}

/// Image-vs-vector quality tradeoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentDensity {
    pub image_format: ImageFormat,
    /// Encoder quality in `(0, 1]`.
    pub quality: f32,
}

impl Default for ContentDensity {
    fn default() -> Self {
        Self {
            image_format: ImageFormat::Jpeg,
            quality: 0.98,
        }
    }
}

/// Options passed to the collaborator with every export request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub destination_name: String,
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub margins: PageMargins,
    /// Quality/resolution multiplier applied when rasterizing.
    pub raster_scale: f32,
    pub content_density: ContentDensity,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            destination_name: DEFAULT_DESTINATION_NAME.to_string(),
            page_size: PageSize::default(),
            orientation: Orientation::default(),
            margins: PageMargins::default(),
            raster_scale: 2.0,
            content_density: ContentDensity::default(),
        }
    }
}

impl ExportOptions {
    /// Validates option invariants.
    pub fn validate(&self) -> Result<(), ExportOptionsError> {
        let name = self.destination_name.trim();
        if name.is_empty() {
            return Err(ExportOptionsError::BlankDestinationName);
        }
        if !DESTINATION_NAME_RE.is_match(name) || name.contains("..") {
            return Err(ExportOptionsError::InvalidDestinationName(
                self.destination_name.clone(),
            ));
        }
        if !self.raster_scale.is_finite() || self.raster_scale <= 0.0 {
            return Err(ExportOptionsError::InvalidRasterScale(self.raster_scale));
        }
        let quality = self.content_density.quality;
        if !quality.is_finite() || quality <= 0.0 || quality > 1.0 {
            return Err(ExportOptionsError::InvalidQuality(quality));
        }
        if let Some(value) = self
            .margins
            .sides()
            .into_iter()
            .find(|value| !value.is_finite() || *value < 0.0)
        {
            return Err(ExportOptionsError::InvalidMargin(value));
        }
        Ok(())
    }

    /// Destination name without its final extension.
    pub fn destination_stem(&self) -> &str {
        let name = self.destination_name.trim();
        match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => name,
        }
    }
}

/// Export option validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOptionsError {
    BlankDestinationName,
    /// Name contains path separators or unsupported characters.
    InvalidDestinationName(String),
    InvalidRasterScale(f32),
    InvalidQuality(f32),
    InvalidMargin(f32),
}

impl Display for ExportOptionsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankDestinationName => write!(f, "export destination name must not be blank"),
            Self::InvalidDestinationName(value) => {
                write!(f, "export destination name is invalid: `{value}`")
            }
            Self::InvalidRasterScale(value) => {
                write!(f, "raster scale must be a positive number, got {value}")
            }
            Self::InvalidQuality(value) => {
                write!(f, "content quality must be in (0, 1], got {value}")
            }
            Self::InvalidMargin(value) => {
                write!(f, "page margins must be non-negative, got {value}")
            }
        }
    }
}

impl Error for ExportOptionsError {}

#[cfg(test)]
mod tests {
    use super::{ExportOptions, ExportOptionsError, LengthUnit, PageMargins, PageSize};

    #[test]
    fn defaults_are_valid_letter_portrait() {
        let options = ExportOptions::default();
        options.validate().expect("defaults should validate");
        assert_eq!(options.destination_name, "resume.pdf");
        assert_eq!(options.page_size, PageSize::Letter);
        assert_eq!(options.margins, PageMargins::uniform(1.0, LengthUnit::In));
        assert_eq!(options.raster_scale, 2.0);
        assert_eq!(options.destination_stem(), "resume");
    }

    #[test]
    fn rejects_path_like_destination() {
        for name in ["../resume.pdf", "out/resume.pdf", "a..pdf", ".hidden"] {
            let options = ExportOptions {
                destination_name: name.to_string(),
                ..ExportOptions::default()
            };
            assert!(matches!(
                options.validate(),
                Err(ExportOptionsError::InvalidDestinationName(_))
            ));
        }
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        let mut options = ExportOptions {
            raster_scale: 0.0,
            ..ExportOptions::default()
        };
        assert_eq!(
            options.validate(),
            Err(ExportOptionsError::InvalidRasterScale(0.0))
        );

        options.raster_scale = 1.0;
        options.content_density.quality = 1.5;
        assert_eq!(options.validate(), Err(ExportOptionsError::InvalidQuality(1.5)));

        options.content_density.quality = 0.5;
        options.margins.left = -1.0;
        assert_eq!(options.validate(), Err(ExportOptionsError::InvalidMargin(-1.0)));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let options: ExportOptions =
            serde_json::from_str(r#"{"destination_name":"cv.pdf","page_size":"a4"}"#).unwrap();
        assert_eq!(options.destination_name, "cv.pdf");
        assert_eq!(options.page_size, PageSize::A4);
        assert_eq!(options.raster_scale, 2.0);
    }

    #[test]
    fn margins_render_as_css_shorthand() {
        assert_eq!(
            PageMargins::uniform(1.0, LengthUnit::In).css_value(),
            "1in 1in 1in 1in"
        );
    }
}
