//! Configuration types for PDF-to-PNG conversion.
//!
//! All export behaviour is controlled through [`ConversionConfig`], built via
//! its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to serialise a config for logging and diff two runs to understand
//! why their outputs differ.
//!
//! Validation happens once, in [`ConversionConfigBuilder::build`], before any
//! I/O: an invalid contrast factor or DPI never reaches the rasteriser.

use crate::error::PageProofError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default source PDF when none is given.
pub const DEFAULT_INPUT_PDF: &str = "document.pdf";

/// Default directory for exported page images.
pub const DEFAULT_OUTPUT_DIR: &str = "png_output";

/// Configuration for a PDF-to-PNG export run.
///
/// Built via [`ConversionConfig::builder()`] or [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use pageproof::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .input_pdf("report.pdf")
///     .dpi(300)
///     .contrast_factor(2.0)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Source PDF file path. Default: `document.pdf`.
    pub input_pdf: PathBuf,

    /// Output directory for page images, created if absent. Default: `png_output`.
    pub output_dir: PathBuf,

    /// Contrast multiplier applied after rasterisation. Default: 2.0.
    ///
    /// 1.0 is identity; 0.0 is the degenerate fully flat mid-gray image
    /// (accepted by validation); values above 1.0 widen the dynamic range.
    /// Scanned or low-quality pages benefit from 2.0 because the VLM reads
    /// high-contrast glyph edges far more reliably than gray-on-gray text.
    pub contrast_factor: f32,

    /// Rendering DPI, relative to the PDF's native 72-dpi coordinate space.
    /// Default: 300.
    ///
    /// 300 DPI keeps small print legible for the vision model; the file-size
    /// cost is acceptable because each page is uploaded exactly once.
    pub dpi: u32,

    /// Collapse each page to single-channel luminance before the contrast
    /// pass. Default: true.
    ///
    /// Grayscale roughly third-sizes the PNGs and removes colour noise that
    /// contributes nothing to text extraction.
    pub grayscale: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            input_pdf: PathBuf::from(DEFAULT_INPUT_PDF),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            contrast_factor: 2.0,
            dpi: 300,
            grayscale: true,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn input_pdf(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.input_pdf = path.into();
        self
    }

    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_dir = path.into();
        self
    }

    pub fn contrast_factor(mut self, factor: f32) -> Self {
        self.config.contrast_factor = factor;
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    pub fn grayscale(mut self, v: bool) -> Self {
        self.config.grayscale = v;
        self
    }

    /// Build the configuration, validating numeric constraints.
    ///
    /// Fails fast — before any file is opened — on a negative or non-finite
    /// contrast factor or a zero DPI.
    pub fn build(self) -> Result<ConversionConfig, PageProofError> {
        let c = &self.config;
        if !c.contrast_factor.is_finite() || c.contrast_factor < 0.0 {
            return Err(PageProofError::InvalidConfig(format!(
                "contrast factor must be a finite value >= 0, got {}",
                c.contrast_factor
            )));
        }
        if c.dpi == 0 {
            return Err(PageProofError::InvalidConfig(
                "DPI must be > 0".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ConversionConfig::builder().build().unwrap();
        assert_eq!(config.input_pdf, PathBuf::from("document.pdf"));
        assert_eq!(config.output_dir, PathBuf::from("png_output"));
        assert_eq!(config.contrast_factor, 2.0);
        assert_eq!(config.dpi, 300);
        assert!(config.grayscale);
    }

    #[test]
    fn zero_contrast_is_accepted() {
        // Degenerate but valid: produces a flat mid-gray image.
        let config = ConversionConfig::builder()
            .contrast_factor(0.0)
            .build()
            .unwrap();
        assert_eq!(config.contrast_factor, 0.0);
    }

    #[test]
    fn negative_contrast_is_rejected() {
        let err = ConversionConfig::builder()
            .contrast_factor(-0.5)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("contrast factor"));
    }

    #[test]
    fn nan_contrast_is_rejected() {
        assert!(ConversionConfig::builder()
            .contrast_factor(f32::NAN)
            .build()
            .is_err());
    }

    #[test]
    fn zero_dpi_is_rejected() {
        let err = ConversionConfig::builder().dpi(0).build().unwrap_err();
        assert!(err.to_string().contains("DPI"));
    }
}
