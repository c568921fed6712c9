use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShapeError};

/// Tunable parameters for one analysis run.
///
/// Every field has a default, so a partial TOML or JSON table is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Contours enclosing less than this many square pixels are discarded
    #[schemars(range(min = 0.0))]
    pub min_area: f64,
    /// Side of the Gaussian smoothing kernel (odd, 1 disables smoothing)
    pub blur_kernel: u32,
    /// Side of the neighbourhood used for the local mean (odd, at least 3)
    pub adaptive_block_size: u32,
    /// Constant subtracted from the local mean before comparison
    pub adaptive_bias: f64,
    /// Side of the square structuring element used for closing (odd)
    pub morph_kernel: u32,
    /// Number of dilations (then erosions) performed by the closing
    pub morph_iterations: u32,
    /// Simplification tolerance as a fraction of the contour perimeter
    #[schemars(range(min = 0.0, max = 1.0))]
    pub simplify_tolerance_fraction: f64,
    /// Circularity above which a many-sided polygon is a circle
    #[schemars(range(min = 0.0, max = 1.0))]
    pub circularity_threshold: f64,
    /// Half-width of the aspect ratio band around 1.0 that counts as square
    pub square_aspect_tolerance: f64,
    /// Outline and label drawing style
    pub annotation: AnnotationStyle,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_area: 1000.0,
            blur_kernel: 7,
            adaptive_block_size: 11,
            adaptive_bias: 2.0,
            morph_kernel: 3,
            morph_iterations: 2,
            simplify_tolerance_fraction: 0.04,
            circularity_threshold: 0.70,
            square_aspect_tolerance: 0.10,
            annotation: AnnotationStyle::default(),
        }
    }
}

impl AnalysisConfig {
    /// Get the JSON schema for the configuration
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(AnalysisConfig)
    }

    /// Reject parameter combinations the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.blur_kernel == 0 || self.blur_kernel % 2 == 0 {
            return Err(invalid(format!("blur_kernel must be odd, got {}", self.blur_kernel)));
        }
        if self.adaptive_block_size < 3 || self.adaptive_block_size % 2 == 0 {
            return Err(invalid(format!(
                "adaptive_block_size must be odd and at least 3, got {}",
                self.adaptive_block_size
            )));
        }
        if self.morph_kernel == 0 || self.morph_kernel % 2 == 0 {
            return Err(invalid(format!("morph_kernel must be odd, got {}", self.morph_kernel)));
        }
        if !self.adaptive_bias.is_finite() {
            return Err(invalid("adaptive_bias must be finite".to_string()));
        }
        if !self.min_area.is_finite() || self.min_area < 0.0 {
            return Err(invalid(format!("min_area must be non-negative, got {}", self.min_area)));
        }
        if !self.simplify_tolerance_fraction.is_finite() || self.simplify_tolerance_fraction <= 0.0 {
            return Err(invalid(format!(
                "simplify_tolerance_fraction must be positive, got {}",
                self.simplify_tolerance_fraction
            )));
        }
        if !self.circularity_threshold.is_finite() || self.circularity_threshold < 0.0 {
            return Err(invalid(format!(
                "circularity_threshold must be non-negative, got {}",
                self.circularity_threshold
            )));
        }
        if !self.square_aspect_tolerance.is_finite() || self.square_aspect_tolerance < 0.0 {
            return Err(invalid(format!(
                "square_aspect_tolerance must be non-negative, got {}",
                self.square_aspect_tolerance
            )));
        }
        self.annotation.validate()
    }

    /// Standard deviation of the smoothing kernel, derived from its size
    pub fn blur_sigma(&self) -> f32 {
        gaussian_sigma_for_kernel(self.blur_kernel)
    }
}

/// Colors and sizes used when drawing detections onto the output canvas.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct AnnotationStyle {
    pub outline_color: [u8; 3],
    pub outline_thickness: u32,
    pub label_color: [u8; 3],
    /// Label height in pixels
    pub label_scale: f32,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            outline_color: [0, 255, 255],
            outline_thickness: 2,
            label_color: [255, 255, 255],
            label_scale: 16.0,
        }
    }
}

impl AnnotationStyle {
    fn validate(&self) -> Result<()> {
        if self.outline_thickness == 0 {
            return Err(invalid("annotation.outline_thickness must be at least 1".to_string()));
        }
        if !self.label_scale.is_finite() || self.label_scale <= 0.0 {
            return Err(invalid(format!(
                "annotation.label_scale must be positive, got {}",
                self.label_scale
            )));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> ShapeError {
    ShapeError::InvalidConfig(reason)
}

/// Sigma used for a Gaussian kernel of side `kernel` when none is given explicitly.
pub fn gaussian_sigma_for_kernel(kernel: u32) -> f32 {
    0.3 * ((kernel as f32 - 1.0) * 0.5 - 1.0) + 0.8
}
