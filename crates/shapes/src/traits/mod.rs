use image::GrayImage;
use crate::types::{Contour, Polygon, ShapeKind};

/// Trait for single-channel preprocessing steps (blur, binarization, morphology)
pub trait MaskPreprocessor: Send + Sync {
    /// Transform the intensity image; the last step in a chain must yield a 0/255 mask
    fn preprocess(&self, image: &GrayImage) -> GrayImage;
}

/// Trait for contour extraction algorithms
pub trait ContourExtractor: Send + Sync {
    /// Extract outer boundaries from a binary mask, in a deterministic order
    fn extract_contours(&self, mask: &GrayImage) -> Vec<Contour>;
}

/// Trait for contour simplification algorithms
pub trait PolygonSimplifier: Send + Sync {
    /// Reduce a contour to a polygon, or `None` when the contour is degenerate
    fn simplify(&self, contour: &Contour) -> Option<Polygon>;
}

/// Trait for shape labelling
pub trait ShapeClassifier: Send + Sync {
    /// Label a simplified polygon given its originating contour's measurements
    fn classify(&self, polygon: &Polygon, area: f64, perimeter: f64) -> ShapeKind;
}
