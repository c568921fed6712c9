//! # Shape Classification Library
//!
//! Finds dark foreground regions in a raster image, traces their outer boundaries and labels
//! each one as a triangle, square, rectangle, circle or star.
//!
//! ## Core Features
//!
//! - **Trait-based Architecture**: each stage (preprocessing, contour extraction,
//!   simplification, classification) sits behind a trait and can be swapped out
//! - **Adaptive Binarization**: per-pixel thresholds from the local mean, robust to uneven lighting
//! - **Scale-invariant Simplification**: Douglas-Peucker tolerance proportional to perimeter
//! - **Annotated Output**: every accepted object is outlined and labelled on a copy of the input
//! - **Batch Processing**: independent images analyzed in parallel, results in input order
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shapes::{analyze, AnalysisConfig};
//!
//! let image = image::open("shapes.png")?;
//! let report = analyze(&image, &AnalysisConfig::default())?;
//!
//! for object in &report.objects {
//!     println!("{} {} area={:.2}", object.index, object.shape, object.area);
//! }
//! report.annotated.save("shapes_annotated.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use shapes::{ShapePipeline, algorithms::*};
//!
//! let pipeline = ShapePipeline::builder()
//!     .add_preprocessor(GaussianBlurPreprocessor::with_kernel(5))
//!     .add_preprocessor(AdaptiveThresholdPreprocessor { block_size: 15, bias: 4.0 })
//!     .set_classifier(HeuristicClassifier { square_aspect_tolerance: 0.05, circularity_threshold: 0.8 })
//!     .with_min_area(400.0)
//!     .build()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules
pub mod error;
pub mod config;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod batch;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use error::{ShapeError, Result};
pub use config::{AnalysisConfig, AnnotationStyle};
pub use types::{BoundingBox, Contour, DetectedObject, Polygon, Report, ShapeKind};
pub use traits::*;
pub use pipeline::{ShapePipeline, builder::PipelineBuilder};
pub use batch::{analyze_batch, BatchAnalyzer};

/// Classify every shape in `image`.
///
/// Fails only when `config` is invalid; any valid image yields a report, possibly empty.
pub fn analyze(image: &image::DynamicImage, config: &AnalysisConfig) -> Result<Report> {
    let pipeline = ShapePipeline::from_config(config)?;
    Ok(pipeline.analyze(image))
}
