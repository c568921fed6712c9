pub mod builder;

use image::{DynamicImage, GrayImage};
use tracing::{debug, trace};
use crate::{
    algorithms::{circularity, preprocessing::to_intensity, Annotator},
    config::AnalysisConfig,
    error::Result,
    traits::{ContourExtractor, MaskPreprocessor, PolygonSimplifier, ShapeClassifier},
    types::{Contour, DetectedObject, Report},
};

/// The full classification pipeline: mask, contours, polygons, labels, annotation.
///
/// A pipeline holds no per-image state, so one instance can serve many images concurrently.
pub struct ShapePipeline {
    preprocessors: Vec<Box<dyn MaskPreprocessor>>,
    contour_extractor: Box<dyn ContourExtractor>,
    simplifier: Box<dyn PolygonSimplifier>,
    classifier: Box<dyn ShapeClassifier>,
    annotator: Annotator,
    min_area: f64,
}

impl ShapePipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Validate `config` and build the standard pipeline from it
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;
        builder::PipelineBuilder::from_config(config).build()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        preprocessors: Vec<Box<dyn MaskPreprocessor>>,
        contour_extractor: Box<dyn ContourExtractor>,
        simplifier: Box<dyn PolygonSimplifier>,
        classifier: Box<dyn ShapeClassifier>,
        annotator: Annotator,
        min_area: f64,
    ) -> Self {
        Self {
            preprocessors,
            contour_extractor,
            simplifier,
            classifier,
            annotator,
            min_area,
        }
    }

    /// Binary foreground mask of `image`, same size as the input
    pub fn preprocess(&self, image: &DynamicImage) -> GrayImage {
        let mut processed = to_intensity(image);
        for preprocessor in &self.preprocessors {
            processed = preprocessor.preprocess(&processed);
        }
        processed
    }

    /// Outer contours of `image`, before any filtering
    pub fn extract_contours(&self, image: &DynamicImage) -> Vec<Contour> {
        let mask = self.preprocess(image);
        self.contour_extractor.extract_contours(&mask)
    }

    /// Run every stage over one image
    pub fn analyze(&self, image: &DynamicImage) -> Report {
        let mask = self.preprocess(image);
        debug!(
            width = mask.width(),
            height = mask.height(),
            foreground = mask.pixels().filter(|p| p[0] > 0).count(),
            "Built foreground mask"
        );

        let contours = self.contour_extractor.extract_contours(&mask);
        debug!(count = contours.len(), "Extracted external contours");

        // Fresh buffer; the source is never written to
        let mut canvas = image.to_rgb8();
        let mut objects: Vec<DetectedObject> = Vec::new();

        for (i, contour) in contours.iter().enumerate() {
            let area = contour.area();
            if area < self.min_area {
                trace!(contour = i, area, "Discarded contour below minimum area");
                continue;
            }

            let perimeter = contour.perimeter();
            let Some(polygon) = self.simplifier.simplify(contour) else {
                trace!(contour = i, perimeter, "Discarded degenerate contour");
                continue;
            };

            let shape = self.classifier.classify(&polygon, area, perimeter);
            self.annotator.annotate(&mut canvas, &polygon, shape);

            objects.push(DetectedObject {
                index: objects.len() + 1,
                shape,
                area,
                perimeter,
                circularity: circularity(area, perimeter),
                bounding_box: polygon.bounding_box(),
                polygon,
            });
        }

        debug!(
            accepted = objects.len(),
            discarded = contours.len() - objects.len(),
            "Classified contours"
        );

        Report {
            objects,
            annotated: canvas,
            image_width: image.width(),
            image_height: image.height(),
        }
    }

    pub fn min_area(&self) -> f64 {
        self.min_area
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: {} preprocessors, 1 contour extractor, 1 simplifier, 1 classifier, min area {}",
            self.preprocessors.len(),
            self.min_area
        )
    }
}
