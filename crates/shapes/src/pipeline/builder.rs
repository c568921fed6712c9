use crate::{
    pipeline::ShapePipeline,
    traits::{ContourExtractor, MaskPreprocessor, PolygonSimplifier, ShapeClassifier},
    algorithms::{
        AdaptiveThresholdPreprocessor,
        Annotator,
        DouglasPeuckerSimplifier,
        ExternalContourExtractor,
        GaussianBlurPreprocessor,
        HeuristicClassifier,
        MorphologicalClosePreprocessor,
    },
    config::{AnalysisConfig, AnnotationStyle},
    error::Result,
};

/// Builder for creating shape pipelines with a fluent API
pub struct PipelineBuilder {
    preprocessors: Vec<Box<dyn MaskPreprocessor>>,
    contour_extractor: Option<Box<dyn ContourExtractor>>,
    simplifier: Option<Box<dyn PolygonSimplifier>>,
    classifier: Option<Box<dyn ShapeClassifier>>,
    annotation: AnnotationStyle,
    min_area: f64,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            preprocessors: Vec::new(),
            contour_extractor: None,
            simplifier: None,
            classifier: None,
            annotation: AnnotationStyle::default(),
            min_area: AnalysisConfig::default().min_area,
        }
    }

    /// Seed every stage from `config`. Does not validate it.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new()
            .with_standard_preprocessing(config)
            .set_contour_extractor(ExternalContourExtractor::default())
            .set_simplifier(DouglasPeuckerSimplifier {
                tolerance_fraction: config.simplify_tolerance_fraction,
            })
            .set_classifier(HeuristicClassifier {
                square_aspect_tolerance: config.square_aspect_tolerance,
                circularity_threshold: config.circularity_threshold,
            })
            .with_annotation_style(config.annotation.clone())
            .with_min_area(config.min_area)
    }

    /// Add a preprocessor to the chain
    pub fn add_preprocessor<P>(mut self, preprocessor: P) -> Self
    where
        P: MaskPreprocessor + 'static,
    {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }

    /// Blur, adaptive threshold and closing, parameterised by `config`
    pub fn with_standard_preprocessing(self, config: &AnalysisConfig) -> Self {
        self.add_preprocessor(GaussianBlurPreprocessor::with_kernel(config.blur_kernel))
            .add_preprocessor(AdaptiveThresholdPreprocessor {
                block_size: config.adaptive_block_size,
                bias: config.adaptive_bias,
            })
            .add_preprocessor(MorphologicalClosePreprocessor {
                kernel_size: config.morph_kernel,
                iterations: config.morph_iterations,
            })
    }

    /// Set the contour extractor (replaces any existing one)
    pub fn set_contour_extractor<E>(mut self, extractor: E) -> Self
    where
        E: ContourExtractor + 'static,
    {
        self.contour_extractor = Some(Box::new(extractor));
        self
    }

    /// Set the simplifier (replaces any existing one)
    pub fn set_simplifier<S>(mut self, simplifier: S) -> Self
    where
        S: PolygonSimplifier + 'static,
    {
        self.simplifier = Some(Box::new(simplifier));
        self
    }

    /// Set the classifier (replaces any existing one)
    pub fn set_classifier<C>(mut self, classifier: C) -> Self
    where
        C: ShapeClassifier + 'static,
    {
        self.classifier = Some(Box::new(classifier));
        self
    }

    pub fn with_annotation_style(mut self, style: AnnotationStyle) -> Self {
        self.annotation = style;
        self
    }

    pub fn with_min_area(mut self, min_area: f64) -> Self {
        self.min_area = min_area;
        self
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> Result<ShapePipeline> {
        let preprocessors = if self.preprocessors.is_empty() {
            Self::new()
                .with_standard_preprocessing(&AnalysisConfig::default())
                .preprocessors
        } else {
            self.preprocessors
        };

        let contour_extractor = self.contour_extractor
            .unwrap_or_else(|| Box::new(ExternalContourExtractor::default()));

        let simplifier = self.simplifier
            .unwrap_or_else(|| Box::new(DouglasPeuckerSimplifier::default()));

        let classifier = self.classifier
            .unwrap_or_else(|| Box::new(HeuristicClassifier::default()));

        let annotator = Annotator::new(self.annotation)?;

        Ok(ShapePipeline::new(
            preprocessors,
            contour_extractor,
            simplifier,
            classifier,
            annotator,
            self.min_area,
        ))
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
