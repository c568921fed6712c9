use image::DynamicImage;
use rayon::iter::{IntoParallelRefIterator, IndexedParallelIterator, ParallelIterator};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::info;
use crate::{
    config::AnalysisConfig,
    error::{Result, ShapeError},
    pipeline::ShapePipeline,
    types::Report,
};

/// Runs one pipeline over many independent images on a dedicated worker pool.
pub struct BatchAnalyzer {
    pipeline: ShapePipeline,
    pool: ThreadPool,
}

impl BatchAnalyzer {
    /// `threads` of `None` sizes the pool to the available cores
    pub fn new(config: &AnalysisConfig, threads: Option<usize>) -> Result<Self> {
        let pipeline = ShapePipeline::from_config(config)?;
        Self::with_pipeline(pipeline, threads)
    }

    pub fn with_pipeline(pipeline: ShapePipeline, threads: Option<usize>) -> Result<Self> {
        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("shapes-worker-{i}"));
        if let Some(threads) = threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder
            .build()
            .map_err(|e| ShapeError::ThreadPool(e.to_string()))?;
        Ok(Self { pipeline, pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn pipeline(&self) -> &ShapePipeline {
        &self.pipeline
    }

    /// Analyze every image in parallel; reports come back in input order
    pub fn analyze_all(&self, images: &[DynamicImage]) -> Vec<Report> {
        info!(images = images.len(), workers = self.threads(), "Analyzing batch");
        self.pool.install(|| {
            images
                .par_iter()
                .enumerate()
                .map(|(i, image)| {
                    let report = self.pipeline.analyze(image);
                    info!(image = i + 1, objects = report.len(), "Analyzed image");
                    report
                })
                .collect()
        })
    }
}

/// One-shot convenience over [`BatchAnalyzer`] using all available cores
pub fn analyze_batch(images: &[DynamicImage], config: &AnalysisConfig) -> Result<Vec<Report>> {
    Ok(BatchAnalyzer::new(config, None)?.analyze_all(images))
}
