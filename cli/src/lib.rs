use image::DynamicImage;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shapes::{AnalysisConfig, Report, ShapeError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    ShapeError(#[from] ShapeError),
    #[error("Failed to decode image {path}: {source}")]
    DecodeError {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to write image {path}: {source}")]
    EncodeError {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("No input images given")]
    NoImages,
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// A batch of images plus the settings to analyze them with
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AnalysisJob {
    pub images: Vec<String>,
    pub output_dir: String,
    /// Worker threads; all available cores when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    /// Also write a `<NN>_<stem>.json` report next to each annotated image
    #[serde(default)]
    pub write_json: bool,
    #[serde(default)]
    pub config: AnalysisConfig,
}

impl Default for AnalysisJob {
    fn default() -> Self {
        Self {
            images: vec!["shapes.png".to_string()],
            output_dir: "annotated".to_string(),
            threads: None,
            write_json: false,
            config: AnalysisConfig::default(),
        }
    }
}

impl AnalysisJob {
    /// Load AnalysisJob from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(content)?)
    }

    /// Load AnalysisJob from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load the job
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(CliError::UnsupportedFileFormat),
        }
    }

    /// Save in the format implied by the file extension
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CliError> {
        let path_ref = path.as_ref();
        let content = match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => self.to_toml()?,
            Some("json") => self.to_json()?,
            _ => return Err(CliError::UnsupportedFileFormat),
        };
        fs::write(path_ref, content)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, CliError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    pub fn to_json(&self) -> Result<String, CliError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }
}

/// Load an [`AnalysisConfig`] on its own, TOML or JSON by extension
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AnalysisConfig, CliError> {
    let path_ref = path.as_ref();
    let content = fs::read_to_string(path_ref)?;
    let config: AnalysisConfig = match path_ref.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content)?,
        Some("json") => serde_json::from_str(&content)?,
        _ => return Err(CliError::UnsupportedFileFormat),
    };
    config.validate()?;
    Ok(config)
}

/// Decode every path in order. The first unreadable file aborts the load.
pub fn load_images<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<DynamicImage>, CliError> {
    if paths.is_empty() {
        return Err(CliError::NoImages);
    }
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            image::open(path).map_err(|source| CliError::DecodeError {
                path: path.display().to_string(),
                source,
            })
        })
        .collect()
}

/// Tabulate a report, one row per object in discovery order
pub fn render_table(report: &Report) -> String {
    if report.is_empty() {
        return "No shapes detected.".to_string();
    }

    let mut table = format!(
        "{:<9} | {:<9} | {:>12} | {:>14}\n",
        "Object No", "Shape", "Area (px²)", "Perimeter (px)"
    );
    table.push_str(&format!("{}\n", "-".repeat(9 + 3 + 9 + 3 + 12 + 3 + 14)));
    for object in &report.objects {
        table.push_str(&format!(
            "{:<9} | {:<9} | {:>12.2} | {:>14.2}\n",
            object.index, object.shape, object.area, object.perimeter
        ));
    }
    table
}

/// One line per label present, e.g. `Circle: 2, Square: 1`
pub fn render_summary(report: &Report) -> String {
    report
        .count_by_shape()
        .iter()
        .map(|(shape, count)| format!("{shape}: {count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Write `<NN>_<stem>_annotated.png` (and `<NN>_<stem>.json` when asked) into `output_dir`,
/// where `NN` is the 1-based position of the image in its batch. Returns the paths written.
pub fn write_outputs(
    output_dir: &Path,
    index: usize,
    image_path: &Path,
    report: &Report,
    write_json: bool,
) -> Result<Vec<PathBuf>, CliError> {
    fs::create_dir_all(output_dir)?;
    let stem = image_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    // Inputs from different directories may share a stem
    let prefix = format!("{index:02}_{stem}");

    let annotated_path = output_dir.join(format!("{prefix}_annotated.png"));
    report
        .annotated
        .save(&annotated_path)
        .map_err(|source| CliError::EncodeError {
            path: annotated_path.display().to_string(),
            source,
        })?;
    info!("Saved annotated image to {:?}", annotated_path);
    let mut written = vec![annotated_path];

    if write_json {
        let json_path = output_dir.join(format!("{prefix}.json"));
        fs::write(&json_path, report.to_json()?)?;
        info!("Saved report to {:?}", json_path);
        written.push(json_path);
    }

    Ok(written)
}
