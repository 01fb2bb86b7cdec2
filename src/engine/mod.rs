//! Training engine abstraction
//!
//! The toolkit never implements learning algorithms. Trainers talk to an
//! engine through the traits here: load a dataset, run one blocking fit,
//! read metrics off the returned model handle, write the artifact once.
//! [`stub`] ships the built-in adapter used by the CLI and the tests.

pub mod stub;

pub use stub::StubEngine;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::training::{Augmentation, TabularAlgorithm, TextAlgorithm};

/// How a training location should be interpreted when loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    /// Directory whose immediate subdirectories name the class labels.
    LabeledDirectory,
    /// Directory of images with an `annotations.json` manifest.
    AnnotatedImageDirectory,
    /// Tabular file, CSV or JSON records.
    Table,
}

/// Engine-facing description of one training task.
///
/// Carries everything `fit` needs, including the selected algorithm, so
/// the algorithm choice always shapes the fitted model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "task", rename_all = "camelCase")]
pub enum TaskSpec {
    #[serde(rename_all = "camelCase")]
    ImageClassifier {
        max_iterations: u32,
        augmentation: Augmentation,
    },
    #[serde(rename_all = "camelCase")]
    SoundClassifier { overlap_factor: f64 },
    #[serde(rename_all = "camelCase")]
    TextClassifier {
        algorithm: TextAlgorithm,
        text_column: String,
        label_column: String,
    },
    #[serde(rename_all = "camelCase")]
    WordTagger {
        token_column: String,
        label_column: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    TabularClassifier {
        target_column: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        feature_columns: Option<Vec<String>>,
        algorithm: TabularAlgorithm,
    },
    #[serde(rename_all = "camelCase")]
    TabularRegressor {
        target_column: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        feature_columns: Option<Vec<String>>,
        algorithm: TabularAlgorithm,
    },
    #[serde(rename_all = "camelCase")]
    ObjectDetector { max_iterations: u32, batch_size: u32 },
    #[serde(rename_all = "camelCase")]
    Recommender {
        user_column: String,
        item_column: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        rating_column: Option<String>,
    },
}

impl TaskSpec {
    /// Short task name used in logs and artifact summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            TaskSpec::ImageClassifier { .. } => "imageClassifier",
            TaskSpec::SoundClassifier { .. } => "soundClassifier",
            TaskSpec::TextClassifier { .. } => "textClassifier",
            TaskSpec::WordTagger { .. } => "wordTagger",
            TaskSpec::TabularClassifier { .. } => "tabularClassifier",
            TaskSpec::TabularRegressor { .. } => "tabularRegressor",
            TaskSpec::ObjectDetector { .. } => "objectDetector",
            TaskSpec::Recommender { .. } => "recommender",
        }
    }
}

/// Everything `fit` receives besides the training data itself.
#[derive(Debug)]
pub struct FitConfig<'a, D> {
    pub task: TaskSpec,
    /// Held-out dataset scored after training; `None` leaves the
    /// validation metrics absent.
    pub validation: Option<&'a D>,
}

/// Raw evaluation numbers an engine reports for one dataset.
///
/// A field is `None` when the engine did not evaluate that quantity.
/// Absence is never encoded as zero or NaN downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineMetrics {
    /// Fraction of misclassified examples, in [0, 1].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_error: Option<f64>,
    /// Root-mean-square error for regression tasks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rmse: Option<f64>,
    /// Mean average precision at IoU 0.5 for detection tasks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_average_precision: Option<f64>,
}

impl EngineMetrics {
    /// Replace non-finite values with absence. Engines occasionally emit
    /// NaN for quantities they could not evaluate.
    pub fn sanitized(self) -> Self {
        fn finite(value: Option<f64>) -> Option<f64> {
            value.filter(|v| v.is_finite())
        }
        Self {
            classification_error: finite(self.classification_error),
            rmse: finite(self.rmse),
            mean_average_precision: finite(self.mean_average_precision),
        }
    }
}

/// Descriptive metadata stamped into every written artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    pub author: String,
    pub short_description: String,
    pub version: String,
}

impl ModelMetadata {
    pub const DEFAULT_AUTHOR: &'static str = "ModelForge CLI";
    pub const VERSION: &'static str = "1.0";

    /// Build metadata with the standard fallbacks applied.
    pub fn resolve(author: Option<&str>, description: Option<&str>, default_description: &str) -> Self {
        Self {
            author: author.unwrap_or(Self::DEFAULT_AUTHOR).to_string(),
            short_description: description.unwrap_or(default_description).to_string(),
            version: Self::VERSION.to_string(),
        }
    }
}

/// A loaded dataset handle, opaque beyond the little the trainers need.
pub trait Dataset {
    /// Number of examples: files for directory datasets, rows for tables.
    fn row_count(&self) -> usize;
    /// Column names for tabular datasets; empty for directory datasets.
    fn column_names(&self) -> Vec<String>;
}

/// A fitted model handle: metrics out, one write, nothing else.
pub trait TrainedModel {
    fn training_metrics(&self) -> EngineMetrics;
    /// Metrics on the validation set, all-absent when none was supplied.
    fn validation_metrics(&self) -> EngineMetrics;
    /// Persist the model to `path`, overwriting any existing file.
    fn write(&self, path: &Path, metadata: &ModelMetadata) -> Result<()>;
}

/// The training engine contract.
///
/// Implementations own the dataset representation and the learning
/// itself. Trainers only normalize input, pick a task, and read the
/// results back out.
pub trait TrainingEngine {
    type Dataset: Dataset;
    type Model: TrainedModel;

    fn load_dataset(&self, location: &Path, kind: DatasetKind) -> Result<Self::Dataset>;
    fn fit(&self, training: &Self::Dataset, config: &FitConfig<'_, Self::Dataset>) -> Result<Self::Model>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_drops_nan() {
        let metrics = EngineMetrics {
            classification_error: Some(f64::NAN),
            rmse: Some(1.5),
            mean_average_precision: None,
        };
        let clean = metrics.sanitized();
        assert_eq!(clean.classification_error, None, "NaN must become absence");
        assert_eq!(clean.rmse, Some(1.5), "finite values pass through");
    }

    #[test]
    fn test_sanitized_drops_infinity() {
        let metrics = EngineMetrics {
            classification_error: None,
            rmse: Some(f64::INFINITY),
            mean_average_precision: Some(0.8),
        };
        let clean = metrics.sanitized();
        assert_eq!(clean.rmse, None);
        assert_eq!(clean.mean_average_precision, Some(0.8));
    }

    #[test]
    fn test_metadata_defaults() {
        let metadata = ModelMetadata::resolve(None, None, "Image classifier trained with ModelForge");
        assert_eq!(metadata.author, "ModelForge CLI");
        assert_eq!(metadata.short_description, "Image classifier trained with ModelForge");
        assert_eq!(metadata.version, "1.0");
    }

    #[test]
    fn test_metadata_explicit_values_win() {
        let metadata = ModelMetadata::resolve(Some("Data Team"), Some("Nightly build"), "fallback");
        assert_eq!(metadata.author, "Data Team");
        assert_eq!(metadata.short_description, "Nightly build");
    }

    #[test]
    fn test_task_spec_serializes_algorithm() {
        let task = TaskSpec::TabularRegressor {
            target_column: "price".to_string(),
            feature_columns: None,
            algorithm: TabularAlgorithm::RandomForest {
                max_depth: Some(6),
                max_iterations: None,
            },
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["task"], "tabularRegressor");
        assert_eq!(json["algorithm"]["name"], "randomForest");
        assert_eq!(json["algorithm"]["maxDepth"], 6);
    }
}
