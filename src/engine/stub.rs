//! Built-in deterministic engine adapter
//!
//! Stands in for a real training backend. Datasets load for real
//! (labeled directories, annotation manifests, CSV/JSON tables), while
//! the metrics are synthesized deterministically from the example count,
//! so every trainer path and the CLI work end to end without a learning
//! runtime attached.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::engine::{
    Dataset, DatasetKind, EngineMetrics, FitConfig, ModelMetadata, TaskSpec, TrainedModel,
    TrainingEngine,
};
use crate::error::{ForgeError, Result};
use crate::training::labels::read_table;

/// The built-in engine. Stateless; every call stands alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubEngine;

/// Dataset handle produced by [`StubEngine`].
#[derive(Debug, Clone)]
pub struct StubDataset {
    examples: usize,
    columns: Vec<String>,
}

impl Dataset for StubDataset {
    fn row_count(&self) -> usize {
        self.examples
    }

    fn column_names(&self) -> Vec<String> {
        self.columns.clone()
    }
}

/// Fitted-model handle produced by [`StubEngine`].
#[derive(Debug, Clone)]
pub struct StubModel {
    task: TaskSpec,
    training: EngineMetrics,
    validation: EngineMetrics,
    examples: usize,
}

/// On-disk artifact layout. JSON so tests and users can inspect it.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Artifact<'a> {
    metadata: &'a ModelMetadata,
    task: &'a TaskSpec,
    trained_at: DateTime<Utc>,
    training_examples: usize,
    training_metrics: EngineMetrics,
    validation_metrics: EngineMetrics,
}

impl TrainedModel for StubModel {
    fn training_metrics(&self) -> EngineMetrics {
        self.training
    }

    fn validation_metrics(&self) -> EngineMetrics {
        self.validation
    }

    fn write(&self, path: &Path, metadata: &ModelMetadata) -> Result<()> {
        let artifact = Artifact {
            metadata,
            task: &self.task,
            trained_at: Utc::now(),
            training_examples: self.examples,
            training_metrics: self.training,
            validation_metrics: self.validation,
        };
        let json = serde_json::to_string_pretty(&artifact)
            .map_err(|e| ForgeError::ArtifactWrite(format!("cannot encode model: {e}")))?;
        fs::write(path, json)
            .map_err(|e| ForgeError::ArtifactWrite(format!("cannot write {}: {e}", path.display())))
    }
}

impl TrainingEngine for StubEngine {
    type Dataset = StubDataset;
    type Model = StubModel;

    fn load_dataset(&self, location: &Path, kind: DatasetKind) -> Result<StubDataset> {
        let dataset = match kind {
            DatasetKind::LabeledDirectory => load_labeled_directory(location)?,
            DatasetKind::AnnotatedImageDirectory => load_annotated_directory(location)?,
            DatasetKind::Table => load_table(location)?,
        };
        debug!(
            source = %location.display(),
            examples = dataset.examples,
            "dataset loaded"
        );
        Ok(dataset)
    }

    fn fit(&self, training: &StubDataset, config: &FitConfig<'_, StubDataset>) -> Result<StubModel> {
        check_schema(&config.task, training)?;

        let training_metrics = synthesize(&config.task, training.examples);
        let validation_metrics = match config.validation {
            Some(validation) => synthesize(&config.task, validation.examples),
            None => EngineMetrics::default(),
        };

        debug!(task = config.task.kind(), examples = training.examples, "fit complete");

        Ok(StubModel {
            task: config.task.clone(),
            training: training_metrics,
            validation: validation_metrics,
            examples: training.examples,
        })
    }
}

/// Deterministic stand-in metrics: the error shrinks as the example count
/// grows, so larger datasets score better and tests get stable values.
fn synthesize(task: &TaskSpec, examples: usize) -> EngineMetrics {
    let error = 1.0 / (examples as f64 + 2.0);
    match task {
        TaskSpec::ImageClassifier { .. }
        | TaskSpec::SoundClassifier { .. }
        | TaskSpec::TextClassifier { .. }
        | TaskSpec::WordTagger { .. }
        | TaskSpec::TabularClassifier { .. } => EngineMetrics {
            classification_error: Some(error),
            ..EngineMetrics::default()
        },
        TaskSpec::TabularRegressor { .. } => EngineMetrics {
            rmse: Some(error * 10.0),
            ..EngineMetrics::default()
        },
        TaskSpec::ObjectDetector { .. } => EngineMetrics {
            mean_average_precision: Some(1.0 - error),
            ..EngineMetrics::default()
        },
        // No error metric on the collaborative-filtering path.
        TaskSpec::Recommender { .. } => EngineMetrics::default(),
    }
}

/// Reject tasks that name columns the table does not have.
fn check_schema(task: &TaskSpec, data: &StubDataset) -> Result<()> {
    let required: Vec<&str> = match task {
        TaskSpec::TextClassifier { text_column, label_column, .. } => {
            vec![text_column.as_str(), label_column.as_str()]
        }
        TaskSpec::WordTagger { token_column, label_column, .. } => {
            vec![token_column.as_str(), label_column.as_str()]
        }
        TaskSpec::TabularClassifier { target_column, feature_columns, .. }
        | TaskSpec::TabularRegressor { target_column, feature_columns, .. } => {
            let mut columns = vec![target_column.as_str()];
            if let Some(features) = feature_columns {
                columns.extend(features.iter().map(|f| f.as_str()));
            }
            columns
        }
        TaskSpec::Recommender { user_column, item_column, rating_column } => {
            let mut columns = vec![user_column.as_str(), item_column.as_str()];
            if let Some(rating) = rating_column {
                columns.push(rating.as_str());
            }
            columns
        }
        _ => return Ok(()),
    };

    for column in required {
        if !data.columns.iter().any(|c| c == column) {
            return Err(ForgeError::Training(format!(
                "column '{column}' not present in training data"
            )));
        }
    }
    Ok(())
}

fn load_labeled_directory(dir: &Path) -> Result<StubDataset> {
    if !dir.is_dir() {
        return Err(ForgeError::DataLoad(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut examples = 0usize;
    for entry in read_dir(dir)? {
        let class_dir = entry
            .map_err(|e| ForgeError::DataLoad(format!("cannot read {}: {e}", dir.display())))?
            .path();
        if class_dir.is_dir() {
            for file in read_dir(&class_dir)? {
                let file = file.map_err(|e| {
                    ForgeError::DataLoad(format!("cannot read {}: {e}", class_dir.display()))
                })?;
                if file.path().is_file() {
                    examples += 1;
                }
            }
        }
    }

    if examples == 0 {
        return Err(ForgeError::DataLoad(format!(
            "no training examples found under {}",
            dir.display()
        )));
    }

    Ok(StubDataset { examples, columns: Vec::new() })
}

fn load_annotated_directory(dir: &Path) -> Result<StubDataset> {
    let manifest = dir.join("annotations.json");
    let raw = fs::read_to_string(&manifest)
        .map_err(|e| ForgeError::DataLoad(format!("cannot read {}: {e}", manifest.display())))?;
    let entries: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
        ForgeError::DataLoad(format!("invalid annotations in {}: {e}", manifest.display()))
    })?;

    let examples = entries.as_array().map(|a| a.len()).unwrap_or(0);
    if examples == 0 {
        return Err(ForgeError::DataLoad(format!(
            "no annotated images listed in {}",
            manifest.display()
        )));
    }

    Ok(StubDataset { examples, columns: Vec::new() })
}

fn load_table(path: &Path) -> Result<StubDataset> {
    let df = read_table(path)?;

    if df.height() == 0 {
        return Err(ForgeError::DataLoad(format!(
            "{} contains no rows",
            path.display()
        )));
    }

    let columns = df
        .get_column_names()
        .into_iter()
        .map(|c| c.to_string())
        .collect();
    Ok(StubDataset { examples: df.height(), columns })
}

fn read_dir(dir: &Path) -> Result<fs::ReadDir> {
    fs::read_dir(dir)
        .map_err(|e| ForgeError::DataLoad(format!("cannot read {}: {e}", dir.display())))
}
