//! Tabular classifier and regressor training

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use crate::engine::{
    Dataset, DatasetKind, FitConfig, ModelMetadata, TaskSpec, TrainedModel, TrainingEngine,
};
use crate::error::{ForgeError, Result};
use crate::training::algorithm::TabularAlgorithm;
use crate::training::metrics;
use crate::training::progress::ProgressSink;
use crate::training::results::{ClassifierResult, RegressorResult};

/// Normalized parameters for tabular model training.
#[derive(Debug, Clone)]
pub struct TabularParameters {
    /// Column the model predicts. Required; there is no default.
    pub target_column: String,
    /// Input columns. `None` means every column except the target.
    pub feature_columns: Option<Vec<String>>,
    pub algorithm: TabularAlgorithm,
    pub validation_data: Option<PathBuf>,
}

impl TabularParameters {
    pub fn new(target_column: impl Into<String>) -> Self {
        Self {
            target_column: target_column.into(),
            feature_columns: None,
            algorithm: TabularAlgorithm::Automatic,
            validation_data: None,
        }
    }
}

/// Trains tabular classifiers and regressors from CSV or JSON tables.
#[derive(Debug)]
pub struct TabularTrainer<E> {
    engine: E,
}

impl<E: TrainingEngine> TabularTrainer<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn train_classifier(
        &self,
        training_data: &Path,
        output: &Path,
        author: Option<&str>,
        description: Option<&str>,
        parameters: &TabularParameters,
        progress: &dyn ProgressSink,
    ) -> Result<ClassifierResult> {
        let started = Instant::now();
        let (training, validation) = self.load(training_data, parameters, progress)?;

        progress.message("Configuring training parameters...");
        let task = TaskSpec::TabularClassifier {
            target_column: parameters.target_column.clone(),
            feature_columns: parameters.feature_columns.clone(),
            algorithm: parameters.algorithm.clone(),
        };

        progress.message(&format!(
            "Training tabular classifier ({} algorithm)...",
            parameters.algorithm.label()
        ));
        let model = self.engine.fit(
            &training,
            &FitConfig { task, validation: validation.as_ref() },
        )?;

        let training_accuracy =
            metrics::required_accuracy(model.training_metrics(), "tabular classifier")?;
        let validation_accuracy = metrics::optional_accuracy(model.validation_metrics());

        progress.message(&format!("Saving model to {}...", output.display()));
        let metadata = ModelMetadata::resolve(
            author,
            description,
            "Tabular classifier trained with ModelForge",
        );
        model.write(output, &metadata)?;

        info!(
            accuracy = training_accuracy,
            algorithm = parameters.algorithm.label(),
            "tabular classifier trained"
        );
        Ok(ClassifierResult {
            model_path: output.to_path_buf(),
            training_accuracy,
            validation_accuracy,
            training_duration_seconds: started.elapsed().as_secs_f64(),
            // Tabular classifiers do not enumerate labels up front.
            class_labels: Vec::new(),
        })
    }

    pub fn train_regressor(
        &self,
        training_data: &Path,
        output: &Path,
        author: Option<&str>,
        description: Option<&str>,
        parameters: &TabularParameters,
        progress: &dyn ProgressSink,
    ) -> Result<RegressorResult> {
        let started = Instant::now();
        let (training, validation) = self.load(training_data, parameters, progress)?;

        progress.message("Configuring training parameters...");
        let task = TaskSpec::TabularRegressor {
            target_column: parameters.target_column.clone(),
            feature_columns: parameters.feature_columns.clone(),
            algorithm: parameters.algorithm.clone(),
        };

        progress.message(&format!(
            "Training tabular regressor ({} algorithm)...",
            parameters.algorithm.label()
        ));
        let model = self.engine.fit(
            &training,
            &FitConfig { task, validation: validation.as_ref() },
        )?;

        let training_rmse = metrics::required_rmse(model.training_metrics(), "tabular regressor")?;
        let validation_rmse = metrics::optional_rmse(model.validation_metrics());

        progress.message(&format!("Saving model to {}...", output.display()));
        let metadata = ModelMetadata::resolve(
            author,
            description,
            "Tabular regressor trained with ModelForge",
        );
        model.write(output, &metadata)?;

        info!(
            rmse = training_rmse,
            algorithm = parameters.algorithm.label(),
            "tabular regressor trained"
        );
        Ok(RegressorResult {
            model_path: output.to_path_buf(),
            training_rmse,
            validation_rmse,
            training_duration_seconds: started.elapsed().as_secs_f64(),
        })
    }

    /// Shared front half: validate the target column, then load the
    /// training and optional validation tables.
    fn load(
        &self,
        training_data: &Path,
        parameters: &TabularParameters,
        progress: &dyn ProgressSink,
    ) -> Result<(E::Dataset, Option<E::Dataset>)> {
        if parameters.target_column.trim().is_empty() {
            return Err(ForgeError::Config(
                "target column must not be empty".to_string(),
            ));
        }

        progress.message(&format!(
            "Loading training data from {}...",
            training_data.display()
        ));
        let training = self.engine.load_dataset(training_data, DatasetKind::Table)?;
        progress.message(&format!("Found {} training examples...", training.row_count()));

        let validation = match &parameters.validation_data {
            Some(path) => {
                progress.message(&format!("Loading validation data from {}...", path.display()));
                Some(self.engine.load_dataset(path, DatasetKind::Table)?)
            }
            None => None,
        };

        Ok((training, validation))
    }
}
