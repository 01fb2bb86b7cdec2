//! Sound classifier training

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use crate::engine::{DatasetKind, FitConfig, ModelMetadata, TaskSpec, TrainedModel, TrainingEngine};
use crate::error::Result;
use crate::training::labels;
use crate::training::metrics;
use crate::training::progress::ProgressSink;
use crate::training::results::ClassifierResult;

/// Normalized parameters for sound classifier training.
#[derive(Debug, Clone)]
pub struct SoundParameters {
    /// Fraction of overlap between consecutive analysis windows when the
    /// engine slices audio files. Passed through unvalidated; the engine
    /// owns its range.
    pub overlap_factor: f64,
    pub validation_data: Option<PathBuf>,
}

impl Default for SoundParameters {
    fn default() -> Self {
        Self {
            overlap_factor: 0.5,
            validation_data: None,
        }
    }
}

/// Trains sound classifiers from a directory of labeled audio files.
#[derive(Debug)]
pub struct SoundClassifierTrainer<E> {
    engine: E,
}

impl<E: TrainingEngine> SoundClassifierTrainer<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn train(
        &self,
        training_data: &Path,
        output: &Path,
        author: Option<&str>,
        description: Option<&str>,
        parameters: &SoundParameters,
        progress: &dyn ProgressSink,
    ) -> Result<ClassifierResult> {
        let started = Instant::now();

        progress.message(&format!(
            "Loading training data from {}...",
            training_data.display()
        ));
        let training = self
            .engine
            .load_dataset(training_data, DatasetKind::LabeledDirectory)?;
        let class_labels = labels::directory_labels(training_data)?;

        let validation = match &parameters.validation_data {
            Some(path) => {
                progress.message(&format!("Loading validation data from {}...", path.display()));
                Some(self.engine.load_dataset(path, DatasetKind::LabeledDirectory)?)
            }
            None => None,
        };

        progress.message("Configuring training parameters...");
        let task = TaskSpec::SoundClassifier {
            overlap_factor: parameters.overlap_factor,
        };

        progress.message("Training sound classifier...");
        let model = self.engine.fit(
            &training,
            &FitConfig { task, validation: validation.as_ref() },
        )?;

        let training_accuracy = metrics::required_accuracy(model.training_metrics(), "sound classifier")?;
        let validation_accuracy = metrics::optional_accuracy(model.validation_metrics());

        progress.message(&format!("Saving model to {}...", output.display()));
        let metadata = ModelMetadata::resolve(
            author,
            description,
            "Sound classifier trained with ModelForge",
        );
        model.write(output, &metadata)?;

        let result = ClassifierResult {
            model_path: output.to_path_buf(),
            training_accuracy,
            validation_accuracy,
            training_duration_seconds: started.elapsed().as_secs_f64(),
            class_labels,
        };

        info!(
            accuracy = result.training_accuracy,
            classes = result.class_labels.len(),
            "sound classifier trained"
        );
        Ok(result)
    }
}
