//! Image classifier training

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::{DatasetKind, FitConfig, ModelMetadata, TaskSpec, TrainedModel, TrainingEngine};
use crate::error::Result;
use crate::training::labels;
use crate::training::metrics;
use crate::training::progress::ProgressSink;
use crate::training::results::ClassifierResult;

/// Augmentation toggles applied while training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Augmentation {
    pub crop: bool,
    pub rotation: bool,
    pub blur: bool,
    pub exposure: bool,
    pub noise: bool,
    pub flip: bool,
}

impl Augmentation {
    /// Every option enabled, the training default.
    pub fn all() -> Self {
        Self {
            crop: true,
            rotation: true,
            blur: true,
            exposure: true,
            noise: true,
            flip: true,
        }
    }

    /// Every option disabled.
    pub fn none() -> Self {
        Self {
            crop: false,
            rotation: false,
            blur: false,
            exposure: false,
            noise: false,
            flip: false,
        }
    }
}

impl Default for Augmentation {
    fn default() -> Self {
        Self::all()
    }
}

/// Normalized parameters for image classifier training.
#[derive(Debug, Clone)]
pub struct ImageParameters {
    /// Upper bound on training iterations.
    pub max_iterations: u32,
    pub augmentation: Augmentation,
    /// Optional held-out labeled directory scored after training.
    pub validation_data: Option<PathBuf>,
}

impl Default for ImageParameters {
    fn default() -> Self {
        Self {
            max_iterations: 25,
            augmentation: Augmentation::all(),
            validation_data: None,
        }
    }
}

/// Trains image classifiers through a backing engine.
///
/// The training directory's immediate subdirectories name the classes;
/// their contents are the examples.
#[derive(Debug)]
pub struct ImageClassifierTrainer<E> {
    engine: E,
}

impl<E: TrainingEngine> ImageClassifierTrainer<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Run one full pass: load, fit, extract metrics, write the artifact.
    pub fn train(
        &self,
        training_data: &Path,
        output: &Path,
        author: Option<&str>,
        description: Option<&str>,
        parameters: &ImageParameters,
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
        let task = TaskSpec::ImageClassifier {
            max_iterations: parameters.max_iterations,
            augmentation: parameters.augmentation,
        };

        progress.message(&format!(
            "Training image classifier (max {} iterations)...",
            parameters.max_iterations
        ));
        let model = self.engine.fit(
            &training,
            &FitConfig { task, validation: validation.as_ref() },
        )?;

        let training_accuracy = metrics::required_accuracy(model.training_metrics(), "image classifier")?;
        let validation_accuracy = metrics::optional_accuracy(model.validation_metrics());

        progress.message(&format!("Saving model to {}...", output.display()));
        let metadata = ModelMetadata::resolve(
            author,
            description,
            "Image classifier trained with ModelForge",
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
            "image classifier trained"
        );
        Ok(result)
    }
}
