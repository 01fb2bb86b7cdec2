//! Object detector training

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use crate::engine::{DatasetKind, FitConfig, ModelMetadata, TaskSpec, TrainedModel, TrainingEngine};
use crate::error::{ForgeError, Result};
use crate::training::labels;
use crate::training::metrics;
use crate::training::progress::ProgressSink;
use crate::training::results::DetectorResult;

/// Normalized parameters for object detector training.
#[derive(Debug, Clone)]
pub struct DetectorParameters {
    /// Upper bound on training iterations.
    pub max_iterations: u32,
    pub batch_size: u32,
    pub validation_data: Option<PathBuf>,
}

impl Default for DetectorParameters {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            batch_size: 8,
            validation_data: None,
        }
    }
}

/// Trains object detectors from an image directory with bounding-box
/// annotations.
///
/// The directory must carry an `annotations.json` manifest; its absence
/// fails the run before any dataset is loaded.
#[derive(Debug)]
pub struct ObjectDetectorTrainer<E> {
    engine: E,
}

impl<E: TrainingEngine> ObjectDetectorTrainer<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn train(
        &self,
        training_data: &Path,
        output: &Path,
        author: Option<&str>,
        description: Option<&str>,
        parameters: &DetectorParameters,
        progress: &dyn ProgressSink,
    ) -> Result<DetectorResult> {
        let started = Instant::now();

        let manifest = training_data.join("annotations.json");
        if !manifest.is_file() {
            return Err(ForgeError::MissingAnnotations(format!(
                "annotations.json not found in {}. Object detection training requires \
                 bounding-box annotations alongside the images.",
                training_data.display()
            )));
        }

        progress.message(&format!(
            "Loading training data from {}...",
            training_data.display()
        ));
        let training = self
            .engine
            .load_dataset(training_data, DatasetKind::AnnotatedImageDirectory)?;
        let class_labels = labels::annotation_labels(&manifest)?;

        let validation = match &parameters.validation_data {
            Some(path) => {
                progress.message(&format!("Loading validation data from {}...", path.display()));
                Some(
                    self.engine
                        .load_dataset(path, DatasetKind::AnnotatedImageDirectory)?,
                )
            }
            None => None,
        };

        progress.message("Configuring training parameters...");
        let task = TaskSpec::ObjectDetector {
            max_iterations: parameters.max_iterations,
            batch_size: parameters.batch_size,
        };

        progress.message(&format!(
            "Training object detector (max {} iterations)...",
            parameters.max_iterations
        ));
        let model = self.engine.fit(
            &training,
            &FitConfig { task, validation: validation.as_ref() },
        )?;

        let training_map = metrics::required_map(model.training_metrics(), "object detector")?;
        let validation_map = metrics::optional_map(model.validation_metrics());

        progress.message(&format!("Saving model to {}...", output.display()));
        let metadata = ModelMetadata::resolve(
            author,
            description,
            "Object detector trained with ModelForge",
        );
        model.write(output, &metadata)?;

        let result = DetectorResult {
            model_path: output.to_path_buf(),
            training_map,
            validation_map,
            training_duration_seconds: started.elapsed().as_secs_f64(),
            class_labels,
        };

        info!(
            map = result.training_map,
            classes = result.class_labels.len(),
            "object detector trained"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let parameters = DetectorParameters::default();
        assert_eq!(parameters.max_iterations, 500);
        assert_eq!(parameters.batch_size, 8);
        assert!(parameters.validation_data.is_none());
    }
}
