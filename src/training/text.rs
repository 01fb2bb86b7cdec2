//! Text classifier training

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use crate::engine::{
    Dataset, DatasetKind, FitConfig, ModelMetadata, TaskSpec, TrainedModel, TrainingEngine,
};
use crate::error::Result;
use crate::training::algorithm::TextAlgorithm;
use crate::training::labels;
use crate::training::metrics;
use crate::training::progress::ProgressSink;
use crate::training::results::ClassifierResult;

/// Normalized parameters for text classifier training.
#[derive(Debug, Clone)]
pub struct TextParameters {
    pub algorithm: TextAlgorithm,
    /// Column holding the document text.
    pub text_column: String,
    /// Column holding the class label.
    pub label_column: String,
    pub validation_data: Option<PathBuf>,
}

impl Default for TextParameters {
    fn default() -> Self {
        Self {
            algorithm: TextAlgorithm::MaxEnt,
            text_column: "text".to_string(),
            label_column: "label".to_string(),
            validation_data: None,
        }
    }
}

/// Trains text classifiers from a table of documents and labels.
#[derive(Debug)]
pub struct TextClassifierTrainer<E> {
    engine: E,
}

impl<E: TrainingEngine> TextClassifierTrainer<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn train(
        &self,
        training_data: &Path,
        output: &Path,
        author: Option<&str>,
        description: Option<&str>,
        parameters: &TextParameters,
        progress: &dyn ProgressSink,
    ) -> Result<ClassifierResult> {
        let started = Instant::now();

        progress.message(&format!(
            "Loading training data from {}...",
            training_data.display()
        ));
        let training = self.engine.load_dataset(training_data, DatasetKind::Table)?;
        progress.message(&format!("Found {} training examples...", training.row_count()));

        let class_labels = labels::table_labels(training_data, &parameters.label_column)?;

        let validation = match &parameters.validation_data {
            Some(path) => {
                progress.message(&format!("Loading validation data from {}...", path.display()));
                Some(self.engine.load_dataset(path, DatasetKind::Table)?)
            }
            None => None,
        };

        progress.message("Configuring training parameters...");
        let task = TaskSpec::TextClassifier {
            algorithm: parameters.algorithm,
            text_column: parameters.text_column.clone(),
            label_column: parameters.label_column.clone(),
        };

        progress.message(&format!(
            "Training text classifier ({} algorithm)...",
            parameters.algorithm.label()
        ));
        let model = self.engine.fit(
            &training,
            &FitConfig { task, validation: validation.as_ref() },
        )?;

        let training_accuracy = metrics::required_accuracy(model.training_metrics(), "text classifier")?;
        let validation_accuracy = metrics::optional_accuracy(model.validation_metrics());

        progress.message(&format!("Saving model to {}...", output.display()));
        let metadata = ModelMetadata::resolve(
            author,
            description,
            "Text classifier trained with ModelForge",
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
            algorithm = parameters.algorithm.label(),
            "text classifier trained"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let parameters = TextParameters::default();
        assert_eq!(parameters.algorithm, TextAlgorithm::MaxEnt);
        assert_eq!(parameters.text_column, "text");
        assert_eq!(parameters.label_column, "label");
        assert!(parameters.validation_data.is_none());
    }
}
