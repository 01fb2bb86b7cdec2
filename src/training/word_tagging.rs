//! Word tagger training

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use crate::engine::{
    Dataset, DatasetKind, FitConfig, ModelMetadata, TaskSpec, TrainedModel, TrainingEngine,
};
use crate::error::Result;
use crate::training::labels;
use crate::training::metrics;
use crate::training::progress::ProgressSink;
use crate::training::results::TaggerResult;

/// Normalized parameters for word tagger training.
///
/// The token column holds arrays of tokens, the label column parallel
/// arrays of tags.
#[derive(Debug, Clone)]
pub struct TaggerParameters {
    pub token_column: String,
    pub label_column: String,
    /// BCP 47 language tag passed through to the engine, if any.
    pub language: Option<String>,
    pub validation_data: Option<PathBuf>,
}

impl Default for TaggerParameters {
    fn default() -> Self {
        Self {
            token_column: "tokens".to_string(),
            label_column: "labels".to_string(),
            language: None,
            validation_data: None,
        }
    }
}

/// Trains word taggers from a table of token and tag sequences.
#[derive(Debug)]
pub struct WordTaggerTrainer<E> {
    engine: E,
}

impl<E: TrainingEngine> WordTaggerTrainer<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn train(
        &self,
        training_data: &Path,
        output: &Path,
        author: Option<&str>,
        description: Option<&str>,
        parameters: &TaggerParameters,
        progress: &dyn ProgressSink,
    ) -> Result<TaggerResult> {
        let started = Instant::now();

        progress.message(&format!(
            "Loading training data from {}...",
            training_data.display()
        ));
        let training = self.engine.load_dataset(training_data, DatasetKind::Table)?;
        progress.message(&format!("Found {} training examples...", training.row_count()));

        let tag_labels = labels::tag_labels(training_data, &parameters.label_column)?;

        let validation = match &parameters.validation_data {
            Some(path) => {
                progress.message(&format!("Loading validation data from {}...", path.display()));
                Some(self.engine.load_dataset(path, DatasetKind::Table)?)
            }
            None => None,
        };

        progress.message("Configuring training parameters...");
        let task = TaskSpec::WordTagger {
            token_column: parameters.token_column.clone(),
            label_column: parameters.label_column.clone(),
            language: parameters.language.clone(),
        };

        progress.message("Training word tagger...");
        let model = self.engine.fit(
            &training,
            &FitConfig { task, validation: validation.as_ref() },
        )?;

        let training_accuracy = metrics::required_accuracy(model.training_metrics(), "word tagger")?;
        let validation_accuracy = metrics::optional_accuracy(model.validation_metrics());

        progress.message(&format!("Saving model to {}...", output.display()));
        let metadata =
            ModelMetadata::resolve(author, description, "Word tagger trained with ModelForge");
        model.write(output, &metadata)?;

        let result = TaggerResult {
            model_path: output.to_path_buf(),
            training_accuracy,
            validation_accuracy,
            training_duration_seconds: started.elapsed().as_secs_f64(),
            tag_labels,
        };

        info!(
            accuracy = result.training_accuracy,
            tags = result.tag_labels.len(),
            "word tagger trained"
        );
        Ok(result)
    }
}
