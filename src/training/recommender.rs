//! Recommender training

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use crate::engine::{
    Dataset, DatasetKind, FitConfig, ModelMetadata, TaskSpec, TrainedModel, TrainingEngine,
};
use crate::error::Result;
use crate::training::metrics;
use crate::training::progress::ProgressSink;
use crate::training::results::RecommenderResult;

/// Normalized parameters for recommender training.
#[derive(Debug, Clone)]
pub struct RecommenderParameters {
    pub user_column: String,
    pub item_column: String,
    /// Rating column; `None` trains on implicit feedback, treating every
    /// interaction as positive.
    pub rating_column: Option<String>,
    pub validation_data: Option<PathBuf>,
}

impl Default for RecommenderParameters {
    fn default() -> Self {
        Self {
            user_column: "user".to_string(),
            item_column: "item".to_string(),
            rating_column: None,
            validation_data: None,
        }
    }
}

/// Trains recommenders from a table of user-item interactions.
#[derive(Debug)]
pub struct RecommenderTrainer<E> {
    engine: E,
}

impl<E: TrainingEngine> RecommenderTrainer<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn train(
        &self,
        training_data: &Path,
        output: &Path,
        author: Option<&str>,
        description: Option<&str>,
        parameters: &RecommenderParameters,
        progress: &dyn ProgressSink,
    ) -> Result<RecommenderResult> {
        let started = Instant::now();

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

        progress.message("Configuring training parameters...");
        let task = TaskSpec::Recommender {
            user_column: parameters.user_column.clone(),
            item_column: parameters.item_column.clone(),
            rating_column: parameters.rating_column.clone(),
        };

        match &parameters.rating_column {
            Some(column) => progress.message(&format!(
                "Training recommender on ratings from '{column}'..."
            )),
            None => progress.message("Training recommender on implicit feedback..."),
        }
        let model = self.engine.fit(
            &training,
            &FitConfig { task, validation: validation.as_ref() },
        )?;

        // The engine's collaborative-filtering path exposes no error
        // metric, so these stay absent rather than required.
        let training_rmse = metrics::optional_rmse(model.training_metrics());
        let validation_rmse = metrics::optional_rmse(model.validation_metrics());

        progress.message(&format!("Saving model to {}...", output.display()));
        let metadata =
            ModelMetadata::resolve(author, description, "Recommender trained with ModelForge");
        model.write(output, &metadata)?;

        let result = RecommenderResult {
            model_path: output.to_path_buf(),
            training_rmse,
            validation_rmse,
            training_duration_seconds: started.elapsed().as_secs_f64(),
        };

        info!(
            implicit = parameters.rating_column.is_none(),
            "recommender trained"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let parameters = RecommenderParameters::default();
        assert_eq!(parameters.user_column, "user");
        assert_eq!(parameters.item_column, "item");
        assert!(parameters.rating_column.is_none(), "no rating column means implicit feedback");
        assert!(parameters.validation_data.is_none());
    }
}
