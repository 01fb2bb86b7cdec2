//! ModelForge - Multi-modality model training
//!
//! This crate wraps a pluggable training engine behind per-modality
//! trainers with a uniform contract:
//! - Normalize heterogeneous input into typed parameters with defaults
//! - Select among algorithm variants where a modality has them
//! - Drive the engine through a single blocking fit
//! - Convert raw engine metrics into comparable, reportable units
//! - Persist the trained artifact with descriptive metadata
//!
//! The learning itself always belongs to the engine behind
//! [`engine::TrainingEngine`]; the built-in [`engine::StubEngine`] keeps
//! the whole pipeline runnable without a training backend attached.
//!
//! # Modules
//!
//! - [`engine`] - Engine seam: traits, task specs, the built-in adapter
//! - [`training`] - Per-modality trainers, parameters, results, labels
//! - [`cli`] - Command-line interface
//! - [`error`] - Error taxonomy

// Core error handling
pub mod error;

// Engine seam
pub mod engine;

// Trainers
pub mod training;

// Services
pub mod cli;

pub use error::{ForgeError, Result};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{ForgeError, Result};

    // Engine seam
    pub use crate::engine::{
        Dataset, DatasetKind, EngineMetrics, FitConfig, ModelMetadata, StubEngine, TaskSpec,
        TrainedModel, TrainingEngine,
    };

    // Trainers and parameters
    pub use crate::training::{
        Augmentation, ImageClassifierTrainer, ImageParameters, ObjectDetectorTrainer,
        DetectorParameters, RecommenderParameters, RecommenderTrainer, SoundClassifierTrainer,
        SoundParameters, TabularParameters, TabularTrainer, TaggerParameters, TextClassifierTrainer,
        TextParameters, WordTaggerTrainer,
    };

    // Algorithm selection
    pub use crate::training::{TabularAlgorithm, TextAlgorithm};

    // Results
    pub use crate::training::{
        ClassifierResult, DetectorResult, RecommenderResult, RegressorResult, TaggerResult,
    };

    // Progress reporting
    pub use crate::training::{ProgressSink, Silent};
}
