//! Trainer layer: one trainer per modality over a shared engine seam
//!
//! Every trainer follows the same contract: normalize its parameters with
//! documented defaults, select among algorithm variants where the modality
//! has them, drive the engine through a single blocking fit, convert raw
//! metrics into reportable units, and write the artifact with metadata.

pub mod algorithm;
pub mod image;
pub mod labels;
pub mod metrics;
pub mod object_detection;
pub mod progress;
pub mod recommender;
pub mod results;
pub mod sound;
pub mod tabular;
pub mod text;
pub mod word_tagging;

pub use algorithm::{TabularAlgorithm, TextAlgorithm};
pub use image::{Augmentation, ImageClassifierTrainer, ImageParameters};
pub use object_detection::{DetectorParameters, ObjectDetectorTrainer};
pub use progress::{ProgressSink, Silent};
pub use recommender::{RecommenderParameters, RecommenderTrainer};
pub use results::{
    ClassifierResult, DetectorResult, RecommenderResult, RegressorResult, TaggerResult,
};
pub use sound::{SoundClassifierTrainer, SoundParameters};
pub use tabular::{TabularParameters, TabularTrainer};
pub use text::{TextClassifierTrainer, TextParameters};
pub use word_tagging::{TaggerParameters, WordTaggerTrainer};
