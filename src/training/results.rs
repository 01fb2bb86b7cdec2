//! Result records returned by the trainers
//!
//! One immutable record per completed run. Serialization uses camelCase
//! keys and omits absent metrics entirely, so JSON consumers can tell
//! "not evaluated" apart from zero.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Outcome of a classifier run: image, sound, text, or tabular classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierResult {
    pub model_path: PathBuf,
    /// Training accuracy in percent, 0 to 100.
    pub training_accuracy: f64,
    /// Validation accuracy in percent, absent when no validation set ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_accuracy: Option<f64>,
    pub training_duration_seconds: f64,
    /// Discovered class labels, lexicographically sorted. Empty for
    /// tabular classifiers, which do not enumerate labels up front.
    pub class_labels: Vec<String>,
}

/// Outcome of a regressor run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressorResult {
    pub model_path: PathBuf,
    #[serde(rename = "trainingRMSE")]
    pub training_rmse: f64,
    #[serde(rename = "validationRMSE", skip_serializing_if = "Option::is_none")]
    pub validation_rmse: Option<f64>,
    pub training_duration_seconds: f64,
}

/// Outcome of an object detector run. mAP is measured at IoU 0.5.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorResult {
    pub model_path: PathBuf,
    #[serde(rename = "trainingMAP")]
    pub training_map: f64,
    #[serde(rename = "validationMAP", skip_serializing_if = "Option::is_none")]
    pub validation_map: Option<f64>,
    pub training_duration_seconds: f64,
    pub class_labels: Vec<String>,
}

/// Outcome of a word tagger run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggerResult {
    pub model_path: PathBuf,
    pub training_accuracy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_accuracy: Option<f64>,
    pub training_duration_seconds: f64,
    /// Distinct tags seen in the label column, lexicographically sorted.
    pub tag_labels: Vec<String>,
}

/// Outcome of a recommender run.
///
/// The engine's collaborative-filtering path reports no error metric, so
/// both RMSE fields stay absent today. They remain in the record for
/// adapters that can fill them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommenderResult {
    pub model_path: PathBuf,
    #[serde(rename = "trainingRMSE", skip_serializing_if = "Option::is_none")]
    pub training_rmse: Option<f64>,
    #[serde(rename = "validationRMSE", skip_serializing_if = "Option::is_none")]
    pub validation_rmse: Option<f64>,
    pub training_duration_seconds: f64,
}
