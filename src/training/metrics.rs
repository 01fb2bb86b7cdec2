//! Metric extraction
//!
//! Converts raw engine numbers into the units the results report and
//! keeps "absent" distinct from "missing": a metric the modality requires
//! for its training set is an engine contract violation when missing,
//! while validation metrics are simply absent.

use crate::engine::EngineMetrics;
use crate::error::{ForgeError, Result};

/// Accuracy in percent when a classification error is present and finite.
pub fn optional_accuracy(metrics: EngineMetrics) -> Option<f64> {
    metrics
        .sanitized()
        .classification_error
        .map(|error| (1.0 - error) * 100.0)
}

/// Training accuracy in percent. A modality that trains a classifier must
/// get a classification error back from the engine.
pub fn required_accuracy(metrics: EngineMetrics, what: &str) -> Result<f64> {
    optional_accuracy(metrics).ok_or_else(|| {
        ForgeError::Training(format!("engine reported no classification error for {what}"))
    })
}

/// RMSE when present and finite.
pub fn optional_rmse(metrics: EngineMetrics) -> Option<f64> {
    metrics.sanitized().rmse
}

pub fn required_rmse(metrics: EngineMetrics, what: &str) -> Result<f64> {
    optional_rmse(metrics)
        .ok_or_else(|| ForgeError::Training(format!("engine reported no RMSE for {what}")))
}

/// Mean average precision when present and finite.
pub fn optional_map(metrics: EngineMetrics) -> Option<f64> {
    metrics.sanitized().mean_average_precision
}

pub fn required_map(metrics: EngineMetrics, what: &str) -> Result<f64> {
    optional_map(metrics).ok_or_else(|| {
        ForgeError::Training(format!("engine reported no mean average precision for {what}"))
    })
}
