//! Algorithm selection for tabular and text models
//!
//! Command-line keywords map onto closed algorithm sets. Unknown keywords
//! fall back to the default instead of failing, so scripts stay forgiving,
//! and matching is case-insensitive.

use serde::{Deserialize, Serialize};

/// Algorithm family for tabular classifiers and regressors.
///
/// Tree variants carry their depth and iteration caps; `None` leaves the
/// cap to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "camelCase")]
pub enum TabularAlgorithm {
    /// Let the engine explore candidates and keep the best.
    Automatic,
    #[serde(rename_all = "camelCase")]
    RandomForest {
        #[serde(skip_serializing_if = "Option::is_none")]
        max_depth: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_iterations: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    BoostedTree {
        #[serde(skip_serializing_if = "Option::is_none")]
        max_depth: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_iterations: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    DecisionTree {
        #[serde(skip_serializing_if = "Option::is_none")]
        max_depth: Option<u32>,
    },
    LinearRegression,
    LogisticRegression,
}

impl TabularAlgorithm {
    /// Map a user-facing keyword onto an algorithm, attaching the tree
    /// caps where the variant accepts them. Unknown keywords select
    /// [`TabularAlgorithm::Automatic`].
    pub fn from_keyword(keyword: &str, max_depth: Option<u32>, max_iterations: Option<u32>) -> Self {
        match keyword.to_lowercase().as_str() {
            "randomforest" | "rf" => TabularAlgorithm::RandomForest {
                max_depth,
                max_iterations,
            },
            "boostedtree" | "boosted" | "bt" => TabularAlgorithm::BoostedTree {
                max_depth,
                max_iterations,
            },
            "decisiontree" | "dt" => TabularAlgorithm::DecisionTree { max_depth },
            "linear" | "linearregression" => TabularAlgorithm::LinearRegression,
            "logistic" | "logisticregression" => TabularAlgorithm::LogisticRegression,
            _ => TabularAlgorithm::Automatic,
        }
    }

    /// Stable name used in logs and artifact summaries.
    pub fn label(&self) -> &'static str {
        match self {
            TabularAlgorithm::Automatic => "automatic",
            TabularAlgorithm::RandomForest { .. } => "randomForest",
            TabularAlgorithm::BoostedTree { .. } => "boostedTree",
            TabularAlgorithm::DecisionTree { .. } => "decisionTree",
            TabularAlgorithm::LinearRegression => "linearRegression",
            TabularAlgorithm::LogisticRegression => "logisticRegression",
        }
    }
}

impl Default for TabularAlgorithm {
    fn default() -> Self {
        TabularAlgorithm::Automatic
    }
}

/// Algorithm family for text classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlgorithm {
    /// Maximum-entropy classifier, the default.
    MaxEnt,
    /// Transfer learning on top of pretrained sentence embeddings.
    TransferLearning,
}

impl TextAlgorithm {
    /// Map a user-facing keyword onto an algorithm. Unknown keywords
    /// select [`TextAlgorithm::MaxEnt`].
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_lowercase().as_str() {
            "transfer" | "transferlearning" => TextAlgorithm::TransferLearning,
            _ => TextAlgorithm::MaxEnt,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TextAlgorithm::MaxEnt => "maxEnt",
            TextAlgorithm::TransferLearning => "transferLearning",
        }
    }
}

impl Default for TextAlgorithm {
    fn default() -> Self {
        TextAlgorithm::MaxEnt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tabular_keyword_aliases() {
        assert_eq!(
            TabularAlgorithm::from_keyword("randomforest", None, None),
            TabularAlgorithm::RandomForest { max_depth: None, max_iterations: None }
        );
        assert_eq!(
            TabularAlgorithm::from_keyword("rf", None, None),
            TabularAlgorithm::RandomForest { max_depth: None, max_iterations: None }
        );
        assert_eq!(
            TabularAlgorithm::from_keyword("boosted", None, None),
            TabularAlgorithm::BoostedTree { max_depth: None, max_iterations: None }
        );
        assert_eq!(
            TabularAlgorithm::from_keyword("bt", None, None),
            TabularAlgorithm::BoostedTree { max_depth: None, max_iterations: None }
        );
        assert_eq!(
            TabularAlgorithm::from_keyword("dt", None, None),
            TabularAlgorithm::DecisionTree { max_depth: None }
        );
        assert_eq!(
            TabularAlgorithm::from_keyword("linear", None, None),
            TabularAlgorithm::LinearRegression
        );
        assert_eq!(
            TabularAlgorithm::from_keyword("logisticregression", None, None),
            TabularAlgorithm::LogisticRegression
        );
    }

    #[test]
    fn test_tabular_keyword_is_case_insensitive() {
        assert_eq!(
            TabularAlgorithm::from_keyword("RandomForest", None, None),
            TabularAlgorithm::RandomForest { max_depth: None, max_iterations: None }
        );
        assert_eq!(
            TabularAlgorithm::from_keyword("BT", None, None),
            TabularAlgorithm::BoostedTree { max_depth: None, max_iterations: None }
        );
    }

    #[test]
    fn test_unknown_tabular_keyword_falls_back_to_automatic() {
        assert_eq!(
            TabularAlgorithm::from_keyword("auto", None, None),
            TabularAlgorithm::Automatic
        );
        assert_eq!(
            TabularAlgorithm::from_keyword("automatic", None, None),
            TabularAlgorithm::Automatic
        );
        assert_eq!(
            TabularAlgorithm::from_keyword("svm", None, None),
            TabularAlgorithm::Automatic
        );
        assert_eq!(
            TabularAlgorithm::from_keyword("", None, None),
            TabularAlgorithm::Automatic
        );
    }

    #[test]
    fn test_tree_caps_attach_to_selected_variant() {
        assert_eq!(
            TabularAlgorithm::from_keyword("rf", Some(8), Some(200)),
            TabularAlgorithm::RandomForest { max_depth: Some(8), max_iterations: Some(200) }
        );
        // A decision tree has no iteration count to cap.
        assert_eq!(
            TabularAlgorithm::from_keyword("dt", Some(4), Some(200)),
            TabularAlgorithm::DecisionTree { max_depth: Some(4) }
        );
        // Caps are ignored by variants without them.
        assert_eq!(
            TabularAlgorithm::from_keyword("linear", Some(4), Some(200)),
            TabularAlgorithm::LinearRegression
        );
    }

    #[test]
    fn test_text_keyword_mapping() {
        assert_eq!(TextAlgorithm::from_keyword("maxent"), TextAlgorithm::MaxEnt);
        assert_eq!(TextAlgorithm::from_keyword("transfer"), TextAlgorithm::TransferLearning);
        assert_eq!(TextAlgorithm::from_keyword("TransferLearning"), TextAlgorithm::TransferLearning);
        assert_eq!(TextAlgorithm::from_keyword("crf"), TextAlgorithm::MaxEnt);
    }

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(TabularAlgorithm::Automatic.label(), "automatic");
        assert_eq!(
            TabularAlgorithm::BoostedTree { max_depth: None, max_iterations: None }.label(),
            "boostedTree"
        );
        assert_eq!(TextAlgorithm::MaxEnt.label(), "maxEnt");
    }
}
