//! Label discovery
//!
//! Class and tag labels surface in results and summaries, so every source
//! yields a lexicographically sorted, duplicate-free list regardless of
//! filesystem or file ordering.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use polars::prelude::*;

use crate::error::{ForgeError, Result};

/// Class labels of a labeled directory: the names of its immediate
/// subdirectories. Loose files at the top level are ignored.
pub fn directory_labels(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ForgeError::DataLoad(format!("cannot read {}: {e}", dir.display())))?;

    let mut labels = BTreeSet::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| ForgeError::DataLoad(format!("cannot read {}: {e}", dir.display())))?;
        let path = entry.path();
        if path.is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                labels.insert(name.to_string());
            }
        }
    }
    Ok(labels.into_iter().collect())
}

/// Distinct bounding-box labels across an object-detection manifest.
///
/// The manifest is a JSON array of image entries, each carrying an
/// `annotations` array whose objects have a `label` string.
pub fn annotation_labels(manifest: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(manifest)
        .map_err(|e| ForgeError::DataLoad(format!("cannot read {}: {e}", manifest.display())))?;
    let entries: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
        ForgeError::DataLoad(format!("invalid annotations in {}: {e}", manifest.display()))
    })?;

    let mut labels = BTreeSet::new();
    if let Some(images) = entries.as_array() {
        for image in images {
            if let Some(annotations) = image.get("annotations").and_then(|a| a.as_array()) {
                for annotation in annotations {
                    if let Some(label) = annotation.get("label").and_then(|l| l.as_str()) {
                        labels.insert(label.to_string());
                    }
                }
            }
        }
    }
    Ok(labels.into_iter().collect())
}

/// Distinct values of one column of a tabular file, as strings.
pub fn table_labels(path: &Path, column: &str) -> Result<Vec<String>> {
    let df = read_table(path)?;
    let series = df
        .column(column)
        .map_err(|_| ForgeError::DataLoad(format!("column '{column}' not found in {}", path.display())))?;

    let mut labels = BTreeSet::new();
    let casted = series.cast(&DataType::String)?;
    let strings = casted.str()?;
    for value in strings.into_iter().flatten() {
        labels.insert(value.to_string());
    }
    Ok(labels.into_iter().collect())
}

/// Distinct tags across a word-tagging table: every string appearing in
/// the label column's arrays.
pub fn tag_labels(path: &Path, label_column: &str) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ForgeError::DataLoad(format!("cannot read {}: {e}", path.display())))?;
    let rows: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| ForgeError::DataLoad(format!("invalid records in {}: {e}", path.display())))?;

    let mut labels = BTreeSet::new();
    if let Some(rows) = rows.as_array() {
        for row in rows {
            if let Some(tags) = row.get(label_column).and_then(|t| t.as_array()) {
                for tag in tags {
                    if let Some(tag) = tag.as_str() {
                        labels.insert(tag.to_string());
                    }
                }
            }
        }
    }
    Ok(labels.into_iter().collect())
}

/// Eager table read, CSV or JSON records by extension.
pub(crate) fn read_table(path: &Path) -> Result<DataFrame> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let df = match ext {
        "csv" => CsvReadOptions::default()
            .with_infer_schema_length(Some(1000))
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?,
        "json" => JsonReader::new(
            fs::File::open(path)
                .map_err(|e| ForgeError::DataLoad(format!("cannot open {}: {e}", path.display())))?,
        )
        .finish()?,
        other => {
            return Err(ForgeError::DataLoad(format!(
                "unsupported table format '{other}' for {}",
                path.display()
            )))
        }
    };

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_labels_are_sorted_and_skip_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("dog")).unwrap();
        fs::create_dir(dir.path().join("cat")).unwrap();
        fs::create_dir(dir.path().join("bird")).unwrap();
        fs::write(dir.path().join("readme.txt"), "not a class").unwrap();

        let labels = directory_labels(dir.path()).unwrap();
        assert_eq!(labels, vec!["bird", "cat", "dog"]);
    }

    #[test]
    fn test_directory_labels_missing_dir_is_data_load_error() {
        let err = directory_labels(Path::new("/no/such/dir")).unwrap_err();
        assert!(matches!(err, ForgeError::DataLoad(_)));
    }

    #[test]
    fn test_annotation_labels_deduplicate() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("annotations.json");
        fs::write(
            &manifest,
            r#"[
                {"image": "a.jpg", "annotations": [{"label": "car"}, {"label": "bike"}]},
                {"image": "b.jpg", "annotations": [{"label": "car"}]}
            ]"#,
        )
        .unwrap();

        let labels = annotation_labels(&manifest).unwrap();
        assert_eq!(labels, vec!["bike", "car"]);
    }

    #[test]
    fn test_table_labels_distinct_sorted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reviews.csv");
        fs::write(&path, "text,label\ngreat,positive\nawful,negative\nfine,positive\n").unwrap();

        let labels = table_labels(&path, "label").unwrap();
        assert_eq!(labels, vec!["negative", "positive"]);
    }

    #[test]
    fn test_table_labels_unknown_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reviews.csv");
        fs::write(&path, "text,label\ngreat,positive\n").unwrap();

        let err = table_labels(&path, "sentiment").unwrap_err();
        assert!(matches!(err, ForgeError::DataLoad(_)));
        assert!(err.to_string().contains("sentiment"));
    }

    #[test]
    fn test_tag_labels_flatten_arrays() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tags.json");
        fs::write(
            &path,
            r#"[
                {"tokens": ["Jane", "runs"], "labels": ["B-PER", "O"]},
                {"tokens": ["Jane", "Smith", "runs"], "labels": ["B-PER", "I-PER", "O"]}
            ]"#,
        )
        .unwrap();

        let labels = tag_labels(&path, "labels").unwrap();
        assert_eq!(labels, vec!["B-PER", "I-PER", "O"]);
    }
}
