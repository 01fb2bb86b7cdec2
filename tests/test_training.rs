//! Integration test: trainer pipelines end-to-end over the built-in engine

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use modelforge::engine::StubEngine;
use modelforge::training::{
    ImageClassifierTrainer, ImageParameters, ObjectDetectorTrainer, DetectorParameters,
    RecommenderParameters, RecommenderTrainer, Silent, SoundClassifierTrainer, SoundParameters,
    TabularAlgorithm, TabularParameters, TabularTrainer, TaggerParameters, TextClassifierTrainer,
    TextParameters, WordTaggerTrainer,
};
use modelforge::ForgeError;
use tempfile::TempDir;

fn labeled_dir(classes: &[(&str, usize)], extension: &str) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    for (label, count) in classes {
        let class_dir = dir.path().join(label);
        fs::create_dir(&class_dir).expect("create class dir");
        for i in 0..*count {
            fs::write(class_dir.join(format!("example_{i}.{extension}")), b"data")
                .expect("write example file");
        }
    }
    dir
}

fn table_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write table");
    (dir, path)
}

fn output_path(name: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join(name);
    (dir, path)
}

fn read_artifact(path: &PathBuf) -> serde_json::Value {
    let raw = fs::read_to_string(path).expect("artifact should exist");
    serde_json::from_str(&raw).expect("artifact should be valid JSON")
}

#[test]
fn test_image_classifier_end_to_end() {
    let data = labeled_dir(&[("cat", 3), ("dog", 4)], "jpg");
    let (_out_dir, output) = output_path("ImageClassifier.mfmodel");

    let trainer = ImageClassifierTrainer::new(StubEngine);
    let result = trainer
        .train(data.path(), &output, None, None, &ImageParameters::default(), &Silent)
        .expect("image training should succeed");

    assert_eq!(
        result.class_labels,
        vec!["cat", "dog"],
        "labels come from subdirectory names, sorted"
    );
    assert!(
        result.training_accuracy > 0.0 && result.training_accuracy <= 100.0,
        "accuracy should be a percentage, got {}",
        result.training_accuracy
    );
    assert!(
        result.validation_accuracy.is_none(),
        "no validation set was supplied"
    );
    assert!(output.is_file(), "artifact should be written");
}

#[test]
fn test_artifact_embeds_metadata_defaults() {
    let data = labeled_dir(&[("cat", 2), ("dog", 2)], "jpg");
    let (_out_dir, output) = output_path("ImageClassifier.mfmodel");

    let trainer = ImageClassifierTrainer::new(StubEngine);
    trainer
        .train(data.path(), &output, None, None, &ImageParameters::default(), &Silent)
        .expect("image training should succeed");

    let artifact = read_artifact(&output);
    assert_eq!(artifact["metadata"]["author"], "ModelForge CLI");
    assert_eq!(
        artifact["metadata"]["shortDescription"],
        "Image classifier trained with ModelForge"
    );
    assert_eq!(artifact["metadata"]["version"], "1.0");
    assert_eq!(artifact["task"]["task"], "imageClassifier");
    assert_eq!(artifact["task"]["maxIterations"], 25);
}

#[test]
fn test_explicit_metadata_overrides_defaults() {
    let data = labeled_dir(&[("yes", 2), ("no", 2)], "jpg");
    let (_out_dir, output) = output_path("model.mfmodel");

    let trainer = ImageClassifierTrainer::new(StubEngine);
    trainer
        .train(
            data.path(),
            &output,
            Some("Data Team"),
            Some("Nightly retrain"),
            &ImageParameters::default(),
            &Silent,
        )
        .expect("image training should succeed");

    let artifact = read_artifact(&output);
    assert_eq!(artifact["metadata"]["author"], "Data Team");
    assert_eq!(artifact["metadata"]["shortDescription"], "Nightly retrain");
}

#[test]
fn test_image_validation_metrics_present_when_supplied() {
    let data = labeled_dir(&[("cat", 3), ("dog", 3)], "jpg");
    let holdout = labeled_dir(&[("cat", 1), ("dog", 1)], "jpg");
    let (_out_dir, output) = output_path("model.mfmodel");

    let parameters = ImageParameters {
        validation_data: Some(holdout.path().to_path_buf()),
        ..ImageParameters::default()
    };

    let trainer = ImageClassifierTrainer::new(StubEngine);
    let result = trainer
        .train(data.path(), &output, None, None, &parameters, &Silent)
        .expect("image training should succeed");

    let accuracy = result
        .validation_accuracy
        .expect("validation accuracy should be present");
    assert!(accuracy > 0.0 && accuracy <= 100.0);
}

#[test]
fn test_progress_messages_arrive_in_order() {
    let data = labeled_dir(&[("cat", 2), ("dog", 2)], "jpg");
    let (_out_dir, output) = output_path("model.mfmodel");

    let messages = RefCell::new(Vec::new());
    let sink = |text: &str| messages.borrow_mut().push(text.to_string());

    let trainer = ImageClassifierTrainer::new(StubEngine);
    trainer
        .train(data.path(), &output, None, None, &ImageParameters::default(), &sink)
        .expect("image training should succeed");

    let messages = messages.into_inner();
    assert!(
        messages[0].starts_with("Loading training data from"),
        "first milestone is the data load, got {:?}",
        messages[0]
    );
    let training_at = messages
        .iter()
        .position(|m| m.starts_with("Training image classifier (max 25 iterations)"))
        .expect("training milestone should be narrated");
    let saving_at = messages
        .iter()
        .position(|m| m.starts_with("Saving model to"))
        .expect("saving milestone should be narrated");
    assert!(training_at < saving_at, "training narrates before saving");
}

#[test]
fn test_sound_classifier_end_to_end() {
    let data = labeled_dir(&[("siren", 4), ("speech", 4)], "wav");
    let (_out_dir, output) = output_path("SoundClassifier.mfmodel");

    let trainer = SoundClassifierTrainer::new(StubEngine);
    let result = trainer
        .train(data.path(), &output, None, None, &SoundParameters::default(), &Silent)
        .expect("sound training should succeed");

    assert_eq!(result.class_labels, vec!["siren", "speech"]);
    assert!(result.training_accuracy > 0.0 && result.training_accuracy <= 100.0);

    let artifact = read_artifact(&output);
    assert_eq!(artifact["task"]["overlapFactor"], 0.5);
}

#[test]
fn test_text_classifier_discovers_labels() {
    let (_dir, path) = table_file(
        "reviews.csv",
        "text,label\ngreat stuff,positive\nterrible,negative\nloved it,positive\n",
    );
    let (_out_dir, output) = output_path("TextClassifier.mfmodel");

    let trainer = TextClassifierTrainer::new(StubEngine);
    let result = trainer
        .train(&path, &output, None, None, &TextParameters::default(), &Silent)
        .expect("text training should succeed");

    assert_eq!(result.class_labels, vec!["negative", "positive"]);
    assert!(result.training_accuracy > 0.0 && result.training_accuracy <= 100.0);
}

#[test]
fn test_tabular_regressor_with_algorithm_keyword() {
    let algorithm = TabularAlgorithm::from_keyword("rf", None, None);
    assert_eq!(
        algorithm,
        TabularAlgorithm::RandomForest { max_depth: None, max_iterations: None },
        "rf keyword selects a random forest with engine-chosen caps"
    );

    let (_dir, path) = table_file(
        "homes.csv",
        "price,sqft,age\n300000,1400,12\n420000,2100,5\n350000,1700,9\n",
    );
    let (_out_dir, output) = output_path("TabularModel.mfmodel");

    let mut parameters = TabularParameters::new("price");
    parameters.algorithm = algorithm;

    let trainer = TabularTrainer::new(StubEngine);
    let result = trainer
        .train_regressor(&path, &output, None, None, &parameters, &Silent)
        .expect("regressor training should succeed");

    assert!(result.training_rmse >= 0.0);
    assert!(result.validation_rmse.is_none());

    // The selected algorithm shapes the written artifact.
    let artifact = read_artifact(&output);
    assert_eq!(artifact["task"]["task"], "tabularRegressor");
    assert_eq!(artifact["task"]["algorithm"]["name"], "randomForest");
}

#[test]
fn test_tabular_classifier_end_to_end() {
    let (_dir, path) = table_file(
        "iris.csv",
        "species,petal\nsetosa,1.4\nversicolor,4.5\nsetosa,1.3\nversicolor,4.7\n",
    );
    let (_out_dir, output) = output_path("TabularModel.mfmodel");

    let parameters = TabularParameters::new("species");
    let trainer = TabularTrainer::new(StubEngine);
    let result = trainer
        .train_classifier(&path, &output, None, None, &parameters, &Silent)
        .expect("classifier training should succeed");

    assert!(result.training_accuracy > 0.0 && result.training_accuracy <= 100.0);
    assert!(
        result.class_labels.is_empty(),
        "tabular classifiers do not enumerate labels up front"
    );

    let artifact = read_artifact(&output);
    assert_eq!(artifact["task"]["algorithm"]["name"], "automatic");
}

#[test]
fn test_tabular_blank_target_fails_before_any_load() {
    // The path does not exist; a configuration error proves the check
    // runs before the engine is ever asked to load.
    let parameters = TabularParameters::new("   ");
    let trainer = TabularTrainer::new(StubEngine);
    let err = trainer
        .train_classifier(
            &PathBuf::from("/no/such/table.csv"),
            &PathBuf::from("model.mfmodel"),
            None,
            None,
            &parameters,
            &Silent,
        )
        .unwrap_err();

    assert!(matches!(err, ForgeError::Config(_)), "got {err:?}");
}

#[test]
fn test_tabular_missing_target_column_is_a_training_error() {
    let (_dir, path) = table_file("data.csv", "a,b\n1,2\n3,4\n");
    let (_out_dir, output) = output_path("model.mfmodel");

    let parameters = TabularParameters::new("price");
    let trainer = TabularTrainer::new(StubEngine);
    let err = trainer
        .train_classifier(&path, &output, None, None, &parameters, &Silent)
        .unwrap_err();

    assert!(matches!(err, ForgeError::Training(_)), "got {err:?}");
    assert!(err.to_string().contains("price"));
}

#[test]
fn test_recommender_implicit_feedback() {
    let (_dir, path) = table_file(
        "plays.csv",
        "user,item\nu1,song_a\nu1,song_b\nu2,song_a\nu3,song_c\n",
    );
    let (_out_dir, output) = output_path("Recommender.mfmodel");

    let trainer = RecommenderTrainer::new(StubEngine);
    let result = trainer
        .train(&path, &output, None, None, &RecommenderParameters::default(), &Silent)
        .expect("recommender training should succeed");

    assert!(result.training_rmse.is_none(), "no error metric on this engine path");
    assert!(result.validation_rmse.is_none());
    assert!(output.is_file());

    let json = serde_json::to_value(&result).expect("result should serialize");
    assert!(
        json.get("trainingRMSE").is_none(),
        "absent metric must be an absent key, not null"
    );
    assert!(json.get("validationRMSE").is_none());
}

#[test]
fn test_recommender_with_explicit_ratings() {
    let (_dir, path) = table_file(
        "ratings.csv",
        "user,item,stars\nu1,m1,5\nu1,m2,3\nu2,m1,4\n",
    );
    let (_out_dir, output) = output_path("Recommender.mfmodel");

    let parameters = RecommenderParameters {
        rating_column: Some("stars".to_string()),
        ..RecommenderParameters::default()
    };

    let trainer = RecommenderTrainer::new(StubEngine);
    let result = trainer
        .train(&path, &output, None, None, &parameters, &Silent)
        .expect("recommender training should succeed");

    assert!(result.training_rmse.is_none(), "still no metric with explicit ratings");

    let artifact = read_artifact(&output);
    assert_eq!(artifact["task"]["ratingColumn"], "stars");
}

#[test]
fn test_recommender_missing_rating_column_fails() {
    let (_dir, path) = table_file("plays.csv", "user,item\nu1,i1\n");
    let (_out_dir, output) = output_path("model.mfmodel");

    let parameters = RecommenderParameters {
        rating_column: Some("stars".to_string()),
        ..RecommenderParameters::default()
    };

    let trainer = RecommenderTrainer::new(StubEngine);
    let err = trainer
        .train(&path, &output, None, None, &parameters, &Silent)
        .unwrap_err();

    assert!(matches!(err, ForgeError::Training(_)), "got {err:?}");
}

#[test]
fn test_word_tagger_collects_sorted_tags() {
    let (_dir, path) = table_file(
        "tags.json",
        r#"[
            {"tokens": ["Jane", "Smith", "arrived"], "labels": ["B-PER", "I-PER", "O"]},
            {"tokens": ["She", "left"], "labels": ["O", "O"]},
            {"tokens": ["John", "stayed"], "labels": ["B-PER", "O"]}
        ]"#,
    );
    let (_out_dir, output) = output_path("WordTagger.mfmodel");

    let trainer = WordTaggerTrainer::new(StubEngine);
    let result = trainer
        .train(&path, &output, None, None, &TaggerParameters::default(), &Silent)
        .expect("word tagger training should succeed");

    assert_eq!(
        result.tag_labels,
        vec!["B-PER", "I-PER", "O"],
        "tags deduplicate and sort"
    );
    assert!(result.training_accuracy > 0.0 && result.training_accuracy <= 100.0);
}

#[test]
fn test_object_detector_requires_annotations_manifest() {
    let dir = TempDir::new().expect("create temp dir");
    fs::write(dir.path().join("img_0.jpg"), b"jpeg").expect("write image");
    let (_out_dir, output) = output_path("ObjectDetector.mfmodel");

    let trainer = ObjectDetectorTrainer::new(StubEngine);
    let err = trainer
        .train(dir.path(), &output, None, None, &DetectorParameters::default(), &Silent)
        .unwrap_err();

    assert!(matches!(err, ForgeError::MissingAnnotations(_)), "got {err:?}");
    assert!(
        err.to_string().contains("annotations.json"),
        "message should name the missing manifest: {err}"
    );
    assert!(!output.exists(), "nothing should be written on failure");
}

#[test]
fn test_object_detector_end_to_end() {
    let dir = TempDir::new().expect("create temp dir");
    fs::write(dir.path().join("street_0.jpg"), b"jpeg").expect("write image");
    fs::write(dir.path().join("street_1.jpg"), b"jpeg").expect("write image");
    fs::write(
        dir.path().join("annotations.json"),
        r#"[
            {"image": "street_0.jpg", "annotations": [
                {"label": "car", "coordinates": {"x": 40, "y": 60, "width": 100, "height": 50}}
            ]},
            {"image": "street_1.jpg", "annotations": [
                {"label": "bike", "coordinates": {"x": 10, "y": 20, "width": 30, "height": 40}},
                {"label": "car", "coordinates": {"x": 80, "y": 30, "width": 90, "height": 45}}
            ]}
        ]"#,
    )
    .expect("write manifest");
    let (_out_dir, output) = output_path("ObjectDetector.mfmodel");

    let trainer = ObjectDetectorTrainer::new(StubEngine);
    let result = trainer
        .train(dir.path(), &output, None, None, &DetectorParameters::default(), &Silent)
        .expect("detector training should succeed");

    assert_eq!(result.class_labels, vec!["bike", "car"]);
    assert!(
        result.training_map > 0.0 && result.training_map <= 1.0,
        "mAP stays in (0, 1], got {}",
        result.training_map
    );
    assert!(result.validation_map.is_none());

    let artifact = read_artifact(&output);
    assert_eq!(artifact["task"]["maxIterations"], 500);
    assert_eq!(artifact["task"]["batchSize"], 8);
}

#[test]
fn test_missing_training_file_is_a_data_load_error() {
    let trainer = TextClassifierTrainer::new(StubEngine);
    let err = trainer
        .train(
            &PathBuf::from("/no/such/reviews.csv"),
            &PathBuf::from("model.mfmodel"),
            None,
            None,
            &TextParameters::default(),
            &Silent,
        )
        .unwrap_err();

    assert!(matches!(err, ForgeError::DataLoad(_)), "got {err:?}");
}

#[test]
fn test_unwritable_output_is_an_artifact_error() {
    let data = labeled_dir(&[("cat", 2), ("dog", 2)], "jpg");
    let output = PathBuf::from("/no/such/directory/model.mfmodel");

    let trainer = ImageClassifierTrainer::new(StubEngine);
    let err = trainer
        .train(data.path(), &output, None, None, &ImageParameters::default(), &Silent)
        .unwrap_err();

    assert!(matches!(err, ForgeError::ArtifactWrite(_)), "got {err:?}");
}

#[test]
fn test_artifact_overwrites_existing_file() {
    let data = labeled_dir(&[("cat", 2), ("dog", 2)], "jpg");
    let (_out_dir, output) = output_path("model.mfmodel");
    fs::write(&output, "stale artifact").expect("write stale file");

    let trainer = ImageClassifierTrainer::new(StubEngine);
    trainer
        .train(data.path(), &output, None, None, &ImageParameters::default(), &Silent)
        .expect("image training should succeed");

    let artifact = read_artifact(&output);
    assert_eq!(artifact["metadata"]["version"], "1.0", "new artifact replaces the old");
}
