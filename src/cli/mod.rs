//! ModelForge CLI Module
//!
//! One subcommand per modality. Human mode narrates trainer progress and
//! ends with a summary block; `--json` switches to a silent run that
//! prints the result record as pretty JSON.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use crate::engine::StubEngine;
use crate::error::Result;
use crate::training::{
    Augmentation, DetectorParameters, ImageClassifierTrainer, ImageParameters,
    ObjectDetectorTrainer, ProgressSink, RecommenderParameters, RecommenderTrainer, Silent,
    SoundClassifierTrainer, SoundParameters, TabularAlgorithm, TabularParameters, TabularTrainer,
    TaggerParameters, TextAlgorithm, TextClassifierTrainer, TextParameters, WordTaggerTrainer,
};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn accent(s: &str) -> ColoredString {
    s.truecolor(120, 170, 255)
}
fn muted(s: &str) -> ColoredString {
    s.truecolor(140, 140, 140)
}

fn summary_header() {
    println!();
    println!("  {}", "Training Complete!".white().bold());
    println!("  {}", muted(&"─".repeat(50)));
}

fn summary_line(key: &str, val: &str) {
    println!("  {:<22} {}", muted(key), val.white());
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "modelforge")]
#[command(author = "ModelForge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Train image, text, sound, tabular, detection, tagging and recommendation models")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train an image classifier from a directory of labeled images
    Image {
        /// Directory whose subdirectories name the classes
        training_data: PathBuf,

        /// Output model file
        #[arg(short, long, default_value = "ImageClassifier.mfmodel")]
        output: PathBuf,

        /// Maximum training iterations
        #[arg(long, default_value = "25")]
        iterations: u32,

        /// Directory of labeled validation images
        #[arg(long)]
        validation: Option<PathBuf>,

        /// Disable data augmentation
        #[arg(long)]
        no_augmentation: bool,

        /// Model author recorded in metadata
        #[arg(long)]
        author: Option<String>,

        /// Model description recorded in metadata
        #[arg(long)]
        description: Option<String>,

        /// Print the result as JSON
        #[arg(short = 'j', long)]
        json: bool,
    },

    /// Train a text classifier from a CSV or JSON table
    Text {
        /// Table with one document per row
        training_data: PathBuf,

        /// Output model file
        #[arg(short, long, default_value = "TextClassifier.mfmodel")]
        output: PathBuf,

        /// Column holding the document text
        #[arg(long, default_value = "text")]
        text_column: String,

        /// Column holding the class label
        #[arg(long, default_value = "label")]
        label_column: String,

        /// Algorithm (maxent, transfer)
        #[arg(long, default_value = "maxent")]
        algorithm: String,

        /// Validation data table
        #[arg(long)]
        validation: Option<PathBuf>,

        /// Model author recorded in metadata
        #[arg(long)]
        author: Option<String>,

        /// Model description recorded in metadata
        #[arg(long)]
        description: Option<String>,

        /// Print the result as JSON
        #[arg(short = 'j', long)]
        json: bool,
    },

    /// Train a sound classifier from a directory of labeled audio files
    Sound {
        /// Directory whose subdirectories name the classes
        training_data: PathBuf,

        /// Output model file
        #[arg(short, long, default_value = "SoundClassifier.mfmodel")]
        output: PathBuf,

        /// Window overlap factor when slicing audio
        #[arg(long, default_value = "0.5")]
        overlap: f64,

        /// Directory of labeled validation audio
        #[arg(long)]
        validation: Option<PathBuf>,

        /// Model author recorded in metadata
        #[arg(long)]
        author: Option<String>,

        /// Model description recorded in metadata
        #[arg(long)]
        description: Option<String>,

        /// Print the result as JSON
        #[arg(short = 'j', long)]
        json: bool,
    },

    /// Train a tabular classifier or regressor from a CSV or JSON table
    Tabular {
        /// Training data table
        training_data: PathBuf,

        /// Output model file
        #[arg(short, long, default_value = "TabularModel.mfmodel")]
        output: PathBuf,

        /// Column to predict
        #[arg(short, long)]
        target: String,

        /// Model type (classifier, regressor)
        #[arg(long = "type", default_value = "classifier")]
        model_type: String,

        /// Algorithm (auto, randomforest, boostedtree, decisiontree, linear, logistic)
        #[arg(long, default_value = "auto")]
        algorithm: String,

        /// Maximum tree depth
        #[arg(long)]
        max_depth: Option<u32>,

        /// Maximum boosting or forest iterations
        #[arg(long)]
        max_iterations: Option<u32>,

        /// Validation data table
        #[arg(long)]
        validation: Option<PathBuf>,

        /// Model author recorded in metadata
        #[arg(long)]
        author: Option<String>,

        /// Model description recorded in metadata
        #[arg(long)]
        description: Option<String>,

        /// Print the result as JSON
        #[arg(short = 'j', long)]
        json: bool,
    },

    /// Train an object detector from annotated images
    ObjectDetect {
        /// Image directory containing annotations.json
        training_data: PathBuf,

        /// Output model file
        #[arg(short, long, default_value = "ObjectDetector.mfmodel")]
        output: PathBuf,

        /// Maximum training iterations
        #[arg(long, default_value = "500")]
        iterations: u32,

        /// Training batch size
        #[arg(long, default_value = "8")]
        batch_size: u32,

        /// Annotated validation image directory
        #[arg(long)]
        validation: Option<PathBuf>,

        /// Model author recorded in metadata
        #[arg(long)]
        author: Option<String>,

        /// Model description recorded in metadata
        #[arg(long)]
        description: Option<String>,

        /// Print the result as JSON
        #[arg(short = 'j', long)]
        json: bool,
    },

    /// Train a word tagger from token and tag sequences
    WordTag {
        /// JSON table of token and tag array rows
        training_data: PathBuf,

        /// Output model file
        #[arg(short, long, default_value = "WordTagger.mfmodel")]
        output: PathBuf,

        /// Column holding token arrays
        #[arg(long, default_value = "tokens")]
        token_column: String,

        /// Column holding tag arrays
        #[arg(long, default_value = "labels")]
        label_column: String,

        /// Language of the text (BCP 47 tag)
        #[arg(long)]
        language: Option<String>,

        /// Validation data table
        #[arg(long)]
        validation: Option<PathBuf>,

        /// Model author recorded in metadata
        #[arg(long)]
        author: Option<String>,

        /// Model description recorded in metadata
        #[arg(long)]
        description: Option<String>,

        /// Print the result as JSON
        #[arg(short = 'j', long)]
        json: bool,
    },

    /// Train a recommender from user-item interactions
    Recommend {
        /// Interaction data table
        training_data: PathBuf,

        /// Output model file
        #[arg(short, long, default_value = "Recommender.mfmodel")]
        output: PathBuf,

        /// Column holding user identifiers
        #[arg(long, default_value = "user")]
        user_column: String,

        /// Column holding item identifiers
        #[arg(long, default_value = "item")]
        item_column: String,

        /// Rating column; omit to train on implicit feedback
        #[arg(long)]
        rating_column: Option<String>,

        /// Model author recorded in metadata
        #[arg(long)]
        author: Option<String>,

        /// Model description recorded in metadata
        #[arg(long)]
        description: Option<String>,

        /// Print the result as JSON
        #[arg(short = 'j', long)]
        json: bool,
    },
}

// ─── Shared plumbing ───────────────────────────────────────────────────────────

fn ensure_exists(path: &PathBuf) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("Training data not found: {}", path.display());
    }
    Ok(())
}

/// Run a training closure with the sink the output mode wants: progress
/// lines for humans, silence for JSON.
fn run_with_sink<T>(
    json: bool,
    train: impl FnOnce(&dyn ProgressSink) -> Result<T>,
) -> anyhow::Result<T> {
    if json {
        Ok(train(&Silent)?)
    } else {
        let printing = |text: &str| println!("  {} {}", accent("›"), text);
        Ok(train(&printing)?)
    }
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_image(
    training_data: &PathBuf,
    output: &PathBuf,
    iterations: u32,
    validation: Option<PathBuf>,
    no_augmentation: bool,
    author: Option<&str>,
    description: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    ensure_exists(training_data)?;

    let parameters = ImageParameters {
        max_iterations: iterations,
        augmentation: if no_augmentation {
            Augmentation::none()
        } else {
            Augmentation::all()
        },
        validation_data: validation,
    };

    let trainer = ImageClassifierTrainer::new(StubEngine);
    let result = run_with_sink(json, |progress| {
        trainer.train(training_data, output, author, description, &parameters, progress)
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        summary_header();
        summary_line("Model", &result.model_path.display().to_string());
        summary_line("Training accuracy", &format!("{:.2}%", result.training_accuracy));
        if let Some(accuracy) = result.validation_accuracy {
            summary_line("Validation accuracy", &format!("{accuracy:.2}%"));
        }
        summary_line("Classes", &result.class_labels.join(", "));
        summary_line("Duration", &format!("{:.2}s", result.training_duration_seconds));
        println!();
    }

    Ok(())
}

pub fn cmd_text(
    training_data: &PathBuf,
    output: &PathBuf,
    text_column: &str,
    label_column: &str,
    algorithm: &str,
    validation: Option<PathBuf>,
    author: Option<&str>,
    description: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    ensure_exists(training_data)?;

    let parameters = TextParameters {
        algorithm: TextAlgorithm::from_keyword(algorithm),
        text_column: text_column.to_string(),
        label_column: label_column.to_string(),
        validation_data: validation,
    };

    let trainer = TextClassifierTrainer::new(StubEngine);
    let result = run_with_sink(json, |progress| {
        trainer.train(training_data, output, author, description, &parameters, progress)
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        summary_header();
        summary_line("Model", &result.model_path.display().to_string());
        summary_line("Algorithm", parameters.algorithm.label());
        summary_line("Training accuracy", &format!("{:.2}%", result.training_accuracy));
        if let Some(accuracy) = result.validation_accuracy {
            summary_line("Validation accuracy", &format!("{accuracy:.2}%"));
        }
        summary_line("Classes", &result.class_labels.join(", "));
        summary_line("Duration", &format!("{:.2}s", result.training_duration_seconds));
        println!();
    }

    Ok(())
}

pub fn cmd_sound(
    training_data: &PathBuf,
    output: &PathBuf,
    overlap: f64,
    validation: Option<PathBuf>,
    author: Option<&str>,
    description: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    ensure_exists(training_data)?;

    let parameters = SoundParameters {
        overlap_factor: overlap,
        validation_data: validation,
    };

    let trainer = SoundClassifierTrainer::new(StubEngine);
    let result = run_with_sink(json, |progress| {
        trainer.train(training_data, output, author, description, &parameters, progress)
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        summary_header();
        summary_line("Model", &result.model_path.display().to_string());
        summary_line("Training accuracy", &format!("{:.2}%", result.training_accuracy));
        if let Some(accuracy) = result.validation_accuracy {
            summary_line("Validation accuracy", &format!("{accuracy:.2}%"));
        }
        summary_line("Classes", &result.class_labels.join(", "));
        summary_line("Duration", &format!("{:.2}s", result.training_duration_seconds));
        println!();
    }

    Ok(())
}

pub fn cmd_tabular(
    training_data: &PathBuf,
    output: &PathBuf,
    target: &str,
    model_type: &str,
    algorithm: &str,
    max_depth: Option<u32>,
    max_iterations: Option<u32>,
    validation: Option<PathBuf>,
    author: Option<&str>,
    description: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    ensure_exists(training_data)?;

    let mut parameters = TabularParameters::new(target);
    parameters.algorithm = TabularAlgorithm::from_keyword(algorithm, max_depth, max_iterations);
    parameters.validation_data = validation;

    let trainer = TabularTrainer::new(StubEngine);

    match model_type {
        "classifier" => {
            let result = run_with_sink(json, |progress| {
                trainer.train_classifier(training_data, output, author, description, &parameters, progress)
            })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                summary_header();
                summary_line("Model", &result.model_path.display().to_string());
                summary_line("Algorithm", parameters.algorithm.label());
                summary_line("Training accuracy", &format!("{:.2}%", result.training_accuracy));
                if let Some(accuracy) = result.validation_accuracy {
                    summary_line("Validation accuracy", &format!("{accuracy:.2}%"));
                }
                summary_line("Duration", &format!("{:.2}s", result.training_duration_seconds));
                println!();
            }
        }
        "regressor" => {
            let result = run_with_sink(json, |progress| {
                trainer.train_regressor(training_data, output, author, description, &parameters, progress)
            })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                summary_header();
                summary_line("Model", &result.model_path.display().to_string());
                summary_line("Algorithm", parameters.algorithm.label());
                summary_line("Training RMSE", &format!("{:.4}", result.training_rmse));
                if let Some(rmse) = result.validation_rmse {
                    summary_line("Validation RMSE", &format!("{rmse:.4}"));
                }
                summary_line("Duration", &format!("{:.2}s", result.training_duration_seconds));
                println!();
            }
        }
        other => anyhow::bail!("Invalid model type: {other} (expected classifier or regressor)"),
    }

    Ok(())
}

pub fn cmd_object_detect(
    training_data: &PathBuf,
    output: &PathBuf,
    iterations: u32,
    batch_size: u32,
    validation: Option<PathBuf>,
    author: Option<&str>,
    description: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    ensure_exists(training_data)?;

    let parameters = DetectorParameters {
        max_iterations: iterations,
        batch_size,
        validation_data: validation,
    };

    let trainer = ObjectDetectorTrainer::new(StubEngine);
    let result = run_with_sink(json, |progress| {
        trainer.train(training_data, output, author, description, &parameters, progress)
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        summary_header();
        summary_line("Model", &result.model_path.display().to_string());
        summary_line("Training mAP", &format!("{:.4}", result.training_map));
        if let Some(map) = result.validation_map {
            summary_line("Validation mAP", &format!("{map:.4}"));
        }
        summary_line("Classes", &result.class_labels.join(", "));
        summary_line("Duration", &format!("{:.2}s", result.training_duration_seconds));
        println!();
    }

    Ok(())
}

pub fn cmd_word_tag(
    training_data: &PathBuf,
    output: &PathBuf,
    token_column: &str,
    label_column: &str,
    language: Option<String>,
    validation: Option<PathBuf>,
    author: Option<&str>,
    description: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    ensure_exists(training_data)?;

    let parameters = TaggerParameters {
        token_column: token_column.to_string(),
        label_column: label_column.to_string(),
        language,
        validation_data: validation,
    };

    let trainer = WordTaggerTrainer::new(StubEngine);
    let result = run_with_sink(json, |progress| {
        trainer.train(training_data, output, author, description, &parameters, progress)
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        summary_header();
        summary_line("Model", &result.model_path.display().to_string());
        summary_line("Training accuracy", &format!("{:.2}%", result.training_accuracy));
        if let Some(accuracy) = result.validation_accuracy {
            summary_line("Validation accuracy", &format!("{accuracy:.2}%"));
        }
        summary_line("Tags", &result.tag_labels.join(", "));
        summary_line("Duration", &format!("{:.2}s", result.training_duration_seconds));
        println!();
    }

    Ok(())
}

pub fn cmd_recommend(
    training_data: &PathBuf,
    output: &PathBuf,
    user_column: &str,
    item_column: &str,
    rating_column: Option<String>,
    author: Option<&str>,
    description: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    ensure_exists(training_data)?;

    let parameters = RecommenderParameters {
        user_column: user_column.to_string(),
        item_column: item_column.to_string(),
        rating_column,
        validation_data: None,
    };

    let trainer = RecommenderTrainer::new(StubEngine);
    let result = run_with_sink(json, |progress| {
        trainer.train(training_data, output, author, description, &parameters, progress)
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        summary_header();
        summary_line("Model", &result.model_path.display().to_string());
        if let Some(rmse) = result.training_rmse {
            summary_line("Training RMSE", &format!("{rmse:.4}"));
        }
        if let Some(rmse) = result.validation_rmse {
            summary_line("Validation RMSE", &format!("{rmse:.4}"));
        }
        summary_line("Duration", &format!("{:.2}s", result.training_duration_seconds));
        println!();
    }

    Ok(())
}
