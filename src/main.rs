//! ModelForge - Main Entry Point
//!
//! Multi-modality model training from the command line.

use clap::Parser;
use modelforge::cli::{
    cmd_image, cmd_object_detect, cmd_recommend, cmd_sound, cmd_tabular, cmd_text, cmd_word_tag,
    Cli, Commands,
};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modelforge=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Image {
            training_data,
            output,
            iterations,
            validation,
            no_augmentation,
            author,
            description,
            json,
        } => {
            cmd_image(
                &training_data,
                &output,
                iterations,
                validation,
                no_augmentation,
                author.as_deref(),
                description.as_deref(),
                json,
            )?;
        }
        Commands::Text {
            training_data,
            output,
            text_column,
            label_column,
            algorithm,
            validation,
            author,
            description,
            json,
        } => {
            cmd_text(
                &training_data,
                &output,
                &text_column,
                &label_column,
                &algorithm,
                validation,
                author.as_deref(),
                description.as_deref(),
                json,
            )?;
        }
        Commands::Sound {
            training_data,
            output,
            overlap,
            validation,
            author,
            description,
            json,
        } => {
            cmd_sound(
                &training_data,
                &output,
                overlap,
                validation,
                author.as_deref(),
                description.as_deref(),
                json,
            )?;
        }
        Commands::Tabular {
            training_data,
            output,
            target,
            model_type,
            algorithm,
            max_depth,
            max_iterations,
            validation,
            author,
            description,
            json,
        } => {
            cmd_tabular(
                &training_data,
                &output,
                &target,
                &model_type,
                &algorithm,
                max_depth,
                max_iterations,
                validation,
                author.as_deref(),
                description.as_deref(),
                json,
            )?;
        }
        Commands::ObjectDetect {
            training_data,
            output,
            iterations,
            batch_size,
            validation,
            author,
            description,
            json,
        } => {
            cmd_object_detect(
                &training_data,
                &output,
                iterations,
                batch_size,
                validation,
                author.as_deref(),
                description.as_deref(),
                json,
            )?;
        }
        Commands::WordTag {
            training_data,
            output,
            token_column,
            label_column,
            language,
            validation,
            author,
            description,
            json,
        } => {
            cmd_word_tag(
                &training_data,
                &output,
                &token_column,
                &label_column,
                language,
                validation,
                author.as_deref(),
                description.as_deref(),
                json,
            )?;
        }
        Commands::Recommend {
            training_data,
            output,
            user_column,
            item_column,
            rating_column,
            author,
            description,
            json,
        } => {
            cmd_recommend(
                &training_data,
                &output,
                &user_column,
                &item_column,
                rating_column,
                author.as_deref(),
                description.as_deref(),
                json,
            )?;
        }
    }

    Ok(())
}
