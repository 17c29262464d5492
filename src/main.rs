use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

mod data;
mod metrics;
mod models;
mod predict;
mod regression;
mod report;
mod scaler;
mod train;

use models::StudentFeatures;

#[derive(Parser)]
#[command(name = "score-predictor")]
#[command(about = "Student final exam score prediction pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic student dataset
    Generate {
        #[arg(long, default_value_t = 100)]
        rows: usize,
    },
    /// Train the regression model and persist the scaler/model pair
    Train,
    /// Predict one student's final score
    Predict {
        #[arg(long)]
        study_hours: f64,
        #[arg(long)]
        previous_score: f64,
        #[arg(long)]
        attendance: f64,
        #[arg(long)]
        sleep_hours: f64,
        #[arg(long)]
        extracurricular: f64,
    },
    /// Generate a markdown report for the persisted model
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { rows } => {
            let records = data::generate_dataset(Path::new(data::DATASET_PATH), rows)?;
            println!(
                "Dataset written to {} ({} records).",
                data::DATASET_PATH,
                records.len()
            );
        }
        Commands::Train => {
            let records = data::load_dataset(Path::new(data::DATASET_PATH))?;
            let trained = train::train(&records)?;
            data::save_model_pair(
                &trained.model,
                &trained.scaler,
                Path::new(data::MODEL_PATH),
                Path::new(data::SCALER_PATH),
            )?;

            let evaluation = &trained.evaluation;
            println!(
                "Data split: {} training, {} testing samples.",
                evaluation.train_rows, evaluation.test_rows
            );
            println!(
                "Training R²: {:.4}, RMSE: {:.2}, MAE: {:.2}",
                evaluation.train.r_squared, evaluation.train.rmse, evaluation.train.mae
            );
            println!(
                "Testing R²: {:.4}, RMSE: {:.2}, MAE: {:.2}",
                evaluation.test.r_squared, evaluation.test.rmse, evaluation.test.mae
            );
            println!(
                "Model pair saved to {} and {}.",
                data::MODEL_PATH,
                data::SCALER_PATH
            );
        }
        Commands::Predict {
            study_hours,
            previous_score,
            attendance,
            sleep_hours,
            extracurricular,
        } => {
            let (model, scaler_state) =
                data::load_model_pair(Path::new(data::MODEL_PATH), Path::new(data::SCALER_PATH))?;
            let input = StudentFeatures {
                study_hours,
                previous_score,
                attendance,
                sleep_hours,
                extracurricular,
            };

            let score = predict::predict_score(&model, &scaler_state, &input);
            let category = predict::categorize(score);

            println!("Predicted final score: {score:.1}");
            println!("Performance category: {} [{}]", category.label, category.code);
            println!("Recommendations:");
            for advice in predict::recommend(&input) {
                println!("- {advice}");
            }
        }
        Commands::Report { out } => {
            let records = data::load_dataset(Path::new(data::DATASET_PATH))?;
            let (model, scaler_state) =
                data::load_model_pair(Path::new(data::MODEL_PATH), Path::new(data::SCALER_PATH))?;
            let evaluation = train::evaluate_pair(&records, &model, &scaler_state)?;

            let report = report::build_report(&records, &model, &scaler_state, &evaluation);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
