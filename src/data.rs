use std::fs;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{ModelState, ScalerState, StudentRecord};

pub const DATASET_PATH: &str = "data/student_data.csv";
pub const MODEL_PATH: &str = "models/model.json";
pub const SCALER_PATH: &str = "models/scaler.json";

const GENERATOR_SEED: u64 = 42;

pub fn load_dataset(path: &Path) -> anyhow::Result<Vec<StudentRecord>> {
    let mut reader = csv::Reader::from_path(path).with_context(|| {
        format!(
            "dataset not found at {}; run `score-predictor generate` first",
            path.display()
        )
    })?;

    let mut records = Vec::new();
    for result in reader.deserialize::<StudentRecord>() {
        let record =
            result.with_context(|| format!("malformed dataset row in {}", path.display()))?;
        records.push(record);
    }

    if records.is_empty() {
        anyhow::bail!("dataset at {} contains no records", path.display());
    }

    Ok(records)
}

pub fn generate_dataset(path: &Path, rows: usize) -> anyhow::Result<Vec<StudentRecord>> {
    let mut rng = StdRng::seed_from_u64(GENERATOR_SEED);
    let mut records = Vec::with_capacity(rows);

    for _ in 0..rows {
        let study_hours = rng.gen_range(1..10) as f64;
        let previous_score = rng.gen_range(40..100) as f64;
        let attendance = rng.gen_range(60..100) as f64;
        let sleep_hours = rng.gen_range(4..10) as f64;
        let extracurricular = rng.gen_range(0..5) as f64;
        let noise = rng.gen_range(-10..10) as f64;

        let final_score = (study_hours * 3.0
            + previous_score * 0.4
            + attendance * 0.3
            + sleep_hours * 1.5
            - extracurricular * 0.5
            + noise)
            .clamp(0.0, 100.0);

        records.push(StudentRecord {
            study_hours,
            previous_score,
            attendance,
            sleep_hours,
            extracurricular,
            final_score,
        });
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create dataset file at {}", path.display()))?;
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(records)
}

/// Writes the fitted pair as one unit; any prior pair is overwritten.
pub fn save_model_pair(
    model: &ModelState,
    scaler: &ScalerState,
    model_path: &Path,
    scaler_path: &Path,
) -> anyhow::Result<()> {
    for path in [model_path, scaler_path] {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    fs::write(model_path, serde_json::to_string_pretty(model)?)
        .with_context(|| format!("failed to write model to {}", model_path.display()))?;
    fs::write(scaler_path, serde_json::to_string_pretty(scaler)?)
        .with_context(|| format!("failed to write scaler to {}", scaler_path.display()))?;

    Ok(())
}

pub fn load_model_pair(
    model_path: &Path,
    scaler_path: &Path,
) -> anyhow::Result<(ModelState, ScalerState)> {
    let model: ModelState = read_json(model_path)?;
    let scaler: ScalerState = read_json(scaler_path)?;
    Ok((model, scaler))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let file = fs::File::open(path).with_context(|| {
        format!(
            "model pair not found at {}; run `score-predictor train` first",
            path.display()
        )
    })?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("malformed model file at {}", path.display()))
}
