use anyhow::bail;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::metrics;
use crate::models::{
    EvaluationReport, ModelState, RegressionMetrics, ScalerState, StudentRecord, FEATURE_COUNT,
};
use crate::regression;
use crate::scaler;

pub const SPLIT_SEED: u64 = 42;
pub const TEST_FRACTION: f64 = 0.2;

pub struct TrainedModel {
    pub scaler: ScalerState,
    pub model: ModelState,
    pub evaluation: EvaluationReport,
}

/// Deterministic shuffle with a fixed seed, then an 80/20 cut. Identical
/// input yields identical partitions on every run.
pub fn split_dataset(records: &[StudentRecord]) -> (Vec<StudentRecord>, Vec<StudentRecord>) {
    let mut shuffled = records.to_vec();
    let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
    shuffled.shuffle(&mut rng);

    let test_rows = ((records.len() as f64) * TEST_FRACTION).round().max(1.0) as usize;
    let train_rows = shuffled.len().saturating_sub(test_rows);
    let test = shuffled.split_off(train_rows);
    (shuffled, test)
}

/// Split, fit the scaler on the training partition only, fit the model on
/// scaled training rows, and evaluate both partitions. Persistence is the
/// caller's final step.
pub fn train(records: &[StudentRecord]) -> anyhow::Result<TrainedModel> {
    let (train_records, test_records) = split_dataset(records);
    ensure_split(&train_records, &test_records, records.len())?;

    let train_features = feature_rows(&train_records);
    let scaler_state = scaler::fit(&train_features);

    let train_scaled: Vec<[f64; FEATURE_COUNT]> = train_features
        .iter()
        .map(|&row| scaler::transform(&scaler_state, row))
        .collect();
    let model = regression::fit(&train_scaled, &target_values(&train_records))?;

    let evaluation = evaluate_split(&train_records, &test_records, &model, &scaler_state);

    Ok(TrainedModel {
        scaler: scaler_state,
        model,
        evaluation,
    })
}

/// Re-derives the evaluation for an already-fitted pair, using the same
/// deterministic split the trainer used.
pub fn evaluate_pair(
    records: &[StudentRecord],
    model: &ModelState,
    scaler_state: &ScalerState,
) -> anyhow::Result<EvaluationReport> {
    let (train_records, test_records) = split_dataset(records);
    ensure_split(&train_records, &test_records, records.len())?;
    Ok(evaluate_split(&train_records, &test_records, model, scaler_state))
}

fn ensure_split(
    train_records: &[StudentRecord],
    test_records: &[StudentRecord],
    total: usize,
) -> anyhow::Result<()> {
    if train_records.is_empty() || test_records.is_empty() {
        bail!("dataset too small to split into train and test partitions ({total} records)");
    }
    Ok(())
}

fn evaluate_split(
    train_records: &[StudentRecord],
    test_records: &[StudentRecord],
    model: &ModelState,
    scaler_state: &ScalerState,
) -> EvaluationReport {
    EvaluationReport {
        train: partition_metrics(train_records, model, scaler_state),
        test: partition_metrics(test_records, model, scaler_state),
        train_rows: train_records.len(),
        test_rows: test_records.len(),
    }
}

fn partition_metrics(
    records: &[StudentRecord],
    model: &ModelState,
    scaler_state: &ScalerState,
) -> RegressionMetrics {
    let predictions: Vec<f64> = records
        .iter()
        .map(|record| {
            regression::predict(model, scaler::transform(scaler_state, record.features().values()))
        })
        .collect();
    metrics::evaluate(&target_values(records), &predictions)
}

fn feature_rows(records: &[StudentRecord]) -> Vec<[f64; FEATURE_COUNT]> {
    records
        .iter()
        .map(|record| record.features().values())
        .collect()
}

fn target_values(records: &[StudentRecord]) -> Vec<f64> {
    records.iter().map(|record| record.final_score).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn sample_records(rows: usize) -> Vec<StudentRecord> {
        let mut rng = StdRng::seed_from_u64(99);
        (0..rows)
            .map(|_| {
                let study_hours = rng.gen_range(1..10) as f64;
                let previous_score = rng.gen_range(40..100) as f64;
                let attendance = rng.gen_range(60..100) as f64;
                let sleep_hours = rng.gen_range(4..10) as f64;
                let extracurricular = rng.gen_range(0..5) as f64;
                // Stays inside [0, 100] for every possible draw, so the
                // target is exactly linear in the features.
                let final_score = study_hours * 2.0
                    + previous_score * 0.3
                    + attendance * 0.2
                    + sleep_hours * 1.0
                    - extracurricular * 0.5;
                StudentRecord {
                    study_hours,
                    previous_score,
                    attendance,
                    sleep_hours,
                    extracurricular,
                    final_score,
                }
            })
            .collect()
    }

    #[test]
    fn split_is_eighty_twenty() {
        let records = sample_records(100);
        let (train_records, test_records) = split_dataset(&records);
        assert_eq!(train_records.len(), 80);
        assert_eq!(test_records.len(), 20);
    }

    #[test]
    fn split_is_deterministic() {
        let records = sample_records(50);
        let (first_train, first_test) = split_dataset(&records);
        let (second_train, second_test) = split_dataset(&records);
        assert_eq!(first_train, second_train);
        assert_eq!(first_test, second_test);
    }

    #[test]
    fn split_preserves_every_record() {
        let records = sample_records(23);
        let (train_records, test_records) = split_dataset(&records);
        assert_eq!(train_records.len() + test_records.len(), records.len());
    }

    #[test]
    fn training_is_reproducible() {
        let records = sample_records(60);
        let first = train(&records).unwrap();
        let second = train(&records).unwrap();

        assert_eq!(first.scaler, second.scaler);
        assert_eq!(first.model, second.model);
    }

    #[test]
    fn training_fits_a_linear_signal_closely() {
        // Targets are exactly linear in the features with no noise, so the
        // fit should be near-perfect.
        let records = sample_records(80);
        let trained = train(&records).unwrap();

        assert!(trained.evaluation.train.r_squared > 0.999);
        assert!(trained.evaluation.test.r_squared > 0.999);
        assert!(trained.evaluation.test.rmse < 0.5);
        assert_eq!(trained.evaluation.train_rows, 64);
        assert_eq!(trained.evaluation.test_rows, 16);
    }

    #[test]
    fn evaluate_pair_matches_training_evaluation() {
        let records = sample_records(60);
        let trained = train(&records).unwrap();
        let rebuilt = evaluate_pair(&records, &trained.model, &trained.scaler).unwrap();

        assert_eq!(rebuilt.train_rows, trained.evaluation.train_rows);
        assert_eq!(rebuilt.test_rows, trained.evaluation.test_rows);
        assert!((rebuilt.test.rmse - trained.evaluation.test.rmse).abs() < 1e-12);
        assert!((rebuilt.train.r_squared - trained.evaluation.train.r_squared).abs() < 1e-12);
    }

    #[test]
    fn tiny_dataset_is_rejected() {
        let records = sample_records(1);
        assert!(train(&records).is_err());
    }
}
