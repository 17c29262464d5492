use crate::models::RegressionMetrics;

pub fn mse(targets: &[f64], predictions: &[f64]) -> f64 {
    assert_eq!(targets.len(), predictions.len(), "slices must have the same length");

    if targets.is_empty() {
        return 0.0;
    }

    let sum_squared: f64 = targets
        .iter()
        .zip(predictions)
        .map(|(target, prediction)| (target - prediction).powi(2))
        .sum();
    sum_squared / targets.len() as f64
}

pub fn rmse(targets: &[f64], predictions: &[f64]) -> f64 {
    mse(targets, predictions).sqrt()
}

pub fn mae(targets: &[f64], predictions: &[f64]) -> f64 {
    assert_eq!(targets.len(), predictions.len(), "slices must have the same length");

    if targets.is_empty() {
        return 0.0;
    }

    let sum_absolute: f64 = targets
        .iter()
        .zip(predictions)
        .map(|(target, prediction)| (target - prediction).abs())
        .sum();
    sum_absolute / targets.len() as f64
}

/// R² = 1 - SS_res / SS_tot. Can go negative when the fit is worse than
/// predicting the mean.
pub fn r_squared(targets: &[f64], predictions: &[f64]) -> f64 {
    assert_eq!(targets.len(), predictions.len(), "slices must have the same length");

    if targets.is_empty() {
        return 0.0;
    }

    let mean: f64 = targets.iter().sum::<f64>() / targets.len() as f64;

    let ss_res: f64 = targets
        .iter()
        .zip(predictions)
        .map(|(target, prediction)| (target - prediction).powi(2))
        .sum();
    let ss_tot: f64 = targets.iter().map(|target| (target - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        // Constant targets: perfect only if predictions match them exactly.
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }

    1.0 - ss_res / ss_tot
}

pub fn evaluate(targets: &[f64], predictions: &[f64]) -> RegressionMetrics {
    RegressionMetrics {
        r_squared: r_squared(targets, predictions),
        rmse: rmse(targets, predictions),
        mae: mae(targets, predictions),
    }
}
