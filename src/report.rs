use std::fmt::Write;

use chrono::Utc;

use crate::models::{EvaluationReport, ModelState, ScalerState, StudentRecord, FEATURE_NAMES};

pub fn build_report(
    records: &[StudentRecord],
    model: &ModelState,
    scaler_state: &ScalerState,
    evaluation: &EvaluationReport,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Student Score Model Report");
    let _ = writeln!(
        output,
        "Generated {} from {} records",
        Utc::now().date_naive(),
        records.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Dataset Summary");

    if records.is_empty() {
        let _ = writeln!(output, "No records on file.");
    } else {
        let scores: Vec<f64> = records.iter().map(|record| record.final_score).collect();
        let average = scores.iter().sum::<f64>() / scores.len() as f64;
        let highest = scores.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        let lowest = scores.iter().fold(f64::INFINITY, |a, &b| a.min(b));

        let _ = writeln!(output, "- Total students: {}", records.len());
        let _ = writeln!(output, "- Average final score: {average:.1}");
        let _ = writeln!(output, "- Highest final score: {highest:.1}");
        let _ = writeln!(output, "- Lowest final score: {lowest:.1}");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Model Performance");
    let _ = writeln!(
        output,
        "- Training ({} records): R² {:.4}, RMSE {:.2}, MAE {:.2}",
        evaluation.train_rows,
        evaluation.train.r_squared,
        evaluation.train.rmse,
        evaluation.train.mae
    );
    let _ = writeln!(
        output,
        "- Testing ({} records): R² {:.4}, RMSE {:.2}, MAE {:.2}",
        evaluation.test_rows,
        evaluation.test.r_squared,
        evaluation.test.rmse,
        evaluation.test.mae
    );

    let mut influence: Vec<(&str, f64, f64, f64)> = FEATURE_NAMES
        .iter()
        .zip(model.coefficients)
        .zip(scaler_state.means.iter().zip(scaler_state.std_devs))
        .map(|((name, coefficient), (mean, std_dev))| (*name, coefficient, *mean, std_dev))
        .collect();
    influence.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let _ = writeln!(output);
    let _ = writeln!(output, "## Feature Influence");

    for (name, coefficient, mean, std_dev) in influence {
        let _ = writeln!(
            output,
            "- {name}: coefficient {coefficient:+.3} (train mean {mean:.2}, std dev {std_dev:.2})"
        );
    }
    let _ = writeln!(output, "- intercept: {:+.3}", model.intercept);

    output
}
