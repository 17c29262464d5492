use crate::models::{Category, ModelState, ScalerState, StudentFeatures};
use crate::regression;
use crate::scaler;

// Ordered (lower bound, label, badge code) bands; first match wins.
const CATEGORY_BANDS: [(f64, &str, &str); 6] = [
    (90.0, "Outstanding", "#28a745"),
    (80.0, "Excellent", "#20c997"),
    (70.0, "Good", "#17a2b8"),
    (60.0, "Average", "#ffc107"),
    (50.0, "Below Average", "#fd7e14"),
    (0.0, "Needs Improvement", "#dc3545"),
];

pub const DEFAULT_ENCOURAGEMENT: &str = "You're on the right track! Keep up the good work.";

/// Scale, infer, clamp. Final scores cannot leave [0, 100] no matter how far
/// outside the training domain the raw inputs sit; raw inputs themselves are
/// not validated.
pub fn predict_score(
    model: &ModelState,
    scaler_state: &ScalerState,
    input: &StudentFeatures,
) -> f64 {
    let scaled = scaler::transform(scaler_state, input.values());
    regression::predict(model, scaled).clamp(0.0, 100.0)
}

pub fn categorize(score: f64) -> Category {
    let &(_, label, code) = CATEGORY_BANDS
        .iter()
        .find(|(lower_bound, _, _)| score >= *lower_bound)
        .unwrap_or(&CATEGORY_BANDS[CATEGORY_BANDS.len() - 1]);
    Category { label, code }
}

/// Each rule fires independently, in this fixed order; the default
/// encouragement only appears when nothing else does.
pub fn recommend(input: &StudentFeatures) -> Vec<&'static str> {
    let mut advice = Vec::new();

    if input.study_hours < 4.0 {
        advice.push("Increase study hours to at least 4-5 hours per day");
    }
    if input.attendance < 75.0 {
        advice.push("Improve attendance - aim for at least 80%");
    }
    if input.sleep_hours < 6.0 {
        advice.push("Get more sleep - 7-8 hours is optimal for learning");
    }
    if input.sleep_hours > 9.0 {
        advice.push("Balance sleep time - too much sleep can reduce productivity");
    }
    if input.extracurricular > 3.0 {
        advice.push("Balance extracurricular activities with study time");
    }
    if input.previous_score < 60.0 {
        advice.push("Focus on strengthening fundamentals from previous courses");
    }

    if advice.is_empty() {
        advice.push(DEFAULT_ENCOURAGEMENT);
    }

    advice
}
