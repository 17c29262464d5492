use serde::{Deserialize, Serialize};

pub const FEATURE_COUNT: usize = 5;

pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "study_hours",
    "previous_score",
    "attendance",
    "sleep_hours",
    "extracurricular",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub study_hours: f64,
    pub previous_score: f64,
    pub attendance: f64,
    pub sleep_hours: f64,
    pub extracurricular: f64,
    pub final_score: f64,
}

impl StudentRecord {
    pub fn features(&self) -> StudentFeatures {
        StudentFeatures {
            study_hours: self.study_hours,
            previous_score: self.previous_score,
            attendance: self.attendance,
            sleep_hours: self.sleep_hours,
            extracurricular: self.extracurricular,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentFeatures {
    pub study_hours: f64,
    pub previous_score: f64,
    pub attendance: f64,
    pub sleep_hours: f64,
    pub extracurricular: f64,
}

impl StudentFeatures {
    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [
            self.study_hours,
            self.previous_score,
            self.attendance,
            self.sleep_hours,
            self.extracurricular,
        ]
    }
}

/// Per-feature standardization parameters fitted on the training partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerState {
    pub means: [f64; FEATURE_COUNT],
    pub std_devs: [f64; FEATURE_COUNT],
}

/// Coefficients live in the scaled feature space of the paired [`ScalerState`];
/// the two are only meaningful persisted and loaded together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    pub intercept: f64,
    pub coefficients: [f64; FEATURE_COUNT],
}

#[derive(Debug, Clone, Copy)]
pub struct RegressionMetrics {
    pub r_squared: f64,
    pub rmse: f64,
    pub mae: f64,
}

#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub train: RegressionMetrics,
    pub test: RegressionMetrics,
    pub train_rows: usize,
    pub test_rows: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub label: &'static str,
    pub code: &'static str,
}
