use crate::models::{ScalerState, FEATURE_COUNT};

/// Computes per-feature mean and population standard deviation (ddof = 0).
///
/// Must only ever see the training partition; fitting on test rows would leak
/// information into evaluation.
pub fn fit(rows: &[[f64; FEATURE_COUNT]]) -> ScalerState {
    let count = rows.len() as f64;
    let mut means = [0.0; FEATURE_COUNT];
    let mut std_devs = [0.0; FEATURE_COUNT];

    for row in rows {
        for (feature, value) in row.iter().enumerate() {
            means[feature] += value;
        }
    }
    for mean in means.iter_mut() {
        *mean /= count;
    }

    for row in rows {
        for (feature, value) in row.iter().enumerate() {
            let centered = value - means[feature];
            std_devs[feature] += centered * centered;
        }
    }
    for std_dev in std_devs.iter_mut() {
        *std_dev = (*std_dev / count).sqrt();
    }

    ScalerState { means, std_devs }
}

/// Applied identically at training and inference time. A zero-variance
/// feature divides by zero here and produces non-finite output; that is a
/// degenerate dataset, not a handled condition.
pub fn transform(state: &ScalerState, features: [f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
    let mut scaled = [0.0; FEATURE_COUNT];
    for feature in 0..FEATURE_COUNT {
        scaled[feature] = (features[feature] - state.means[feature]) / state.std_devs[feature];
    }
    scaled
}
