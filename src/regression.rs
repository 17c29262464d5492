use anyhow::bail;

use crate::models::{ModelState, FEATURE_COUNT};

// Design dimension including the intercept column.
const DIM: usize = FEATURE_COUNT + 1;

const PIVOT_EPSILON: f64 = 1e-12;

/// Ordinary least squares in closed form: accumulate the normal equations
/// (XᵀX)β = Xᵀy over the design matrix [1 | x] and solve for β.
/// Deterministic given fixed row ordering.
pub fn fit(rows: &[[f64; FEATURE_COUNT]], targets: &[f64]) -> anyhow::Result<ModelState> {
    if rows.len() != targets.len() {
        bail!(
            "feature rows ({}) and targets ({}) differ in length",
            rows.len(),
            targets.len()
        );
    }
    if rows.len() < DIM {
        bail!(
            "need at least {DIM} rows to fit {FEATURE_COUNT} coefficients and an intercept, got {}",
            rows.len()
        );
    }

    let mut xtx = [[0.0f64; DIM]; DIM];
    let mut xty = [0.0f64; DIM];

    for (row, &target) in rows.iter().zip(targets) {
        let mut design = [1.0f64; DIM];
        design[1..].copy_from_slice(row);

        for i in 0..DIM {
            xty[i] += design[i] * target;
            for j in 0..DIM {
                xtx[i][j] += design[i] * design[j];
            }
        }
    }

    let beta = solve(xtx, xty)?;

    let mut coefficients = [0.0; FEATURE_COUNT];
    coefficients.copy_from_slice(&beta[1..]);

    Ok(ModelState {
        intercept: beta[0],
        coefficients,
    })
}

/// Intercept plus dot product over scaled features. No clamping here; the
/// serving boundary owns the [0, 100] domain invariant.
pub fn predict(state: &ModelState, scaled: [f64; FEATURE_COUNT]) -> f64 {
    let mut score = state.intercept;
    for (coefficient, value) in state.coefficients.iter().zip(scaled) {
        score += coefficient * value;
    }
    score
}

// Gaussian elimination with partial pivoting.
fn solve(mut matrix: [[f64; DIM]; DIM], mut rhs: [f64; DIM]) -> anyhow::Result<[f64; DIM]> {
    for col in 0..DIM {
        let mut pivot_row = col;
        for row in (col + 1)..DIM {
            if matrix[row][col].abs() > matrix[pivot_row][col].abs() {
                pivot_row = row;
            }
        }

        if matrix[pivot_row][col].abs() < PIVOT_EPSILON {
            bail!("normal equations are singular; the training features are degenerate");
        }

        matrix.swap(col, pivot_row);
        rhs.swap(col, pivot_row);

        for row in (col + 1)..DIM {
            let factor = matrix[row][col] / matrix[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..DIM {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut beta = [0.0f64; DIM];
    for row in (0..DIM).rev() {
        let mut sum = rhs[row];
        for col in (row + 1)..DIM {
            sum -= matrix[row][col] * beta[col];
        }
        beta[row] = sum / matrix[row][row];
    }

    Ok(beta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn noiseless_data(
        intercept: f64,
        coefficients: [f64; FEATURE_COUNT],
        rows: usize,
    ) -> (Vec<[f64; FEATURE_COUNT]>, Vec<f64>) {
        let mut rng = StdRng::seed_from_u64(7);
        let mut features = Vec::with_capacity(rows);
        let mut targets = Vec::with_capacity(rows);

        for _ in 0..rows {
            let mut row = [0.0; FEATURE_COUNT];
            for value in row.iter_mut() {
                *value = rng.gen_range(-5.0..5.0);
            }
            let target = intercept
                + row
                    .iter()
                    .zip(coefficients)
                    .map(|(value, coefficient)| value * coefficient)
                    .sum::<f64>();
            features.push(row);
            targets.push(target);
        }

        (features, targets)
    }

    #[test]
    fn fit_recovers_a_noiseless_linear_function() {
        let intercept = 67.5;
        let coefficients = [3.0, 0.4, 0.3, 1.5, -0.5];
        let (features, targets) = noiseless_data(intercept, coefficients, 40);

        let state = fit(&features, &targets).unwrap();

        assert!((state.intercept - intercept).abs() < 1e-8);
        for (fitted, expected) in state.coefficients.iter().zip(coefficients) {
            assert!((fitted - expected).abs() < 1e-8, "{fitted} vs {expected}");
        }
    }

    #[test]
    fn fit_is_deterministic() {
        let (features, targets) = noiseless_data(10.0, [1.0, -2.0, 0.5, 0.0, 4.0], 30);
        let first = fit(&features, &targets).unwrap();
        let second = fit(&features, &targets).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn fit_rejects_too_few_rows() {
        let (features, targets) = noiseless_data(1.0, [1.0; FEATURE_COUNT], 4);
        assert!(fit(&features, &targets).is_err());
    }

    #[test]
    fn fit_rejects_degenerate_features() {
        // Identical rows make XᵀX rank one.
        let features = vec![[1.0, 2.0, 3.0, 4.0, 5.0]; 10];
        let targets = vec![50.0; 10];
        assert!(fit(&features, &targets).is_err());
    }

    #[test]
    fn predict_is_intercept_plus_dot_product() {
        let state = ModelState {
            intercept: 10.0,
            coefficients: [1.0, 2.0, 3.0, 4.0, 5.0],
        };
        let score = predict(&state, [1.0, 1.0, 1.0, 1.0, 1.0]);
        assert!((score - 25.0).abs() < 1e-12);
    }
}
