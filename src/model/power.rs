// Power transform module
// Fitted Yeo-Johnson transform for skew reduction on the time column

use serde::Deserialize;

/// A fitted Yeo-Johnson power transformer.
///
/// Carries one lambda per transformed column. Standardization is NOT part
/// of this artifact; the separate fitted scaler handles it, matching the
/// training pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct PowerTransformer {
    pub method: String,
    pub lambdas: Vec<f64>,
}

impl PowerTransformer {
    /// Transform a single value with the lambda fitted for `column`.
    ///
    /// Returns `None` when no lambda exists for the column.
    pub fn transform(&self, column: usize, x: f64) -> Option<f64> {
        self.lambdas.get(column).map(|&lambda| yeo_johnson(x, lambda))
    }

    /// Artifact sanity check, called once at load time.
    pub fn is_valid(&self) -> bool {
        self.method == "yeo-johnson"
            && !self.lambdas.is_empty()
            && self.lambdas.iter().all(|l| l.is_finite())
    }
}

/// The Yeo-Johnson transform for one value with a fixed lambda.
///
/// Monotonic for any lambda; defined piecewise around x = 0 with the
/// log limits at lambda = 0 and lambda = 2.
fn yeo_johnson(x: f64, lambda: f64) -> f64 {
    if x >= 0.0 {
        if lambda.abs() < f64::EPSILON {
            (x + 1.0).ln()
        } else {
            ((x + 1.0).powf(lambda) - 1.0) / lambda
        }
    } else if (lambda - 2.0).abs() < f64::EPSILON {
        -(1.0 - x).ln()
    } else {
        -((1.0 - x).powf(2.0 - lambda) - 1.0) / (2.0 - lambda)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identity_at_lambda_one() {
        // lambda = 1 leaves non-negative values unchanged
        assert!(close(yeo_johnson(0.0, 1.0), 0.0));
        assert!(close(yeo_johnson(1830.0, 1.0), 1830.0));
    }

    #[test]
    fn log_branch_at_lambda_zero() {
        assert!(close(yeo_johnson(0.0, 0.0), 0.0));
        assert!(close(yeo_johnson(9.0, 0.0), 10.0_f64.ln()));
    }

    #[test]
    fn negative_branch() {
        // lambda = 2 on x < 0 is the negative log limit
        assert!(close(yeo_johnson(-9.0, 2.0), -(10.0_f64.ln())));
        // generic negative branch: lambda = 1 is identity there too
        assert!(close(yeo_johnson(-5.0, 1.0), -5.0));
    }

    #[test]
    fn monotonic_on_time_range() {
        let lambda = 0.37;
        let mut prev = f64::NEG_INFINITY;
        for t in (0..=2359).step_by(7) {
            let y = yeo_johnson(f64::from(t), lambda);
            assert!(y > prev, "not monotonic at t={t}");
            prev = y;
        }
    }

    #[test]
    fn transform_selects_column_lambda() {
        let pt = PowerTransformer {
            method: "yeo-johnson".to_string(),
            lambdas: vec![1.0],
        };
        assert!(close(pt.transform(0, 42.0).unwrap(), 42.0));
        assert!(pt.transform(1, 42.0).is_none());
    }

    #[test]
    fn validity_rejects_wrong_method() {
        let pt = PowerTransformer {
            method: "box-cox".to_string(),
            lambdas: vec![0.5],
        };
        assert!(!pt.is_valid());
        let pt = PowerTransformer {
            method: "yeo-johnson".to_string(),
            lambdas: vec![f64::NAN],
        };
        assert!(!pt.is_valid());
    }
}
