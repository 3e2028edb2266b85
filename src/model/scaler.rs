// Standard scaler module
// Fitted per-column normalization applied after the power transform

use serde::Deserialize;

/// A fitted standard scaler: `(x - mean) / scale` per column.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Standardize a single value with the statistics fitted for `column`.
    pub fn transform(&self, column: usize, x: f64) -> Option<f64> {
        let mean = self.mean.get(column)?;
        let scale = self.scale.get(column)?;
        Some((x - mean) / scale)
    }

    /// Artifact sanity check, called once at load time.
    pub fn is_valid(&self) -> bool {
        !self.mean.is_empty()
            && self.mean.len() == self.scale.len()
            && self.mean.iter().all(|m| m.is_finite())
            && self.scale.iter().all(|s| s.is_finite() && *s != 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_and_scales() {
        let scaler = StandardScaler {
            mean: vec![1300.0],
            scale: vec![650.0],
        };
        let y = scaler.transform(0, 1950.0).unwrap();
        assert!((y - 1.0).abs() < 1e-12);
        let y = scaler.transform(0, 1300.0).unwrap();
        assert!(y.abs() < 1e-12);
    }

    #[test]
    fn unknown_column_is_none() {
        let scaler = StandardScaler {
            mean: vec![0.0],
            scale: vec![1.0],
        };
        assert!(scaler.transform(3, 1.0).is_none());
    }

    #[test]
    fn validity_rejects_zero_scale_and_shape_mismatch() {
        let zero = StandardScaler {
            mean: vec![0.0],
            scale: vec![0.0],
        };
        assert!(!zero.is_valid());
        let mismatch = StandardScaler {
            mean: vec![0.0, 1.0],
            scale: vec![1.0],
        };
        assert!(!mismatch.is_valid());
    }
}
