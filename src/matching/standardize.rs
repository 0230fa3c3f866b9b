//! Zero-mean, unit-variance scaling.

/// Standardize samples to zero mean and unit variance.
///
/// Computes `(x - mean) / (std + epsilon)` with the population standard
/// deviation. `epsilon` keeps near-silent input finite; silence maps to all
/// zeros.
pub fn standardize(samples: &[f32], epsilon: f64) -> Vec<f64> {
    if samples.is_empty() {
        return Vec::new();
    }

    #[allow(clippy::cast_precision_loss)]
    let n = samples.len() as f64;
    let mean = samples.iter().map(|&s| f64::from(s)).sum::<f64>() / n;
    let variance = samples
        .iter()
        .map(|&s| {
            let d = f64::from(s) - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    let scale = 1.0 / (variance.sqrt() + epsilon);

    samples
        .iter()
        .map(|&s| (f64::from(s) - mean) * scale)
        .collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn mean(values: &[f64]) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let n = values.len() as f64;
        values.iter().sum::<f64>() / n
    }

    #[test]
    fn test_standardize_zero_mean_unit_variance() {
        let samples = [1.0_f32, 2.0, 3.0, 4.0, 5.0];
        let z = standardize(&samples, 1e-6);
        assert!(mean(&z).abs() < 1e-12);
        let var = z.iter().map(|v| v * v).sum::<f64>() / 5.0;
        assert!((var - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_standardize_removes_dc_offset_and_gain() {
        let base = [0.1_f32, -0.3, 0.2, 0.5, -0.4];
        let shifted: Vec<f32> = base.iter().map(|s| s.mul_add(3.0, 0.25)).collect();
        let a = standardize(&base, 1e-6);
        let b = standardize(&shifted, 1e-6);
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-4, "{x} vs {y}");
        }
    }

    #[test]
    fn test_standardize_silence_is_zero() {
        let z = standardize(&[0.0; 64], 1e-6);
        assert!(z.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_standardize_constant_is_zero() {
        let z = standardize(&[0.7; 16], 1e-6);
        assert!(z.iter().all(|v| v.abs() < 1e-6));
    }

    #[test]
    fn test_standardize_empty() {
        assert!(standardize(&[], 1e-6).is_empty());
    }
}
