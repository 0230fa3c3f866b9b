//! FFT-based linear cross-correlation.

use crate::error::{Error, Result};
use realfft::RealFftPlanner;
use realfft::num_complex::Complex;
use std::sync::Mutex;

/// Computes "valid" cross-correlations with real FFTs.
///
/// The planner is kept between calls, so repeated correlations of the same
/// transform length reuse their plans.
pub struct Correlator {
    planner: Mutex<RealFftPlanner<f64>>,
}

impl std::fmt::Debug for Correlator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Correlator").finish_non_exhaustive()
    }
}

impl Default for Correlator {
    fn default() -> Self {
        Self::new()
    }
}

impl Correlator {
    /// Create a correlator with an empty plan cache.
    pub fn new() -> Self {
        Self {
            planner: Mutex::new(RealFftPlanner::new()),
        }
    }

    /// Cross-correlate `needle` against every full-overlap position of `haystack`.
    ///
    /// Returns `haystack.len() - needle.len() + 1` values where
    /// `out[k] = sum_j haystack[k + j] * needle[j]`. Zero-padded edge
    /// positions are never produced.
    pub fn correlate_valid(&self, haystack: &[f64], needle: &[f64]) -> Result<Vec<f64>> {
        if needle.is_empty() || haystack.is_empty() {
            return Err(Error::EmptySignal);
        }
        if needle.len() > haystack.len() {
            return Err(Error::Fft {
                reason: format!(
                    "needle of {} samples does not fit in haystack of {}",
                    needle.len(),
                    haystack.len()
                ),
            });
        }

        let len = fast_len(haystack.len() + needle.len() - 1);
        let (forward, inverse) = {
            let mut planner = self.planner.lock().map_err(|_| Error::Fft {
                reason: "FFT planner lock poisoned".to_string(),
            })?;
            (planner.plan_fft_forward(len), planner.plan_fft_inverse(len))
        };

        let mut spectrum_h = forward.make_output_vec();
        let mut padded = forward.make_input_vec();
        padded[..haystack.len()].copy_from_slice(haystack);
        forward
            .process(&mut padded, &mut spectrum_h)
            .map_err(fft_error)?;

        let mut spectrum_n = forward.make_output_vec();
        let mut padded = forward.make_input_vec();
        padded[..needle.len()].copy_from_slice(needle);
        forward
            .process(&mut padded, &mut spectrum_n)
            .map_err(fft_error)?;

        // Multiplying by the conjugate turns convolution into correlation
        for (h, n) in spectrum_h.iter_mut().zip(&spectrum_n) {
            *h *= n.conj();
        }
        zero_edge_imaginary(&mut spectrum_h, len);

        let mut output = inverse.make_output_vec();
        inverse
            .process(&mut spectrum_h, &mut output)
            .map_err(fft_error)?;

        #[allow(clippy::cast_precision_loss)]
        let scale = 1.0 / len as f64;
        let valid = haystack.len() - needle.len() + 1;
        output.truncate(valid);
        output.iter_mut().for_each(|v| *v *= scale);
        Ok(output)
    }
}

/// Index and value of the first maximum, ignoring NaN.
pub fn argmax(values: &[f64]) -> Option<(usize, f64)> {
    values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best, (i, v)| match best {
            Some((_, current)) if v <= current => best,
            _ => Some((i, v)),
        })
}

/// Smallest 5-smooth number (`2^a * 3^b * 5^c`) that is at least `n`.
///
/// Transform lengths with only small prime factors keep the FFT fast while
/// padding much less than rounding up to a power of two.
pub fn fast_len(n: usize) -> usize {
    if n <= 6 {
        return n.max(1);
    }

    let mut best = n.next_power_of_two();
    let mut p5 = 1usize;
    while p5 < best {
        let mut p35 = p5;
        while p35 < best {
            // Smallest power of two that lifts p35 to at least n
            let quotient = n.div_ceil(p35);
            let candidate = p35 * quotient.next_power_of_two();
            if candidate < best {
                best = candidate;
            }
            p35 *= 3;
        }
        p5 *= 5;
    }
    best
}

/// The DC bin (and the Nyquist bin for even lengths) of a real signal's
/// spectrum must be purely real for the inverse transform.
fn zero_edge_imaginary(spectrum: &mut [Complex<f64>], len: usize) {
    if let Some(first) = spectrum.first_mut() {
        first.im = 0.0;
    }
    if len % 2 == 0 {
        if let Some(last) = spectrum.last_mut() {
            last.im = 0.0;
        }
    }
}

fn fft_error(e: realfft::FftError) -> Error {
    Error::Fft {
        reason: e.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    /// Literal double loop, only used to check the FFT path.
    fn direct_valid(haystack: &[f64], needle: &[f64]) -> Vec<f64> {
        (0..=haystack.len() - needle.len())
            .map(|k| needle.iter().enumerate().map(|(j, n)| haystack[k + j] * n).sum())
            .collect()
    }

    #[test]
    fn test_correlate_matches_direct_computation() {
        #[allow(clippy::cast_precision_loss)]
        let haystack: Vec<f64> = (-10..10).map(|i| f64::from(i) * 0.5).collect();
        let needle = [1.0, 2.0, 3.0];

        let fft = Correlator::new().correlate_valid(&haystack, &needle).unwrap();
        let direct = direct_valid(&haystack, &needle);

        assert_eq!(fft.len(), 18);
        for (a, b) in fft.iter().zip(&direct) {
            assert!((a - b).abs() < 1e-9, "{a} vs {b}");
        }
    }

    #[test]
    fn test_correlate_odd_lengths() {
        let haystack: Vec<f64> = (0..37).map(|i| f64::from(i % 7) - 3.0).collect();
        let needle: Vec<f64> = (0..11).map(|i| f64::from(i % 3) - 1.0).collect();

        let fft = Correlator::new().correlate_valid(&haystack, &needle).unwrap();
        let direct = direct_valid(&haystack, &needle);

        assert_eq!(fft.len(), direct.len());
        for (a, b) in fft.iter().zip(&direct) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_correlate_equal_lengths_gives_single_value() {
        let a = [1.0, -1.0, 2.0];
        let out = Correlator::new().correlate_valid(&a, &a).unwrap();
        assert_eq!(out.len(), 1);
        assert!((out[0] - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlate_rejects_empty_input() {
        let result = Correlator::new().correlate_valid(&[1.0, 2.0], &[]);
        assert!(matches!(result, Err(Error::EmptySignal)));
    }

    #[test]
    fn test_correlate_rejects_oversized_needle() {
        let result = Correlator::new().correlate_valid(&[1.0], &[1.0, 2.0]);
        assert!(matches!(result, Err(Error::Fft { .. })));
    }

    #[test]
    fn test_argmax_first_maximum_wins() {
        assert_eq!(argmax(&[1.0, 3.0, 2.0, 3.0]), Some((1, 3.0)));
    }

    #[test]
    fn test_argmax_skips_nan() {
        assert_eq!(argmax(&[f64::NAN, -1.0, -2.0]), Some((1, -1.0)));
        assert_eq!(argmax(&[]), None);
        assert_eq!(argmax(&[f64::NAN]), None);
    }

    #[test]
    fn test_fast_len() {
        assert_eq!(fast_len(1), 1);
        assert_eq!(fast_len(7), 8);
        assert_eq!(fast_len(11), 12);
        assert_eq!(fast_len(97), 100);
        assert_eq!(fast_len(1000), 1000);
        assert_eq!(fast_len(1025), 1080);
    }

    #[test]
    fn test_fast_len_is_five_smooth_and_not_smaller() {
        for n in 1..2000 {
            let mut m = fast_len(n);
            assert!(m >= n);
            for p in [2, 3, 5] {
                while m % p == 0 {
                    m /= p;
                }
            }
            assert_eq!(m, 1, "fast_len({n}) has a large prime factor");
        }
    }
}
