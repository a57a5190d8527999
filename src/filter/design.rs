//! Windowed-sinc FIR design matching `scipy.signal.firwin` (low-pass,
//! `scale=True`).
//!
//! For `n` taps and normalised cutoff `fc` (1 = Nyquist):
//!   • ideal response  h[i] = sin(π·fc·x) / (π·x),  x = i - (n-1)/2
//!   • windowed        h[i] *= w[i]
//!   • normalised      Σ h = 1  (unit DC gain)
use std::f64::consts::PI;

use crate::error::{FirError, FirResult};
use crate::filter::window::Window;
use crate::spec::FilterSpec;

/// Reject lengths that cannot give a symmetric, odd-length (type I) filter.
pub(crate) fn check_odd_length(n: usize) -> FirResult<()> {
    if n < 3 || n % 2 == 0 {
        return Err(FirError::InvalidLength(n));
    }
    Ok(())
}

/// Design a low-pass FIR filter with a windowed sinc.
///
/// `cutoff` is the -6 dB point on the normalised axis (1 = Nyquist).
///
/// ```
/// use firlab::filter::{firwin, Window};
///
/// let h = firwin(47, 0.5, Window::Hann).unwrap();
/// assert_eq!(h.len(), 47);
/// assert!((h.iter().sum::<f64>() - 1.0).abs() < 1e-9);
/// ```
pub fn firwin(n: usize, cutoff: f64, window: Window) -> FirResult<Vec<f64>> {
    check_odd_length(n)?;
    if !(cutoff > 0.0 && cutoff < 1.0) {
        return Err(FirError::InvalidCutoff(cutoff));
    }

    let alpha = (n - 1) as f64 / 2.0;
    let win = window.coefficients(n);

    let mut h: Vec<f64> = (0..n)
        .map(|i| {
            let x = i as f64 - alpha;
            // f(x) = sin(π·fc·x) / (π·x);  lim_{x→0} f(x) = fc  (L'Hôpital)
            let sinc = if x == 0.0 { cutoff } else { (PI * cutoff * x).sin() / (PI * x) };
            sinc * win[i]
        })
        .collect();

    // Normalise so sum = 1 (unit DC gain for lowpass).
    let s: f64 = h.iter().sum();
    h.iter_mut().for_each(|v| *v /= s);

    Ok(h)
}

/// Hann-windowed low-pass of length `n` with its cutoff in the middle of the
/// transition band of `spec`.
pub fn design_hann_lowpass(spec: &FilterSpec, n: usize) -> FirResult<Vec<f64>> {
    firwin(n, spec.normalize().cutoff(), Window::Hann)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn dc_gain_unity_for_all_odd_lengths() {
        for n in (3..=101).step_by(2) {
            for win in [Window::Hann, Window::Kaiser { beta: 2.1 }] {
                let h = firwin(n, 0.5, win).unwrap();
                let dc: f64 = h.iter().sum();
                assert_abs_diff_eq!(dc, 1.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn lowpass_is_symmetric() {
        let h = firwin(47, 0.3, Window::Hann).unwrap();
        let n = h.len();
        for i in 0..n / 2 {
            assert_abs_diff_eq!(h[i], h[n - 1 - i], epsilon = 1e-15);
        }
    }

    #[test]
    fn hann_zeroes_the_end_taps() {
        let h = firwin(21, 0.5, Window::Hann).unwrap();
        assert_abs_diff_eq!(h[0], 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(h[20], 0.0, epsilon = 1e-15);
    }

    #[test]
    fn rejects_even_and_short_lengths() {
        assert_eq!(firwin(48, 0.5, Window::Hann), Err(FirError::InvalidLength(48)));
        assert_eq!(firwin(1, 0.5, Window::Hann), Err(FirError::InvalidLength(1)));
        assert_eq!(firwin(0, 0.5, Window::Hann), Err(FirError::InvalidLength(0)));
    }

    #[test]
    fn rejects_cutoff_outside_unit_interval() {
        assert!(matches!(firwin(11, 0.0, Window::Hann), Err(FirError::InvalidCutoff(_))));
        assert!(matches!(firwin(11, 1.0, Window::Hann), Err(FirError::InvalidCutoff(_))));
        assert!(matches!(firwin(11, f64::NAN, Window::Hann), Err(FirError::InvalidCutoff(_))));
    }
}
