//! Frequency-sampling FIR design matching `scipy.signal.firwin2`.
//!
//! Algorithm:
//!   1. Interpolate the desired gain linearly onto `nfreqs` points spanning
//!      `[0, Nyquist]` (`nfreqs = 1 + 2^ceil(log2(numtaps))` by default).
//!   2. Apply the linear phase `exp(-jπ f (numtaps-1)/2)` so the impulse
//!      response is centred on tap `(numtaps-1)/2`.
//!   3. Inverse real FFT of size `2 (nfreqs - 1)`.
//!   4. Keep the first `numtaps` samples and taper them with the window.
use rustfft::{num_complex::Complex, FftPlanner};
use std::f64::consts::PI;

use crate::error::{FirError, FirResult};
use crate::filter::design::check_odd_length;
use crate::filter::window::Window;
use crate::spec::FilterSpec;

/// Relative slack when matching the last breakpoint against Nyquist.
const NYQUIST_EPS: f64 = 1e-9;

/// Design a filter from gain breakpoints using the default grid.
///
/// `breakpoints_hz` must increase strictly from 0 to `sample_rate_hz / 2`;
/// `gains` gives the desired gain at each breakpoint.
///
/// ```
/// use firlab::filter::{firwin2, Window};
///
/// let h = firwin2(47, &[0.0, 1000.0, 1500.0, 2500.0], &[1.0, 1.0, 0.0, 0.0], 5000.0, Window::Hamming)
///     .unwrap();
/// assert_eq!(h.len(), 47);
/// ```
pub fn firwin2(
    numtaps: usize,
    breakpoints_hz: &[f64],
    gains: &[f64],
    sample_rate_hz: f64,
    window: Window,
) -> FirResult<Vec<f64>> {
    check_odd_length(numtaps)?;
    let nfreqs = 1 + numtaps.next_power_of_two();
    firwin2_with_grid(numtaps, breakpoints_hz, gains, sample_rate_hz, nfreqs, window)
}

/// As [`firwin2`], with an explicit number of grid points over `[0, Nyquist]`.
///
/// `nfreqs` must exceed `numtaps / 2` so the inverse transform is at least
/// as long as the filter.
pub fn firwin2_with_grid(
    numtaps: usize,
    breakpoints_hz: &[f64],
    gains: &[f64],
    sample_rate_hz: f64,
    nfreqs: usize,
    window: Window,
) -> FirResult<Vec<f64>> {
    check_odd_length(numtaps)?;
    if !(sample_rate_hz > 0.0 && sample_rate_hz.is_finite()) {
        return Err(FirError::InvalidSpec(format!(
            "sample rate must be positive, got {sample_rate_hz} Hz"
        )));
    }
    let freq = normalise_breakpoints(breakpoints_hz, gains, sample_rate_hz / 2.0)?;
    if nfreqs <= numtaps / 2 + 1 {
        return Err(FirError::InvalidBreakpoints(format!(
            "grid of {nfreqs} points is too coarse for {numtaps} taps"
        )));
    }

    // --- 1–2. Desired response with linear phase -------------------------
    let n_fft = 2 * (nfreqs - 1);
    let centre = (numtaps - 1) as f64 / 2.0;
    let mut spectrum = vec![Complex::<f64>::default(); n_fft];
    for (k, bin) in spectrum.iter_mut().take(nfreqs).enumerate() {
        let f = k as f64 / (nfreqs - 1) as f64;
        let g = interp(f, &freq, gains);
        *bin = Complex::from_polar(g, -PI * f * centre);
    }
    // irfft ignores the imaginary part of DC and Nyquist.
    spectrum[0].im = 0.0;
    spectrum[nfreqs - 1].im = 0.0;
    // Hermitian symmetry for the negative frequencies.
    for k in 1..nfreqs - 1 {
        spectrum[n_fft - k] = spectrum[k].conj();
    }

    // --- 3. Inverse FFT ---------------------------------------------------
    let mut planner: FftPlanner<f64> = FftPlanner::new();
    planner.plan_fft_inverse(n_fft).process(&mut spectrum);
    let inv_scale = 1.0 / n_fft as f64;

    // --- 4. Truncate, taper, symmetrise ------------------------------------
    let win = window.coefficients(numtaps);
    let mut h: Vec<f64> = spectrum[..numtaps]
        .iter()
        .zip(&win)
        .map(|(c, &w)| c.re * inv_scale * w)
        .collect();
    for i in 0..numtaps / 2 {
        let m = 0.5 * (h[i] + h[numtaps - 1 - i]);
        h[i] = m;
        h[numtaps - 1 - i] = m;
    }

    Ok(h)
}

/// Frequency-sampling low-pass for `spec`: gain 1 up to the passband edge,
/// a linear ramp across the transition band, 0 from the stopband edge on.
pub fn design_freq_sampling_lowpass(
    spec: &FilterSpec,
    numtaps: usize,
    window: Window,
) -> FirResult<Vec<f64>> {
    firwin2(
        numtaps,
        &[0.0, spec.passband_edge_hz(), spec.stopband_edge_hz(), spec.nyquist_hz()],
        &[1.0, 1.0, 0.0, 0.0],
        spec.sample_rate_hz(),
        window,
    )
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Validate breakpoints and map them to `[0, 1]` (1 = Nyquist).
fn normalise_breakpoints(freq_hz: &[f64], gains: &[f64], nyquist: f64) -> FirResult<Vec<f64>> {
    let bad = |msg: String| Err(FirError::InvalidBreakpoints(msg));

    if freq_hz.len() < 2 {
        return bad(format!("need at least 2 breakpoints, got {}", freq_hz.len()));
    }
    if gains.len() != freq_hz.len() {
        return bad(format!("{} breakpoints but {} gains", freq_hz.len(), gains.len()));
    }
    if let Some(v) = freq_hz.iter().chain(gains).find(|v| !v.is_finite()) {
        return bad(format!("non-finite value {v}"));
    }
    if freq_hz[0] != 0.0 {
        return bad(format!("first breakpoint must be 0 Hz, got {}", freq_hz[0]));
    }
    let last = freq_hz[freq_hz.len() - 1];
    if (last - nyquist).abs() > NYQUIST_EPS * nyquist {
        return bad(format!("last breakpoint must be Nyquist ({nyquist} Hz), got {last}"));
    }
    for pair in freq_hz.windows(2) {
        if pair[1] <= pair[0] {
            return bad(format!("breakpoints must increase strictly: {} then {}", pair[0], pair[1]));
        }
    }

    let mut freq: Vec<f64> = freq_hz.iter().map(|f| f / nyquist).collect();
    // Pin the last point so the grid's final sample interpolates exactly.
    if let Some(last) = freq.last_mut() {
        *last = 1.0;
    }
    Ok(freq)
}

/// Piecewise-linear interpolation of `(xp, fp)` at `x` (`xp` ascending).
fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    if x <= xp[0] {
        return fp[0];
    }
    for i in 1..xp.len() {
        if x <= xp[i] {
            let t = (x - xp[i - 1]) / (xp[i] - xp[i - 1]);
            return fp[i - 1] + t * (fp[i] - fp[i - 1]);
        }
    }
    fp[fp.len() - 1]
}
