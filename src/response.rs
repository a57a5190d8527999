//! Magnitude response of an FIR filter (`scipy.signal.freqz`, `whole=False`).
//!
//! The transfer function `H(e^{jω}) = Σ h[n] e^{-jωn}` is sampled at
//! `n_points` frequencies `f_k = k · fs / (2 · n_points)`, i.e. uniformly over
//! `[0, fs/2)`.  Those are exactly the first `n_points` bins of a
//! `2 · n_points`-point DFT, so one zero-padded FFT evaluates the whole grid.
//! Taps beyond the FFT size are folded back modulo its length, which leaves
//! the DFT samples unchanged.
use rustfft::{num_complex::Complex, FftPlanner};
use serde::Serialize;

use crate::error::{FirError, FirResult};
use crate::spec::FilterSpec;

/// Default number of evaluation frequencies.
pub const DEFAULT_POINTS: usize = 2048;

/// Magnitudes are clamped to this floor before taking the logarithm.
pub const MAGNITUDE_FLOOR: f64 = 1e-12;

/// Sampled magnitude response, frequency ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyResponse {
    /// Evaluation frequencies in Hz.
    pub frequencies_hz: Vec<f64>,
    /// `20 log10 |H|` at each frequency.
    pub magnitude_db: Vec<f64>,
}

impl FrequencyResponse {
    pub fn len(&self) -> usize {
        self.frequencies_hz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies_hz.is_empty()
    }

    /// `(frequency_hz, magnitude_db)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies_hz.iter().copied().zip(self.magnitude_db.iter().copied())
    }

    /// Largest magnitude (dB) with `lo_hz ≤ f ≤ hi_hz`, `None` if no grid point falls inside.
    pub fn max_db_between(&self, lo_hz: f64, hi_hz: f64) -> Option<f64> {
        self.iter()
            .filter(|&(f, _)| f >= lo_hz && f <= hi_hz)
            .map(|(_, db)| db)
            .reduce(f64::max)
    }

    /// Smallest magnitude (dB) with `lo_hz ≤ f ≤ hi_hz`, `None` if no grid point falls inside.
    pub fn min_db_between(&self, lo_hz: f64, hi_hz: f64) -> Option<f64> {
        self.iter()
            .filter(|&(f, _)| f >= lo_hz && f <= hi_hz)
            .map(|(_, db)| db)
            .reduce(f64::min)
    }
}

/// `20 log10(max(magnitude, MAGNITUDE_FLOOR))`.
pub fn magnitude_to_db(magnitude: f64) -> f64 {
    20.0 * magnitude.max(MAGNITUDE_FLOOR).log10()
}

/// Evaluate the magnitude response of `taps` on `n_points` frequencies.
///
/// ```
/// use firlab::response::freqz;
///
/// let r = freqz(&[1.0], 5000.0, 2048).unwrap();
/// assert!(r.magnitude_db.iter().all(|db| db.abs() < 1e-12));
/// ```
pub fn freqz(taps: &[f64], sample_rate_hz: f64, n_points: usize) -> FirResult<FrequencyResponse> {
    if n_points < 2 {
        return Err(FirError::InvalidGridSize(n_points));
    }
    if !(sample_rate_hz > 0.0 && sample_rate_hz.is_finite()) {
        return Err(FirError::InvalidSpec(format!(
            "sample rate must be positive, got {sample_rate_hz} Hz"
        )));
    }

    let n_fft = 2 * n_points;
    let mut buf = vec![Complex::<f64>::default(); n_fft];
    for (i, &h) in taps.iter().enumerate() {
        buf[i % n_fft].re += h;
    }

    let mut planner: FftPlanner<f64> = FftPlanner::new();
    planner.plan_fft_forward(n_fft).process(&mut buf);

    let step = sample_rate_hz / n_fft as f64;
    Ok(FrequencyResponse {
        frequencies_hz: (0..n_points).map(|k| k as f64 * step).collect(),
        magnitude_db: buf[..n_points].iter().map(|c| magnitude_to_db(c.norm())).collect(),
    })
}

/// How a sampled response measures up against a [`FilterSpec`].
///
/// These are the requirement lines of the comparison plot: ±ripple over the
/// passband and -attenuation over the stopband.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Compliance {
    /// Lowest magnitude (dB) at or below the passband edge.
    pub passband_min_db: f64,
    /// Highest magnitude (dB) at or below the passband edge.
    pub passband_max_db: f64,
    /// Highest magnitude (dB) at or above the stopband edge.
    pub stopband_max_db: f64,
    pub passband_ripple_db: f64,
    pub stopband_attenuation_db: f64,
}

impl Compliance {
    /// Passband stays within `±passband_ripple_db`.
    pub fn meets_passband(&self) -> bool {
        self.passband_min_db >= -self.passband_ripple_db
            && self.passband_max_db <= self.passband_ripple_db
    }

    /// Stopband stays at or below `-stopband_attenuation_db`.
    pub fn meets_stopband(&self) -> bool {
        self.stopband_max_db <= -self.stopband_attenuation_db
    }

    pub fn meets_spec(&self) -> bool {
        self.meets_passband() && self.meets_stopband()
    }

    /// Amount (dB) by which the stopband peak exceeds the attenuation target; 0 if met.
    pub fn stopband_overshoot_db(&self) -> f64 {
        (self.stopband_max_db + self.stopband_attenuation_db).max(0.0)
    }
}

/// Measure `response` against the passband and stopband requirements of `spec`.
///
/// Bands with no grid point inside them (possible only on very coarse grids)
/// report 0 dB in the passband and -∞ dB in the stopband.
pub fn check_compliance(response: &FrequencyResponse, spec: &FilterSpec) -> Compliance {
    let pass_hi = spec.passband_edge_hz();
    let stop_lo = spec.stopband_edge_hz();
    Compliance {
        passband_min_db: response.min_db_between(0.0, pass_hi).unwrap_or(0.0),
        passband_max_db: response.max_db_between(0.0, pass_hi).unwrap_or(0.0),
        stopband_max_db: response.max_db_between(stop_lo, f64::INFINITY).unwrap_or(f64::NEG_INFINITY),
        passband_ripple_db: spec.passband_ripple_db(),
        stopband_attenuation_db: spec.stopband_attenuation_db(),
    }
}
