//! Window functions used to truncate ideal impulse responses.
//!
//! All windows are the *symmetric* variants (`scipy.signal.get_window(...,
//! fftbins=False)`), which is what linear-phase FIR design needs.
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Relative size of the last I₀ series term at which summation stops.
const BESSEL_TOLERANCE: f64 = 1e-16;

/// Window shape selector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Window {
    /// Rectangular window (no taper).
    Boxcar,
    Hann,
    Hamming,
    /// Kaiser window with shape parameter `beta ≥ 0`.
    Kaiser { beta: f64 },
}

impl Window {
    /// Coefficients of this window for `n` taps.
    pub fn coefficients(&self, n: usize) -> Vec<f64> {
        match *self {
            Window::Boxcar => vec![1.0; n],
            Window::Hann => hann(n),
            Window::Hamming => hamming(n),
            Window::Kaiser { beta } => kaiser(n, beta),
        }
    }

    /// Short lowercase name, as used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Window::Boxcar => "boxcar",
            Window::Hann => "hann",
            Window::Hamming => "hamming",
            Window::Kaiser { .. } => "kaiser",
        }
    }
}

/// Hann window of length `n`: `0.5 - 0.5 cos(2πi / (n-1))`.
pub fn hann(n: usize) -> Vec<f64> {
    cosine_window(n, 0.5, 0.5)
}

/// Hamming window of length `n`: `0.54 - 0.46 cos(2πi / (n-1))`.
pub fn hamming(n: usize) -> Vec<f64> {
    cosine_window(n, 0.54, 0.46)
}

fn cosine_window(n: usize, a0: f64, a1: f64) -> Vec<f64> {
    if n <= 1 {
        return vec![1.0; n];
    }
    (0..n)
        .map(|i| a0 - a1 * (2.0 * PI * i as f64 / (n - 1) as f64).cos())
        .collect()
}

/// Kaiser window of length `n`:
/// `I0(beta * sqrt(1 - (2i/(n-1) - 1)^2)) / I0(beta)`.
pub fn kaiser(n: usize, beta: f64) -> Vec<f64> {
    if n <= 1 {
        return vec![1.0; n];
    }
    let denom = bessel_i0(beta);
    let span = (n - 1) as f64;
    (0..n)
        .map(|i| {
            let r = 2.0 * i as f64 / span - 1.0;
            // Clamp: rounding can push 1 - r² a hair below zero at the ends.
            let arg = beta * (1.0 - r * r).max(0.0).sqrt();
            bessel_i0(arg) / denom
        })
        .collect()
}

/// Zeroth-order modified Bessel function of the first kind.
///
/// Power series `Σ ((x/2)^k / k!)²`, summed until the next term is below
/// `1e-16` of the running sum.
pub fn bessel_i0(x: f64) -> f64 {
    let half = 0.5 * x;
    let mut sum = 1.0;
    let mut term = 1.0;
    let mut k = 1.0;
    loop {
        let ratio = half / k;
        term *= ratio * ratio;
        sum += term;
        if term <= BESSEL_TOLERANCE * sum || k > 500.0 {
            return sum;
        }
        k += 1.0;
    }
}
