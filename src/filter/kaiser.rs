//! Kaiser window parameter estimation (`scipy.signal.kaiserord`).
//!
//! Given a stopband attenuation `A` in dB and a normalised transition width
//! `Δω` (1 = Nyquist):
//!
//! ```text
//! beta = 0                                     A ≤ 21
//!      = 0.5842 (A-21)^0.4 + 0.07886 (A-21)    21 < A ≤ 50
//!      = 0.1102 (A-8.7)                        A > 50
//!
//! N    = ceil((A - 8) / (2.285 · Δω · π)) + 1,  bumped to odd
//! ```
use std::f64::consts::PI;

use serde::Serialize;

use crate::error::{FirError, FirResult};
use crate::filter::design::firwin;
use crate::filter::window::Window;
use crate::spec::FilterSpec;

/// Shortest filter the estimator hands out.
const MIN_LENGTH: usize = 3;

/// Estimates at or above this many taps are rejected.
pub const MAX_LENGTH: usize = 1 << 16;

/// Filter length and Kaiser shape parameter for a target attenuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KaiserEstimate {
    /// Number of taps (always odd).
    pub length: usize,
    /// Kaiser window shape parameter.
    pub beta: f64,
}

/// Kaiser `beta` for a stopband attenuation of `attenuation_db`.
pub fn kaiser_beta(attenuation_db: f64) -> f64 {
    if attenuation_db > 50.0 {
        0.1102 * (attenuation_db - 8.7)
    } else if attenuation_db > 21.0 {
        let a = attenuation_db - 21.0;
        0.5842 * a.powf(0.4) + 0.07886 * a
    } else {
        0.0
    }
}

/// Estimate the Kaiser window length and `beta`.
///
/// The length is forced odd so the design is a symmetric type I filter.
/// Attenuation must be finite and positive, and the estimate must stay below
/// [`MAX_LENGTH`] taps, or [`FirError::InvalidSpec`] is returned.
///
/// ```
/// use firlab::filter::kaiserord;
///
/// let est = kaiserord(30.0, 0.2).unwrap();
/// assert_eq!(est.length % 2, 1);
/// ```
pub fn kaiserord(attenuation_db: f64, transition_width: f64) -> FirResult<KaiserEstimate> {
    if !(transition_width > 0.0 && transition_width < 1.0) {
        return Err(FirError::InvalidTransitionWidth(transition_width));
    }
    if !(attenuation_db > 0.0 && attenuation_db.is_finite()) {
        return Err(FirError::InvalidSpec(format!(
            "stopband attenuation must be positive and finite, got {attenuation_db} dB"
        )));
    }

    let raw = ((attenuation_db - 8.0) / (2.285 * transition_width * PI)).ceil() + 1.0;
    if raw >= MAX_LENGTH as f64 {
        return Err(FirError::InvalidSpec(format!(
            "{attenuation_db} dB over a transition width of {transition_width} needs {raw:.0} taps, \
             limit is {MAX_LENGTH}"
        )));
    }
    let mut length = if raw > MIN_LENGTH as f64 { raw as usize } else { MIN_LENGTH };
    if length % 2 == 0 {
        length += 1;
    }

    Ok(KaiserEstimate { length, beta: kaiser_beta(attenuation_db) })
}

/// Kaiser-windowed low-pass sized from `spec`'s attenuation and transition
/// band.  Returns the taps together with the estimate that produced them.
pub fn design_kaiser_lowpass(spec: &FilterSpec) -> FirResult<(Vec<f64>, KaiserEstimate)> {
    let norm = spec.normalize();
    let est = kaiserord(spec.stopband_attenuation_db(), norm.transition_width())?;
    let h = firwin(est.length, norm.cutoff(), Window::Kaiser { beta: est.beta })?;
    Ok((h, est))
}
