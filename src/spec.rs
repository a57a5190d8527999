//! Physical low-pass requirements and their normalised form.
//!
//! [`FilterSpec`] holds the requirements in Hz and dB exactly as a user states
//! them.  [`FilterSpec::normalize`] maps them onto the `[0, 1]` frequency axis
//! used by every designer (1 = Nyquist = `sample_rate_hz / 2`) and converts
//! the dB targets to linear amplitudes:
//!
//! ```text
//! omega_pass     = passband_edge_hz / nyquist
//! omega_stop     = stopband_edge_hz / nyquist
//! pass_tolerance = 10^(-ripple_db / 20)
//! stop_tolerance = 10^(-attenuation_db / 20)
//! ```
use crate::error::{FirError, FirResult};

/// Validated low-pass specification.
///
/// Fields are private so the invariant
/// `0 < passband_edge_hz < stopband_edge_hz < sample_rate_hz / 2`
/// cannot be broken after construction.
///
/// ```
/// use firlab::FilterSpec;
///
/// let spec = FilterSpec::new(5000.0, 1000.0, 1500.0, 1.0, 30.0).unwrap();
/// let norm = spec.normalize();
/// assert!((norm.omega_pass - 0.4).abs() < 1e-12);
/// assert!((norm.omega_stop - 0.6).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    sample_rate_hz: f64,
    passband_edge_hz: f64,
    stopband_edge_hz: f64,
    passband_ripple_db: f64,
    stopband_attenuation_db: f64,
}

impl FilterSpec {
    /// Build a specification, rejecting anything that violates the band
    /// ordering or has a non-positive rate or dB target.
    pub fn new(
        sample_rate_hz: f64,
        passband_edge_hz: f64,
        stopband_edge_hz: f64,
        passband_ripple_db: f64,
        stopband_attenuation_db: f64,
    ) -> FirResult<Self> {
        let fields = [
            ("sample rate", sample_rate_hz),
            ("passband edge", passband_edge_hz),
            ("stopband edge", stopband_edge_hz),
            ("passband ripple", passband_ripple_db),
            ("stopband attenuation", stopband_attenuation_db),
        ];
        for (name, v) in fields {
            if !v.is_finite() {
                return Err(FirError::InvalidSpec(format!("{name} is not finite ({v})")));
            }
        }
        if sample_rate_hz <= 0.0 {
            return Err(FirError::InvalidSpec(format!(
                "sample rate must be positive, got {sample_rate_hz} Hz"
            )));
        }
        let nyquist = sample_rate_hz / 2.0;
        if passband_edge_hz <= 0.0 || passband_edge_hz >= nyquist {
            return Err(FirError::InvalidSpec(format!(
                "passband edge {passband_edge_hz} Hz outside (0, {nyquist}) Hz"
            )));
        }
        if stopband_edge_hz <= 0.0 || stopband_edge_hz >= nyquist {
            return Err(FirError::InvalidSpec(format!(
                "stopband edge {stopband_edge_hz} Hz outside (0, {nyquist}) Hz"
            )));
        }
        if stopband_edge_hz <= passband_edge_hz {
            return Err(FirError::InvalidSpec(format!(
                "stopband edge {stopband_edge_hz} Hz must exceed passband edge {passband_edge_hz} Hz"
            )));
        }
        if passband_ripple_db <= 0.0 {
            return Err(FirError::InvalidSpec(format!(
                "passband ripple must be positive, got {passband_ripple_db} dB"
            )));
        }
        if stopband_attenuation_db <= 0.0 {
            return Err(FirError::InvalidSpec(format!(
                "stopband attenuation must be positive, got {stopband_attenuation_db} dB"
            )));
        }

        Ok(Self {
            sample_rate_hz,
            passband_edge_hz,
            stopband_edge_hz,
            passband_ripple_db,
            stopband_attenuation_db,
        })
    }

    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    pub fn passband_edge_hz(&self) -> f64 {
        self.passband_edge_hz
    }

    pub fn stopband_edge_hz(&self) -> f64 {
        self.stopband_edge_hz
    }

    pub fn passband_ripple_db(&self) -> f64 {
        self.passband_ripple_db
    }

    pub fn stopband_attenuation_db(&self) -> f64 {
        self.stopband_attenuation_db
    }

    /// Half the sampling rate.
    pub fn nyquist_hz(&self) -> f64 {
        self.sample_rate_hz / 2.0
    }

    /// Normalised view of this specification.
    pub fn normalize(&self) -> NormalizedSpec {
        let nyq = self.nyquist_hz();
        NormalizedSpec {
            omega_pass: self.passband_edge_hz / nyq,
            omega_stop: self.stopband_edge_hz / nyq,
            pass_tolerance: db_to_amplitude(-self.passband_ripple_db),
            stop_tolerance: db_to_amplitude(-self.stopband_attenuation_db),
        }
    }
}

/// [`FilterSpec`] on the normalised frequency axis (1 = Nyquist).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedSpec {
    /// Passband edge in `(0, 1)`.
    pub omega_pass: f64,
    /// Stopband edge in `(omega_pass, 1)`.
    pub omega_stop: f64,
    /// Minimum passband amplitude, `10^(-ripple_db / 20)`.
    pub pass_tolerance: f64,
    /// Maximum stopband amplitude, `10^(-attenuation_db / 20)`.
    pub stop_tolerance: f64,
}

impl NormalizedSpec {
    /// Width of the transition band, `omega_stop - omega_pass`.
    pub fn transition_width(&self) -> f64 {
        self.omega_stop - self.omega_pass
    }

    /// Centre of the transition band, used as the windowed-sinc cutoff.
    pub fn cutoff(&self) -> f64 {
        0.5 * (self.omega_pass + self.omega_stop)
    }
}

/// `10^(db / 20)`.
pub fn db_to_amplitude(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn reference_spec_normalises() {
        let n = FilterSpec::new(5000.0, 1000.0, 1500.0, 1.0, 30.0).unwrap().normalize();
        assert_abs_diff_eq!(n.omega_pass, 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(n.omega_stop, 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(n.pass_tolerance, 0.891_250_938_133_745_6, epsilon = 1e-12);
        assert_abs_diff_eq!(n.stop_tolerance, 0.031_622_776_601_683_79, epsilon = 1e-12);
        assert_abs_diff_eq!(n.transition_width(), 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(n.cutoff(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn normalised_edges_are_ordered() {
        for (fs, fp, fst) in [(48_000.0, 100.0, 200.0), (8000.0, 3000.0, 3999.0), (2.0, 0.1, 0.9)] {
            let n = FilterSpec::new(fs, fp, fst, 0.5, 60.0).unwrap().normalize();
            assert!(0.0 < n.omega_pass && n.omega_pass < n.omega_stop && n.omega_stop < 1.0);
        }
    }

    #[test]
    fn rejects_swapped_edges() {
        let err = FilterSpec::new(5000.0, 1500.0, 1000.0, 1.0, 30.0).unwrap_err();
        assert!(matches!(err, FirError::InvalidSpec(_)));
        assert!(FilterSpec::new(5000.0, 1000.0, 1000.0, 1.0, 30.0).is_err());
    }

    #[test]
    fn rejects_edges_outside_nyquist() {
        assert!(FilterSpec::new(5000.0, 0.0, 1500.0, 1.0, 30.0).is_err());
        assert!(FilterSpec::new(5000.0, 1000.0, 2500.0, 1.0, 30.0).is_err());
        assert!(FilterSpec::new(5000.0, -10.0, 1500.0, 1.0, 30.0).is_err());
    }

    #[test]
    fn rejects_bad_rate_and_targets() {
        assert!(FilterSpec::new(0.0, 1000.0, 1500.0, 1.0, 30.0).is_err());
        assert!(FilterSpec::new(5000.0, 1000.0, 1500.0, 0.0, 30.0).is_err());
        assert!(FilterSpec::new(5000.0, 1000.0, 1500.0, 1.0, -3.0).is_err());
        assert!(FilterSpec::new(f64::NAN, 1000.0, 1500.0, 1.0, 30.0).is_err());
    }
}
