//! Error taxonomy of the design core.
//!
//! Every designer validates its inputs up front and returns the matching
//! variant; nothing is retried or silently corrected.  The one exception is
//! [`FirError::NonConvergence`]: the Remez designer reports it as a flag on
//! its result and keeps the best iterate (see
//! [`RemezDesign::check_convergence`](crate::filter::remez::RemezDesign::check_convergence)).
use thiserror::Error;

/// Result type for the design and evaluation functions.
pub type FirResult<T> = Result<T, FirError>;

/// Errors raised by filter design and response evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FirError {
    /// Malformed physical specification (band edges, sample rate, dB targets).
    #[error("invalid filter specification: {0}")]
    InvalidSpec(String),

    /// Filter length is even or shorter than 3 taps.
    #[error("invalid filter length {0}: must be odd and at least 3")]
    InvalidLength(usize),

    /// Normalised cutoff outside the open interval (0, 1).
    #[error("invalid cutoff {0}: must lie in (0, 1)")]
    InvalidCutoff(f64),

    /// Normalised transition width outside the open interval (0, 1).
    #[error("invalid transition width {0}: must lie in (0, 1)")]
    InvalidTransitionWidth(f64),

    /// Band edges, gains or weights for the equiripple designer are inconsistent.
    #[error("invalid band specification: {0}")]
    InvalidBandSpec(String),

    /// Breakpoints for the frequency-sampling designer are inconsistent.
    #[error("invalid breakpoints: {0}")]
    InvalidBreakpoints(String),

    /// Fewer than two evaluation points requested.
    #[error("invalid grid size {0}: need at least 2 points")]
    InvalidGridSize(usize),

    /// Remez exchange hit its iteration bound without the extremal set settling.
    #[error("Remez exchange did not converge after {iterations} iterations (max |E| = {max_error:.3e})")]
    NonConvergence { iterations: usize, max_error: f64 },
}

impl FirError {
    /// True for conditions where a usable (if sub-optimal) result exists.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FirError::NonConvergence { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_non_convergence_is_recoverable() {
        let nc = FirError::NonConvergence { iterations: 250, max_error: 1e-3 };
        assert!(nc.is_recoverable());
        assert!(!FirError::InvalidLength(4).is_recoverable());
        assert!(!FirError::InvalidGridSize(1).is_recoverable());
    }

    #[test]
    fn messages_name_the_offending_value() {
        let msg = FirError::InvalidLength(48).to_string();
        assert!(msg.contains("48"), "{msg}");
        let msg = FirError::InvalidTransitionWidth(-0.1).to_string();
        assert!(msg.contains("-0.1"), "{msg}");
    }
}
