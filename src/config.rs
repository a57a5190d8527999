//! Comparison configuration.
//!
//! [`CompareConfig`] holds the filter requirements and every tunable of the
//! four-way comparison.  The defaults are the reference low-pass problem:
//! 5 kHz sampling, 1 kHz passband, 1.5 kHz stopband, 1 dB ripple, 30 dB
//! attenuation.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::FirResult;
use crate::filter::remez::{RemezOptions, GRID_DENSITY, MAX_ITERATIONS};
use crate::filter::window::Window;
use crate::response::DEFAULT_POINTS;
use crate::spec::FilterSpec;

/// Configuration for [`compare_designs`](crate::compare_designs).
///
/// All fields are `pub` so you can construct one with struct-update syntax:
///
/// ```
/// use firlab::CompareConfig;
///
/// let cfg = CompareConfig {
///     stopband_attenuation_db: 60.0,  // tighter stopband
///     n_points: 4096,                 // finer response grid
///     ..CompareConfig::default()
/// };
/// ```
///
/// Any subset of fields can also be read from JSON; missing fields keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Sampling rate in Hz.
    ///
    /// Default: `5000.0` Hz.
    pub sample_rate_hz: f64,

    /// Upper edge of the passband in Hz.
    ///
    /// Default: `1000.0` Hz.
    pub passband_edge_hz: f64,

    /// Lower edge of the stopband in Hz.
    ///
    /// Default: `1500.0` Hz.
    pub stopband_edge_hz: f64,

    /// Allowed passband deviation in dB.
    ///
    /// Default: `1.0` dB.
    pub passband_ripple_db: f64,

    /// Required stopband attenuation in dB.
    ///
    /// Drives the Kaiser estimate, whose length is then shared by the
    /// equiripple and frequency-sampling designs.
    ///
    /// Default: `30.0` dB.
    pub stopband_attenuation_db: f64,

    /// Length of the plain Hann windowed-sinc design, which is not tuned to
    /// the specification.
    ///
    /// Default: `47` taps.
    pub window_length: usize,

    /// Number of frequency-response points over `[0, fs/2)`.
    ///
    /// Default: `2048`.
    pub n_points: usize,

    /// Taper applied by the frequency-sampling design.
    ///
    /// Default: Hamming (the `scipy.signal.firwin2` default).
    pub freq_sampling_window: Window,

    /// Iteration bound of the Remez exchange.
    ///
    /// Default: `250`.
    pub remez_max_iterations: usize,

    /// Dense-grid density of the Remez exchange.
    ///
    /// Default: `16`.
    pub remez_grid_density: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 5000.0,
            passband_edge_hz: 1000.0,
            stopband_edge_hz: 1500.0,
            passband_ripple_db: 1.0,
            stopband_attenuation_db: 30.0,
            window_length: 47,
            n_points: DEFAULT_POINTS,
            freq_sampling_window: Window::Hamming,
            remez_max_iterations: MAX_ITERATIONS,
            remez_grid_density: GRID_DENSITY,
        }
    }
}

impl CompareConfig {
    /// Read a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Validated [`FilterSpec`] built from the requirement fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use firlab::CompareConfig;
    /// let spec = CompareConfig::default().filter_spec().unwrap();
    /// assert_eq!(spec.nyquist_hz(), 2500.0);
    /// ```
    pub fn filter_spec(&self) -> FirResult<FilterSpec> {
        FilterSpec::new(
            self.sample_rate_hz,
            self.passband_edge_hz,
            self.stopband_edge_hz,
            self.passband_ripple_db,
            self.stopband_attenuation_db,
        )
    }

    pub fn remez_options(&self) -> RemezOptions {
        RemezOptions {
            max_iterations: self.remez_max_iterations,
            grid_density: self.remez_grid_density,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_spec_is_valid() {
        let spec = CompareConfig::default().filter_spec().unwrap();
        assert_eq!(spec.passband_edge_hz(), 1000.0);
        assert_eq!(spec.stopband_edge_hz(), 1500.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: CompareConfig =
            serde_json::from_str(r#"{"stopband_attenuation_db": 60.0, "freq_sampling_window": {"type": "hann"}}"#)
                .unwrap();
        assert_eq!(cfg.stopband_attenuation_db, 60.0);
        assert_eq!(cfg.freq_sampling_window, Window::Hann);
        assert_eq!(cfg.window_length, 47);
        assert_eq!(cfg.n_points, 2048);
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"sample_rate_hz": 48000.0, "passband_edge_hz": 4000.0, "stopband_edge_hz": 6000.0}}"#)
            .unwrap();
        let cfg = CompareConfig::load(f.path()).unwrap();
        assert_eq!(cfg.sample_rate_hz, 48000.0);
        assert!(cfg.filter_spec().is_ok());
    }

    #[test]
    fn invalid_requirements_surface_as_spec_error() {
        let cfg = CompareConfig { stopband_edge_hz: 900.0, ..CompareConfig::default() };
        assert!(cfg.filter_spec().is_err());
    }
}
