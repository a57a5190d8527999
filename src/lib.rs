//! # firlab: FIR low-pass design and comparison in pure Rust
//!
//! `firlab` designs a low-pass FIR filter for one specification (sample
//! rate, band edges, passband ripple, stopband attenuation) with four
//! independent methods and evaluates each design's magnitude response on a
//! common frequency grid.  Every designer mirrors its SciPy counterpart, so
//! results can be checked against `scipy.signal`.
//!
//! ## Pipeline overview
//!
//! ```text
//! FilterSpec (Hz, dB)
//!   │
//!   ├─ normalize()            ω_pass, ω_stop ∈ (0,1), linear tolerances
//!   ├─ kaiserord()            length N, β from attenuation + transition width
//!   │
//!   ├─ firwin(47, Hann)       windowed sinc, fixed length
//!   ├─ firwin(N, Kaiser β)    windowed sinc, sized from the requirements
//!   ├─ remez(N)               Parks-McClellan equiripple
//!   ├─ firwin2(N)             frequency sampling
//!   │
//!   └─ freqz(…, 2048)         |H| in dB on [0, fs/2) + compliance check
//!        │
//!        └─→ Vec<DesignReport>   (method, taps, response, compliance, …)
//! ```
//!
//! ## Quick start
//!
//! ```
//! use firlab::{compare_designs, CompareConfig};
//!
//! let cfg = CompareConfig::default();   // 5 kHz, 1 kHz / 1.5 kHz, 1 dB / 30 dB
//! let spec = cfg.filter_spec().unwrap();
//! let reports = compare_designs(&spec, &cfg).unwrap();
//!
//! for r in &reports {
//!     println!("{:>14}: M = {:3}, stopband peak {:.1} dB",
//!         r.method, r.taps.len(), r.compliance.stopband_max_db);
//! }
//! ```
//!
//! ## Running individual designers
//!
//! ```
//! use firlab::filter::{firwin, kaiserord, remez, firwin2, Window};
//! use firlab::response::freqz;
//!
//! let est = kaiserord(30.0, 0.2).unwrap();
//! let h_kaiser = firwin(est.length, 0.5, Window::Kaiser { beta: est.beta }).unwrap();
//! let pm = remez(est.length, &[0.0, 0.4, 0.6, 1.0], &[1.0, 0.0]).unwrap();
//! let h_fs = firwin2(est.length, &[0.0, 1000.0, 1500.0, 2500.0], &[1.0, 1.0, 0.0, 0.0],
//!     5000.0, Window::Hamming).unwrap();
//!
//! let resp = freqz(&pm.taps, 5000.0, 2048).unwrap();
//! assert_eq!(resp.len(), 2048);
//! # let _ = (h_kaiser, h_fs);
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod io;
pub mod response;
pub mod spec;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::fmt;

// ── Crate-root re-exports ─────────────────────────────────────────────────

pub use config::CompareConfig;
pub use error::{FirError, FirResult};
pub use filter::{
    firwin, firwin2, kaiser_beta, kaiserord, remez, remez_weighted, KaiserEstimate, RemezDesign,
    RemezOptions, Window,
};
pub use io::{read_tensors, write_designs, StWriter};
pub use response::{check_compliance, freqz, Compliance, FrequencyResponse};
pub use spec::{FilterSpec, NormalizedSpec};

/// The four design methods compared by [`compare_designs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DesignMethod {
    /// Hann-windowed sinc of fixed length.
    WindowHann,
    /// Kaiser-windowed sinc sized by [`kaiserord`].
    Kaiser,
    /// Parks-McClellan equiripple.
    Remez,
    /// Frequency sampling (`firwin2`).
    FrequencySampling,
}

impl DesignMethod {
    /// All methods, in report order.
    pub const ALL: [DesignMethod; 4] = [
        DesignMethod::WindowHann,
        DesignMethod::Kaiser,
        DesignMethod::Remez,
        DesignMethod::FrequencySampling,
    ];

    /// Stable identifier used in logs and tensor names.
    pub fn label(&self) -> &'static str {
        match self {
            DesignMethod::WindowHann => "window_hann",
            DesignMethod::Kaiser => "kaiser",
            DesignMethod::Remez => "remez",
            DesignMethod::FrequencySampling => "freq_sampling",
        }
    }
}

impl fmt::Display for DesignMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Convergence details of an equiripple design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RemezSummary {
    pub delta: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// One designed filter and its evaluated response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignReport {
    pub method: DesignMethod,
    /// Impulse response.
    pub taps: Vec<f64>,
    pub response: FrequencyResponse,
    pub compliance: Compliance,
    /// Kaiser estimate the design was sized from, if any.
    pub kaiser: Option<KaiserEstimate>,
    /// Present for [`DesignMethod::Remez`] only.
    pub remez: Option<RemezSummary>,
}

/// Run the **four-way low-pass comparison** for one specification.
///
/// # Pipeline steps
///
/// 1. Hann-windowed sinc of [`CompareConfig::window_length`] taps, cutoff at
///    the centre of the transition band.
/// 2. [`kaiserord`] on the attenuation and transition width, then a
///    Kaiser-windowed sinc of the estimated length.
/// 3. Equiripple design of the estimated length: gain 1 on `[0, ω_pass]`,
///    0 on `[ω_stop, 1]`, equal weights.
/// 4. Frequency-sampling design of the estimated length from the
///    breakpoints `[0, F_pass, F_stop, Nyquist]` with gains `[1, 1, 0, 0]`.
///
/// Each design is evaluated with [`freqz`] on [`CompareConfig::n_points`]
/// frequencies and checked with [`check_compliance`].
///
/// # Errors
///
/// Returns an error if any designer rejects its input (e.g. an even
/// `window_length`).  A Remez run that hits its iteration bound is *not* an
/// error: its best iterate is reported with `converged = false`.
pub fn compare_designs(spec: &FilterSpec, cfg: &CompareConfig) -> Result<Vec<DesignReport>> {
    let norm = spec.normalize();
    let fs = spec.sample_rate_hz();

    let est = kaiserord(spec.stopband_attenuation_db(), norm.transition_width())
        .context("estimating Kaiser parameters")?;
    info!("Kaiser estimate: M = {}, beta = {:.4}", est.length, est.beta);

    let h_hann = filter::design_hann_lowpass(spec, cfg.window_length)
        .context("Hann windowed-sinc design")?;
    let h_kaiser = firwin(est.length, norm.cutoff(), Window::Kaiser { beta: est.beta })
        .context("Kaiser windowed-sinc design")?;
    let pm = filter::design_remez_lowpass(spec, est.length, &cfg.remez_options())
        .context("equiripple design")?;
    let h_fs = filter::design_freq_sampling_lowpass(spec, est.length, cfg.freq_sampling_window)
        .context("frequency-sampling design")?;

    let remez = RemezSummary { delta: pm.delta, iterations: pm.iterations, converged: pm.converged };
    let designs = [
        (DesignMethod::WindowHann, h_hann, None, None),
        (DesignMethod::Kaiser, h_kaiser, Some(est), None),
        (DesignMethod::Remez, pm.taps, Some(est), Some(remez)),
        (DesignMethod::FrequencySampling, h_fs, Some(est), None),
    ];

    let mut reports = Vec::with_capacity(designs.len());
    for (method, taps, kaiser, remez) in designs {
        let response = freqz(&taps, fs, cfg.n_points)
            .with_context(|| format!("evaluating {method} response"))?;
        let compliance = check_compliance(&response, spec);
        info!(
            "{method}: M = {}, passband [{:.3}, {:.3}] dB, stopband peak {:.2} dB{}",
            taps.len(),
            compliance.passband_min_db,
            compliance.passband_max_db,
            compliance.stopband_max_db,
            if compliance.meets_spec() { "" } else { " (misses spec)" },
        );
        reports.push(DesignReport { method, taps, response, compliance, kaiser, remez });
    }

    Ok(reports)
}
