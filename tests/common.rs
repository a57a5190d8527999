/// Shared helpers for design tests.
use firlab::{freqz, FilterSpec, FrequencyResponse};

pub const FS: f64 = 5000.0;
pub const F_PASS: f64 = 1000.0;
pub const F_STOP: f64 = 1500.0;

/// 5 kHz sampling, 1 kHz / 1.5 kHz edges, 1 dB ripple, 30 dB attenuation.
#[allow(unused)]
pub fn reference_spec() -> FilterSpec {
    FilterSpec::new(FS, F_PASS, F_STOP, 1.0, 30.0).unwrap()
}

#[allow(unused)]
pub fn response(taps: &[f64]) -> FrequencyResponse {
    freqz(taps, FS, 2048).unwrap()
}

/// (min, max) magnitude in dB over `[0, F_PASS]`.
#[allow(unused)]
pub fn passband_range(r: &FrequencyResponse) -> (f64, f64) {
    (r.min_db_between(0.0, F_PASS).unwrap(), r.max_db_between(0.0, F_PASS).unwrap())
}

/// Peak magnitude in dB at or above `from_hz`.
#[allow(unused)]
pub fn stopband_peak(r: &FrequencyResponse, from_hz: f64) -> f64 {
    r.max_db_between(from_hz, f64::INFINITY).unwrap()
}

#[allow(unused)]
pub fn assert_symmetric(h: &[f64], tol: f64) {
    let n = h.len();
    for i in 0..n / 2 {
        let diff = (h[i] - h[n - 1 - i]).abs();
        assert!(diff <= tol, "h[{i}]={} ≠ h[{}]={}", h[i], n - 1 - i, h[n - 1 - i]);
    }
}

/// Direct DTFT magnitude `|Σ h[n] e^{-jωn}|` at `f_hz`.
#[allow(unused)]
pub fn dtft_magnitude(h: &[f64], f_hz: f64, fs: f64) -> f64 {
    let w = 2.0 * std::f64::consts::PI * f_hz / fs;
    let (re, im) = h.iter().enumerate().fold((0.0, 0.0), |(re, im), (n, &v)| {
        let a = w * n as f64;
        (re + v * a.cos(), im - v * a.sin())
    });
    re.hypot(im)
}
