mod common;
use approx::assert_abs_diff_eq;
use common::{dtft_magnitude, reference_spec, FS};
use firlab::response::{magnitude_to_db, DEFAULT_POINTS};
use firlab::{check_compliance, firwin, freqz, FirError, FrequencyResponse, Window};

#[test]
fn unit_impulse_is_flat_zero_db() {
    let r = freqz(&[1.0], FS, DEFAULT_POINTS).unwrap();
    assert_eq!(r.len(), 2048);
    assert_eq!(r.frequencies_hz[0], 0.0);
    assert!(r.frequencies_hz.last().copied().unwrap() < FS / 2.0);
    for db in &r.magnitude_db {
        assert_abs_diff_eq!(*db, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn delay_does_not_change_magnitude() {
    let r = freqz(&[0.0, 0.0, 0.0, 1.0], FS, 256).unwrap();
    for db in &r.magnitude_db {
        assert_abs_diff_eq!(*db, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn matches_direct_dtft() {
    let h = firwin(47, 0.37, Window::Hamming).unwrap();
    let r = freqz(&h, FS, 512).unwrap();
    for (f, db) in r.iter().step_by(7) {
        let expected = magnitude_to_db(dtft_magnitude(&h, f, FS));
        assert_abs_diff_eq!(db, expected, epsilon = 1e-6);
    }
}

#[test]
fn taps_longer_than_fft_fold_correctly() {
    // 2 * n_points = 16 < 47 taps.
    let h = firwin(47, 0.25, Window::Hann).unwrap();
    let r = freqz(&h, FS, 8).unwrap();
    for (f, db) in r.iter() {
        let expected = 20.0 * dtft_magnitude(&h, f, FS).max(1e-12).log10();
        assert_abs_diff_eq!(db, expected, epsilon = 1e-6);
    }
}

#[test]
fn floor_applies_to_exact_zeros() {
    assert_abs_diff_eq!(magnitude_to_db(0.0), -240.0, epsilon = 1e-9);
    assert_abs_diff_eq!(magnitude_to_db(1.0), 0.0);
    assert_abs_diff_eq!(magnitude_to_db(0.1), -20.0, epsilon = 1e-12);
}

#[test]
fn invalid_grid_and_rate_rejected() {
    assert_eq!(freqz(&[1.0], FS, 1), Err(FirError::InvalidGridSize(1)));
    assert!(matches!(freqz(&[1.0], 0.0, 16), Err(FirError::InvalidSpec(_))));
    assert!(matches!(freqz(&[1.0], f64::NAN, 16), Err(FirError::InvalidSpec(_))));
}

#[test]
fn compliance_reads_band_extremes() {
    let spec = reference_spec();
    let r = FrequencyResponse {
        frequencies_hz: vec![0.0, 500.0, 1000.0, 1250.0, 1500.0, 2000.0],
        magnitude_db: vec![0.2, -0.4, -0.9, -10.0, -31.0, -35.0],
    };
    let c = check_compliance(&r, &spec);
    assert_eq!(c.passband_min_db, -0.9);
    assert_eq!(c.passband_max_db, 0.2);
    assert_eq!(c.stopband_max_db, -31.0);
    assert!(c.meets_spec());
    assert_eq!(c.stopband_overshoot_db(), 0.0);

    let r = FrequencyResponse {
        magnitude_db: vec![0.2, -0.4, -1.5, -10.0, -28.0, -35.0],
        ..r
    };
    let c = check_compliance(&r, &spec);
    assert!(!c.meets_passband());
    assert!(!c.meets_stopband());
    assert_abs_diff_eq!(c.stopband_overshoot_db(), 2.0, epsilon = 1e-12);
}
