/// firdesign: design one low-pass filter four ways and report how each
/// meets the requirements.
///
/// Output keys (with `--output`):
///   freq_hz          [N]      f64  evaluation grid over [0, fs/2)
///   mag_db           [D, N]   f64  magnitude of each design
///   taps_<method>    [M]      f64  impulse responses
///   n_taps           [D]      i32
///   kaiser_beta      [1]      f64
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use firlab::{compare_designs, io::write_designs, CompareConfig, DesignMethod};

#[derive(Parser, Debug)]
#[command(name = "firdesign", about = "Compare FIR low-pass design methods")]
struct Args {
    /// JSON configuration; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sampling rate (Hz).
    #[arg(long)]
    fs: Option<f64>,

    /// Passband edge (Hz).
    #[arg(long)]
    fpass: Option<f64>,

    /// Stopband edge (Hz).
    #[arg(long)]
    fstop: Option<f64>,

    /// Passband ripple (dB).
    #[arg(long)]
    rp: Option<f64>,

    /// Stopband attenuation (dB).
    #[arg(long)]
    rs: Option<f64>,

    /// Frequency-response points.
    #[arg(long)]
    points: Option<usize>,

    /// Length of the fixed Hann design (odd).
    #[arg(long)]
    window_length: Option<usize>,

    /// Safetensors output path.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => CompareConfig::load(path)?,
        None => CompareConfig::default(),
    };
    if let Some(v) = args.fs { cfg.sample_rate_hz = v; }
    if let Some(v) = args.fpass { cfg.passband_edge_hz = v; }
    if let Some(v) = args.fstop { cfg.stopband_edge_hz = v; }
    if let Some(v) = args.rp { cfg.passband_ripple_db = v; }
    if let Some(v) = args.rs { cfg.stopband_attenuation_db = v; }
    if let Some(v) = args.points { cfg.n_points = v; }
    if let Some(v) = args.window_length { cfg.window_length = v; }

    let spec = cfg.filter_spec()?;
    let reports = compare_designs(&spec, &cfg)?;

    println!("\n### Filter lengths (M) ###");
    for r in &reports {
        let note = match (&r.kaiser, &r.remez) {
            (_, Some(pm)) if !pm.converged => format!("  (not converged after {} iterations)", pm.iterations),
            (_, Some(pm)) => format!("  (delta = {:.3e}, {} iterations)", pm.delta, pm.iterations),
            (Some(est), None) if r.method == DesignMethod::Kaiser => {
                format!("  (beta = {:.4})", est.beta)
            }
            _ if r.method == DesignMethod::FrequencySampling => {
                format!("  ({} window)", cfg.freq_sampling_window.name())
            }
            _ => String::new(),
        };
        println!("M ({:>13}): {}{note}", r.method, r.taps.len());
    }

    println!("\n### Compliance (passband ±{} dB, stopband ≤ -{} dB) ###",
        spec.passband_ripple_db(), spec.stopband_attenuation_db());
    for r in &reports {
        let c = &r.compliance;
        println!("{:>13}: passband [{:+.3}, {:+.3}] dB, stopband peak {:.2} dB  {}",
            r.method, c.passband_min_db, c.passband_max_db, c.stopband_max_db,
            if c.meets_spec() { "OK" } else { "FAIL" });
    }

    if let Some(out) = &args.output {
        write_designs(&reports, out)?;
        println!("\nWritten → {}", out.display());
    }

    Ok(())
}
