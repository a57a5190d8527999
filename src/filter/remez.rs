//! Parks-McClellan equiripple FIR design (Remez multiple exchange).
//!
//! Designs odd-length, even-symmetric (type I) filters whose amplitude
//! response `A(ω)` minimises the maximum weighted error
//! `E(ω) = W(ω)·(D(ω) − A(ω))` over a set of bands, where `D` is piecewise
//! constant.  Frequencies are on the normalised axis, 1 = Nyquist.
//!
//! For `n = 2L + 1` taps, `A` is a cosine polynomial of degree `L` in
//! `x = cos(πf)`, so `r = L + 1` coefficients are free and the optimum is
//! characterised by `r + 1` alternating extrema of equal magnitude `|δ|`.
//!
//! Each iteration:
//!   1. interpolate through the current `r + 1` extremal frequencies with the
//!      alternating error `±δ` (barycentric Lagrange form, Oppenheim &
//!      Schafer eq. 7.131–7.133),
//!   2. evaluate `E` on a dense grid that covers the bands but not the gaps,
//!   3. take the local extrema of `E` as the next extremal set.
//!
//! The loop stops once the extremal set no longer moves.  Tie-breaks in the
//! exchange: a plateau of equal error resolves to its last grid point, and of
//! two adjacent same-sign extrema with equal magnitude the earlier is kept.
//!
//! It also stops when `|δ|` reaches double-precision level (very long filters
//! with wide transitions); that iterate counts as converged only if its whole
//! error curve is at the same level.
use log::{debug, warn};
use std::f64::consts::PI;

use crate::error::{FirError, FirResult};
use crate::filter::design::check_odd_length;
use crate::spec::FilterSpec;

/// Iteration bound of the exchange loop.
pub const MAX_ITERATIONS: usize = 250;

/// Dense-grid points per coefficient (per unit of normalised frequency, scaled by `r`).
pub const GRID_DENSITY: usize = 16;

/// Band edges are compared against 0 and 1 with this slack.
const EDGE_EPS: f64 = 1e-12;

/// Ripple level, relative to the largest gain, below which double precision
/// can no longer resolve the alternation.
const DELTA_FLOOR: f64 = 1e-13;

/// Tuning knobs of the exchange loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemezOptions {
    /// Upper bound on exchange iterations.
    pub max_iterations: usize,
    /// Dense grid spacing is `1 / (grid_density · r)`.
    pub grid_density: usize,
}

impl Default for RemezOptions {
    fn default() -> Self {
        Self { max_iterations: MAX_ITERATIONS, grid_density: GRID_DENSITY }
    }
}

/// Result of an equiripple design.
#[derive(Debug, Clone, PartialEq)]
pub struct RemezDesign {
    /// Symmetric impulse response of the requested length.
    pub taps: Vec<f64>,
    /// Signed level of the alternating weighted error.
    pub delta: f64,
    /// Largest weighted error magnitude on the dense grid.
    pub max_error: f64,
    /// Exchange iterations performed.
    pub iterations: usize,
    /// False when the iteration bound was hit; `taps` are then the best iterate.
    pub converged: bool,
    /// Extremal frequencies of the returned iterate (normalised, ascending).
    pub extremal_frequencies: Vec<f64>,
    /// Weighted error at each extremal frequency.
    pub extremal_errors: Vec<f64>,
}

impl RemezDesign {
    /// `Err(NonConvergence)` if the exchange loop did not settle.
    pub fn check_convergence(&self) -> FirResult<()> {
        if self.converged {
            Ok(())
        } else {
            Err(FirError::NonConvergence {
                iterations: self.iterations,
                max_error: self.max_error,
            })
        }
    }
}

/// Equiripple design with unit weight in every band.
///
/// `band_edges` holds `[lo₀, hi₀, lo₁, hi₁, …]` starting at 0 and ending at 1;
/// `gains` holds one desired gain per band.
///
/// ```
/// use firlab::filter::remez;
///
/// let d = remez(47, &[0.0, 0.4, 0.6, 1.0], &[1.0, 0.0]).unwrap();
/// assert!(d.converged);
/// assert_eq!(d.taps.len(), 47);
/// ```
pub fn remez(numtaps: usize, band_edges: &[f64], gains: &[f64]) -> FirResult<RemezDesign> {
    let weights = vec![1.0; gains.len()];
    remez_weighted(numtaps, band_edges, gains, &weights, &RemezOptions::default())
}

/// Equiripple design with per-band weights.
///
/// A larger weight shrinks the ripple of its band relative to the others:
/// band `i` deviates from its gain by `|δ| / weights[i]`.
pub fn remez_weighted(
    numtaps: usize,
    band_edges: &[f64],
    gains: &[f64],
    weights: &[f64],
    opts: &RemezOptions,
) -> FirResult<RemezDesign> {
    check_odd_length(numtaps)?;
    check_bands(band_edges, gains, weights)?;
    if opts.grid_density == 0 {
        return Err(FirError::InvalidBandSpec("grid density must be at least 1".into()));
    }

    let r = (numtaps + 1) / 2;
    let grid = DenseGrid::new(band_edges, gains, weights, r, opts.grid_density);
    if grid.len() < r + 1 {
        return Err(FirError::InvalidBandSpec(format!(
            "bands hold {} grid points, need at least {}",
            grid.len(),
            r + 1
        )));
    }

    let floor = DELTA_FLOOR * gains.iter().fold(1.0_f64, |m, g| m.max(g.abs()));
    let mut ext = initial_extremals(grid.len(), r + 1);
    let mut best: Option<Iterate> = None;
    let mut converged = false;
    let mut iterations = 0;

    while iterations < opts.max_iterations {
        iterations += 1;

        let Some(interp) = Interpolant::solve(&grid, &ext) else {
            warn!("Remez: singular extremal set at iteration {iterations}");
            break;
        };
        let error = grid.weighted_error(&interp);
        let max_error = error.iter().fold(0.0_f64, |m, e| m.max(e.abs()));
        debug!(
            "Remez iteration {iterations}: delta = {:.6e}, max |E| = {max_error:.6e}",
            interp.delta
        );

        let current = Iterate { interp, ext: ext.clone(), error, max_error };

        if current.interp.delta.abs() <= floor {
            // Exact to working precision, or the ripple fell below it and the
            // exchange would only chase rounding noise.
            converged = max_error <= floor;
            if !converged {
                warn!(
                    "Remez: |delta| = {:.3e} is at double-precision level after {iterations} iterations, stopping",
                    current.interp.delta.abs()
                );
            }
            if converged || best.as_ref().is_none_or(|b| current.max_error < b.max_error) {
                best = Some(current);
            }
            break;
        }

        let next = exchange(&current.error, &grid.band, r + 1);

        match next {
            Some(next) if next == ext => {
                best = Some(current);
                converged = true;
                break;
            }
            Some(next) => {
                if best.as_ref().is_none_or(|b| current.max_error < b.max_error) {
                    best = Some(current);
                }
                ext = next;
            }
            None => {
                warn!("Remez: fewer than {} alternating extrema at iteration {iterations}", r + 1);
                if best.as_ref().is_none_or(|b| current.max_error < b.max_error) {
                    best = Some(current);
                }
                break;
            }
        }
    }

    let Some(best) = best else {
        return Err(FirError::NonConvergence { iterations, max_error: f64::INFINITY });
    };
    if !converged {
        warn!(
            "Remez: no convergence after {iterations} iterations, returning best iterate (max |E| = {:.3e})",
            best.max_error
        );
    }

    Ok(RemezDesign {
        taps: best.interp.impulse_response(numtaps),
        delta: best.interp.delta,
        max_error: best.max_error,
        iterations,
        converged,
        extremal_frequencies: best.ext.iter().map(|&i| grid.freq[i]).collect(),
        extremal_errors: best.ext.iter().map(|&i| best.error[i]).collect(),
    })
}

/// Two-band low-pass for `spec`: unit gain on `[0, ω_pass]`, zero on
/// `[ω_stop, 1]`, equal weights.
pub fn design_remez_lowpass(
    spec: &FilterSpec,
    numtaps: usize,
    opts: &RemezOptions,
) -> FirResult<RemezDesign> {
    let norm = spec.normalize();
    remez_weighted(
        numtaps,
        &[0.0, norm.omega_pass, norm.omega_stop, 1.0],
        &[1.0, 0.0],
        &[1.0, 1.0],
        opts,
    )
}

// ── Validation ───────────────────────────────────────────────────────────────

fn check_bands(edges: &[f64], gains: &[f64], weights: &[f64]) -> FirResult<()> {
    let bad = |msg: String| Err(FirError::InvalidBandSpec(msg));

    if edges.is_empty() || edges.len() % 2 != 0 {
        return bad(format!("expected edge pairs, got {} edges", edges.len()));
    }
    let n_bands = edges.len() / 2;
    if gains.len() != n_bands {
        return bad(format!("{n_bands} bands but {} gains", gains.len()));
    }
    if weights.len() != n_bands {
        return bad(format!("{n_bands} bands but {} weights", weights.len()));
    }
    if let Some(e) = edges.iter().chain(gains).find(|v| !v.is_finite()) {
        return bad(format!("non-finite value {e}"));
    }
    if let Some(w) = weights.iter().find(|w| !(**w > 0.0 && w.is_finite())) {
        return bad(format!("weights must be positive, got {w}"));
    }
    if edges[0].abs() > EDGE_EPS {
        return bad(format!("first band must start at 0, got {}", edges[0]));
    }
    if (edges[edges.len() - 1] - 1.0).abs() > EDGE_EPS {
        return bad(format!("last band must end at 1 (Nyquist), got {}", edges[edges.len() - 1]));
    }
    for pair in edges.windows(2) {
        if pair[1] <= pair[0] {
            return bad(format!("edges must increase strictly: {} then {}", pair[0], pair[1]));
        }
    }
    Ok(())
}

// ── Dense grid ───────────────────────────────────────────────────────────────

/// Frequencies, desired response, weight and band index on the dense grid.
struct DenseGrid {
    freq: Vec<f64>,
    desired: Vec<f64>,
    weight: Vec<f64>,
    band: Vec<usize>,
}

impl DenseGrid {
    fn new(edges: &[f64], gains: &[f64], weights: &[f64], r: usize, density: usize) -> Self {
        let delf = 1.0 / (density * r) as f64;
        let mut grid = Self { freq: vec![], desired: vec![], weight: vec![], band: vec![] };

        for (b, pair) in edges.chunks_exact(2).enumerate() {
            let (lo, hi) = (pair[0], pair[1]);
            // Both edges always belong to the grid.
            let k = (((hi - lo) / delf).round() as usize).max(1);
            for i in 0..=k {
                grid.freq.push(lo + (hi - lo) * i as f64 / k as f64);
                grid.desired.push(gains[b]);
                grid.weight.push(weights[b]);
                grid.band.push(b);
            }
        }
        grid
    }

    fn len(&self) -> usize {
        self.freq.len()
    }

    fn weighted_error(&self, interp: &Interpolant) -> Vec<f64> {
        self.freq
            .iter()
            .zip(&self.desired)
            .zip(&self.weight)
            .map(|((&f, &d), &w)| w * (d - interp.eval(f)))
            .collect()
    }
}

/// `count` indices spread evenly over a grid of `len` points.
fn initial_extremals(len: usize, count: usize) -> Vec<usize> {
    (0..count).map(|i| i * (len - 1) / (count - 1)).collect()
}

// ── Interpolation ────────────────────────────────────────────────────────────

/// Amplitude response through the extremal set, with the alternating error
/// already folded into the node values.
struct Interpolant {
    /// Nodes `cos(π f)`.
    x: Vec<f64>,
    /// Barycentric weights.
    ad: Vec<f64>,
    /// Node values `D - (-1)^i δ / W`.
    y: Vec<f64>,
    delta: f64,
}

impl Interpolant {
    /// `None` if the extremal set makes the system singular.
    fn solve(grid: &DenseGrid, ext: &[usize]) -> Option<Self> {
        let x: Vec<f64> = ext.iter().map(|&i| (PI * grid.freq[i]).cos()).collect();
        let m = x.len();

        // The factor 2 keeps the products near unit magnitude on [-1, 1].
        let ad: Vec<f64> = (0..m)
            .map(|i| {
                let denom: f64 = (0..m).filter(|&k| k != i).map(|k| 2.0 * (x[i] - x[k])).product();
                1.0 / denom
            })
            .collect();

        let mut numer = 0.0;
        let mut denom = 0.0;
        let mut sign = 1.0;
        for (j, &i) in ext.iter().enumerate() {
            numer += ad[j] * grid.desired[i];
            denom += sign * ad[j] / grid.weight[i];
            sign = -sign;
        }
        let delta = numer / denom;
        if !delta.is_finite() || ad.iter().any(|a| !a.is_finite()) {
            return None;
        }

        let mut sign = 1.0;
        let y = ext
            .iter()
            .map(|&i| {
                let v = grid.desired[i] - sign * delta / grid.weight[i];
                sign = -sign;
                v
            })
            .collect();

        Some(Self { x, ad, y, delta })
    }

    /// Amplitude response `A(f)`.
    fn eval(&self, f: f64) -> f64 {
        let xc = (PI * f).cos();
        let mut numer = 0.0;
        let mut denom = 0.0;
        for ((&xi, &ai), &yi) in self.x.iter().zip(&self.ad).zip(&self.y) {
            let c = xc - xi;
            if c.abs() < 1e-14 {
                return yi;
            }
            let c = ai / c;
            numer += c * yi;
            denom += c;
        }
        numer / denom
    }

    /// Type I taps from samples of `A` at `f_k = 2k / n`, `k = 0..=L`:
    /// `h[L ± m] = (A(0) + 2 Σ_k A(f_k) cos(2πkm/n)) / n`.
    fn impulse_response(&self, n: usize) -> Vec<f64> {
        let l = (n - 1) / 2;
        let a: Vec<f64> = (0..=l).map(|k| self.eval(2.0 * k as f64 / n as f64)).collect();
        let mut h = vec![0.0; n];
        for m in 0..=l {
            let mut s = a[0];
            for (k, &ak) in a.iter().enumerate().skip(1) {
                s += 2.0 * ak * (2.0 * PI * (k * m) as f64 / n as f64).cos();
            }
            h[l + m] = s / n as f64;
            h[l - m] = h[l + m];
        }
        h
    }
}

struct Iterate {
    interp: Interpolant,
    ext: Vec<usize>,
    error: Vec<f64>,
    max_error: f64,
}

// ── Exchange ─────────────────────────────────────────────────────────────────

/// Pick the next `count` alternating extrema of `error`, or `None` if the
/// error curve does not alternate often enough.
fn exchange(error: &[f64], band: &[usize], count: usize) -> Option<Vec<usize>> {
    let mut cand = local_extrema(error, band);
    collapse_same_sign(&mut cand, error);

    while cand.len() > count {
        if cand.len() == count + 1 {
            // One surplus: drop whichever end is smaller; alternation survives.
            let first = error[cand[0]].abs();
            let last = error[cand[cand.len() - 1]].abs();
            if first < last {
                cand.remove(0);
            } else {
                cand.pop();
            }
        } else {
            let weakest = (0..cand.len())
                .min_by(|&a, &b| error[cand[a]].abs().total_cmp(&error[cand[b]].abs()))?;
            cand.remove(weakest);
            collapse_same_sign(&mut cand, error);
        }
    }

    (cand.len() == count).then_some(cand)
}

/// Grid indices where `|E|` peaks with `E ≠ 0`, comparing only against
/// neighbours of the same band.
fn local_extrema(error: &[f64], band: &[usize]) -> Vec<usize> {
    let n = error.len();
    let mut out = Vec::new();
    for i in 0..n {
        let e = error[i];
        if e == 0.0 {
            continue;
        }
        let left = (i > 0 && band[i - 1] == band[i]).then(|| error[i - 1]);
        let right = (i + 1 < n && band[i + 1] == band[i]).then(|| error[i + 1]);
        let peak = if e > 0.0 {
            left.is_none_or(|l| l <= e) && right.is_none_or(|r| r < e)
        } else {
            left.is_none_or(|l| l >= e) && right.is_none_or(|r| r > e)
        };
        if peak {
            out.push(i);
        }
    }
    out
}

/// Merge runs of same-sign candidates into their largest member.
fn collapse_same_sign(cand: &mut Vec<usize>, error: &[f64]) {
    let mut out: Vec<usize> = Vec::with_capacity(cand.len());
    for &i in cand.iter() {
        match out.last_mut() {
            Some(last) if (error[*last] > 0.0) == (error[i] > 0.0) => {
                if error[i].abs() > error[*last].abs() {
                    *last = i;
                }
            }
            _ => out.push(i),
        }
    }
    *cand = out;
}
