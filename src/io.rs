//! Safetensors I/O for design reports.
//!
//! Writer: dumps the comparison (frequency grid, per-method magnitude and
//! taps) into one `.safetensors` file for plotting.  Reader: parses any
//! F64 / F32 / I32 tensor file back into flat `f64` buffers.
use anyhow::{bail, Context, Result};
use ndarray::Array2;
use std::collections::HashMap;
use std::path::Path;

use crate::DesignReport;

// ── Low-level safetensors parser ─────────────────────────────────────────────

fn parse_header(bytes: &[u8]) -> Result<(HashMap<String, serde_json::Value>, usize)> {
    let Some(len_bytes) = bytes.get(..8) else {
        bail!("safetensors file too small");
    };
    let mut len = [0u8; 8];
    len.copy_from_slice(len_bytes);
    let n = u64::from_le_bytes(len);
    let end = usize::try_from(n)
        .ok()
        .and_then(|n| n.checked_add(8))
        .context("safetensors header length overflows")?;
    let Some(header_bytes) = bytes.get(8..end) else {
        bail!("safetensors header length {n} exceeds file size {}", bytes.len());
    };
    let header: HashMap<String, serde_json::Value> =
        serde_json::from_slice(header_bytes).context("failed to parse safetensors header")?;
    Ok((header, end))
}

fn shape_of(entry: &serde_json::Value) -> Result<Vec<usize>> {
    entry["shape"]
        .as_array()
        .context("missing 'shape'")?
        .iter()
        .map(|v| v.as_u64().map(|d| d as usize).context("bad shape entry"))
        .collect()
}

fn decode(bytes: &[u8], data_start: usize, entry: &serde_json::Value) -> Result<Vec<f64>> {
    let offsets = entry["data_offsets"].as_array().context("missing 'data_offsets'")?;
    let (Some(s), Some(e)) = (
        offsets.first().and_then(|v| v.as_u64()),
        offsets.get(1).and_then(|v| v.as_u64()),
    ) else {
        bail!("malformed 'data_offsets'");
    };
    let offset = |o: u64| usize::try_from(o).ok().and_then(|o| data_start.checked_add(o));
    let (Some(start), Some(end)) = (offset(s), offset(e)) else {
        bail!("'data_offsets' [{s}, {e}] overflow");
    };
    let raw = bytes.get(start..end).context("tensor data out of bounds")?;

    let data = match entry["dtype"].as_str() {
        Some("F64") => raw
            .chunks_exact(8)
            .map(|b| {
                let mut a = [0u8; 8];
                a.copy_from_slice(b);
                f64::from_le_bytes(a)
            })
            .collect(),
        Some("F32") => raw
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f64)
            .collect(),
        Some("I32") => raw
            .chunks_exact(4)
            .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f64)
            .collect(),
        other => bail!("unsupported dtype {other:?}"),
    };
    Ok(data)
}

// ── Public structs ────────────────────────────────────────────────────────────

/// One tensor read back from a safetensors file, widened to `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    pub shape: Vec<usize>,
    /// Row-major values.
    pub data: Vec<f64>,
}

/// Read every tensor of a safetensors file.
///
/// The optional `__metadata__` entry is skipped.
pub fn read_tensors(path: &Path) -> Result<HashMap<String, Tensor>> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let (header, data_start) = parse_header(&bytes)?;

    let mut out = HashMap::with_capacity(header.len());
    for (name, entry) in &header {
        if name == "__metadata__" {
            continue;
        }
        let shape = shape_of(entry).with_context(|| format!("tensor '{name}'"))?;
        let data = decode(&bytes, data_start, entry).with_context(|| format!("tensor '{name}'"))?;
        let expected = shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d));
        if expected != Some(data.len()) {
            bail!("tensor '{name}': shape {shape:?} does not hold {} values", data.len());
        }
        out.insert(name.clone(), Tensor { shape, data });
    }
    Ok(out)
}

// ── Writer ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Dtype {
    F64,
    I32,
}

impl Dtype {
    fn as_str(self) -> &'static str {
        match self {
            Dtype::F64 => "F64",
            Dtype::I32 => "I32",
        }
    }
}

struct Entry {
    name: String,
    dtype: Dtype,
    shape: Vec<usize>,
    bytes: Vec<u8>,
}

/// Accumulates little-endian F64 / I32 tensors and writes them as one
/// safetensors file, in insertion order.
#[derive(Default)]
pub struct StWriter {
    entries: Vec<Entry>,
}

impl StWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, name: &str, dtype: Dtype, shape: &[usize], bytes: Vec<u8>) {
        self.entries.push(Entry { name: name.to_string(), dtype, shape: shape.to_vec(), bytes });
    }

    pub fn add_f64(&mut self, name: &str, data: &[f64], shape: &[usize]) {
        self.push(name, Dtype::F64, shape, data.iter().flat_map(|v| v.to_le_bytes()).collect());
    }

    /// Row-major `[rows, cols]` tensor.
    pub fn add_f64_arr2(&mut self, name: &str, arr: &Array2<f64>) {
        let bytes = arr.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.push(name, Dtype::F64, &[arr.nrows(), arr.ncols()], bytes);
    }

    pub fn add_i32(&mut self, name: &str, data: &[i32], shape: &[usize]) {
        self.push(name, Dtype::I32, shape, data.iter().flat_map(|v| v.to_le_bytes()).collect());
    }

    /// Header is space-padded to a multiple of 8 bytes.
    pub fn write(&self, path: &Path) -> Result<()> {
        use std::io::Write;

        let mut header = serde_json::Map::new();
        let mut offset = 0usize;
        for e in &self.entries {
            let next = offset + e.bytes.len();
            header.insert(e.name.clone(), serde_json::json!({
                "dtype": e.dtype.as_str(),
                "shape": e.shape,
                "data_offsets": [offset, next],
            }));
            offset = next;
        }
        let mut header = serde_json::to_vec(&header)?;
        header.resize(header.len().next_multiple_of(8), b' ');

        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        let mut out = std::io::BufWriter::new(file);
        out.write_all(&(header.len() as u64).to_le_bytes())?;
        out.write_all(&header)?;
        for e in &self.entries {
            out.write_all(&e.bytes)?;
        }
        out.flush()?;
        Ok(())
    }
}

// ── Report writer ─────────────────────────────────────────────────────────────

/// Write a comparison to `path`.
///
/// Tensors:
/// - `freq_hz`        `[N]`     shared evaluation grid
/// - `mag_db`         `[D, N]`  one row per design, in report order
/// - `taps_<method>`  `[M]`     impulse response of each design
/// - `n_taps`         `[D]`     length of each design (I32)
/// - `kaiser_beta`    `[1]`     Kaiser β, when any report carries an estimate
pub fn write_designs(reports: &[DesignReport], path: &Path) -> Result<()> {
    let Some(first) = reports.first() else {
        bail!("no designs to write");
    };
    let freq = &first.response.frequencies_hz;
    let n = freq.len();

    let mut mag = Array2::<f64>::zeros((reports.len(), n));
    for (mut row, r) in mag.rows_mut().into_iter().zip(reports) {
        if r.response.frequencies_hz != *freq {
            bail!("{} was evaluated on a different frequency grid", r.method);
        }
        for (dst, &db) in row.iter_mut().zip(&r.response.magnitude_db) {
            *dst = db;
        }
    }

    let mut w = StWriter::new();
    w.add_f64("freq_hz", freq, &[n]);
    w.add_f64_arr2("mag_db", &mag);
    for r in reports {
        w.add_f64(&format!("taps_{}", r.method.label()), &r.taps, &[r.taps.len()]);
    }
    let lengths: Vec<i32> = reports.iter().map(|r| r.taps.len() as i32).collect();
    w.add_i32("n_taps", &lengths, &[lengths.len()]);
    if let Some(est) = reports.iter().find_map(|r| r.kaiser) {
        w.add_f64("kaiser_beta", &[est.beta], &[1]);
    }
    w.write(path)
}
