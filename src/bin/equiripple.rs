/// equiripple: run a single Parks-McClellan design and print one tap per line.
///
/// Band edges are normalised to Nyquist = 1.
///
///   equiripple --taps 47 --bands 0,0.4,0.6,1 --gains 1,0 --weights 1,10
use anyhow::Result;
use clap::Parser;
use log::warn;

use firlab::filter::{remez_weighted, RemezOptions};

#[derive(Parser, Debug)]
#[command(name = "equiripple", about = "Parks-McClellan FIR design")]
struct Args {
    /// Filter length (odd).
    #[arg(long)]
    taps: usize,

    /// Band edges, comma-separated, from 0 to 1.
    #[arg(long, value_delimiter = ',', required = true)]
    bands: Vec<f64>,

    /// Desired gain per band, comma-separated.
    #[arg(long, value_delimiter = ',', required = true)]
    gains: Vec<f64>,

    /// Weight per band, comma-separated (default: all 1).
    #[arg(long, value_delimiter = ',')]
    weights: Vec<f64>,

    /// Exchange iteration bound.
    #[arg(long, default_value_t = firlab::filter::remez::MAX_ITERATIONS)]
    max_iterations: usize,
}

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );
    let args = Args::parse();

    let weights = if args.weights.is_empty() {
        vec![1.0; args.gains.len()]
    } else {
        args.weights
    };
    let opts = RemezOptions { max_iterations: args.max_iterations, ..RemezOptions::default() };

    let design = remez_weighted(args.taps, &args.bands, &args.gains, &weights, &opts)?;
    if let Err(e) = design.check_convergence() {
        warn!("{e}; printing best iterate");
    }
    eprintln!("delta = {:.6e}, iterations = {}", design.delta, design.iterations);
    for h in &design.taps {
        println!("{h:.17e}");
    }

    Ok(())
}
