//! Benchmark command implementation.

use super::ModelArgs;
use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Benchmark command arguments.
#[derive(Parser)]
pub struct BenchmarkCommand {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Path to input text file for benchmarking
    #[arg(short, long)]
    pub input: PathBuf,

    /// Number of iterations to run
    #[arg(short = 'n', long, default_value_t = 100)]
    pub iterations: usize,
}

pub fn run(cmd: BenchmarkCommand) -> AnyhowResult<()> {
    let tokenizer = cmd.model.load()?;
    let text = fs::read_to_string(&cmd.input)
        .with_context(|| format!("failed to read {}", cmd.input.display()))?;
    let iterations = cmd.iterations.max(1);

    println!("Benchmarking encoding...");
    println!("  Text length: {} bytes", text.len());
    println!("  Iterations: {}", iterations);
    println!();

    // The first pass runs against an empty cache.
    let start = Instant::now();
    let token_count = tokenizer.encode(&text)?.len();
    let cold = start.elapsed();

    let start = Instant::now();
    for _ in 0..iterations {
        tokenizer.encode(&text)?;
    }
    let elapsed = start.elapsed();

    let avg_secs = elapsed.as_secs_f64() / iterations as f64;

    println!("Results:");
    println!("  Tokens: {}", token_count);
    println!("  Cold pass: {:.3}ms", cold.as_secs_f64() * 1000.0);
    println!("  Average warm pass: {:.3}ms", avg_secs * 1000.0);
    if avg_secs > 0.0 {
        println!("  Throughput: {:.0} tokens/s", token_count as f64 / avg_secs);
        println!(
            "  Throughput: {:.2} MiB/s",
            text.len() as f64 / avg_secs / (1024.0 * 1024.0)
        );
    }
    if let Some(stats) = tokenizer.cache_stats() {
        println!(
            "  Cache: {} entries, {} hits, {} misses ({:.1}% hit rate)",
            stats.entries,
            stats.hits,
            stats.misses,
            stats.hit_rate().unwrap_or(0.0) * 100.0
        );
    }

    Ok(())
}
