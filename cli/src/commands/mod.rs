//! CLI commands for the bytepair encoder.

pub mod benchmark;
pub mod encode;
pub mod tokenize;

pub use benchmark::BenchmarkCommand;
pub use encode::EncodeCommand;
pub use tokenize::TokenizeCommand;

use anyhow::{bail, Context, Result};
use bytepair_tokenizer::{ModelFormat, Tokenizer};
use clap::Args;
use std::io::Read;
use std::path::PathBuf;

/// Where to load the vocabulary and merge rules from.
#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Directory holding vocab.json + merges.txt or encoder.json + vocab.bpe
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Layout of the model directory (hf, gpt2); detected when omitted
    #[arg(long)]
    pub format: Option<ModelFormat>,

    /// Vocabulary JSON file (use with --merges instead of --model)
    #[arg(long, requires = "merges", conflicts_with = "model")]
    pub vocab: Option<PathBuf>,

    /// Merge rules file (use with --vocab instead of --model)
    #[arg(long, requires = "vocab", conflicts_with = "model")]
    pub merges: Option<PathBuf>,
}

impl ModelArgs {
    /// Load the tokenizer these arguments describe.
    pub fn load(&self) -> Result<Tokenizer> {
        let tokenizer = match (&self.model, &self.vocab, &self.merges) {
            (Some(dir), _, _) => {
                let loaded = match self.format {
                    Some(format) => Tokenizer::load_with_format(dir, format),
                    None => Tokenizer::load(dir),
                };
                loaded.with_context(|| format!("failed to load tokenizer from {}", dir.display()))?
            }
            (None, Some(vocab), Some(merges)) => Tokenizer::from_files(vocab, merges)
                .with_context(|| {
                    format!(
                        "failed to load tokenizer from {} and {}",
                        vocab.display(),
                        merges.display()
                    )
                })?,
            _ => bail!("either --model or both --vocab and --merges are required"),
        };

        log::info!(
            "loaded tokenizer: {} symbols, {} merges",
            tokenizer.vocab_size(),
            tokenizer.merge_count()
        );
        Ok(tokenizer)
    }
}

/// Read the text argument, or stdin when it is "-".
pub fn read_input(input: String) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        Ok(buffer)
    } else {
        Ok(input)
    }
}

/// Write to `path`, or print to stdout when no path is given.
pub fn write_output(path: Option<&PathBuf>, output: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{}", output),
    }
    Ok(())
}
