//! Encode command implementation.

use super::{read_input, write_output, ModelArgs};
use anyhow::Result as AnyhowResult;
use clap::Parser;
use std::path::PathBuf;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Text to encode ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Print a JSON array instead of space-separated ids
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(cmd: EncodeCommand) -> AnyhowResult<()> {
    let tokenizer = cmd.model.load()?;
    let text = read_input(cmd.input)?;

    let ids = tokenizer.encode(&text)?;
    log::debug!("encoded {} bytes into {} tokens", text.len(), ids.len());

    let output = if cmd.json {
        serde_json::to_string(&ids)?
    } else {
        ids.iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };

    write_output(cmd.output.as_ref(), &output)
}
