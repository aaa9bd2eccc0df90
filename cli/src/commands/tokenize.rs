//! Tokenize command implementation.

use super::{read_input, write_output, ModelArgs};
use anyhow::Result as AnyhowResult;
use clap::Parser;
use std::path::PathBuf;

/// Tokenize command arguments.
#[derive(Parser)]
pub struct TokenizeCommand {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Text to split ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Print a JSON array instead of one symbol per line
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(cmd: TokenizeCommand) -> AnyhowResult<()> {
    let tokenizer = cmd.model.load()?;
    let text = read_input(cmd.input)?;

    let symbols = tokenizer.tokenize(&text);
    let output = if cmd.json {
        serde_json::to_string(&symbols)?
    } else {
        symbols.join("\n")
    };

    write_output(cmd.output.as_ref(), &output)
}
