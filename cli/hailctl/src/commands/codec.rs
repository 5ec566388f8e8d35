//! Raw base85 encode/decode commands.
//!
//! These work on arbitrary byte strings, not only identifier frames.

use anyhow::Result;
use clap::Args;
use hailstone::base85;

use crate::error::CliError;
use crate::output::{print_single, OutputFormat};

use super::CommandContext;

/// Base85-encode raw bytes given as hex.
#[derive(Debug, Args)]
pub struct EncodeCommand {
    /// Bytes to encode, as hex.
    #[arg(value_name = "HEX")]
    hex: String,
}

/// Decode base85 text to hex.
#[derive(Debug, Args)]
pub struct DecodeCommand {
    /// Base85 text to decode.
    #[arg(value_name = "TEXT", allow_hyphen_values = true)]
    text: String,
}

impl EncodeCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let text = encode_hex(&self.hex)?;

        match ctx.format {
            OutputFormat::Json => print_single(&serde_json::json!({ "text": text })),
            OutputFormat::Table => println!("{}", text),
        }

        Ok(())
    }
}

impl DecodeCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let hex = decode_to_hex(&self.text)?;

        match ctx.format {
            OutputFormat::Json => print_single(&serde_json::json!({ "hex": hex })),
            OutputFormat::Table => println!("{}", hex),
        }

        Ok(())
    }
}

fn encode_hex(input: &str) -> Result<String, CliError> {
    let bytes = hex::decode(input.trim())?;
    Ok(base85::encode(&bytes))
}

fn decode_to_hex(text: &str) -> Result<String, CliError> {
    let bytes = base85::decode(text.trim())?;
    Ok(hex::encode(bytes))
}
