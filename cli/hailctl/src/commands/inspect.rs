//! Inspect command.

use anyhow::Result;
use clap::Args;
use hailstone::Hailstone;
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliError;
use crate::output::{print_output, print_single, OutputFormat};

use super::CommandContext;

/// Show the fields of an identifier.
#[derive(Debug, Args)]
pub struct InspectCommand {
    /// Identifier in base85 text form.
    #[arg(required_unless_present = "hex", allow_hyphen_values = true)]
    id: Option<String>,

    /// Identifier as a raw 8- or 16-byte frame in hex.
    #[arg(long, value_name = "HEX", conflicts_with = "id")]
    hex: Option<String>,
}

/// Table/JSON view of an identifier.
#[derive(Debug, Serialize, Tabled)]
pub struct IdentifierRow {
    pub id: String,
    pub version: u8,
    pub length: u32,
    pub domain: u8,
    #[serde(rename = "type")]
    #[tabled(rename = "type")]
    pub type_tag: u8,
    pub instance: String,
    pub bytes: String,
}

impl From<&Hailstone> for IdentifierRow {
    fn from(id: &Hailstone) -> Self {
        Self {
            id: id.to_string(),
            version: id.version(),
            length: id.length_class().bits(),
            domain: id.domain().value(),
            type_tag: id.type_tag().value(),
            instance: hex::encode(id.instance()),
            bytes: hex::encode(id.to_bytes()),
        }
    }
}

impl InspectCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let id = self.resolve()?;
        let row = IdentifierRow::from(&id);

        tracing::debug!(id = %row.id, "inspected identifier");

        match ctx.format {
            OutputFormat::Json => print_single(&row),
            OutputFormat::Table => print_output(&[row], ctx.format),
        }

        Ok(())
    }

    fn resolve(&self) -> Result<Hailstone, CliError> {
        match (&self.id, &self.hex) {
            (_, Some(hex_input)) => {
                let bytes = hex::decode(hex_input.trim())?;
                Ok(Hailstone::from_bytes(&bytes)?)
            }
            (Some(text), None) => Ok(Hailstone::parse(text.trim())?),
            (None, None) => Err(CliError::Other(anyhow::anyhow!(
                "Provide an identifier or --hex"
            ))),
        }
    }
}
