//! Mint command.

use anyhow::Result;
use clap::Args;
use hailstone::random::{BlockingTask, OsRandom, ThreadRandom};
use hailstone::{AsyncRandomSource, Hailstone, LengthClass, Tag, TagInput};
use tracing::info;

use crate::error::CliError;
use crate::output::{print_output, OutputFormat};

use super::inspect::IdentifierRow;
use super::CommandContext;

/// Mint new identifiers for a domain and type.
#[derive(Debug, Args)]
pub struct CreateCommand {
    /// Domain tag (0-255).
    #[arg(long, allow_hyphen_values = true)]
    domain: String,

    /// Type tag (0-255).
    #[arg(long = "type", allow_hyphen_values = true)]
    type_tag: String,

    /// Identifier size in bits (64 or 128). Defaults to the configured length.
    #[arg(long)]
    length: Option<LengthClass>,

    /// Number of identifiers to mint.
    #[arg(long, default_value_t = 1)]
    count: u32,

    /// Read instance bytes straight from the OS entropy pool.
    #[arg(long)]
    os_rng: bool,
}

impl CreateCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        // Validate once up front so a bad tag fails before any entropy is drawn.
        let domain = self.domain.as_str().to_tag("domain").map_err(CliError::from)?;
        let type_tag = self.type_tag.as_str().to_tag("type").map_err(CliError::from)?;
        let length = self.length.unwrap_or(ctx.config.length);

        let source: Box<dyn AsyncRandomSource> = if self.os_rng {
            Box::new(BlockingTask(OsRandom))
        } else {
            Box::new(BlockingTask(ThreadRandom))
        };

        let ids = mint(domain, type_tag, length, self.count, source.as_ref()).await?;

        info!(
            count = ids.len(),
            domain = %domain,
            type_tag = %type_tag,
            length = %length,
            "minted identifiers"
        );

        match ctx.format {
            OutputFormat::Table => {
                for id in &ids {
                    println!("{}", id);
                }
            }
            OutputFormat::Json => {
                let rows: Vec<IdentifierRow> = ids.iter().map(IdentifierRow::from).collect();
                print_output(&rows, ctx.format);
            }
        }

        Ok(())
    }
}

async fn mint(
    domain: Tag,
    type_tag: Tag,
    length: LengthClass,
    count: u32,
    source: &dyn AsyncRandomSource,
) -> Result<Vec<Hailstone>, CliError> {
    let mut ids = Vec::with_capacity(count as usize);
    for _ in 0..count {
        ids.push(Hailstone::create_async(domain, type_tag, length, source).await?);
    }
    Ok(ids)
}
