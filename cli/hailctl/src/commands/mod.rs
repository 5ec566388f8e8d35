//! CLI commands.

mod codec;
mod config;
mod create;
mod inspect;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::OutputFormat;

/// Environment override for the output format.
const FORMAT_ENV: &str = "HAILSTONE_FORMAT";

/// hail - Mint and inspect Hailstone identifiers.
#[derive(Debug, Parser)]
#[command(name = "hail")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, env = FORMAT_ENV)]
    format: Option<String>,

    /// Emit diagnostics as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Mint new identifiers.
    Create(create::CreateCommand),

    /// Show the fields of an identifier.
    Inspect(inspect::InspectCommand),

    /// Base85-encode raw bytes given as hex.
    Encode(codec::EncodeCommand),

    /// Decode base85 text to hex.
    Decode(codec::DecodeCommand),

    /// Show or change saved defaults.
    Config(config::ConfigCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;
        crate::logging::init(&config.log_level, self.log_json);

        let format: OutputFormat = self
            .format
            .as_deref()
            .unwrap_or(config.format.as_str())
            .parse()?;

        tracing::debug!(?format, length = %config.length, "configuration loaded");

        let ctx = CommandContext { config, format };

        match self.command {
            Commands::Create(cmd) => cmd.run(ctx).await,
            Commands::Inspect(cmd) => cmd.run(ctx).await,
            Commands::Encode(cmd) => cmd.run(ctx).await,
            Commands::Decode(cmd) => cmd.run(ctx).await,
            Commands::Config(cmd) => cmd.run(ctx).await,
            Commands::Version => {
                println!("hail {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
}
