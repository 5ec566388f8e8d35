//! Config commands (saved defaults).

use anyhow::Result;
use clap::{Args, Subcommand};
use hailstone::LengthClass;
use serde::Serialize;

use crate::config::Config;
use crate::output::{print_info, print_single, print_success, OutputFormat};

use super::CommandContext;

/// Show or change saved defaults.
#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    /// Show the effective configuration.
    Show,

    /// Set the default length class (64 or 128).
    SetLength {
        /// Identifier size in bits.
        length: LengthClass,
    },
}

#[derive(Debug, Serialize)]
struct ConfigView {
    path: String,
    length: u32,
    format: String,
    log_level: String,
}

impl ConfigCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            ConfigSubcommand::Show => show(ctx),
            ConfigSubcommand::SetLength { length } => set_length(ctx, length),
        }
    }
}

fn show(ctx: CommandContext) -> Result<()> {
    let view = ConfigView {
        path: Config::path()?.display().to_string(),
        length: ctx.config.length.bits(),
        format: ctx.config.format.clone(),
        log_level: ctx.config.log_level.clone(),
    };

    match ctx.format {
        OutputFormat::Json => print_single(&view),
        OutputFormat::Table => {
            println!("path: {}", view.path);
            println!("length: {}", view.length);
            println!("format: {}", view.format);
            println!("log_level: {}", view.log_level);
        }
    }

    Ok(())
}

fn set_length(ctx: CommandContext, length: LengthClass) -> Result<()> {
    // Persist only the file contents, not environment overrides.
    let path = Config::path()?;
    let mut config = Config::load_from(&path)?;
    config.length = length;
    config.save_to(&path)?;

    tracing::info!(length = %length, "default length updated");

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({ "ok": true, "length": length })),
        OutputFormat::Table => {
            print_success(&format!("Default length set to {} bits", length));
            print_info(&format!("Saved to {}", path.display()));
        }
    }

    Ok(())
}
