//! Error handling and display for the CLI.

use colored::Colorize;
use hailstone::HailstoneError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Hailstone(#[from] HailstoneError),

    #[error("Invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Unknown output format '{0}' (expected table or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(hint) = hint_for(err) {
        eprintln!("\n{}", hint.yellow());
    }
}

fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    let id_err = match err.downcast_ref::<CliError>() {
        Some(CliError::Hailstone(e)) => e,
        Some(CliError::InvalidHex(_)) => {
            return Some("Hint: Pass raw bytes as an even number of hex digits, e.g. 4003070000000000.");
        }
        Some(CliError::UnknownFormat(_)) => return Some("Hint: Use --format table or --format json."),
        _ => err.downcast_ref::<HailstoneError>()?,
    };

    match id_err.root_cause() {
        HailstoneError::InvalidArgument { .. } => {
            Some("Hint: Domain and type must be whole numbers between 0 and 255.")
        }
        HailstoneError::InvalidLength { .. } => Some(
            "Hint: Identifiers are 10 or 20 characters (8 or 16 bytes); --length accepts 64 or 128.",
        ),
        HailstoneError::InvalidEncoding { .. } => {
            Some("Hint: Check for characters outside the Hailstone alphabet, e.g. quotes or slashes.")
        }
        HailstoneError::InvalidHeader { .. } => {
            Some("Hint: The first byte must select a 64- or 128-bit identifier.")
        }
        HailstoneError::RandomSource(_) => {
            Some("Hint: The entropy source failed; retry, or omit --os-rng to use the thread generator.")
        }
        HailstoneError::InvalidIdentifier { .. } => None,
    }
}
