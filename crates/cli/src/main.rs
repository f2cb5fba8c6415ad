//! Silver Saints CLI - Cart panel backed by a local storage file.
//!
//! # Usage
//!
//! ```bash
//! # Add a tee in size M (size is required)
//! ss-cli cart add --id halo-tee --name "HALO TEE" --price 40 --size M
//!
//! # Bump or drop quantity
//! ss-cli cart adjust --id halo-tee --size M --delta -1
//!
//! # Show the panel against a different free-shipping threshold
//! ss-cli --free-shipping-threshold 150 cart show
//! ```
//!
//! # Commands
//!
//! - `cart show` - Draw the cart panel
//! - `cart add` - Add one unit of a product/size
//! - `cart remove` - Remove a product/size line
//! - `cart adjust` - Change a line's quantity
//! - `cart clear` - Remove the cart from storage

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use silver_saints_core::Price;

mod commands;
mod panel;
mod storage;

use commands::cart::{CartCommandError, CartContext};

#[derive(Parser)]
#[command(name = "ss-cli")]
#[command(author, version, about = "Silver Saints cart tools")]
struct Cli {
    /// Local storage file backing the cart
    #[arg(
        long,
        global = true,
        env = "SILVER_SAINTS_STORAGE",
        default_value = "silver-saints-storage.json"
    )]
    storage: PathBuf,

    /// Cart total at which shipping becomes free
    #[arg(
        long,
        global = true,
        env = "SILVER_SAINTS_FREE_SHIPPING_THRESHOLD",
        default_value_t = 200
    )]
    free_shipping_threshold: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Draw the cart panel
    Show,
    /// Add one unit of a product in a size
    Add {
        /// Catalog product ID
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Unit price in whole dollars
        #[arg(long)]
        price: u64,

        /// Selected size
        #[arg(long)]
        size: Option<String>,
    },
    /// Remove a product/size line
    Remove {
        #[arg(long)]
        id: String,

        #[arg(long)]
        size: String,
    },
    /// Change a line's quantity by a signed amount
    Adjust {
        #[arg(long)]
        id: String,

        #[arg(long)]
        size: String,

        /// Amount to add (negative to decrease)
        #[arg(long, allow_negative_numbers = true)]
        delta: i64,
    },
    /// Remove the cart from storage
    Clear,
}

fn main() -> ExitCode {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so the panel on stdout stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(panel) => {
            #[allow(clippy::print_stdout)]
            {
                print!("{panel}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, CartCommandError> {
    let ctx = CartContext {
        storage: cli.storage,
        free_shipping_threshold: Price::new(cli.free_shipping_threshold),
    };

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Add {
                id,
                name,
                price,
                size,
            } => commands::cart::add(&ctx, &id, &name, price, size.as_deref()),
            CartAction::Remove { id, size } => commands::cart::remove(&ctx, &id, &size),
            CartAction::Adjust { id, size, delta } => {
                commands::cart::adjust(&ctx, &id, &size, delta)
            }
            CartAction::Clear => commands::cart::clear(&ctx),
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_delta_parses() {
        let cli = Cli::try_parse_from([
            "ss-cli", "cart", "adjust", "--id", "halo-tee", "--size", "M", "--delta", "-2",
        ]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Cart {
                action: CartAction::Adjust { delta: -2, .. }
            })
        ));
    }
}
