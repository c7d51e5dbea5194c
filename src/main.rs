use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxconv::core::{Currency, log::init_logging};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies using the live rate
    Convert {
        /// Amount to convert, e.g. 100 or 12.50
        amount: String,
        /// Currency the amount is in (USD, EUR, GBP, NOK, RSD)
        from: Currency,
        /// Currency to convert into (USD, EUR, GBP, NOK, RSD)
        to: Currency,
    },
    /// List the supported currencies
    Currencies,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxconv::cli::setup::setup(),
        Some(Commands::Convert { amount, from, to }) => {
            fxconv::run_command(
                fxconv::AppCommand::Convert { amount, from, to },
                cli.config_path.as_deref(),
            )
            .await
        }
        Some(Commands::Currencies) => {
            fxconv::run_command(fxconv::AppCommand::Currencies, cli.config_path.as_deref()).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
