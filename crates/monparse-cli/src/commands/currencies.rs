//! Currencies command - inspect the currency table.

use clap::{Args, Subcommand};
use console::style;

/// Arguments for the currencies command.
#[derive(Args)]
pub struct CurrenciesArgs {
    #[command(subcommand)]
    command: CurrenciesCommand,
}

#[derive(Subcommand)]
enum CurrenciesCommand {
    /// List all currency codes
    List {
        /// Show decimals and symbols next to each code
        #[arg(short, long)]
        long: bool,
    },

    /// Show decimals and symbols of one currency
    Show {
        /// ISO 4217 currency code (e.g. "UAH")
        code: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(args: CurrenciesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let table = config.currency_table()?;

    match args.command {
        CurrenciesCommand::List { long } => {
            for (code, info) in table.iter() {
                if long {
                    println!("{}\t{}\t{}", code, info.decimals, info.symbols.join(" "));
                } else {
                    println!("{}", code);
                }
            }
        }
        CurrenciesCommand::Show { code, json } => {
            let code = code.to_uppercase();
            let decimals = table.decimals(&code)?;
            let symbols = table.symbols(&code)?;

            if json {
                let value = serde_json::json!({
                    "code": code,
                    "decimals": decimals,
                    "symbols": symbols,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", style(&code).bold());
                println!("  Decimals: {}", decimals);
                println!("  Symbols:  {}", symbols.join(", "));
            }
        }
    }

    Ok(())
}
