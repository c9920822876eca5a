//! Currency command - resolve the currency code found in a text.

use clap::Args;
use console::style;
use tracing::debug;

use monparse_core::{Extractor, MonparseError};

/// Arguments for the currency command.
#[derive(Args)]
pub struct CurrencyArgs {
    /// Raw currency text (e.g. "US$", "грн.")
    #[arg(required = true)]
    text: String,

    /// Code printed when no single currency is found (overrides config)
    #[arg(long)]
    default: Option<String>,

    /// List the competing codes when the text is ambiguous
    #[arg(long)]
    explain: bool,
}

pub async fn run(args: CurrencyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let resolver = config.currency_resolver()?;
    let default = args.default.or(config.currency.default);

    debug!("Resolving currency {:?}", args.text);

    match resolver.extract(args.text.as_str()) {
        Ok(code) => println!("{}", code),
        Err(MonparseError::AmbiguousCurrency { codes, .. }) if args.explain => {
            eprintln!(
                "{} Ambiguous currency, candidates: {}",
                style("!").yellow(),
                codes.join(", ")
            );
            match default {
                Some(default) => println!("{}", default),
                None => anyhow::bail!("More than one currency code matches {:?}", args.text),
            }
        }
        Err(e) if e.is_recoverable() && default.is_some() => {
            println!("{}", default.unwrap_or_default())
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
