//! Price command - normalize the single price found in a text.

use std::str::FromStr;

use clap::Args;
use tracing::debug;

use monparse_core::{BigDecimal, OrDefault};

/// Arguments for the price command.
#[derive(Args)]
pub struct PriceArgs {
    /// Raw price text (e.g. "1.234.567,89 €")
    #[arg(required = true)]
    text: String,

    /// Decimal point of the printed price (overrides config)
    #[arg(short, long)]
    dec_point: Option<String>,

    /// Value printed when no single price is found (overrides config)
    #[arg(long)]
    default: Option<String>,

    /// Print the price as an exact decimal number
    #[arg(long, conflicts_with = "dec_point")]
    decimal: bool,

    /// Also print the matched text, separated by a tab
    #[arg(long, conflicts_with = "decimal")]
    original: bool,
}

pub async fn run(args: PriceArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let mut normalizer = config.price_normalizer();
    if let Some(dec_point) = args.dec_point {
        normalizer = normalizer.with_dec_point(dec_point);
    }
    let default = args.default.or(config.price.default);

    debug!("Normalizing price {:?}", args.text);

    if args.decimal {
        let default = default
            .map(|d| BigDecimal::from_str(&d))
            .transpose()
            .map_err(|e| anyhow::anyhow!("Invalid decimal default: {}", e))?;
        let value = normalizer
            .normalize_decimal(args.text.as_str())
            .or_default_value(default)?;
        println!("{}", value);
        return Ok(());
    }

    if args.original {
        match normalizer.find_price(&args.text) {
            Ok(found) => println!("{}\t{}", found.value, found.original),
            Err(e) if e.is_recoverable() && default.is_some() => {
                println!("{}", default.unwrap_or_default())
            }
            Err(e) => return Err(e.into()),
        }
        return Ok(());
    }

    let value = normalizer
        .normalize(args.text.as_str())
        .or_default_value(default)?;
    println!("{}", value);

    Ok(())
}
