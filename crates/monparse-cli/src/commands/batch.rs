//! Batch processing command for text files, one raw value per line.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, warn};

use monparse_core::config::OutputFormat as ConfigFormat;
use monparse_core::{CurrencyResolver, Extractor, OrDefault, PriceNormalizer, Result};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Continue when a file cannot be read
    #[arg(long)]
    continue_on_error: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text lines
    Text,
}

impl From<ConfigFormat> for OutputFormat {
    fn from(format: ConfigFormat) -> Self {
        match format {
            ConfigFormat::Json => OutputFormat::Json,
            ConfigFormat::Csv => OutputFormat::Csv,
            ConfigFormat::Text => OutputFormat::Text,
        }
    }
}

/// Result of processing a single line.
#[derive(Debug, Serialize)]
struct LineResult {
    file: String,
    line: usize,
    text: String,
    price: Option<String>,
    currency: Option<String>,
    error: Option<String>,
}

/// Extractors and fallbacks shared by all lines.
struct LineProcessor {
    normalizer: PriceNormalizer,
    resolver: CurrencyResolver,
    price_default: Option<String>,
    currency_default: Option<String>,
}

impl LineProcessor {
    fn process(&self, file: &str, content: &str) -> Result<Vec<LineResult>> {
        let lines: Vec<(usize, &str)> = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| (i + 1, line))
            .collect();

        let prices = self.normalizer.extract_all(lines.iter().map(|(_, line)| *line));
        let currencies = self.resolver.extract_all(lines.iter().map(|(_, line)| *line));

        let mut results = Vec::with_capacity(lines.len());
        for (((number, text), price), currency) in lines.into_iter().zip(prices).zip(currencies) {
            let price = price.or_default_value(self.price_default.clone());
            let currency = currency.or_default_value(self.currency_default.clone());

            let mut errors = Vec::new();
            let price = match price {
                Ok(price) => Some(price),
                Err(e) if e.is_recoverable() => {
                    errors.push(e.to_string());
                    None
                }
                Err(e) => return Err(e),
            };
            let currency = match currency {
                Ok(code) => Some(code),
                Err(e) if e.is_recoverable() => {
                    errors.push(e.to_string());
                    None
                }
                Err(e) => return Err(e),
            };

            results.push(LineResult {
                file: file.to_string(),
                line: number,
                text: text.to_string(),
                price,
                currency,
                error: (!errors.is_empty()).then(|| errors.join("; ")),
            });
        }

        Ok(results)
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let processor = LineProcessor {
        normalizer: config.price_normalizer(),
        resolver: config.currency_resolver()?,
        price_default: config.price.default.clone(),
        currency_default: config.currency.default.clone(),
    };

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::new();
    let mut failed_files = Vec::new();

    for path in &files {
        let name = path.display().to_string();
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let lines = processor.process(&name, &content)?;
                debug!("{}: {} lines", name, lines.len());
                results.extend(lines);
            }
            Err(e) if args.continue_on_error => {
                warn!("Failed to read {}: {}", name, e);
                failed_files.push((name, e.to_string()));
            }
            Err(e) => {
                error!("Failed to read {}: {}", name, e);
                pb.abandon();
                anyhow::bail!("Processing failed: {}: {}", name, e);
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from(config.output.format));
    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&results)?,
        OutputFormat::Csv => format_csv(&results)?,
        OutputFormat::Text => format_text(&results),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    // Print summary
    let with_price = results.iter().filter(|r| r.price.is_some()).count();
    let with_currency = results.iter().filter(|r| r.currency.is_some()).count();

    eprintln!();
    eprintln!(
        "{} Processed {} lines in {:.2?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} with price, {} with currency",
        style(with_price).green(),
        style(with_currency).green()
    );

    if !failed_files.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for (name, reason) in &failed_files {
            eprintln!("  - {}: {}", name, reason);
        }
    }

    Ok(())
}

fn format_csv(results: &[LineResult]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for result in results {
        wtr.serialize(result)?;
    }
    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(results: &[LineResult]) -> String {
    let mut output = String::new();

    for result in results {
        output.push_str(&format!(
            "{}:{}\t{}\t{}",
            result.file,
            result.line,
            result.price.as_deref().unwrap_or("-"),
            result.currency.as_deref().unwrap_or("-"),
        ));
        if let Some(error) = &result.error {
            output.push_str(&format!("\t{}", error));
        }
        output.push('\n');
    }

    output
}
