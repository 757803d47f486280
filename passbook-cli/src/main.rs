use anyhow::{Context, Result, bail};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use passbook_core::{StatementPeriod, YearContext};
use passbook_ingest::{BankHint, ParseOptions, StatementParser, header_of, recognize};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;

mod config;
mod state;
mod statement;

#[derive(Parser, Debug)]
#[command(name = "passbook", version, about = "Rebuild bank statement transactions from extracted page text")]
struct Cli {
    /// Log debug output (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse statements and print their transactions as JSON
    Parse {
        /// Dialect id, or "auto" (default: from config)
        #[arg(long)]
        bank: Option<String>,

        /// Year for rows that print day and month only
        #[arg(long)]
        year: Option<i32>,

        /// Statement closing period, YYYY-MM
        #[arg(long)]
        period: Option<StatementPeriod>,

        /// Balance-delta tolerance (default: from config)
        #[arg(long)]
        epsilon: Option<Decimal>,

        #[arg(long)]
        pretty: bool,

        /// One statement per file (.txt pages split on form feed, or .json words)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the dialect recognized from a statement's header
    Detect { file: PathBuf },

    /// List built-in dialects in detection priority order
    Dialects,

    /// Write ~/.passbook/config.toml with defaults
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Parse {
            bank,
            year,
            period,
            epsilon,
            pretty,
            files,
        } => {
            let cfg = config::load_config()?;
            let bank: BankHint = bank.unwrap_or(cfg.parse.bank).parse()?;
            let default_year = year
                .or(cfg.parse.default_year)
                .unwrap_or_else(|| chrono::Local::now().year());
            let options = ParseOptions {
                bank,
                year: YearContext {
                    detected: None,
                    period,
                    default: Some(default_year),
                },
                epsilon: epsilon.unwrap_or(cfg.parse.epsilon),
            };
            let base = options.year;
            let parser = Arc::new(StatementParser::new(options).context("build parser")?);

            let outcomes =
                statement::parse_files(parser, files, base, cfg.parse.y_tolerance).await?;
            for outcome in &outcomes {
                eprintln!(
                    "{}: {} ({} transactions, {} rows dropped, {} diagnostics)",
                    outcome.source,
                    outcome.dialect.unwrap_or("unknown"),
                    outcome.transactions.len(),
                    outcome.dropped_rows(),
                    outcome.diagnostics.len()
                );
            }

            let json = if pretty {
                serde_json::to_string_pretty(&outcomes)?
            } else {
                serde_json::to_string(&outcomes)?
            };
            println!("{json}");
        }

        Command::Detect { file } => {
            if !file.exists() {
                bail!("statement not found: {}", file.display());
            }
            let cfg = config::load_config()?;
            let pages = statement::load_pages(&file, cfg.parse.y_tolerance)?;
            let Some(first) = pages.iter().find(|p| !p.is_blank()) else {
                bail!("{} has no text", file.display());
            };
            let parser = StatementParser::new(ParseOptions::default()).context("build parser")?;
            match recognize(parser.registry(), &header_of(&first.text())) {
                Some(dialect) => println!("{} ({})", dialect.id(), dialect.name()),
                None => println!("unknown"),
            }
        }

        Command::Dialects => {
            let parser = StatementParser::new(ParseOptions::default()).context("build parser")?;
            for dialect in parser.registry().iter() {
                println!(
                    "{:<12} {:<20} {}",
                    dialect.id(),
                    dialect.name(),
                    dialect.spec().signatures.join(", ")
                );
            }
        }

        Command::InitConfig => {
            config::init_config()?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}
