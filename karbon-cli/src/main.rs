use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use karbon_core::PolicyKind;
use karbon_ingest::{Bank, StatementParser};
use log::LevelFilter;
use std::path::{Path, PathBuf};

mod config;
mod output;

use config::{Config, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "karbon", version, about = "Parse bank statements (PDF/CSV) into tables")]
struct Cli {
    /// More logging (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (default: $KARBON_HOME/config.toml, else ~/.karbon/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one statement and print the table
    Parse {
        /// Statement file (.pdf, .csv, or .txt for SBI)
        path: PathBuf,

        /// Bank layout to parse with
        #[arg(long, short)]
        bank: Bank,

        /// Output format (overrides config)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Row policy for PDF text: header, marker or transpose
        #[arg(long)]
        policy: Option<PolicyKind>,

        /// Header marker regex for the marker policy
        #[arg(long)]
        marker: Option<String>,

        /// Whitespace run length that separates columns
        #[arg(long)]
        min_gap: Option<usize>,
    },

    /// List supported banks
    Banks,

    /// Config file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Command::Parse {
            path,
            bank,
            format,
            policy,
            marker,
            min_gap,
        } => {
            let mut cfg = config::load_config(cli.config.as_deref())?;
            if let Some(policy) = policy {
                cfg.parse.policy = Some(policy);
            }
            if let Some(marker) = marker {
                cfg.parse.marker = Some(marker);
            }
            if let Some(gap) = min_gap {
                cfg.parse.min_column_gap = gap;
            }
            let format = format.unwrap_or(cfg.output.format);
            parse_statement(&path, bank, cfg, format)?;
        }

        Command::Banks => {
            for bank in Bank::ALL {
                let profile = bank.profile();
                println!(
                    "{:<6} {:<20} policy={}",
                    bank,
                    profile.expected_extensions(),
                    profile.policy.kind()
                );
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                let cfg = config::load_config(cli.config.as_deref())?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn parse_statement(path: &Path, bank: Bank, cfg: Config, format: OutputFormat) -> Result<()> {
    let parser = StatementParser::new(bank).with_options(cfg.parse);
    let report = parser
        .parse_with_report(path)
        .with_context(|| format!("parsing {} as {bank}", path.display()))?;

    log::info!(
        "Parsed {} rows x {} columns from {} ({}, {} pages, {} lines dropped)",
        report.table.len(),
        report.table.columns().len(),
        path.display(),
        report.format,
        report.pages,
        report.dropped_lines
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    output::write_table(&report.table, format, &mut out)
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // already set when running under a test harness
    builder.try_init().ok();
}
