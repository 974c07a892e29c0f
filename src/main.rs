use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser as ClapParser, Subcommand};
use rank_lang::RankingConfig;
use rank_lang::cli::{self, CheckOptions, CliError, SortOptions};
use rank_lang::output::OutputFormat;

#[derive(ClapParser)]
#[command(name = "rank")]
#[command(about = "Rank - filter and rank artifact versions with qualifier rules")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate rules and show how they parse
    Check {
        /// Filter rule, e.g. "PRODUCT:EAP, PRODUCT:RHSSO"
        #[arg(short, long)]
        predicate: Option<String>,

        /// Rank rule, most significant first (repeatable)
        #[arg(short, long = "rank")]
        ranks: Vec<String>,
    },

    /// Filter and sort versions, best first
    Sort {
        /// JSON file with "predicate", "ranks" and "suffix"
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Filter rule, overrides the config file
        #[arg(long)]
        predicate: Option<String>,

        /// Rank rule (repeatable), overrides the config file
        #[arg(short, long = "rank")]
        ranks: Vec<String>,

        /// Rebuild suffix used to compare version strings, e.g. "redhat"
        #[arg(short, long)]
        suffix: Option<String>,

        /// JSON array of versions (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Output format: json or text
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'rank docs' to list categories)
        category: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { predicate, ranks } => run_check(predicate, ranks),
        Commands::Sort {
            config,
            predicate,
            ranks,
            suffix,
            input,
            pretty,
            format,
        } => {
            let overrides = RankingConfig {
                predicate,
                ranks,
                suffix,
            };
            run_sort(config, overrides, input, pretty, format)
        }
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(predicate: Option<String>, ranks: Vec<String>) -> Result<(), CliError> {
    let result = cli::execute_check(&CheckOptions { predicate, ranks })?;
    print!("{}", result.render());
    Ok(())
}

fn run_sort(
    config: Option<PathBuf>,
    overrides: RankingConfig,
    input: Option<String>,
    pretty: bool,
    format: OutputFormat,
) -> Result<(), CliError> {
    let config = match config {
        Some(path) => RankingConfig::from_file(&path)?.merge(overrides),
        None => overrides,
    };

    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let output = cli::execute_sort(&SortOptions {
        config,
        input,
        format,
        pretty,
    })?;
    println!("{}", output.trim_end());
    Ok(())
}
