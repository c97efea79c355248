use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bilicmt::commands;
use bilicmt::config::Config;

#[derive(Parser)]
#[command(
    name = "bilicmt",
    version,
    about = "Bilibili comment crawler with word-frequency analysis",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); defaults to the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all comments of a video into a CSV file
    Fetch {
        /// Video page URL (must contain a BV id)
        url: String,

        /// Output CSV path
        #[arg(short, long, default_value = "comments.csv")]
        output: PathBuf,

        /// Maximum number of comment pages to fetch
        #[arg(short, long)]
        max_pages: Option<u32>,

        /// Minimum politeness delay between requests, in milliseconds
        #[arg(long)]
        delay_min_ms: Option<u64>,

        /// Maximum politeness delay between requests, in milliseconds
        #[arg(long)]
        delay_max_ms: Option<u64>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// Deduplicate and segment a comment CSV into word frequencies
    Tokenize {
        /// Input comment CSV (as written by `fetch`)
        input: PathBuf,

        /// Output frequency file (word<TAB>frequency per line)
        #[arg(short, long, default_value = "word_frequency.txt")]
        output: PathBuf,

        /// Stopword file, one word per line
        #[arg(short, long)]
        stopwords: Option<PathBuf>,

        /// Also write the deduplicated CSV to this path
        #[arg(long)]
        processed: Option<PathBuf>,
    },

    /// Print the most frequent words from a frequency file
    Top {
        /// Frequency file (as written by `tokenize`)
        input: PathBuf,

        /// Number of entries to print
        #[arg(short, long, default_value = "20")]
        n: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    let log_format = cli
        .log_format
        .unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&log_format, &config.logging.filter_directives(cli.verbose))?;

    match cli.command {
        Commands::Fetch {
            url,
            output,
            max_pages,
            delay_min_ms,
            delay_max_ms,
            timeout_secs,
        } => {
            if let Some(max_pages) = max_pages {
                config.crawler.max_pages = max_pages;
            }
            if let Some(delay_min_ms) = delay_min_ms {
                config.crawler.delay_min_ms = delay_min_ms;
            }
            if let Some(delay_max_ms) = delay_max_ms {
                config.crawler.delay_max_ms = delay_max_ms;
            }
            if let Some(timeout_secs) = timeout_secs {
                config.crawler.request_timeout_secs = timeout_secs;
            }

            tracing::info!(url = %url, output = %output.display(), "Starting fetch command");
            commands::fetch(config, url, output).await?;
        }

        Commands::Tokenize {
            input,
            output,
            stopwords,
            processed,
        } => {
            tracing::info!(
                input = %input.display(),
                output = %output.display(),
                "Starting tokenize command"
            );
            commands::tokenize(input, output, stopwords, processed)?;
        }

        Commands::Top { input, n } => {
            commands::top(input, n)?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, directives: &str) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::new(directives);

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
