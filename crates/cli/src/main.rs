//! baidusearch command-line entry point.
//!
//! Results go to stdout; logging goes to stderr so output stays pipeable.

use anyhow::{Context, Result};
use baidusearch_client::{SearchClient, SearchConfig, SearchOptions, SearchResult};
use baidusearch_core::AppConfig;
use clap::Parser;
use tracing_subscriber::EnvFilter;

const DEFAULT_KEYWORD: &str = "Amazing Coder";

const USAGE_PROMPT: &str = "
baidusearch: not enough arguments
[0]keyword: keyword what you want to search
[1]num_results: number of results (default: 10)
[2]debug: debug switch, 0-close, 1-open (default: 0)

Examples:
  baidusearch NBA
  baidusearch NBA 6
  baidusearch NBA 8 1
";

/// Search Baidu and print numbered results.
#[derive(Parser, Debug)]
#[command(name = "baidusearch")]
#[command(version)]
#[command(about = "Search Baidu from the command line", long_about = None)]
struct Cli {
    /// Keyword to search for (default: "Amazing Coder")
    keyword: Option<String>,

    /// Number of results; unparsable or zero falls back to the default
    #[arg(allow_hyphen_values = true)]
    num_results: Option<String>,

    /// Debug switch: 1 enables diagnostics, anything else disables them
    #[arg(allow_hyphen_values = true)]
    debug: Option<String>,
}

/// What to run after defaults are applied.
#[derive(Debug, PartialEq, Eq)]
struct Invocation {
    keyword: String,
    options: SearchOptions,
    show_prompt: bool,
}

impl Cli {
    fn debug_enabled(&self) -> bool {
        self.debug.as_deref().and_then(parse_leading_int) == Some(1)
    }

    fn invocation(&self, default_count: usize) -> Invocation {
        let show_prompt = self.keyword.is_none();
        let keyword = match self.keyword.as_deref() {
            Some(k) if !k.is_empty() => k.to_string(),
            _ => DEFAULT_KEYWORD.to_string(),
        };

        let num_results = self
            .num_results
            .as_deref()
            .and_then(parse_leading_int)
            .filter(|n| *n > 0)
            .unwrap_or(default_count);

        Invocation { keyword, options: SearchOptions { num_results, debug: self.debug_enabled() }, show_prompt }
    }
}

/// Parse the leading decimal digits of `input`, ignoring surrounding whitespace.
fn parse_leading_int(input: &str) -> Option<usize> {
    let digits: String = input.trim().chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if debug { "baidusearch=info,baidusearch_client=info,baidusearch_core=info" } else { "warn" })
    });

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn print_results(keyword: &str, results: &[SearchResult]) {
    if results.is_empty() {
        println!("start search: [{keyword}] failed or no results found.");
        return;
    }

    println!("\nsearch results: (total[{}] items.)", results.len());
    for result in results {
        println!("{}. {}\n   {}\n   {}\n", result.rank, result.title, result.abstract_text, result.url);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.debug_enabled());

    let config = AppConfig::load().context("failed to load configuration")?;
    tracing::info!(origin = %config.origin, timeout_ms = config.timeout_ms, "configuration loaded");
    let invocation = cli.invocation(config.num_results);

    if invocation.show_prompt {
        println!("{USAGE_PROMPT}");
        println!("Using default keyword: {}", invocation.keyword);
    }

    println!(
        "Start search: [{}], expected number of results:[{}].",
        invocation.keyword, invocation.options.num_results
    );

    let client = SearchClient::new(&SearchConfig::from(&config)).context("failed to build search client")?;
    let results = client
        .search(&invocation.keyword, &invocation.options)
        .await
        .context("Error during search")?;

    print_results(&invocation.keyword, &results);

    Ok(())
}
