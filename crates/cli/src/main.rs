use std::str::FromStr;

use anyhow::{Context, bail};
use clap::Parser;
use linkstash_core::{
    CategorizedPage, Classifier, FetchConfig, categorize_page, validate_url,
};
use owo_colors::OwoColorize;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the categorized result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Categorize a web page into a category and tags from the terminal
#[derive(Parser, Debug)]
#[command(name = "linkstash")]
#[command(author = "LinkStash Contributors")]
#[command(version = VERSION)]
#[command(about = "Fetch a URL, extract its metadata, and classify it", long_about = None)]
struct Args {
    /// URL to categorize
    #[arg(value_name = "URL")]
    url: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Fetch timeout in seconds (shared across all retry profiles)
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Skip the LLM and classify with the keyword heuristic only
    #[arg(long)]
    heuristic_only: bool,

    /// Enable progress logging
    #[arg(short, long)]
    verbose: bool,
}

/// Print a styled banner for verbose mode
fn print_banner() {
    eprintln!("\n{} {} {}", "LinkStash".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Categorize web pages from the terminal".dimmed());
    eprintln!();
}

/// Print a styled step message
fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print an info message
fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

fn print_text(page: &CategorizedPage) {
    println!("{}  {}", "Title:".bold(), page.title);
    if let Some(description) = &page.description {
        println!("{}  {}", "About:".bold(), description);
    }
    println!("{}  {}", "Category:".bold(), page.category.to_string().bright_green());
    println!("{}  {}", "Tags:".bold(), page.tags.join(", ").bright_yellow());
    println!("{}  {}", "URL:".bold(), page.url.dimmed());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        print_banner();
    }

    // Reject bad input before any network or key lookup happens.
    if validate_url(&args.url).is_err() {
        bail!("Please enter a valid URL (e.g., https://example.com)");
    }

    let classifier = if args.heuristic_only {
        Classifier::new(None)
    } else {
        let classifier = Classifier::from_env();
        if args.verbose && !classifier.has_llm() {
            print_info("OPENAI_API_KEY not set; falling back to keyword heuristic");
        }
        classifier
    };

    let fetch = FetchConfig { timeout: args.timeout, ..Default::default() };

    if args.verbose {
        print_step(1, 2, &format!("Fetching {}", args.url.bright_white().underline()));
    }

    let page = categorize_page(&args.url, &fetch, &classifier)
        .await
        .context("Failed to categorize URL")?;

    if args.verbose {
        print_step(2, 2, "Writing result");
        eprintln!();
    }

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&page).context("Failed to serialize result")?)
        }
        OutputFormat::Text => print_text(&page),
    }

    Ok(())
}
