use anyhow::{Context, Result};
use clap::Parser;
use dashboard::{Command, DashboardState, DashboardView, Message};
use record_store::{MemoryStore, SentimentQuery, SentimentSource};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use trendsense_core::{CoreError, DashboardConfig, ErrorReporter};

const DEFAULT_LOG_FILTER: &str = "trendsense=info,aggregator=info,dashboard=info,record_store=info";

/// Summarize tech-topic sentiment from a JSON dump of analyzed articles.
#[derive(Debug, Parser)]
#[command(name = "trendsense", version, about)]
struct Cli {
    /// TOML file with dashboard settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only include records for this keyword
    #[arg(long)]
    keyword: Option<String>,

    /// Only include records from this source (e.g. reddit, news)
    #[arg(long)]
    source: Option<String>,

    /// First day to include, YYYY-MM-DD
    #[arg(long)]
    start: Option<String>,

    /// Last day to include, YYYY-MM-DD
    #[arg(long)]
    end: Option<String>,

    /// Look back this many days from today
    #[arg(long)]
    days: Option<u32>,

    /// Number of keywords in the top and bottom rankings
    #[arg(long)]
    top: Option<usize>,

    /// Print the view as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Records as a JSON array or an object with a `data` array
    records: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("Starting TrendSense");

    let config = load_config(&cli)?;
    let view = match build_view(&cli, config) {
        Ok(view) => view,
        Err(e) => {
            ErrorReporter::new().report_error(&e);
            return Err(e).context("failed to build the dashboard");
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&view);
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    config = config
        .apply_env_overrides()
        .context("invalid environment override")?;

    if let Some(top) = cli.top {
        config.top_n = top;
    }
    Ok(config)
}

fn build_view(cli: &Cli, config: DashboardConfig) -> Result<DashboardView, CoreError> {
    let file = open_records(&cli.records)?;
    let store = MemoryStore::from_reader(BufReader::new(file), config.default_range_days)?;

    let mut state = DashboardState::new(config);
    let mut command = state.initial_command();
    for message in filter_messages(cli) {
        let next = state.update(message)?;
        if next != Command::None {
            command = next;
        }
    }

    if let Command::Refresh {
        generation,
        filters,
    } = command
    {
        tracing::info!("Querying records for {:?}", filters);
        let records = store.sentiments(&SentimentQuery::from_filter(&filters))?;
        state.update(Message::RecordsLoaded {
            generation,
            records,
        })?;
    }

    let overall = store.stats(None)?;
    state.view(overall)
}

fn open_records(path: &Path) -> Result<File, CoreError> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CoreError::NotFound {
            resource: path.display().to_string(),
        },
        _ => CoreError::Io(e),
    })
}

fn filter_messages(cli: &Cli) -> Vec<Message> {
    let mut messages = Vec::new();
    if let Some(days) = cli.days {
        messages.push(Message::QuickRange(days));
    }
    if let Some(keyword) = &cli.keyword {
        messages.push(Message::SetKeyword(keyword.clone()));
    }
    if let Some(source) = &cli.source {
        messages.push(Message::SetSource(source.clone()));
    }
    // Clear both bounds first so the new pair is checked against itself
    // rather than against the default window.
    if cli.start.is_some() || cli.end.is_some() {
        messages.push(Message::SetStartDate(String::new()));
        messages.push(Message::SetEndDate(String::new()));
        if let Some(end) = &cli.end {
            messages.push(Message::SetEndDate(end.clone()));
        }
        if let Some(start) = &cli.start {
            messages.push(Message::SetStartDate(start.clone()));
        }
    }
    messages
}

fn print_view(view: &DashboardView) {
    for card in &view.cards {
        let subtitle = card.subtitle.as_deref().unwrap_or("");
        match &card.sentiment {
            Some(badge) => println!(
                "{:<18} {:>8}  {} ({}, {})",
                card.title, card.value, subtitle, badge.label, badge.score
            ),
            None => println!("{:<18} {:>8}  {}", card.title, card.value, subtitle),
        }
    }

    if !view.has_data() {
        println!();
        println!("No data available for the selected filters.");
        return;
    }

    println!();
    println!("Sentiment trend");
    for row in &view.trend {
        println!(
            "  {:<13} {:>6}  {:>4} articles  {}",
            row.display_date, row.score, row.article_count, row.keyword_label
        );
    }

    println!();
    println!("Most positive keywords");
    for row in &view.top_keywords {
        println!("  {:<16} {:>6}  ({})", row.keyword, row.score, row.article_count);
    }

    println!();
    println!("Most negative keywords");
    for row in &view.bottom_keywords {
        println!("  {:<16} {:>6}  ({})", row.keyword, row.score, row.article_count);
    }

    println!();
    println!("Recent articles");
    for row in &view.recent {
        println!(
            "  {:<13} {:>6}  [{}] {}",
            row.display_date, row.score, row.source, row.title
        );
    }
}
