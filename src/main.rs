mod error;
mod parser;
mod record;
mod render;
mod scholar;
mod settings;
mod site;
mod sitemap;
mod snapshot;
mod update;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Utc;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use record::Publication;
use settings::Settings;
use snapshot::SnapshotSource;

#[derive(Parser)]
#[command(name = "folio", about = "Academic portfolio generator with Google Scholar publications")]
struct Cli {
    /// Config file (default: ./folio.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the profile and refresh the publications snapshot
    Update {
        /// Snapshot to write (default: data_file from config)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Scrape the profile and print what was found
    Scrape {
        /// Max rows to display
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Print publications from a snapshot, newest first
    List {
        /// Snapshot path or URL (default: data_file from config)
        #[arg(short, long)]
        source: Option<String>,
        /// Max rows to display
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Render the static site
    Build {
        /// Snapshot path or URL (default: data_file from config)
        #[arg(short, long)]
        source: Option<String>,
        /// Scrape the profile now instead of reading a snapshot
        #[arg(long, conflicts_with = "source")]
        live: bool,
        /// Output directory (default: out_dir from config)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    let client = scholar::client(&settings)?;

    let result = match cli.command {
        Commands::Update { out } => {
            let path = out.unwrap_or_else(|| settings.data_file.clone());
            let pb = spinner("Fetching publications from Google Scholar...")?;
            let outcome = update::run(&client, &settings, &path).await;
            pb.finish_and_clear();
            println!("{}", outcome?);
            Ok(())
        }
        Commands::Scrape { limit } => {
            let pb = spinner("Fetching publications from Google Scholar...")?;
            let fetched = scholar::fetch_profile(&client, &settings).await;
            pb.finish_and_clear();
            let pubs = fetched?;
            if pubs.is_empty() {
                println!("No publications found.");
                return Ok(());
            }
            print_table(&pubs, limit);
            Ok(())
        }
        Commands::List { source, limit } => {
            let source = snapshot_source(source, &settings);
            let pb = snapshot_spinner(&source)?;
            let loaded = snapshot::load(&client, &source).await;
            pb.finish_and_clear();
            let pubs = loaded?;
            if pubs.is_empty() {
                println!("No publications in {}.", source);
                return Ok(());
            }
            print_table(&pubs, limit);
            Ok(())
        }
        Commands::Build { source, live, out } => {
            let loaded = if live {
                let pb = spinner("Fetching publications from Google Scholar...")?;
                let fetched = scholar::fetch_profile(&client, &settings).await;
                pb.finish_and_clear();
                fetched
            } else {
                let source = snapshot_source(source, &settings);
                let pb = snapshot_spinner(&source)?;
                let loaded = snapshot::load(&client, &source).await;
                pb.finish_and_clear();
                loaded
            };

            let listing = render::listing(loaded, &scholar::profile_link(&settings));
            let out_dir = out.unwrap_or_else(|| settings.out_dir.clone());
            let report = site::build(&settings, &listing, &out_dir, Utc::now())?;

            match &listing {
                render::Listing::Publications(_) => println!(
                    "Wrote {} files to {} ({} publications).",
                    report.files.len(),
                    out_dir.display(),
                    report.publications
                ),
                render::Listing::Empty => println!(
                    "Wrote {} files to {} (no publications found).",
                    report.files.len(),
                    out_dir.display()
                ),
                render::Listing::Unavailable { .. } => println!(
                    "Wrote {} files to {} (publications unavailable, linked profile instead).",
                    report.files.len(),
                    out_dir.display()
                ),
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn snapshot_source(source: Option<String>, settings: &Settings) -> SnapshotSource {
    source
        .as_deref()
        .map(SnapshotSource::parse)
        .unwrap_or_else(|| SnapshotSource::File(settings.data_file.clone()))
}

fn spinner(msg: &str) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    Ok(pb)
}

/// Spinner for a remote snapshot; local files load without one.
fn snapshot_spinner(source: &SnapshotSource) -> anyhow::Result<ProgressBar> {
    if source.is_remote() {
        spinner(&format!("Downloading {}...", source))
    } else {
        Ok(ProgressBar::hidden())
    }
}

fn print_table(pubs: &[Publication], limit: Option<usize>) {
    let fragments = render::present(pubs);
    let shown = limit.unwrap_or(fragments.len()).min(fragments.len());

    println!(
        "{:>3} | {:<4} | {:<48} | {:<28} | {:>5}",
        "#", "Year", "Title", "Venue", "Cites"
    );
    println!("{}", "-".repeat(99));

    for (i, f) in fragments.iter().take(shown).enumerate() {
        println!(
            "{:>3} | {:<4} | {:<48} | {:<28} | {:>5}",
            i + 1,
            truncate(&f.year_label, 4),
            truncate(&f.title, 48),
            truncate(f.journal.as_deref().unwrap_or("-"), 28),
            f.citations.as_deref().unwrap_or("-"),
        );
    }

    if shown < fragments.len() {
        println!("\n{} of {} publications", shown, fragments.len());
    } else {
        println!("\n{} publications", fragments.len());
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
