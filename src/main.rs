use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::warn;

use serp_parser::{normalize_link, parse_page_bytes_at, SearchResultPage};

#[derive(Parser)]
#[command(name = "serp_parser", about = "Extract search results from saved results pages")]
struct Cli {
    /// Reference time for relative timestamps like "3 days ago" (RFC 3339, default: now)
    #[arg(long, global = true, env = "SERP_NOW")]
    now: Option<DateTime<Utc>>,
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one saved page ("-" reads stdin) and print it as JSON
    Parse {
        file: PathBuf,
    },
    /// Parse every .html/.htm file in a directory, one JSON line per page
    Batch {
        dir: PathBuf,
    },
    /// Decode result hrefs to their destination URLs
    Links {
        #[arg(required = true)]
        hrefs: Vec<String>,
    },
}

#[derive(Serialize)]
struct BatchLine<'a> {
    file: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<&'a SearchResultPage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let now = cli.now.unwrap_or_else(Utc::now);

    let result = match cli.command {
        Commands::Parse { file } => {
            let bytes = read_input(&file)?;
            let page = parse_page_bytes_at(&bytes, now)
                .with_context(|| format!("Failed to parse {}", file.display()))?;
            println!("{}", to_json(&page, cli.pretty)?);
            Ok(())
        }
        Commands::Batch { dir } => {
            let files = list_pages(&dir)?;
            if files.is_empty() {
                eprintln!("No .html files in {}", dir.display());
                return Ok(());
            }
            let counts = process_pages(&files, now, cli.pretty)?;
            counts.print();
            Ok(())
        }
        Commands::Links { hrefs } => {
            for href in &hrefs {
                match normalize_link(href) {
                    Some(url) => println!("{} -> {}", href, url),
                    None => println!("{} -> (dropped)", href),
                }
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("Done in {}", format_duration(elapsed));
    }

    result
}

struct BatchCounts {
    pages: usize,
    results: usize,
    failures: usize,
}

impl BatchCounts {
    fn print(&self) {
        eprintln!(
            "Parsed {} pages, {} results, {} failures.",
            self.pages, self.results, self.failures,
        );
    }
}

fn process_pages(files: &[PathBuf], now: DateTime<Utc>, pretty: bool) -> Result<BatchCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    // Each page gets its own tree; nothing is shared between workers.
    let parsed: Vec<_> = files
        .par_iter()
        .map(|path| {
            let page = std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))
                .and_then(|bytes| Ok(parse_page_bytes_at(&bytes, now)?));
            pb.inc(1);
            page
        })
        .collect();
    pb.finish_and_clear();

    let mut counts = BatchCounts {
        pages: 0,
        results: 0,
        failures: 0,
    };

    for (path, page) in files.iter().zip(&parsed) {
        let file = path.to_string_lossy();
        let line = match page {
            Ok(page) => {
                counts.pages += 1;
                counts.results += page.results.len();
                BatchLine { file: &file, page: Some(page), error: None }
            }
            Err(e) => {
                warn!("Skipping {}: {:#}", file, e);
                counts.failures += 1;
                BatchLine { file: &file, page: None, error: Some(format!("{:#}", e)) }
            }
        };
        println!("{}", to_json(&line, pretty)?);
    }

    Ok(counts)
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn list_pages(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
        })
        .collect();
    files.sort();
    Ok(files)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
