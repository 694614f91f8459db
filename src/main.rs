//! brandlens - headless social listening advisor
//!
//! Collects mentions for a subject, aggregates sentiment and themes, and
//! derives a strategy recommendation plus a sample social post.
//!
//! # Usage
//! ```sh
//! brandlens analyze --subject "Vision Pro"
//! brandlens analyze --subject "Vision Pro" --focus battery --export runs.csv
//! brandlens mentions --subject "Vision Pro"
//! ```
//!
//! # Environment Variables
//! - `SOURCE_MODE` - mention source backend: mock | rss (default: mock)
//! - `RSS_FEED_URL` - feed to poll when SOURCE_MODE=rss
//! - `ENHANCER_ENABLED` - enable the generative rewrite stage (default: false)
//! - `OBSERVABILITY_ENABLED` - log a metrics snapshot per run (default: true)

use anyhow::Result;
use brandlens::application::bootstrap;
use brandlens::application::pipeline::AnalysisReport;
use brandlens::config::{Config, Profile};
use brandlens::domain::feedback::{FeedbackLog, FeedbackVerdict};
use brandlens::infrastructure::export::{CsvRunExporter, RunRecord};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Optional TOML profile overriding strategy options and theme lexicon
    #[arg(long, global = true)]
    profile: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full analysis for a subject
    Analyze {
        /// Product or brand name to analyze
        #[arg(short, long)]
        subject: String,

        /// Revision focus: re-derives the strategy around this theme
        #[arg(long)]
        focus: Option<String>,

        /// Append the flat run record to this CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Collect and print the raw mentions for a subject
    Mentions {
        #[arg(short, long)]
        subject: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Setup logging (stdout only)
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("brandlens {} starting...", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(path) = &cli.profile {
        let profile = Profile::load(path)?;
        config.apply_profile(profile)?;
        info!("Applied profile: {}", path.display());
    }

    match cli.command {
        Commands::Analyze {
            subject,
            focus,
            export,
        } => {
            let pipeline = bootstrap::build_pipeline(&config)?;

            // Feedback lives exactly as long as this CLI session.
            let mut feedback = FeedbackLog::new();

            let report = pipeline.run(&subject, None).await?;
            render_report(&report);

            if let Some(focus) = &focus {
                feedback.append_feedback(
                    report.run_id,
                    &subject,
                    FeedbackVerdict::Revise,
                    Some(focus.clone()),
                );
                let (revised, warnings) = pipeline.revise(&report, focus).await;
                for warning in &warnings {
                    warn!("{}", warning);
                }
                println!("\n--- Revised for focus '{focus}' ---");
                println!("Recommendation: {}", revised.recommendation);
                println!("Suggested post: {}", revised.tweet);
                info!(
                    "Session feedback recorded: {} entries",
                    feedback.entries().len()
                );
            }

            let export_path = export.or_else(|| config.export_csv_path.clone());
            if let Some(path) = export_path {
                let exporter = CsvRunExporter::new(&path);
                exporter.append(&RunRecord::from_report(&report))?;
                info!("Run record appended to {}", path.display());
            }

            if config.observability_enabled {
                let snapshot = pipeline.metrics().snapshot();
                info!("metrics {}", serde_json::to_string(&snapshot)?);
            }
        }
        Commands::Mentions { subject } => {
            let source = bootstrap::build_source(&config);
            let mentions = source.fetch_mentions(&subject).await?;
            println!("\n=== Mentions: {} ({}) ===", subject, mentions.len());
            for mention in &mentions {
                println!("[{}] {}", mention.source, mention.text);
            }
        }
    }

    Ok(())
}

fn render_report(report: &AnalysisReport) {
    println!("\n=== Analysis: {} ({}) ===", report.subject, report.run_id);
    println!(
        "Mentions: {} | Sentiment: {}",
        report.mentions_total,
        report.histogram.summary_line()
    );
    println!("Themes: {}", report.themes.summary_line());
    println!("\nRecommended action:\n  {}", report.strategy.recommendation);
    println!("\nSuggested post:\n  {}", report.strategy.tweet);
    if report.enhanced {
        println!("\n(strategy text was rewritten by the generative enhancer)");
    }
    for warning in &report.warnings {
        warn!("{}", warning);
    }
}
