use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use lectura_common::{ModelSet, Settings};
use lectura_document::{Analyzer, DocumentReport, EntityReport, SummaryReport};
use log::info;

/// Summarize a PDF and list the people, places and dates it mentions.
#[derive(Debug, Parser)]
#[command(name = "lectura", version)]
struct Cli {
    /// PDF file to read
    pdf: PathBuf,

    /// Generate a summary of the beginning of the document
    #[arg(long)]
    summary: bool,

    /// List named entities found in the beginning of the document
    #[arg(long)]
    entities: bool,

    /// Print one JSON object instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, serde::Serialize)]
struct JsonReport {
    document: DocumentReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<SummaryReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entities: Option<EntityReport>,
}

fn spinner(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    // Models are only loaded when an inference step was asked for.
    let models = if cli.summary || cli.entities {
        let bar = spinner("Loading models...");
        let models = ModelSet::load(&settings).await;
        bar.finish_and_clear();
        models?
    } else {
        ModelSet::unloaded()
    };
    let analyzer = Analyzer::new(Arc::new(models), settings.limits, settings.summary);

    // Extract
    let bar = spinner("Extracting text from the PDF...");
    let ingested = analyzer.ingest_path(&cli.pdf).await;
    bar.finish_and_clear();
    let (text, document) =
        ingested.with_context(|| format!("Failed to extract text from {}", cli.pdf.display()))?;
    info!("{} page(s), {} characters", document.page_count, document.char_count);

    // Summary and entities are independent, each from its own prefix.
    let summary = if cli.summary {
        let bar = spinner("Generating summary...");
        let report = analyzer.summarize(&text).await;
        bar.finish_and_clear();
        Some(report?)
    } else {
        None
    };

    let entities = if cli.entities {
        let bar = spinner("Analyzing entities...");
        let report = analyzer.recognize(&text).await;
        bar.finish_and_clear();
        Some(report?)
    } else {
        None
    };

    if cli.json {
        let report = JsonReport {
            document,
            summary,
            entities,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", style("✅ Text extracted successfully.").green());
    println!();
    println!("{}", style("📄 Extracted text excerpt").bold());
    println!("{}", document.excerpt);

    if let Some(summary) = summary {
        println!();
        println!("{}", style("🧠 Summary").bold());
        println!("{}", summary.summary);
    }

    if let Some(entities) = entities {
        println!();
        println!("{}", style("🏷️ Entities found").bold());
        for row in &entities.entities {
            println!("{}", row.line);
        }
    }

    Ok(())
}
