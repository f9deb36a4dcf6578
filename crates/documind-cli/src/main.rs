use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use documind::telemetry::{self, LogFormat};
use documind::{load_config, Config, Coordinator, PipelineRun, Session, SummaryResult};

#[derive(Parser)]
#[command(name = "documind")]
#[command(about = "Run a document through the DocuMind analysis pipeline")]
#[command(version)]
struct Cli {
    /// JSON config file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Skip the remote services and use fallback data only
    #[arg(long)]
    offline: bool,

    /// Plain-text document to process
    document: PathBuf,

    /// Question to ask once the document is processed (repeatable)
    #[arg(short = 'q', long = "question")]
    questions: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init_logging(if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    });

    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if cli.offline {
        config.offline = true;
    }

    let document = tokio::fs::read_to_string(&cli.document)
        .await
        .with_context(|| format!("Failed to read document {}", cli.document.display()))?;

    info!(
        analysis = %config.analysis.url,
        qa = %config.qa.url,
        offline = config.offline,
        "Starting DocuMind pipeline"
    );

    let mut session = Session::new(Coordinator::from_config(&config)?);
    let run = session.process(&document).await?;
    print_run(run)?;

    for pair in session.ask_all(cli.questions.as_slice()).await {
        println!("\nQ: {}\nA: {}", pair.question, pair.answer);
    }

    Ok(())
}

fn print_run(run: &PipelineRun) -> Result<()> {
    println!("Run {}", run.id());
    println!("\n== Log ==");
    for entry in run.log_entries() {
        println!(
            "{} [{}] {}",
            entry.timestamp.format("%H:%M:%S%.3f"),
            entry.stage,
            entry.message
        );
    }

    if let Some(analysis) = run.analysis() {
        println!("\n== Analysis ({}) ==", analysis.source);
        println!("{}", serde_json::to_string_pretty(&analysis.value)?);
    }

    if let Some(summary) = run.summary() {
        println!("\n== Summary ({}) ==", summary.source);
        match &summary.value {
            SummaryResult::Bullets(points) => {
                for point in points {
                    println!("- {}", point);
                }
            }
            SummaryResult::Text(text) => println!("{}", text),
        }
    }

    Ok(())
}
