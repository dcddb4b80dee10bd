use std::path::Path;

use clap::Parser;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use legal_indexer::{ensure_ingested, Dependencies, IndexerError, Settings};
use legal_indexer_ingest::{DocumentMetadata, Orchestrator};
use legal_indexer_shared::SearchQuery;

mod cli;

use cli::{Cli, Commands};

/// Logs go to stderr so stdout carries only command output.
/// `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), IndexerError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn ingest(
    orchestrator: &Orchestrator,
    path: &Path,
    metadata: DocumentMetadata,
) -> Result<(), IndexerError> {
    if tokio::fs::metadata(path).await?.is_dir() {
        let summary = orchestrator.ingest_directory(path).await?;
        info!(%summary, "Ingestion finished");
        print_json(&summary)
    } else {
        let outcome = orchestrator.ingest_file(path, metadata).await;
        print_json(&outcome)?;
        ensure_ingested(&outcome)
    }
}

async fn run(command: Commands, orchestrator: &Orchestrator) -> Result<(), IndexerError> {
    match command {
        Commands::Ingest {
            path,
            summary,
            keywords,
        } => ingest(orchestrator, &path, DocumentMetadata { summary, keywords }).await,
        Commands::Search {
            query,
            limit,
            select,
            filter,
        } => {
            let mut query = SearchQuery::new(query).with_limit(limit);
            if !select.is_empty() {
                query = query.with_select(select);
            }
            if let Some(filter) = filter {
                query = query.with_filter(filter);
            }
            print_json(&orchestrator.search(&query).await)
        }
        Commands::Get { id } => print_json(&orchestrator.get_document(&id).await),
        Commands::Delete { id } => {
            let deleted = orchestrator.delete_document(&id).await?;
            print_json(&json!({ "id": id, "deleted": deleted }))
        }
        Commands::List => print_json(&orchestrator.list_documents().await?),
        Commands::Download { blob_name, dest } => {
            let written = orchestrator.download(&blob_name, &dest).await?;
            print_json(&json!({ "blob_name": blob_name, "path": written }))
        }
        Commands::Stats => print_json(&orchestrator.statistics().await?),
    }
}

#[tokio::main]
async fn main() -> Result<(), IndexerError> {
    let cli = Cli::parse();
    let settings = Settings::from_env();
    init_tracing();

    let dependencies = Dependencies::new(&settings).await?;
    run(cli.command, &dependencies.orchestrator).await
}
