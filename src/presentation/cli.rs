use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::application::ports::{ContentStore, FileLoader};
use crate::application::services::{DocumentAssistant, RetryPolicy, StructureTransformer};
use crate::domain::ContentType;
use crate::infrastructure::llm::create_llm_client;
use crate::infrastructure::storage::ContentStoreFactory;
use crate::infrastructure::text_processing::{FixedCharacterSplitter, PlainTextAdapter};
use crate::presentation::config::Settings;

#[derive(Debug, Parser)]
#[command(name = "lawgenie", version, about = "Summaries, analyses and translations of legal documents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize a document, splitting it when it is too long for one request
    Summarize { file: PathBuf },
    /// Answer a question using only the document text
    Ask { file: PathBuf, question: String },
    /// Highlight differences and similarities between two documents
    Compare { first: PathBuf, second: PathBuf },
    /// Extract and define key legal terms as JSON
    KeyTerms { file: PathBuf },
    /// List potential legal issues as JSON
    Issues { file: PathBuf },
    /// Review each contract clause as JSON
    Clauses { file: PathBuf },
    /// Summary, clauses, risks, obligations and missing elements as JSON
    Analyze { file: PathBuf },
    /// Full legal assessment as JSON
    Comprehensive { file: PathBuf },
    /// Translate a document
    Translate {
        file: PathBuf,
        #[arg(long)]
        lang: String,
    },
    /// Translate every string of a JSON analysis result, keeping its shape
    TranslateAnalysis {
        file: PathBuf,
        #[arg(long)]
        lang: String,
    },
    /// Put a file into permanent storage
    Store {
        path: PathBuf,
        /// Name recorded as the original file name (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
    },
    /// List stored artifacts
    List,
    /// Show metadata of a stored artifact
    Describe { id: String },
    /// Copy a stored artifact to a local path
    Fetch {
        id: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Remove a stored artifact
    Delete { id: String },
}

pub async fn run(command: Command, settings: &Settings) -> anyhow::Result<()> {
    match command {
        Command::Summarize { file } => {
            let text = read_document(&file).await?;
            print_text(&assistant(settings)?.summarize(&text).await?);
        }
        Command::Ask { file, question } => {
            let text = read_document(&file).await?;
            print_text(&assistant(settings)?.ask(&text, &question).await?);
        }
        Command::Compare { first, second } => {
            let first = read_document(&first).await?;
            let second = read_document(&second).await?;
            print_text(&assistant(settings)?.compare(&first, &second).await?);
        }
        Command::KeyTerms { file } => {
            let text = read_document(&file).await?;
            print_json(&assistant(settings)?.extract_key_terms(&text).await?)?;
        }
        Command::Issues { file } => {
            let text = read_document(&file).await?;
            print_json(&assistant(settings)?.identify_legal_issues(&text).await?)?;
        }
        Command::Clauses { file } => {
            let text = read_document(&file).await?;
            print_json(&assistant(settings)?.analyze_clauses(&text).await?)?;
        }
        Command::Analyze { file } => {
            let text = read_document(&file).await?;
            print_json(&assistant(settings)?.analyze_document(&text).await?)?;
        }
        Command::Comprehensive { file } => {
            let text = read_document(&file).await?;
            print_json(&assistant(settings)?.comprehensive_analysis(&text).await?)?;
        }
        Command::Translate { file, lang } => {
            let text = read_document(&file).await?;
            print_text(&assistant(settings)?.translate_text(&text, &lang).await?);
        }
        Command::TranslateAnalysis { file, lang } => {
            let input = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            print_json(&assistant(settings)?.translate_analysis(&input, &lang).await?)?;
        }
        Command::Store { path, name } => {
            let name = match name {
                Some(name) => name,
                None => file_name(&path)?,
            };
            print_json(&content_store(settings)?.store(&path, &name).await?)?;
        }
        Command::List => print_json(&content_store(settings)?.list().await?)?,
        Command::Describe { id } => print_json(&content_store(settings)?.describe(&id).await?)?,
        Command::Fetch { id, out } => {
            let written = content_store(settings)?.fetch(&id, out.as_deref()).await?;
            println!("{}", written.display());
        }
        Command::Delete { id } => {
            content_store(settings)?.delete(&id).await?;
            println!("deleted {id}");
        }
    }
    Ok(())
}

fn assistant(settings: &Settings) -> anyhow::Result<DocumentAssistant> {
    let llm_client = create_llm_client(&settings.llm).context("failed to configure Gemini client")?;
    Ok(DocumentAssistant::new(
        Arc::new(llm_client),
        Arc::new(FixedCharacterSplitter::new(settings.chunking.max_chunk_chars)),
        RetryPolicy::new(
            settings.retry.max_attempts,
            Duration::from_millis(settings.retry.base_delay_ms),
        ),
        StructureTransformer::new(settings.transform.max_concurrency),
    ))
}

fn content_store(settings: &Settings) -> anyhow::Result<Arc<dyn ContentStore>> {
    ContentStoreFactory::create(&settings.storage).context("failed to open content store")
}

async fn read_document(path: &Path) -> anyhow::Result<String> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let content_type = ContentType::from_file_name(&file_name(path)?);
    PlainTextAdapter
        .extract_text(&data, content_type)
        .await
        .with_context(|| format!("failed to extract text from {}", path.display()))
}

fn file_name(path: &Path) -> anyhow::Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .with_context(|| format!("{} has no file name", path.display()))
}

fn print_text(text: &str) {
    println!("{text}");
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
