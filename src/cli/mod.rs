//! Command-line interface for skoolify.
//!
//! One subcommand per section: research chat plus the four content
//! libraries (videos, notes, study plans, quizzes), and a couple of
//! diagnostics.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::{ContentGenerator, GeminiAdapter};
use crate::config::{self, paths};
use crate::domain::ContentKind;
use crate::store::{FileStore, KeyValueStore};

pub mod research;
pub mod section;

/// skoolify - AI study assistant for teachers and students
#[derive(Parser, Debug)]
#[command(name = "skoolify")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the research assistant and browse the conversation
    Research {
        #[command(subcommand)]
        command: research::ResearchCommands,
    },

    /// Curated video collections
    Videos {
        #[command(subcommand)]
        command: section::SectionCommands,
    },

    /// Lesson notes
    Notes {
        #[command(subcommand)]
        command: section::SectionCommands,
    },

    /// Study plans
    Study {
        #[command(subcommand)]
        command: section::SectionCommands,
    },

    /// Generated quizzes and their results
    Quiz {
        #[command(subcommand)]
        command: section::SectionCommands,
    },

    /// Show resolved configuration (debug)
    Config,

    /// Check that the Gemini API is reachable with the configured key
    Health,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Research { command } => research::execute(command).await,
            Commands::Videos { command } => {
                section::execute(ContentKind::VideoCollection, command).await
            }
            Commands::Notes { command } => section::execute(ContentKind::Note, command).await,
            Commands::Study { command } => {
                section::execute(ContentKind::StudyPlan, command).await
            }
            Commands::Quiz { command } => {
                section::execute(ContentKind::QuizResult, command).await
            }
            Commands::Config => show_config().await,
            Commands::Health => health().await,
        }
    }
}

/// Subcommand name of a section
pub(crate) fn section_command(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::VideoCollection => "videos",
        ContentKind::Note => "notes",
        ContentKind::StudyPlan => "study",
        ContentKind::QuizResult => "quiz",
    }
}

/// Open the configured file store behind the key-value port
pub(crate) fn open_store() -> Result<Arc<dyn KeyValueStore>> {
    let store = FileStore::open_default().context("Failed to open the local store")?;
    Ok(Arc::new(store))
}

/// Show the resolved configuration (for debugging)
async fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("==============================================================");
    println!("  Skoolify Configuration");
    println!("==============================================================");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:   {}", cfg.home.display());
    println!("  Store:  {}", cfg.store.display());
    println!();
    println!("Collections:");
    for kind in ContentKind::ALL {
        println!(
            "  {:<18} {}",
            kind.title(),
            paths::collection_file(&cfg.store, kind.storage_key()).display()
        );
    }
    println!(
        "  {:<18} {}",
        "Research chat",
        paths::collection_file(&cfg.store, paths::RESEARCH_CHAT_KEY).display()
    );
    println!();
    println!("Gemini:");
    println!(
        "  API key:          {}",
        if cfg.gemini.api_key.is_some() {
            "(set)"
        } else {
            "(missing - set GEMINI_API_KEY)"
        }
    );
    println!("  Base URL:         {}", cfg.gemini.base_url);
    println!("  Search model:     {}", cfg.gemini.search_model);
    println!("  Reasoning model:  {}", cfg.gemini.reasoning_model);
    println!("  Quiz model:       {}", cfg.gemini.quiz_model);
    println!("  Timeout:          {}s", cfg.gemini.request_timeout_seconds);
    println!();
    println!("Quiz:");
    println!("  Default level:    {}", cfg.default_quiz_level);

    Ok(())
}

/// Ping the backend
async fn health() -> Result<()> {
    let generator = GeminiAdapter::from_config()?;
    generator
        .health_check()
        .await
        .with_context(|| format!("{} is not reachable", generator.name()))?;

    eprintln!("✅ {} is reachable", generator.name());
    Ok(())
}
