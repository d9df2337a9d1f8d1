//! Library section subcommands (videos, notes, study, quiz).
//!
//! Every section shares the same verbs:
//! - `list`: saved items, newest first
//! - `new`: run the create workflow and save the result
//! - `show`: render one saved item
//! - `delete`: remove a saved item after confirmation

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use tracing::{error, info};

use crate::adapters::GeminiAdapter;
use crate::domain::{ContentKind, FormInput, Payload, QuizDefinition, QuizResult, SavedItem};
use crate::library::{
    workflow, AutoConfirm, Confirmation, Draft, LibraryController, StdinConfirmation,
};
use crate::quiz::{Advance, AnswerOutcome, QuizSession};
use crate::store::CollectionStore;

use super::{open_store, section_command};

/// Shown when generation fails; details go to the log
const GENERATION_FAILED: &str =
    "Failed to generate content. Check your API key or connection and try again.";

/// Subcommands shared by every library section
#[derive(Subcommand, Debug)]
pub enum SectionCommands {
    /// List saved items, newest first
    List,

    /// Generate a new item and save it
    New {
        /// Topic to generate content for
        #[arg(short, long)]
        topic: String,

        /// Class or grade the content is for
        #[arg(short, long = "class", default_value = "")]
        class_name: String,

        /// Extra instructions for the generator
        #[arg(short, long, default_value = "")]
        instructions: String,

        /// Quiz difficulty (quiz only; defaults to the configured level)
        #[arg(short, long)]
        level: Option<String>,
    },

    /// Show a saved item
    Show {
        /// Item ID (a unique prefix is enough)
        id: String,
    },

    /// Delete a saved item
    Delete {
        /// Item ID (a unique prefix is enough)
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Execute a section subcommand
pub async fn execute(kind: ContentKind, command: SectionCommands) -> Result<()> {
    let collections = CollectionStore::new(open_store()?);

    match command {
        SectionCommands::List => {
            let library = LibraryController::new(kind, collections, Arc::new(StdinConfirmation));
            list_items(&library);
            Ok(())
        }
        SectionCommands::New {
            topic,
            class_name,
            instructions,
            level,
        } => {
            if topic.trim().is_empty() {
                anyhow::bail!("Topic must not be empty");
            }

            let level = match level {
                Some(level) => level,
                None => crate::config::config()?.default_quiz_level.clone(),
            };
            let input = FormInput::new(topic.trim(), class_name.trim())
                .with_instructions(instructions)
                .with_level(level);

            let mut library = LibraryController::new(kind, collections, Arc::new(StdinConfirmation));
            create_item(&mut library, &input).await
        }
        SectionCommands::Show { id } => {
            let mut library = LibraryController::new(kind, collections, Arc::new(StdinConfirmation));
            let id = library.find(&id)?.id;
            let item = library.open(&id)?;
            println!("{}", workflow::render(item));
            Ok(())
        }
        SectionCommands::Delete { id, yes } => {
            let confirmation: Arc<dyn Confirmation> = if yes {
                Arc::new(AutoConfirm(true))
            } else {
                Arc::new(StdinConfirmation)
            };

            let mut library = LibraryController::new(kind, collections, confirmation);
            let item = library.find(&id)?;
            let (id, topic) = (item.id, item.topic.clone());

            if library.delete(&id)? {
                eprintln!("🗑️  Deleted \"{}\" ({})", topic, short_id(&id.to_string()));
            } else {
                eprintln!("Kept \"{}\"", topic);
            }
            Ok(())
        }
    }
}

/// Print the saved items as a table
fn list_items(library: &LibraryController) {
    let kind = library.kind();

    if library.items().is_empty() {
        println!(
            "No {} yet. Use 'skoolify {} new --topic <topic>' to create one.",
            kind.title().to_lowercase(),
            section_command(kind)
        );
        return;
    }

    println!("{:<10} {:<14} {:<16} {:<40}", "ID", "DATE", "CLASS", "TOPIC");
    println!("{}", "-".repeat(80));

    for item in library.items() {
        println!(
            "{:<10} {:<14} {:<16} {:<40}",
            short_id(&item.id.to_string()),
            item.created_at.format("%b %-d, %Y").to_string(),
            truncate(&item.class_name, 15),
            summary(item)
        );
    }

    println!("\nTotal: {} items", library.items().len());
}

/// Topic plus a short kind-specific detail
fn summary(item: &SavedItem) -> String {
    let detail = match &item.payload {
        Payload::VideoCollection(videos) => Some(format!("{} videos", videos.len())),
        Payload::QuizResult(result) => Some(format!("{}%", result.percentage())),
        Payload::Note(_) | Payload::StudyPlan(_) => None,
    };

    match detail {
        Some(detail) => format!("{} ({})", truncate(&item.topic, 30), detail),
        None => truncate(&item.topic, 40),
    }
}

/// Run the create workflow and save the outcome
async fn create_item(library: &mut LibraryController, input: &FormInput) -> Result<()> {
    let kind = library.kind();
    library.begin_create()?;

    let generator = match GeminiAdapter::from_config() {
        Ok(generator) => generator,
        Err(e) => {
            library.cancel()?;
            return Err(e);
        }
    };

    eprintln!("🔮 {}: {}", kind.create_label(), input.topic);

    let draft = match kind.draft(&generator, input).await {
        Ok(draft) => draft,
        Err(e) => {
            error!(%kind, topic = %input.topic, error = %e, "Generation failed");
            library.cancel()?;
            anyhow::bail!(GENERATION_FAILED);
        }
    };

    let (payload, saved_input) = match draft {
        Draft::Ready(payload) => (payload, input.clone()),
        Draft::Quiz(quiz) => {
            let topic = quiz.topic.clone();
            match take_quiz(quiz)? {
                Some(result) => (
                    Payload::QuizResult(result),
                    FormInput::new(topic, input.class_name.clone()),
                ),
                None => {
                    info!("Quiz abandoned");
                    library.cancel()?;
                    eprintln!("Quiz abandoned; nothing was saved.");
                    return Ok(());
                }
            }
        }
    };

    let item = library.save(payload, &saved_input)?;
    eprintln!("✅ Saved ({})\n", short_id(&item.id.to_string()));
    println!("{}", workflow::render(&item));

    Ok(())
}

/// Take a quiz interactively on stdin.
///
/// Returns `None` if the learner quits or stdin closes before the end.
fn take_quiz(quiz: QuizDefinition) -> Result<Option<QuizResult>> {
    let mut session = QuizSession::new(quiz)?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("\n{}", session.quiz().topic);

    loop {
        let question = session.current_question().clone();
        println!(
            "\nQuestion {} of {}",
            session.current_index() + 1,
            session.total_questions()
        );
        println!("{}", question.prompt);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }

        let choice = loop {
            eprint!("Your answer (1-{}, q to quit): ", question.options.len());
            io::stderr().flush()?;

            let Some(line) = lines.next() else {
                return Ok(None);
            };
            let line = line?;
            let line = line.trim();

            if line.eq_ignore_ascii_case("q") {
                return Ok(None);
            }

            match line.parse::<usize>() {
                Ok(n) if (1..=question.options.len()).contains(&n) => {
                    break question.options[n - 1].clone();
                }
                _ => eprintln!(
                    "Please enter a number between 1 and {}",
                    question.options.len()
                ),
            }
        };

        if let AnswerOutcome::Recorded { correct } = session.answer(&choice)? {
            if correct {
                println!("✅ Correct!");
            } else {
                println!("❌ Incorrect. The answer is: {}", question.correct_option);
            }
            if !question.explanation.is_empty() {
                println!("   {}", question.explanation);
            }
        }

        if let Advance::Finished(result) = session.advance()? {
            return Ok(Some(result));
        }
    }
}

fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
