//! Research chat subcommands.

use anyhow::Result;
use clap::Subcommand;

use crate::adapters::GeminiAdapter;
use crate::domain::{Message, Role};
use crate::library::{AutoConfirm, Confirmation, StdinConfirmation};
use crate::research::ResearchChat;

use super::open_store;

/// Research-related subcommands
#[derive(Subcommand, Debug)]
pub enum ResearchCommands {
    /// Ask a research question
    Ask {
        /// The question (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Print the conversation so far
    History,

    /// Start a fresh conversation
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Execute a research subcommand
pub async fn execute(command: ResearchCommands) -> Result<()> {
    let mut chat = ResearchChat::load(open_store()?);

    match command {
        ResearchCommands::Ask { text } => {
            let generator = GeminiAdapter::from_config()?;
            match chat.send(&generator, &text.join(" ")).await? {
                Some(reply) => print_message(reply),
                None => eprintln!("Nothing to ask."),
            }
        }
        ResearchCommands::History => {
            for message in chat.messages() {
                print_message(message);
            }
        }
        ResearchCommands::Clear { yes } => {
            let confirmation: Box<dyn Confirmation> = if yes {
                Box::new(AutoConfirm(true))
            } else {
                Box::new(StdinConfirmation)
            };

            if chat.clear(confirmation.as_ref())? {
                eprintln!("Research history cleared.");
            }
        }
    }

    Ok(())
}

fn print_message(message: &Message) {
    let author = match message.role {
        Role::User => "You",
        Role::Ai => "Skoolify AI",
    };

    println!("[{}] {}", message.timestamp.format("%H:%M"), author);
    println!("{}", message.content);

    if !message.sources.is_empty() {
        println!("\nSources:");
        for source in &message.sources {
            println!("  - {} <{}>", source.title, source.uri);
        }
    }
    println!();
}
