//! List the letter alphabet and its exemplar counts.

use crate::cli::common::{load_databases, CliError, CliResult};
use crate::models::{Letter, LetterType};
use clap::Args;
use serde::Serialize;

/// List letters with their types and exemplar counts
#[derive(Debug, Clone, Args)]
pub struct LettersArgs {
    /// Only letters of this type (Type1..Type6)
    #[arg(long = "type", value_name = "TYPE")]
    pub letter_type: Option<LetterType>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct LetterInfo {
    letter: Letter,
    name: String,
    letter_type: LetterType,
    exemplars: usize,
}

impl LettersArgs {
    /// Execute the letters command
    pub fn execute(&self) -> CliResult<()> {
        let (dataset, _) = load_databases()?;

        let letters: Vec<LetterInfo> = Letter::ALL
            .into_iter()
            .filter(|letter| {
                self.letter_type
                    .map_or(true, |wanted| letter.letter_type() == wanted)
            })
            .map(|letter| LetterInfo {
                letter,
                name: letter.ascii_name(),
                letter_type: letter.letter_type(),
                exemplars: dataset.lookup_exemplars(letter).len(),
            })
            .collect();

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&letters)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            for info in &letters {
                println!(
                    "{:<4} {:<8} {} ({})  {} exemplars",
                    info.letter.symbol(),
                    info.name,
                    info.letter_type,
                    info.letter_type.description(),
                    info.exemplars
                );
            }
        }

        Ok(())
    }
}
