use std::path::PathBuf;

use bantaba_types::LanguageCode;
use clap::{ArgGroup, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bantaba")]
#[command(about = "Collect and verify word translations for West African languages")]
pub struct Cli {
    /// JSON config file. Environment variables are used when absent
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the `<language>_lang.json` word lists
    #[arg(long, global = true)]
    pub dataset_dir: Option<PathBuf>,

    /// Directory for the local translation store
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Mirror translations to the remote backend
    #[arg(long, global = true)]
    pub backend: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List target languages and their word-list sizes
    Languages,

    /// Pick a word, resolve a candidate and save it for review
    Next {
        language: LanguageCode,
        #[arg(long)]
        category: Option<String>,
    },

    /// Resolve and save the given words
    Resolve {
        language: LanguageCode,
        #[arg(required = true)]
        words: Vec<String>,
        #[arg(long)]
        category: Option<String>,
    },

    /// Record a verdict on a saved translation
    #[command(group(
        ArgGroup::new("verdict")
            .required(true)
            .multiple(false)
            .args(["correct", "corrected_word"])
    ))]
    Verify {
        id: String,
        /// The candidate is correct as shown
        #[arg(long)]
        correct: bool,
        /// Replacement for an incorrect candidate
        #[arg(long)]
        corrected_word: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long = "by", default_value = "user")]
        verified_by: String,
    },

    /// Review progress, overall and per language
    Stats,

    /// Dump every translation and verification as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Import `english,<word>[,category]` lines from a CSV file
    Import {
        language: LanguageCode,
        csv: PathBuf,
    },

    /// Fetch a random translation from the backend
    RemoteRandom { language: LanguageCode },
}
