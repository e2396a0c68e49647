use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "excerpt")]
#[command(version)]
#[command(about = "Persona-driven section ranking for document batches")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank sections of a document batch for a persona and job
    Rank(RankArgs),

    /// Show how one document is segmented
    Sections {
        /// Text file, pages separated by form feeds
        file: PathBuf,

        /// JSON config overrides
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the keyword signature of a text
    Keywords {
        text: String,

        /// Number of terms to show
        #[arg(short, long, default_value_t = 10)]
        top: usize,
    },

    /// Print version information
    Version,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RankArgs {
    /// Request JSON (persona, job_to_be_done, documents, config)
    #[arg(short, long)]
    pub request: Option<PathBuf>,

    /// Directory scanned for .txt documents when the request lists none
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    #[arg(long)]
    pub persona: Option<String>,

    #[arg(long)]
    pub job: Option<String>,

    /// JSON config overrides, replacing the request's config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub max_sections: Option<usize>,

    #[arg(long)]
    pub max_sub_excerpts: Option<usize>,

    #[arg(long)]
    pub timeout_ms: Option<u64>,

    #[arg(long)]
    pub workers: Option<usize>,
}
