mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so reports on stdout stay machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Rank(args) => commands::rank::run(&args),
        Commands::Sections { file, config } => {
            commands::sections::run(&file, config.as_deref())
        }
        Commands::Keywords { text, top } => commands::keywords::run(&text, top),
        Commands::Version => commands::version::run(),
    }
}
