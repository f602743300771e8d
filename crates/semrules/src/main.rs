mod cli;

use anyhow::Context;
use clap::Parser;
use console::style;
use semrules_lib::{Config, SemrulesError};

const EMBEDDINGS_HINT: &str =
    "The model can be downloaded from http://vectors.nlpl.eu/explore/embeddings/en/models/";

fn main() {
    let cli = cli::Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", style("error:").red().bold(), err);
        if let Some(SemrulesError::ModelLoad { .. }) = err.downcast_ref::<SemrulesError>() {
            eprintln!("{}", EMBEDDINGS_HINT);
        }
        std::process::exit(1);
    }
}

fn run(cli: cli::Cli) -> anyhow::Result<()> {
    let config = Config::new(cli.overrides()).context("Failed to resolve configuration")?;
    log::info!("Embeddings: {}", config.model_path().display());
    log::info!("Rule exports: {}", config.rules_dir.display());

    // Nothing touches rules before the embedding is in memory.
    let model = cli::load_model(&config)?;

    match cli.command.unwrap_or(cli::Commands::Browse) {
        cli::Commands::Browse => cli::browse::handle_browse_command(&model, &config, cli.verbose)?,

        cli::Commands::Rank {
            export,
            support,
            confidence,
            max_length,
            alpha,
            filter,
            format,
        } => cli::rank::handle_rank_command(
            &model,
            &config,
            cli::rank::RankOptions {
                export,
                support,
                confidence,
                max_length,
                alpha,
                filter,
                format,
            },
            cli.verbose,
        )?,

        cli::Commands::Coherence { attributes } => {
            cli::coherence::handle_coherence_command(&model, &config, &attributes)?
        }

        cli::Commands::Similarity { word1, word2 } => {
            cli::coherence::handle_similarity_command(&model, &config, &word1, &word2)?
        }
    }

    Ok(())
}
