use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mdfence_config::Config;
use mdfence_engine::{Diagnostic, ExtractOptions, Extractor, MapRegistry, translate};
use std::{
    fs,
    io::stdout,
    path::{Path, PathBuf},
};

#[derive(Parser)]
#[command(name = "mdfence", version, about = "Lint fenced code blocks in Markdown")]
struct Cli {
    /// Config file (defaults to ~/.config/mdfence/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the synthesized source of every fragment as JSON
    Extract {
        /// Markdown document
        file: PathBuf,
    },
    /// Map diagnostics reported against the fragments back onto the document
    Translate {
        /// Markdown document the diagnostics were produced from
        file: PathBuf,
        /// JSON array holding one array of diagnostics per fragment
        diagnostics: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => {
            let path = Config::expand_path(path);
            Config::load_from_path(&path)?
                .with_context(|| format!("config file '{}' not found", path.display()))?
        }
        None => Config::load()?.unwrap_or_default(),
    };
    log::debug!("config: {config:?}");
    Ok(config)
}

fn read_document(file: &Path) -> Result<(String, String)> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read '{}'", file.display()))?;
    Ok((file.display().to_string(), text))
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let extractor = Extractor::new(ExtractOptions {
        languages: config.languages,
        skip_marked: config.skip_marked,
    });
    let mut registry = MapRegistry::new();

    match cli.command {
        Command::Extract { file } => {
            let (identifier, text) = read_document(&file)?;
            let extraction = extractor.extract(&mut registry, &text, &identifier);
            for failure in &extraction.failures {
                log::warn!("{}: {}", failure.id, failure.error);
            }
            serde_json::to_writer_pretty(stdout(), &extraction.sources)?;
        }
        Command::Translate { file, diagnostics } => {
            let (identifier, text) = read_document(&file)?;
            extractor.extract(&mut registry, &text, &identifier);

            let raw = fs::read_to_string(&diagnostics)
                .with_context(|| format!("failed to read '{}'", diagnostics.display()))?;
            let batches: Vec<Vec<Diagnostic>> = serde_json::from_str(&raw)
                .with_context(|| format!("invalid diagnostics in '{}'", diagnostics.display()))?;

            let translated = translate(&registry, &identifier, &batches)?;
            serde_json::to_writer_pretty(stdout(), &translated)?;
        }
    }
    println!();
    Ok(())
}
