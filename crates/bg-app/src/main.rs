use anyhow::{Context, Result};
use bg_braille::pipeline::{Converter, Layout};
use bg_core::config::RenderConfig;
use bg_core::table::LookupTable;
use clap::Parser;

pub mod cli;
pub mod input;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Valider l'entrée avant tout travail
    cli.validate_input()?;

    // 4. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config)?;

    // 5. Table et texte : erreurs fatales avant toute conversion
    let table = load_table(&config)?;
    let lines = input::read_lines(cli.file.as_deref(), &cli.text)?;

    // 6. Conversion
    let converter = Converter::new(&table, Layout::from_config(&config))?;
    let pixels = converter
        .convert_lines(lines.as_slice())
        .context("Conversion en braille impossible")?;

    // 7. Sortie
    if let Some(ref path) = cli.output {
        bg_export::save(&bg_export::upscale(&pixels, config.dot_size), path)?;
    }
    if cli.should_show() {
        print!("{}", bg_export::preview::render(&pixels));
    }

    Ok(())
}

/// Missing config file falls back to defaults; an unreadable one is fatal.
fn resolve_config(cli: &cli::Cli) -> Result<RenderConfig> {
    if cli.config.exists() {
        bg_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(RenderConfig::default())
    }
}

fn load_table(config: &RenderConfig) -> Result<LookupTable> {
    match config.table {
        Some(ref path) => LookupTable::load(path),
        None => LookupTable::builtin().context("Table embarquée corrompue"),
    }
}
