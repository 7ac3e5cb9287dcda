use std::path::PathBuf;

use bg_core::config::{Clamped, RenderConfig, UnknownPolicy};
use bg_core::error::BrailleError;
use clap::Parser;

/// braillegrid — Rend une ligne de texte en image de points braille.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Texte à convertir. Plusieurs mots sont joints par une espace.
    pub text: Vec<String>,

    /// Fichier d'entrée, une ligne de texte par rangée. Prioritaire sur `text`.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Fichier image de sortie (PNG, JPEG, BMP, GIF).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Afficher un aperçu dans le terminal. Implicite sans --output.
    #[arg(long, default_value_t = false)]
    pub show: bool,

    /// Largeur de la grille en caractères braille.
    #[arg(long)]
    pub width: Option<usize>,

    /// Marge extérieure, en points.
    #[arg(long)]
    pub margin: Option<usize>,

    /// Espacement entre points, en points.
    #[arg(long, visible_alias = "spacing")]
    pub padding: Option<usize>,

    /// Taille d'un point en pixels.
    #[arg(long)]
    pub dotsize: Option<u32>,

    /// Échouer sur les caractères inconnus au lieu de les ignorer.
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Table braille JSON. Défaut : table embarquée.
    #[arg(long)]
    pub table: Option<PathBuf>,

    /// Fichier de configuration TOML.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Validate that some input is provided.
    ///
    /// # Errors
    /// Returns an error if neither `--file` nor `text` is given.
    pub fn validate_input(&self) -> anyhow::Result<()> {
        if self.file.is_none() && self.text.is_empty() {
            anyhow::bail!("Aucune entrée. Fournissez un texte ou --file <chemin>.");
        }
        Ok(())
    }

    /// Preview is shown on request, or when there is nowhere else to put the image.
    #[must_use]
    pub fn should_show(&self) -> bool {
        self.show || self.output.is_none()
    }

    /// Apply CLI overrides on top of the file configuration.
    ///
    /// Returns the values that had to be clamped (each one is also logged).
    ///
    /// # Errors
    /// Returns [`BrailleError::InvalidWidth`] for a zero width.
    pub fn apply_overrides(&self, config: &mut RenderConfig) -> Result<Vec<Clamped>, BrailleError> {
        if let Some(v) = self.width {
            config.width = v;
        }
        if let Some(v) = self.margin {
            config.margin = v;
        }
        if let Some(v) = self.padding {
            config.spacing = v;
            config.row_spacing = None;
            config.col_spacing = None;
        }
        if let Some(v) = self.dotsize {
            config.dot_size = v;
        }
        if self.strict {
            config.policy = UnknownPolicy::Strict;
        }
        if let Some(ref path) = self.table {
            config.table = Some(path.clone());
        }
        let changed = config.clamp_all();
        config.validate()?;
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("braillegrid").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_leave_config_untouched() {
        let cli = parse(&["hello"]);
        let mut config = RenderConfig::default();
        assert!(cli.apply_overrides(&mut config).unwrap().is_empty());
        assert_eq!(config, RenderConfig::default());
        assert!(cli.should_show());
    }

    #[test]
    fn overrides_apply() {
        let cli = parse(&[
            "--width", "4", "--margin", "0", "--spacing", "2", "--dotsize", "3", "--strict", "hi",
        ]);
        let mut config = RenderConfig {
            row_spacing: Some(5),
            ..RenderConfig::default()
        };
        cli.apply_overrides(&mut config).unwrap();
        assert_eq!(config.width, 4);
        assert_eq!(config.margin, 0);
        assert_eq!(config.row_spacing(), 2);
        assert_eq!(config.col_spacing(), 2);
        assert_eq!(config.dot_size, 3);
        assert_eq!(config.policy, UnknownPolicy::Strict);
    }

    #[test]
    fn zero_width_is_rejected() {
        let cli = parse(&["--width", "0", "hi"]);
        let mut config = RenderConfig::default();
        assert_eq!(
            cli.apply_overrides(&mut config),
            Err(BrailleError::InvalidWidth(0))
        );
    }

    #[test]
    fn oversized_margin_is_clamped_and_reported() {
        let cli = parse(&["--margin", "500", "hi"]);
        let mut config = RenderConfig::default();
        let changed = cli.apply_overrides(&mut config).unwrap();
        assert_eq!(config.margin, 64);
        assert_eq!(
            changed,
            vec![Clamped {
                field: "margin",
                requested: 500,
                applied: 64
            }]
        );
    }

    #[test]
    fn output_disables_implicit_show() {
        assert!(!parse(&["-o", "out.png", "hi"]).should_show());
        assert!(parse(&["-o", "out.png", "--show", "hi"]).should_show());
    }

    #[test]
    fn missing_input_is_rejected() {
        assert!(parse(&[]).validate_input().is_err());
        assert!(parse(&["-f", "lines.txt"]).validate_input().is_ok());
    }
}
