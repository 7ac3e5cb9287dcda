use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::BrailleError;

/// Politique appliquée aux caractères absents de la table.
///
/// # Example
/// ```
/// use bg_core::config::UnknownPolicy;
/// assert_eq!(UnknownPolicy::default(), UnknownPolicy::Lenient);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum UnknownPolicy {
    /// No filtering: an unknown character fails the whole conversion at resolution.
    Strict,
    /// Unknown characters are dropped before numeral re-encoding, with a warning.
    #[default]
    Lenient,
}

/// Configuration complète du rendu.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use bg_core::config::RenderConfig;
/// let config = RenderConfig::default();
/// assert_eq!(config.width, 10);
/// assert_eq!(config.row_spacing(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RenderConfig {
    // === Layout ===
    /// Caractères braille par rangée.
    pub width: usize,
    /// Marge extérieure, en points.
    pub margin: usize,
    /// Espacement entre points voisins, appliqué aux deux axes.
    pub spacing: usize,
    /// Overrides `spacing` between rows only.
    pub row_spacing: Option<usize>,
    /// Overrides `spacing` between columns only.
    pub col_spacing: Option<usize>,

    // === Rendu ===
    /// Côté en pixels d'un point à l'export.
    pub dot_size: u32,

    // === Texte ===
    pub policy: UnknownPolicy,
    /// Fichier de table JSON. `None` = table embarquée.
    pub table: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 10,
            margin: 1,
            spacing: 1,
            row_spacing: None,
            col_spacing: None,
            dot_size: 10,
            policy: UnknownPolicy::Lenient,
            table: None,
        }
    }
}

/// A value adjusted by [`RenderConfig::clamp_all`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clamped {
    /// Config field name.
    pub field: &'static str,
    /// Value before clamping.
    pub requested: usize,
    /// Value kept.
    pub applied: usize,
}

fn clamp_field(changed: &mut Vec<Clamped>, field: &'static str, value: &mut usize, lo: usize, hi: usize) {
    let applied = (*value).clamp(lo, hi);
    if applied != *value {
        log::warn!("{field} = {} hors limites [{lo}, {hi}], ramené à {applied}", *value);
        changed.push(Clamped {
            field,
            requested: *value,
            applied,
        });
        *value = applied;
    }
}

impl RenderConfig {
    /// Clamp numeric fields to their valid ranges, with a warning for each
    /// adjusted value. Called after TOML deserialization and CLI overrides.
    ///
    /// A zero `width` is left as is: [`RenderConfig::validate`] rejects it.
    pub fn clamp_all(&mut self) -> Vec<Clamped> {
        let mut changed = Vec::new();
        clamp_field(&mut changed, "width", &mut self.width, 0, 256);
        clamp_field(&mut changed, "margin", &mut self.margin, 0, 64);
        clamp_field(&mut changed, "spacing", &mut self.spacing, 0, 64);
        if let Some(ref mut v) = self.row_spacing {
            clamp_field(&mut changed, "row_spacing", v, 0, 64);
        }
        if let Some(ref mut v) = self.col_spacing {
            clamp_field(&mut changed, "col_spacing", v, 0, 64);
        }
        let mut dot_size = self.dot_size as usize;
        clamp_field(&mut changed, "dot_size", &mut dot_size, 1, 64);
        self.dot_size = dot_size as u32;
        changed
    }

    /// Reject values no clamp can repair.
    ///
    /// # Errors
    /// Returns [`BrailleError::InvalidWidth`] if `width` is zero.
    pub fn validate(&self) -> Result<(), BrailleError> {
        if self.width == 0 {
            return Err(BrailleError::InvalidWidth(self.width));
        }
        Ok(())
    }

    /// Effective spacing between rows.
    #[must_use]
    pub fn row_spacing(&self) -> usize {
        self.row_spacing.unwrap_or(self.spacing)
    }

    /// Effective spacing between columns.
    #[must_use]
    pub fn col_spacing(&self) -> usize {
        self.col_spacing.unwrap_or(self.spacing)
    }
}

/// Structure TOML intermédiaire, toutes sections optionnelles.
#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    layout: LayoutSection,
    render: RenderSection,
    text: TextSection,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct LayoutSection {
    width: Option<usize>,
    margin: Option<usize>,
    spacing: Option<usize>,
    row_spacing: Option<usize>,
    col_spacing: Option<usize>,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct RenderSection {
    dot_size: Option<u32>,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct TextSection {
    policy: Option<UnknownPolicy>,
    table: Option<PathBuf>,
}

/// Parse a TOML document and merge it over the defaults.
///
/// # Errors
/// Returns an error if the document is not valid TOML, has unknown keys, or
/// sets a zero width.
///
/// # Example
/// ```
/// use bg_core::config::parse_config;
/// let config = parse_config("[layout]\nwidth = 4\n").unwrap();
/// assert_eq!(config.width, 4);
/// assert_eq!(config.margin, 1);
/// ```
pub fn parse_config(content: &str) -> Result<RenderConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = RenderConfig::default();

    let l = file.layout;
    if let Some(v) = l.width {
        config.width = v;
    }
    if let Some(v) = l.margin {
        config.margin = v;
    }
    if let Some(v) = l.spacing {
        config.spacing = v;
    }
    if l.row_spacing.is_some() {
        config.row_spacing = l.row_spacing;
    }
    if l.col_spacing.is_some() {
        config.col_spacing = l.col_spacing;
    }

    if let Some(v) = file.render.dot_size {
        config.dot_size = v;
    }

    if let Some(v) = file.text.policy {
        config.policy = v;
    }
    if file.text.table.is_some() {
        config.table = file.text.table;
    }

    config.clamp_all();
    config.validate()?;
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use bg_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Configuration invalide : {}", path.display()))
}
