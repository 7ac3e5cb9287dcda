use std::path::Path;

use anyhow::{Context, Result};

/// Lit les lignes à convertir.
///
/// The file, when given, takes precedence over positional text. File lines are
/// trimmed; positional words are joined into a single line.
///
/// # Errors
/// Returns an error if the file cannot be read or contains no lines.
pub fn read_lines(file: Option<&Path>, text: &[String]) -> Result<Vec<String>> {
    let Some(path) = file else {
        return Ok(vec![text.join(" ")]);
    };

    if !text.is_empty() {
        log::warn!("Texte en argument ignoré ; lecture de {}", path.display());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let lines: Vec<String> = content.lines().map(|l| l.trim().to_string()).collect();
    if lines.is_empty() {
        anyhow::bail!("Fichier d'entrée vide : {}", path.display());
    }
    log::info!("{} ligne(s) lue(s) depuis {}", lines.len(), path.display());
    Ok(lines)
}
