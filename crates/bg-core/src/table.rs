use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::BrailleError;
use crate::grid::{CELL_COLS, CELL_ROWS, DotCell};

/// Table braille grade 1 (anglais) embarquée dans le binaire.
pub const BUILTIN_TABLE_JSON: &str = include_str!("../assets/braille.json");

/// Chiffres ajoutés à l'alphabet connu (ré-encodés en lettres par le normaliseur).
pub const DIGITS: &str = "0123456789";

/// Immutable lookup table `char → DotCell`.
///
/// Construite une seule fois au démarrage puis passée par référence à chaque
/// étape du pipeline.
///
/// # Example
/// ```
/// use bg_core::table::LookupTable;
/// let table = LookupTable::builtin().unwrap();
/// assert!(table.get('a').is_some());
/// assert!(table.get('^').is_none());
/// assert_eq!(table.blank().raised(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct LookupTable {
    cells: HashMap<char, DotCell>,
    blank: DotCell,
}

impl LookupTable {
    /// Parse a JSON object of `key → [[0|1; 2]; 3]`.
    ///
    /// Single-character keys are validated strictly. Multi-character keys are
    /// not used by the pipeline and are skipped.
    ///
    /// # Errors
    /// - [`BrailleError::InvalidTable`] if the document is not a JSON object.
    /// - [`BrailleError::MalformedCell`] if a single-character entry is not 3×2 of 0/1.
    /// - [`BrailleError::MissingBlank`] if there is no `" "` entry.
    pub fn from_json(json: &str) -> Result<Self, BrailleError> {
        let root: Value =
            serde_json::from_str(json).map_err(|e| BrailleError::InvalidTable(e.to_string()))?;
        let Value::Object(entries) = root else {
            return Err(BrailleError::InvalidTable(
                "la racine doit être un objet".into(),
            ));
        };

        let mut cells = HashMap::with_capacity(entries.len());
        let mut skipped = 0usize;
        for (key, value) in &entries {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                skipped += 1;
                continue;
            };
            cells.insert(ch, parse_cell(key, value)?);
        }
        if skipped > 0 {
            log::debug!("{skipped} clé(s) multi-caractères ignorée(s) dans la table");
        }

        let blank = *cells.get(&' ').ok_or(BrailleError::MissingBlank)?;
        log::debug!("Table chargée : {} cellules", cells.len());
        Ok(Self { cells, blank })
    }

    /// Read and parse a table file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or its content is invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire la table {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Table invalide dans {}", path.display()))
    }

    /// The bundled English grade-1 table.
    ///
    /// # Errors
    /// Only fails if the bundled asset itself is corrupt.
    pub fn builtin() -> Result<Self, BrailleError> {
        Self::from_json(BUILTIN_TABLE_JSON)
    }

    /// Cell for `ch`, if the table has one.
    #[inline]
    #[must_use]
    pub fn get(&self, ch: char) -> Option<&DotCell> {
        self.cells.get(&ch)
    }

    /// `true` if `ch` is a table key.
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.cells.contains_key(&ch)
    }

    /// Cellule du caractère espace, utilisée pour compléter les rangées.
    #[must_use]
    pub fn blank(&self) -> DotCell {
        self.blank
    }

    /// Number of single-character entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` if the table has no single-character entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Known alphabet: digits followed by every table key, sorted.
    #[must_use]
    pub fn alphabet(&self) -> Vec<char> {
        let mut keys: Vec<char> = self.cells.keys().copied().collect();
        keys.sort_unstable();
        DIGITS.chars().chain(keys).collect()
    }

    /// `true` if `ch` survives lenient filtering (a digit or a table key).
    #[inline]
    #[must_use]
    pub fn knows(&self, ch: char) -> bool {
        ch.is_ascii_digit() || self.contains(ch)
    }
}

fn parse_cell(key: &str, value: &Value) -> Result<DotCell, BrailleError> {
    let malformed = |reason: String| BrailleError::MalformedCell {
        key: key.to_string(),
        reason,
    };

    let rows = value
        .as_array()
        .ok_or_else(|| malformed("tableau de rangées attendu".into()))?;
    if rows.len() != CELL_ROWS {
        return Err(malformed(format!(
            "{} rangées au lieu de {CELL_ROWS}",
            rows.len()
        )));
    }

    let mut out = [[0u8; CELL_COLS]; CELL_ROWS];
    for (r, row) in rows.iter().enumerate() {
        let dots = row
            .as_array()
            .ok_or_else(|| malformed(format!("rangée {r} n'est pas un tableau")))?;
        if dots.len() != CELL_COLS {
            return Err(malformed(format!(
                "rangée {r} : {} colonnes au lieu de {CELL_COLS}",
                dots.len()
            )));
        }
        for (c, dot) in dots.iter().enumerate() {
            out[r][c] = match dot.as_u64() {
                Some(0) => 0,
                Some(1) => 1,
                _ => return Err(malformed(format!("valeur {dot} en ({r}, {c})"))),
            };
        }
    }
    Ok(DotCell::from_rows(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_covers_letters_and_marker() {
        let table = LookupTable::builtin().unwrap();
        for ch in 'a'..='z' {
            assert!(table.contains(ch), "lettre {ch} absente");
        }
        assert!(table.contains('#'));
        assert!(table.contains('!'));
        assert_eq!(
            table.get('a'),
            Some(&DotCell::from_rows([[1, 0], [0, 0], [0, 0]]))
        );
    }

    #[test]
    fn multi_char_keys_are_ignored() {
        // 26 letters, space, 8 punctuation marks, number sign; "capital" skipped.
        let table = LookupTable::builtin().unwrap();
        assert_eq!(table.len(), 36);
    }

    #[test]
    fn alphabet_starts_with_digits() {
        let table = LookupTable::from_json(r#"{" ": [[0,0],[0,0],[0,0]], "a": [[1,0],[0,0],[0,0]]}"#)
            .unwrap();
        let alphabet: String = table.alphabet().into_iter().collect();
        assert_eq!(alphabet, "0123456789 a");
        assert!(table.knows('7'));
        assert!(!table.knows('b'));
    }

    #[test]
    fn wrong_row_count_is_rejected() {
        let err = LookupTable::from_json(r#"{" ": [[0,0],[0,0]]}"#).unwrap_err();
        assert!(matches!(err, BrailleError::MalformedCell { ref key, .. } if key == " "));
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        let err =
            LookupTable::from_json(r#"{" ": [[0,0],[0,0],[0,0]], "x": [[1],[0,0],[0,0]]}"#)
                .unwrap_err();
        assert!(matches!(err, BrailleError::MalformedCell { ref key, .. } if key == "x"));
    }

    #[test]
    fn non_binary_value_is_rejected() {
        let err = LookupTable::from_json(r#"{" ": [[0,0],[0,2],[0,0]]}"#).unwrap_err();
        assert!(matches!(err, BrailleError::MalformedCell { .. }));
    }

    #[test]
    fn missing_blank_is_rejected() {
        let err = LookupTable::from_json(r#"{"a": [[1,0],[0,0],[0,0]]}"#).unwrap_err();
        assert_eq!(err, BrailleError::MissingBlank);
    }

    #[test]
    fn non_object_root_is_rejected() {
        let err = LookupTable::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, BrailleError::InvalidTable(_)));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{" ": [[0,0],[0,0],[0,0]], "z": [[1,0],[0,1],[1,1]]}}"#).unwrap();
        let table = LookupTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn load_missing_file_fails() {
        assert!(LookupTable::load(Path::new("/nonexistent/braille.json")).is_err());
    }
}
