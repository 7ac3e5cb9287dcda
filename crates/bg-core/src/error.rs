use thiserror::Error;

/// Errors originating from the braille pipeline and its lookup table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrailleError {
    /// Numeral re-encoding received something other than one ASCII digit.
    #[error("Numéral invalide : {token:?} (attendu un seul chiffre 0-9)")]
    InvalidNumeral {
        /// The offending token.
        token: String,
    },

    /// A normalized character has no entry in the lookup table.
    #[error("Caractère inconnu {ch:?} à l'index {index} (texte normalisé)")]
    UnknownCharacter {
        /// The character that could not be resolved.
        ch: char,
        /// Position in the *normalized* sequence, after lowercasing and
        /// numeral re-encoding. `"ab12$"` normalizes to `"ab#bc$"`, so the
        /// `$` is reported at index 5.
        index: usize,
    },

    /// Failure while converting one line of a multi-line input.
    #[error("Ligne {line} : {source}")]
    InLine {
        /// 1-based line number in the input.
        line: usize,
        /// Error raised by the line's conversion.
        #[source]
        source: Box<BrailleError>,
    },

    /// A lookup table entry is not a 3×2 matrix of 0/1 values.
    #[error("Cellule mal formée pour la clé {key:?} : {reason}")]
    MalformedCell {
        /// Table key of the bad entry.
        key: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The lookup table has no entry for the blank character `' '`.
    #[error("La table ne contient pas de cellule vide (clé \" \")")]
    MissingBlank,

    /// The lookup table document is not a JSON object of cells.
    #[error("Table de correspondance illisible : {0}")]
    InvalidTable(String),

    /// Wrap width must be at least one character.
    #[error("Largeur invalide : {0} (minimum 1)")]
    InvalidWidth(usize),

    /// Grids stacked vertically must share their column count.
    #[error("Largeurs incompatibles : {expected} colonnes attendues, {found} trouvées")]
    WidthMismatch {
        /// Column count of the first grid.
        expected: usize,
        /// Column count of the offending grid.
        found: usize,
    },
}
