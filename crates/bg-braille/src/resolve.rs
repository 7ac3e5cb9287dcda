use bg_core::error::BrailleError;
use bg_core::grid::DotCell;
use bg_core::table::LookupTable;

/// Résout chaque caractère normalisé en sa cellule braille.
///
/// All-or-nothing: the first unknown character aborts with its index.
///
/// # Errors
/// Returns [`BrailleError::UnknownCharacter`] for a character absent from the table.
///
/// # Example
/// ```
/// use bg_braille::resolve::resolve_cells;
/// use bg_core::LookupTable;
/// let table = LookupTable::builtin().unwrap();
/// assert_eq!(resolve_cells("ab", &table).unwrap().len(), 2);
/// assert!(resolve_cells("a^", &table).is_err());
/// ```
pub fn resolve_cells(text: &str, table: &LookupTable) -> Result<Vec<DotCell>, BrailleError> {
    text.chars()
        .enumerate()
        .map(|(index, ch)| {
            table
                .get(ch)
                .copied()
                .ok_or(BrailleError::UnknownCharacter { ch, index })
        })
        .collect()
}
