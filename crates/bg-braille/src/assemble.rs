use bg_core::error::BrailleError;
use bg_core::grid::{CELL_COLS, CELL_ROWS, DotCell, DotGrid};

/// Number of character rows needed for `n` cells at wrap width `width`.
///
/// An empty sequence still occupies one (blank) row.
#[inline]
#[must_use]
pub fn row_count(n: usize, width: usize) -> usize {
    n.div_ceil(width).max(1)
}

/// Enroule les cellules en une grille de `width` caractères par rangée.
///
/// The last row is right-padded with `blank`. The output shape is
/// `(3 · ceil(n / width), 2 · width)`, with a single blank row for `n = 0`.
///
/// # Errors
/// Returns [`BrailleError::InvalidWidth`] if `width` is zero.
///
/// # Example
/// ```
/// use bg_braille::assemble::assemble_grid;
/// use bg_core::DotCell;
/// let a = DotCell::from_rows([[1, 0], [0, 0], [0, 0]]);
/// let grid = assemble_grid(&[a; 3], 2, DotCell::BLANK).unwrap();
/// assert_eq!((grid.rows, grid.cols), (6, 4));
/// assert!(grid.get(3, 0));
/// assert!(!grid.get(3, 2));
/// ```
pub fn assemble_grid(
    cells: &[DotCell],
    width: usize,
    blank: DotCell,
) -> Result<DotGrid, BrailleError> {
    if width == 0 {
        return Err(BrailleError::InvalidWidth(width));
    }

    let rows = row_count(cells.len(), width);
    let mut grid = DotGrid::new(rows * CELL_ROWS, width * CELL_COLS);

    for slot in 0..rows * width {
        let cell = cells.get(slot).unwrap_or(&blank);
        let (row, col) = (slot / width, slot % width);
        grid.blit_cell(row * CELL_ROWS, col * CELL_COLS, cell);
    }

    Ok(grid)
}
