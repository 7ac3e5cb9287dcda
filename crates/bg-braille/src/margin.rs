use bg_core::grid::DotGrid;

/// Entoure la grille d'une bordure vide de `margin` points.
///
/// Output shape is `(R + 2m, C + 2m)`; `m = 0` is the identity.
///
/// # Example
/// ```
/// use bg_braille::margin::add_margin;
/// use bg_core::DotGrid;
/// let grid = DotGrid::from_rows(&[&[1]]);
/// let out = add_margin(&grid, 1);
/// assert_eq!(out, DotGrid::from_rows(&[&[0, 0, 0], &[0, 1, 0], &[0, 0, 0]]));
/// ```
#[must_use]
pub fn add_margin(grid: &DotGrid, margin: usize) -> DotGrid {
    if margin == 0 {
        return grid.clone();
    }
    let mut out = DotGrid::new(grid.rows + 2 * margin, grid.cols + 2 * margin);
    for r in 0..grid.rows {
        let dst = (r + margin) * out.cols + margin;
        out.data[dst..dst + grid.cols].copy_from_slice(grid.row(r));
    }
    out
}
