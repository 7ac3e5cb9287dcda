//! Espacement entre points voisins.
//!
//! `p` rangées (ou colonnes) vides sont insérées entre chaque paire de
//! rangées adjacentes. Rien n'est ajouté après la dernière : une grille de
//! forme `(R, C)` devient `(R + p·(R-1), C + p·(C-1))`. `p = 0` est l'identité.

use bg_core::grid::DotGrid;

/// Espacement indépendant par axe.
///
/// # Example
/// ```
/// use bg_braille::spacing::Spacing;
/// assert_eq!(Spacing::uniform(2), Spacing { rows: 2, cols: 2 });
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Spacing {
    /// Empty rows between adjacent rows.
    pub rows: usize,
    /// Empty columns between adjacent columns.
    pub cols: usize,
}

impl Spacing {
    /// Same spacing on both axes.
    #[must_use]
    pub const fn uniform(p: usize) -> Self {
        Self { rows: p, cols: p }
    }
}

/// Spaced length of an axis of `len` entries.
#[inline]
#[must_use]
pub fn spaced_len(len: usize, p: usize) -> usize {
    if len == 0 { 0 } else { len + p * (len - 1) }
}

/// Insert `p` empty rows between adjacent rows.
///
/// # Example
/// ```
/// use bg_braille::spacing::space_rows;
/// use bg_core::DotGrid;
/// let grid = DotGrid::from_rows(&[&[1], &[1]]);
/// assert_eq!(space_rows(&grid, 2), DotGrid::from_rows(&[&[1], &[0], &[0], &[1]]));
/// ```
#[must_use]
pub fn space_rows(grid: &DotGrid, p: usize) -> DotGrid {
    if p == 0 {
        return grid.clone();
    }
    let mut out = DotGrid::new(spaced_len(grid.rows, p), grid.cols);
    let stride = grid.cols;
    for r in 0..grid.rows {
        let dst = r * (1 + p) * stride;
        out.data[dst..dst + stride].copy_from_slice(grid.row(r));
    }
    out
}

/// Insert `p` empty columns between adjacent columns.
///
/// # Example
/// ```
/// use bg_braille::spacing::space_cols;
/// use bg_core::DotGrid;
/// let grid = DotGrid::from_rows(&[&[1, 1]]);
/// assert_eq!(space_cols(&grid, 1), DotGrid::from_rows(&[&[1, 0, 1]]));
/// ```
#[must_use]
pub fn space_cols(grid: &DotGrid, p: usize) -> DotGrid {
    if p == 0 {
        return grid.clone();
    }
    let mut out = DotGrid::new(grid.rows, spaced_len(grid.cols, p));
    for r in 0..grid.rows {
        for (c, &dot) in grid.row(r).iter().enumerate() {
            out.set(r, c * (1 + p), dot);
        }
    }
    out
}

/// Apply row then column spacing.
#[must_use]
pub fn space_dots(grid: &DotGrid, spacing: Spacing) -> DotGrid {
    space_cols(&space_rows(grid, spacing.rows), spacing.cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DotGrid {
        DotGrid::from_rows(&[&[1, 0, 1, 1], &[0, 1, 0, 0], &[1, 1, 0, 1]])
    }

    #[test]
    fn zero_spacing_is_identity() {
        let grid = sample();
        assert_eq!(space_dots(&grid, Spacing::uniform(0)), grid);
        let empty = DotGrid::new(0, 0);
        assert_eq!(space_dots(&empty, Spacing::uniform(0)), empty);
    }

    #[test]
    fn output_shape() {
        let grid = sample();
        for p in 1..=4 {
            let out = space_dots(&grid, Spacing::uniform(p));
            assert_eq!((out.rows, out.cols), (3 + 2 * p, 4 + 3 * p));
            assert_eq!(out.count_raised(), grid.count_raised());
        }
    }

    #[test]
    fn dots_land_on_strided_positions() {
        let grid = sample();
        let p = 2;
        let out = space_dots(&grid, Spacing::uniform(p));
        for r in 0..out.rows {
            for c in 0..out.cols {
                let expected = r % (1 + p) == 0
                    && c % (1 + p) == 0
                    && grid.get(r / (1 + p), c / (1 + p));
                assert_eq!(out.get(r, c), expected, "({r}, {c})");
            }
        }
    }

    #[test]
    fn no_trailing_empty_border() {
        let grid = DotGrid::from_rows(&[&[1, 1], &[1, 1]]);
        let out = space_dots(&grid, Spacing::uniform(3));
        assert!(out.get(out.rows - 1, out.cols - 1));
    }

    #[test]
    fn axis_order_does_not_matter() {
        let grid = sample();
        let s = Spacing { rows: 2, cols: 1 };
        let cols_first = space_rows(&space_cols(&grid, s.cols), s.rows);
        assert_eq!(space_dots(&grid, s), cols_first);
    }

    #[test]
    fn matches_transpose_formulation() {
        let grid = sample();
        let via_transpose = space_rows(&grid.transpose(), 2).transpose();
        assert_eq!(space_cols(&grid, 2), via_transpose);
    }

    #[test]
    fn independent_axes() {
        let out = space_dots(&sample(), Spacing { rows: 0, cols: 2 });
        assert_eq!((out.rows, out.cols), (3, 10));
    }

    #[test]
    fn empty_axis_stays_empty() {
        let out = space_dots(&DotGrid::new(0, 4), Spacing::uniform(1));
        assert_eq!((out.rows, out.cols), (0, 7));
    }
}
