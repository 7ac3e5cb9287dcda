//! Normalize → Resolve → Assemble → Space → Margin.
//!
//! Strictly linear: one line either yields a fully formed grid or the first
//! error met. No partial output.

use bg_core::config::{RenderConfig, UnknownPolicy};
use bg_core::error::BrailleError;
use bg_core::grid::{DotGrid, PixelBuffer};
use bg_core::table::LookupTable;
use rayon::prelude::*;

use crate::assemble::assemble_grid;
use crate::margin::add_margin;
use crate::normalize::normalize;
use crate::resolve::resolve_cells;
use crate::spacing::{Spacing, space_dots};

/// Paramètres de mise en page d'une conversion.
///
/// # Example
/// ```
/// use bg_braille::pipeline::Layout;
/// let layout = Layout::default();
/// assert_eq!(layout.width, 10);
/// assert_eq!(layout.margin, 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Characters per row.
    pub width: usize,
    /// Empty dots inserted between adjacent dots, per axis.
    pub spacing: Spacing,
    /// Border width, in dots.
    pub margin: usize,
    /// Handling of characters missing from the table.
    pub policy: UnknownPolicy,
}

impl Default for Layout {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl Layout {
    /// Layout described by a render configuration.
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            width: config.width,
            spacing: Spacing {
                rows: config.row_spacing(),
                cols: config.col_spacing(),
            },
            margin: config.margin,
            policy: config.policy,
        }
    }

    /// Bare layout: no spacing, no margin, lenient.
    #[must_use]
    pub fn tight(width: usize) -> Self {
        Self {
            width,
            spacing: Spacing::uniform(0),
            margin: 0,
            policy: UnknownPolicy::Lenient,
        }
    }

    /// Columns of every line produced with this layout. All lines share it,
    /// which is what makes vertical stacking valid.
    #[must_use]
    pub fn output_cols(&self) -> usize {
        crate::spacing::spaced_len(2 * self.width, self.spacing.cols) + 2 * self.margin
    }
}

/// Convertisseur texte → grille. Emprunte la table, partageable entre threads.
///
/// # Example
/// ```
/// use bg_braille::pipeline::{Converter, Layout};
/// use bg_core::LookupTable;
/// let table = LookupTable::builtin().unwrap();
/// let converter = Converter::new(&table, Layout::default()).unwrap();
/// let grid = converter.convert_line("hello").unwrap();
/// // 3 rows, 20 cols, spacing 1, margin 1.
/// assert_eq!((grid.rows, grid.cols), (7, 41));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Converter<'t> {
    table: &'t LookupTable,
    layout: Layout,
}

impl<'t> Converter<'t> {
    /// Bind a layout to a lookup table.
    ///
    /// # Errors
    /// Returns [`BrailleError::InvalidWidth`] if `layout.width` is zero.
    pub fn new(table: &'t LookupTable, layout: Layout) -> Result<Self, BrailleError> {
        if layout.width == 0 {
            return Err(BrailleError::InvalidWidth(layout.width));
        }
        Ok(Self { table, layout })
    }

    /// Layout used for every conversion.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Convert a single line into its margined dot grid.
    ///
    /// # Errors
    /// Returns the first pipeline error (unknown character under the strict
    /// policy, invalid numeral).
    pub fn convert_line(&self, text: &str) -> Result<DotGrid, BrailleError> {
        let normalized = normalize(text, self.table, self.layout.policy)?;
        let cells = resolve_cells(&normalized, self.table)?;
        let grid = assemble_grid(&cells, self.layout.width, self.table.blank())?;
        let spaced = space_dots(&grid, self.layout.spacing);
        let out = add_margin(&spaced, self.layout.margin);
        debug_assert_eq!(out.cols, self.layout.output_cols());
        log::debug!(
            "{:?} → {} cellules, grille {}×{}",
            normalized,
            cells.len(),
            out.rows,
            out.cols
        );
        Ok(out)
    }

    /// Convert several lines and stack them top to bottom.
    ///
    /// Lines are converted in parallel. On failure the error of the earliest
    /// failing line is returned and no buffer is produced.
    ///
    /// # Errors
    /// Returns [`BrailleError::InLine`] with the 1-based line number, wrapping
    /// the error of [`Converter::convert_line`].
    pub fn convert_lines<S: AsRef<str> + Sync>(
        &self,
        lines: &[S],
    ) -> Result<PixelBuffer, BrailleError> {
        let results: Vec<Result<DotGrid, BrailleError>> = lines
            .par_iter()
            .enumerate()
            .map(|(i, line)| {
                self.convert_line(line.as_ref())
                    .map_err(|e| BrailleError::InLine {
                        line: i + 1,
                        source: Box::new(e),
                    })
            })
            .collect();
        let grids = results.into_iter().collect::<Result<Vec<_>, _>>()?;
        let stacked = DotGrid::stack_vertical(&grids)?;
        log::info!(
            "{} ligne(s) converties : {}×{} points",
            lines.len(),
            stacked.cols,
            stacked.rows
        );
        Ok(PixelBuffer::from_grid(&stacked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bg_core::grid::DotCell;

    fn table() -> LookupTable {
        LookupTable::builtin().unwrap()
    }

    #[test]
    fn single_char_tight_layout_is_raw_cell() {
        let table = table();
        let converter = Converter::new(&table, Layout::tight(1)).unwrap();
        let pixels = converter.convert_lines(&["a"]).unwrap();
        assert_eq!((pixels.width, pixels.height), (2, 3));
        assert_eq!(pixels.data, vec![255, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn default_layout_dimensions() {
        let table = table();
        let converter = Converter::new(&table, Layout::default()).unwrap();
        // 12 chars at width 10 → 2 rows of cells → 6 × 20 dots.
        let grid = converter.convert_line("hello world!").unwrap();
        assert_eq!(grid.rows, 6 + 5 + 2);
        assert_eq!(grid.cols, 20 + 19 + 2);
        assert_eq!(grid.cols, converter.layout().output_cols());
    }

    #[test]
    fn raised_dot_count_is_preserved() {
        let table = table();
        let converter = Converter::new(&table, Layout::default()).unwrap();
        let grid = converter.convert_line("ab 12").unwrap();
        // a=1, b=2, space=0, #=4, b=2, c=2
        assert_eq!(grid.count_raised(), 11);
    }

    #[test]
    fn strict_policy_aborts_on_unknown() {
        let table = table();
        let layout = Layout {
            policy: UnknownPolicy::Strict,
            ..Layout::tight(4)
        };
        let converter = Converter::new(&table, layout).unwrap();
        assert_eq!(
            converter.convert_line("a*b"),
            Err(BrailleError::UnknownCharacter { ch: '*', index: 1 })
        );
    }

    #[test]
    fn lenient_policy_drops_unknown() {
        let table = table();
        let converter = Converter::new(&table, Layout::tight(4)).unwrap();
        let with_noise = converter.convert_line("a*b").unwrap();
        let clean = converter.convert_line("ab").unwrap();
        assert_eq!(with_noise, clean);
    }

    #[test]
    fn earliest_failing_line_is_reported() {
        let table = table();
        let layout = Layout {
            policy: UnknownPolicy::Strict,
            ..Layout::default()
        };
        let converter = Converter::new(&table, layout).unwrap();
        let lines = ["ok", "bad$", "worse%"];
        assert_eq!(
            converter.convert_lines(&lines),
            Err(BrailleError::InLine {
                line: 2,
                source: Box::new(BrailleError::UnknownCharacter { ch: '$', index: 3 }),
            })
        );
    }

    #[test]
    fn same_fault_on_different_lines_is_distinguishable() {
        let table = table();
        let layout = Layout {
            policy: UnknownPolicy::Strict,
            ..Layout::default()
        };
        let converter = Converter::new(&table, layout).unwrap();
        let first = converter.convert_lines(&["bad$", "ok"]).unwrap_err();
        let third = converter.convert_lines(&["ok", "ok", "bad$"]).unwrap_err();
        assert_ne!(first, third);
        assert!(matches!(first, BrailleError::InLine { line: 1, .. }));
        assert!(matches!(third, BrailleError::InLine { line: 3, .. }));
        assert!(third.to_string().starts_with("Ligne 3"));
    }

    #[test]
    fn unknown_index_counts_normalized_positions() {
        let table = table();
        let layout = Layout {
            policy: UnknownPolicy::Strict,
            ..Layout::tight(8)
        };
        let converter = Converter::new(&table, layout).unwrap();
        // "ab12$" → "ab#bc$": the number sign shifts the '$' by one.
        assert_eq!(
            converter.convert_line("ab12$"),
            Err(BrailleError::UnknownCharacter { ch: '$', index: 5 })
        );
    }

    #[test]
    fn lines_stack_in_order() {
        let table = table();
        let converter = Converter::new(&table, Layout::tight(1)).unwrap();
        let pixels = converter.convert_lines(&["a", "", "a"]).unwrap();
        assert_eq!((pixels.width, pixels.height), (2, 9));
        assert_eq!(pixels.pixel(0, 0), 255);
        assert_eq!(pixels.pixel(0, 3), 0);
        assert_eq!(pixels.pixel(0, 6), 255);
    }

    #[test]
    fn empty_line_is_one_blank_row() {
        let table = table();
        let converter = Converter::new(&table, Layout::tight(3)).unwrap();
        let grid = converter.convert_line("").unwrap();
        assert_eq!((grid.rows, grid.cols), (3, 6));
        assert_eq!(grid.count_raised(), 0);
    }

    #[test]
    fn zero_width_is_rejected() {
        let table = table();
        assert!(Converter::new(&table, Layout::tight(0)).is_err());
    }

    #[test]
    fn custom_table_blank_pads() {
        let table = LookupTable::from_json(
            r#"{" ": [[1,1],[1,1],[1,1]], "a": [[1,0],[0,0],[0,0]]}"#,
        )
        .unwrap();
        let converter = Converter::new(&table, Layout::tight(2)).unwrap();
        let grid = converter.convert_line("a").unwrap();
        assert_eq!(grid.count_raised(), DotCell::from_rows([[1, 0], [0, 0], [0, 0]]).raised() + 6);
    }
}
