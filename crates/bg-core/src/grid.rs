use crate::error::BrailleError;

/// Rows of dots in one braille cell.
pub const CELL_ROWS: usize = 3;
/// Columns of dots in one braille cell.
pub const CELL_COLS: usize = 2;

/// Cellule braille 3×2. `true` = point en relief.
///
/// Dot numbering (row-major storage):
/// ```text
///  1 4
///  2 5
///  3 6
/// ```
///
/// # Example
/// ```
/// use bg_core::grid::DotCell;
/// let a = DotCell::from_rows([[1, 0], [0, 0], [0, 0]]);
/// assert!(a.dot(0, 0));
/// assert!(!a.dot(2, 1));
/// assert_eq!(DotCell::BLANK.raised(), 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DotCell([[bool; CELL_COLS]; CELL_ROWS]);

impl DotCell {
    /// Cellule sans aucun point.
    pub const BLANK: Self = Self([[false; CELL_COLS]; CELL_ROWS]);

    /// Build a cell from 0/1 rows. Any non-zero value counts as raised.
    #[must_use]
    pub const fn from_rows(rows: [[u8; CELL_COLS]; CELL_ROWS]) -> Self {
        let mut dots = [[false; CELL_COLS]; CELL_ROWS];
        let mut r = 0;
        while r < CELL_ROWS {
            let mut c = 0;
            while c < CELL_COLS {
                dots[r][c] = rows[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self(dots)
    }

    /// État du point (row, col).
    #[inline(always)]
    #[must_use]
    pub const fn dot(&self, row: usize, col: usize) -> bool {
        self.0[row][col]
    }

    /// Number of raised dots.
    #[must_use]
    pub fn raised(&self) -> usize {
        self.0.iter().flatten().filter(|&&d| d).count()
    }
}

/// Matrice booléenne row-major. Représente indifféremment la grille de points,
/// la grille espacée et la grille avec marge.
///
/// # Example
/// ```
/// use bg_core::grid::DotGrid;
/// let mut grid = DotGrid::new(3, 4);
/// grid.set(1, 2, true);
/// assert!(grid.get(1, 2));
/// assert_eq!(grid.count_raised(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DotGrid {
    /// Flat array of dots, row-major.
    pub data: Vec<bool>,
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl DotGrid {
    /// Crée une grille vide (tous les points à plat).
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![false; rows * cols],
            rows,
            cols,
        }
    }

    /// Build a grid from 0/1 rows. Rows shorter than the first are zero-filled.
    ///
    /// # Example
    /// ```
    /// use bg_core::grid::DotGrid;
    /// let grid = DotGrid::from_rows(&[&[1, 0], &[0, 1]]);
    /// assert_eq!((grid.rows, grid.cols), (2, 2));
    /// assert!(grid.get(1, 1));
    /// ```
    #[must_use]
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let cols = rows.first().map_or(0, |r| r.len());
        let mut grid = Self::new(rows.len(), cols);
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().take(cols).enumerate() {
                grid.set(r, c, v != 0);
            }
        }
        grid
    }

    /// Copie une cellule avec son coin haut-gauche en (row, col).
    pub fn blit_cell(&mut self, row: usize, col: usize, cell: &DotCell) {
        for r in 0..CELL_ROWS {
            for c in 0..CELL_COLS {
                self.set(row + r, col + c, cell.dot(r, c));
            }
        }
    }

    /// État du point (row, col).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data[row * self.cols + col]
    }

    /// Set the dot at (row, col).
    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.data[row * self.cols + col] = value;
    }

    /// Slice of one row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[bool] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Nombre de points en relief.
    #[must_use]
    pub fn count_raised(&self) -> usize {
        self.data.iter().filter(|&&d| d).count()
    }

    /// Transposée (rows ↔ cols).
    ///
    /// # Example
    /// ```
    /// use bg_core::grid::DotGrid;
    /// let grid = DotGrid::from_rows(&[&[1, 0, 0]]);
    /// let t = grid.transpose();
    /// assert_eq!((t.rows, t.cols), (3, 1));
    /// assert!(t.get(0, 0));
    /// ```
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut out = Self::new(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.set(c, r, self.get(r, c));
            }
        }
        out
    }

    /// Empile des grilles verticalement, dans l'ordre donné.
    ///
    /// # Errors
    /// Returns [`BrailleError::WidthMismatch`] if the grids differ in column count.
    pub fn stack_vertical(grids: &[DotGrid]) -> Result<Self, BrailleError> {
        let cols = grids.first().map_or(0, |g| g.cols);
        let mut data = Vec::with_capacity(grids.iter().map(|g| g.data.len()).sum());
        let mut rows = 0;
        for grid in grids {
            if grid.cols != cols {
                return Err(BrailleError::WidthMismatch {
                    expected: cols,
                    found: grid.cols,
                });
            }
            data.extend_from_slice(&grid.data);
            rows += grid.rows;
        }
        Ok(Self { data, rows, cols })
    }
}

/// Buffer d'intensité 8 bits (0 ou 255), row-major, prêt pour le rasterizer.
///
/// # Example
/// ```
/// use bg_core::grid::{DotGrid, PixelBuffer};
/// let grid = DotGrid::from_rows(&[&[1, 0]]);
/// let pixels = PixelBuffer::from_grid(&grid);
/// assert_eq!(pixels.data, vec![255, 0]);
/// assert_eq!((pixels.width, pixels.height), (2, 1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Intensities, row-major, one byte per pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelBuffer {
    /// Intensity used for a raised dot.
    pub const RAISED: u8 = 255;

    /// Intensity cast: raised → 255, flat → 0.
    #[must_use]
    pub fn from_grid(grid: &DotGrid) -> Self {
        Self {
            data: grid
                .data
                .iter()
                .map(|&d| if d { Self::RAISED } else { 0 })
                .collect(),
            width: grid.cols as u32,
            height: grid.rows as u32,
        }
    }

    /// Intensité du pixel (x, y).
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.data[(y * self.width + x) as usize]
    }
}
