use bg_core::grid::PixelBuffer;

/// Braille base codepoint (U+2800).
const BRAILLE_BASE: u32 = 0x2800;

/// Encode 2×4 pixel block into a Braille Unicode character.
///
/// Dot numbering (bit `n - 1` for dot `n`):
/// ```text
///  1 4
///  2 5
///  3 6
///  7 8
/// ```
///
/// # Example
/// ```
/// use bg_export::preview::encode_braille;
/// assert_eq!(encode_braille([false; 8]), '\u{2800}');
/// assert_eq!(encode_braille([true; 8]),  '\u{28FF}');
/// ```
#[must_use]
pub fn encode_braille(dots: [bool; 8]) -> char {
    let mut code = 0u32;
    for (i, &dot) in dots.iter().enumerate() {
        if dot {
            code |= 1 << i;
        }
    }
    char::from_u32(BRAILLE_BASE + code).unwrap_or(' ')
}

/// Index dans `encode_braille` du pixel (dx, dy) d'un bloc 2×4.
#[inline(always)]
const fn dot_index(dx: u32, dy: u32) -> usize {
    match (dx, dy) {
        (0, 3) => 6,
        (1, 3) => 7,
        (0, y) => y as usize,
        (_, y) => 3 + y as usize,
    }
}

/// Aperçu terminal : chaque caractère couvre 2×4 pixels du buffer.
///
/// A pixel is raised if its intensity is above mid-grey. Partial blocks on
/// the right and bottom edges are padded with flat pixels.
///
/// # Example
/// ```
/// use bg_core::PixelBuffer;
/// use bg_export::preview::render;
/// let pixels = PixelBuffer { data: vec![255, 0, 0, 0, 0, 0], width: 2, height: 3 };
/// assert_eq!(render(&pixels), "\u{2801}\n");
/// ```
#[must_use]
pub fn render(pixels: &PixelBuffer) -> String {
    let cols = pixels.width.div_ceil(2);
    let rows = pixels.height.div_ceil(4);
    let mut out = String::with_capacity(((cols + 1) * rows * 3) as usize);

    for cy in 0..rows {
        for cx in 0..cols {
            let mut dots = [false; 8];
            for dy in 0..4 {
                for dx in 0..2 {
                    let (x, y) = (cx * 2 + dx, cy * 4 + dy);
                    if x < pixels.width && y < pixels.height {
                        dots[dot_index(dx, dy)] = pixels.pixel(x, y) > 127;
                    }
                }
            }
            out.push(encode_braille(dots));
        }
        out.push('\n');
    }
    out
}
