use font8x8::{BASIC_FONTS, UnicodeFonts};

/// Largeur et hauteur natives d'un glyphe, en pixels.
pub const GLYPH_SIZE: usize = 8;

/// Avance horizontale d'un caractère (police monospace).
pub const ADVANCE: f32 = 8.0;

/// Bitmap 8×8 d'un caractère. Bit 0 de chaque ligne = pixel le plus à gauche.
///
/// Les caractères hors ASCII retombent sur `?`.
///
/// # Example
/// ```
/// use db_core::font::glyph;
/// assert_eq!(glyph(' '), [0; 8]);
/// assert_ne!(glyph('A'), [0; 8]);
/// ```
#[must_use]
pub fn glyph(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Runs horizontaux de pixels allumés : `(row, first_column, length)`.
///
/// Regrouper les bits contigus divise le nombre de rectangles à remplir.
pub fn glyph_runs(ch: char) -> impl Iterator<Item = (usize, usize, usize)> {
    let rows = glyph(ch);
    rows.into_iter().enumerate().flat_map(|(row, bits)| {
        let mut runs = Vec::new();
        let mut col = 0;
        while col < GLYPH_SIZE {
            if bits & (1 << col) == 0 {
                col += 1;
                continue;
            }
            let start = col;
            while col < GLYPH_SIZE && bits & (1 << col) != 0 {
                col += 1;
            }
            runs.push((row, start, col - start));
        }
        runs
    })
}
