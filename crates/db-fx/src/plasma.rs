use db_core::color::Color;
use db_core::surface::Surface;
use db_core::timeline::EffectKind;
use rayon::prelude::*;

use crate::Effect;

/// Côté d'un bloc de plasma (px).
pub const BLOCK: u32 = 4;
pub const PALETTE_SIZE: usize = 256;

pub type Palette = [(u8, u8, u8); PALETTE_SIZE];

/// Palette de 256 couleurs : trois sinusoïdes déphasées de 0, 2 et 4 rad.
///
/// # Example
/// ```
/// use db_fx::plasma::generate_palette;
/// let palette = generate_palette();
/// assert_eq!(palette[0], (128, 243, 31));
/// ```
#[must_use]
pub fn generate_palette() -> Palette {
    let channel = |v: f64| (128.0 + 127.0 * v.sin()).floor() as u8;
    std::array::from_fn(|i| {
        let t = i as f64 * 0.024;
        (channel(t), channel(t + 2.0), channel(t + 4.0))
    })
}

/// Somme des quatre sinusoïdes, dans [-4, 4].
#[inline]
#[must_use]
pub fn field_value(x: f64, y: f64, time: f64) -> f64 {
    (x * 0.04 + time).sin()
        + (y * 0.03 + time).sin()
        + ((x + y) * 0.03 + time).sin()
        + ((x * x + y * y).sqrt() * 0.02 + time).sin()
}

/// Index de palette du bloc dont le coin haut-gauche est (x, y).
#[inline]
#[must_use]
pub fn color_index(x: f64, y: f64, time: f64) -> u8 {
    // v+4 ∈ [0,8] → [0,256], 256 retombe sur 0
    ((field_value(x, y, time) + 4.0) * 32.0).floor().rem_euclid(256.0) as u8
}

pub struct Plasma {
    palette: Palette,
    cols: usize,
    rows: usize,
    indices: Vec<u8>,
}

impl Plasma {
    /// Couvre la surface par blocs de 4×4, le dernier bloc pouvant déborder.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let cols = width.div_ceil(BLOCK) as usize;
        let rows = height.div_ceil(BLOCK) as usize;
        Self {
            palette: generate_palette(),
            cols,
            rows,
            indices: vec![0; cols * rows],
        }
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Recalcule les index de tous les blocs, une ligne par tâche rayon.
    fn compute(&mut self, time: f64) {
        let cols = self.cols;
        if cols == 0 {
            return;
        }
        let block = f64::from(BLOCK);
        self.indices
            .par_chunks_exact_mut(cols)
            .enumerate()
            .for_each(|(row, out)| {
                let y = row as f64 * block;
                for (col, idx) in out.iter_mut().enumerate() {
                    *idx = color_index(col as f64 * block, y, time);
                }
            });
    }
}

impl Effect for Plasma {
    fn kind(&self) -> EffectKind {
        EffectKind::Plasma
    }

    fn render(&mut self, surface: &mut dyn Surface, time: f64) {
        self.compute(time);
        let block = BLOCK as f32;
        for (row, line) in self.indices.chunks_exact(self.cols.max(1)).enumerate() {
            for (col, &idx) in line.iter().enumerate() {
                let (r, g, b) = self.palette[usize::from(idx)];
                surface.fill_rect(
                    col as f32 * block,
                    row as f32 * block,
                    block,
                    block,
                    Color::Rgb(r, g, b),
                );
            }
        }
        log::trace!("plasma : {} blocs", self.cols * self.rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSurface;

    fn reference(i: usize, phase: f64) -> u8 {
        (128.0 + 127.0 * (i as f64 * 0.024 + phase).sin()).floor() as u8
    }

    #[test]
    fn palette_matches_sine_formula() {
        let palette = generate_palette();
        assert_eq!(palette[0], (128, 243, 31));
        assert_eq!(
            palette[128],
            (reference(128, 0.0), reference(128, 2.0), reference(128, 4.0))
        );
        assert_eq!(palette[128], (136, 9, 218));
        for (i, rgb) in palette.iter().enumerate() {
            assert_eq!(rgb.0, reference(i, 0.0));
        }
    }

    #[test]
    fn field_value_is_bounded() {
        for x in (0..320).step_by(7) {
            for y in (0..256).step_by(5) {
                let v = field_value(f64::from(x), f64::from(y), 1.7);
                assert!((-4.0..=4.0).contains(&v));
            }
        }
    }

    #[test]
    fn origin_index_at_time_zero() {
        // v = 0 → (0+4)*32 = 128
        assert_eq!(color_index(0.0, 0.0, 0.0), 128);
    }

    #[test]
    fn covers_surface_with_blocks() {
        let mut plasma = Plasma::new(320, 256);
        let mut surface = RecordingSurface::new(320, 256);
        plasma.render(&mut surface, 0.5);

        let rects: Vec<_> = surface.fill_rects().collect();
        assert_eq!(rects.len(), 80 * 64);

        let (x, y, w, h, color) = rects[81];
        assert_eq!((x, y, w, h), (4.0, 4.0, 4.0, 4.0));
        let (r, g, b) = plasma.palette()[usize::from(color_index(4.0, 4.0, 0.5))];
        assert_eq!(color, Color::Rgb(r, g, b));
    }

    #[test]
    fn parallel_matches_sequential() {
        let mut plasma = Plasma::new(64, 48);
        plasma.compute(3.2);
        for row in 0..plasma.rows {
            for col in 0..plasma.cols {
                let expected = color_index(col as f64 * 4.0, row as f64 * 4.0, 3.2);
                assert_eq!(plasma.indices[row * plasma.cols + col], expected);
            }
        }
    }
}
