use std::f64::consts::TAU;

use db_core::color::Color;
use db_core::surface::Surface;
use db_core::timeline::EffectKind;

use crate::Effect;

pub const BAR_COUNT: usize = 5;
/// Nombre de bandes d'un pixel par barre.
pub const STOPS: usize = 16;
/// Amplitude verticale de l'oscillation (px).
pub const SWING: f64 = 30.0;

/// Dégradé d'une barre : teinte `(index*70) mod 360`, luminosité
/// `|8-i|*6 + 20`.
///
/// # Example
/// ```
/// use db_core::color::Color;
/// use db_fx::raster_bars::generate_gradient;
/// let stops = generate_gradient(1);
/// assert_eq!(stops[0], Color::Hsl(70.0, 100.0, 68.0));
/// assert_eq!(stops[8], Color::Hsl(70.0, 100.0, 20.0));
/// ```
#[must_use]
pub fn generate_gradient(index: usize) -> [Color; STOPS] {
    let hue = ((index * 70) % 360) as f64;
    std::array::from_fn(|i| {
        let lightness = (8.0 - i as f64).abs() * 6.0 + 20.0;
        Color::Hsl(hue, 100.0, lightness)
    })
}

/// Barre "copper" : la position est recalculée depuis le temps à chaque frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterBar {
    pub base_y: f64,
    pub speed: f64,
    pub phase: f64,
    pub colors: [Color; STOPS],
}

impl RasterBar {
    /// Centre vertical au temps `time`.
    #[inline]
    #[must_use]
    pub fn center_at(&self, time: f64) -> f64 {
        self.base_y + (time * self.speed + self.phase).sin() * SWING
    }
}

pub struct RasterBars {
    bars: Vec<RasterBar>,
    width: f32,
    height: f64,
}

impl RasterBars {
    /// Cinq barres espacées de 40 px à partir de y=50, phase et vitesse
    /// tirées de `rng`.
    #[must_use]
    pub fn new(width: u32, height: u32, rng: &mut fastrand::Rng) -> Self {
        let bars = (0..BAR_COUNT)
            .map(|i| RasterBar {
                base_y: 50.0 + i as f64 * 40.0,
                speed: 0.3 + rng.f64() * 0.5,
                phase: rng.f64() * TAU,
                colors: generate_gradient(i),
            })
            .collect();
        Self {
            bars,
            width: width as f32,
            height: f64::from(height),
        }
    }

    #[must_use]
    pub fn bars(&self) -> &[RasterBar] {
        &self.bars
    }
}

impl Effect for RasterBars {
    fn kind(&self) -> EffectKind {
        EffectKind::RasterBars
    }

    fn render(&mut self, surface: &mut dyn Surface, time: f64) {
        for bar in &self.bars {
            let center = bar.center_at(time);
            for (i, color) in bar.colors.iter().enumerate() {
                let y = (center + i as f64 - 8.0).floor();
                if y >= 0.0 && y < self.height {
                    surface.fill_rect(0.0, y as f32, self.width, 1.0, *color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSurface;

    #[test]
    fn gradient_hues_wrap() {
        assert_eq!(generate_gradient(0)[0], Color::Hsl(0.0, 100.0, 68.0));
        // 6*70 = 420 → 60
        assert_eq!(generate_gradient(6)[15], Color::Hsl(60.0, 100.0, 62.0));
    }

    #[test]
    fn bars_are_staggered() {
        let bars = RasterBars::new(320, 256, &mut fastrand::Rng::with_seed(3));
        let ys: Vec<f64> = bars.bars().iter().map(|b| b.base_y).collect();
        assert_eq!(ys, vec![50.0, 90.0, 130.0, 170.0, 210.0]);
        for bar in bars.bars() {
            assert!((0.3..0.8).contains(&bar.speed));
            assert!((0.0..TAU).contains(&bar.phase));
        }
    }

    #[test]
    fn center_oscillates_within_swing() {
        let bar = RasterBar {
            base_y: 100.0,
            speed: 0.5,
            phase: 0.0,
            colors: generate_gradient(0),
        };
        assert!((bar.center_at(0.0) - 100.0).abs() < 1e-9);
        for step in 0..200 {
            let c = bar.center_at(f64::from(step) * 0.1);
            assert!((70.0..=130.0).contains(&c));
        }
    }

    #[test]
    fn stripes_are_full_width_and_clipped() {
        let mut bars = RasterBars::new(320, 256, &mut fastrand::Rng::with_seed(9));
        bars.bars[0].base_y = -20.0;
        bars.bars[0].phase = 0.0;
        bars.bars[0].speed = 0.0;

        let mut surface = RecordingSurface::new(320, 256);
        bars.render(&mut surface, 0.0);

        let rects: Vec<_> = surface.fill_rects().collect();
        // la première barre est entièrement hors champ
        assert_eq!(rects.len(), (BAR_COUNT - 1) * STOPS);
        for (x, y, w, h, _) in rects {
            assert!(x.abs() < f32::EPSILON);
            assert!((0.0..256.0).contains(&y));
            assert!((w - 320.0).abs() < f32::EPSILON);
            assert!((h - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn stripe_positions_around_center() {
        let mut bars = RasterBars::new(320, 256, &mut fastrand::Rng::with_seed(1));
        bars.bars.truncate(1);
        bars.bars[0].phase = 0.0;
        bars.bars[0].speed = 0.0;

        let mut surface = RecordingSurface::new(320, 256);
        bars.render(&mut surface, 5.0);

        let ys: Vec<f32> = surface.fill_rects().map(|r| r.1).collect();
        let expected: Vec<f32> = (42..58).map(|y| y as f32).collect();
        assert_eq!(ys, expected);
    }
}
