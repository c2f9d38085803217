use db_core::color::Color;
use db_core::surface::Surface;
use db_core::timeline::EffectKind;

use crate::Effect;

/// Profondeur max (exclue). Sert aussi à la taille et à la luminosité.
pub const MAX_DEPTH: f64 = 3.0;

/// Une étoile : position écran, profondeur [0,3), vitesse px/frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
    pub speed: f64,
}

impl Star {
    /// Côté du carré dessiné : `1 + floor(depth)`.
    #[inline]
    #[must_use]
    pub fn size(&self) -> f64 {
        1.0 + self.depth.floor()
    }

    /// Niveau de gris : `128 + depth*40`, tronqué.
    #[inline]
    #[must_use]
    pub fn brightness(&self) -> u8 {
        (128.0 + self.depth * 40.0).floor().clamp(0.0, 255.0) as u8
    }
}

/// Champ d'étoiles défilant vers la gauche.
pub struct Starfield {
    stars: Vec<Star>,
    width: f64,
    height: f64,
    rng: fastrand::Rng,
}

impl Starfield {
    /// Tire `count` étoiles uniformément sur la surface.
    ///
    /// Le `rng` est conservé pour les réapparitions.
    ///
    /// # Example
    /// ```
    /// use db_fx::starfield::Starfield;
    /// let field = Starfield::new(320, 256, 100, fastrand::Rng::with_seed(1));
    /// assert_eq!(field.stars().len(), 100);
    /// assert!(field.stars().iter().all(|s| s.depth < 3.0 && s.speed >= 0.5));
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32, count: usize, mut rng: fastrand::Rng) -> Self {
        let width = f64::from(width);
        let height = f64::from(height);
        let stars = (0..count)
            .map(|_| Star {
                x: rng.f64() * width,
                y: rng.f64() * height,
                depth: rng.f64() * MAX_DEPTH,
                speed: 0.5 + rng.f64() * 2.0,
            })
            .collect();
        Self {
            stars,
            width,
            height,
            rng,
        }
    }

    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Avance toutes les étoiles d'une frame.
    ///
    /// Une étoile sortie à gauche réapparaît à `x = width` avec un nouveau
    /// `y`. Profondeur et vitesse sont conservées.
    pub fn step(&mut self) {
        for star in &mut self.stars {
            star.x -= star.speed;
            if star.x < 0.0 {
                star.x = self.width;
                star.y = self.rng.f64() * self.height;
            }
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        for star in &self.stars {
            let size = star.size() as f32;
            surface.fill_rect(
                star.x.floor() as f32,
                star.y.floor() as f32,
                size,
                size,
                Color::gray(star.brightness()),
            );
        }
    }
}

impl Effect for Starfield {
    fn kind(&self) -> EffectKind {
        EffectKind::Starfield
    }

    fn render(&mut self, surface: &mut dyn Surface, _time: f64) {
        self.step();
        self.draw(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSurface;

    fn field(count: usize) -> Starfield {
        Starfield::new(320, 256, count, fastrand::Rng::with_seed(42))
    }

    #[test]
    fn construction_ranges() {
        let field = field(500);
        for s in field.stars() {
            assert!((0.0..320.0).contains(&s.x));
            assert!((0.0..256.0).contains(&s.y));
            assert!((0.0..MAX_DEPTH).contains(&s.depth));
            assert!((0.5..2.5).contains(&s.speed));
        }
    }

    #[test]
    fn x_decreases_until_wrap_then_equals_width() {
        let mut field = field(50);
        let mut wraps = 0;
        for _ in 0..400 {
            let before: Vec<Star> = field.stars().to_vec();
            field.step();
            for (old, new) in before.iter().zip(field.stars()) {
                if old.x - old.speed < 0.0 {
                    wraps += 1;
                    assert!((new.x - 320.0).abs() < f64::EPSILON);
                    assert!((0.0..256.0).contains(&new.y));
                } else {
                    assert!(new.x < old.x);
                    assert!((new.y - old.y).abs() < f64::EPSILON);
                }
                assert!((new.depth - old.depth).abs() < f64::EPSILON);
                assert!((new.speed - old.speed).abs() < f64::EPSILON);
            }
        }
        assert!(wraps > 0);
    }

    #[test]
    fn size_and_brightness_follow_depth() {
        let star = Star {
            x: 0.0,
            y: 0.0,
            depth: 2.5,
            speed: 1.0,
        };
        assert!((star.size() - 3.0).abs() < f64::EPSILON);
        assert_eq!(star.brightness(), 228);

        let near_zero = Star { depth: 0.01, ..star };
        assert!((near_zero.size() - 1.0).abs() < f64::EPSILON);
        assert_eq!(near_zero.brightness(), 128);
    }

    #[test]
    fn render_draws_one_grey_square_per_star() {
        let mut field = field(10);
        let mut surface = RecordingSurface::new(320, 256);
        field.render(&mut surface, 0.0);

        let rects: Vec<_> = surface.fill_rects().collect();
        assert_eq!(rects.len(), 10);
        for ((x, y, w, h, color), star) in rects.iter().zip(field.stars()) {
            assert!((*x - star.x.floor() as f32).abs() < f32::EPSILON);
            assert!((*y - star.y.floor() as f32).abs() < f32::EPSILON);
            assert!((*w - *h).abs() < f32::EPSILON);
            assert_eq!(*color, Color::gray(star.brightness()));
        }
    }

    #[test]
    fn same_seed_same_sky() {
        let a = field(20);
        let b = field(20);
        assert_eq!(a.stars(), b.stars());
    }
}
