use db_core::color::Color;
use db_core::surface::Surface;
use db_core::timeline::EffectKind;

use crate::Effect;

/// Côté du logo (px).
pub const SIZE: f64 = 60.0;
/// Cases par côté du damier.
pub const CHECKS: usize = 8;
/// Incrément de rotation par frame (rad).
pub const SPIN: f64 = 0.02;
/// Bande réservée en bas pour le scroller.
pub const BOTTOM_MARGIN: f64 = 40.0;

/// Axes dont la vitesse a été inversée pendant un `step`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounce {
    pub x: bool,
    pub y: bool,
}

/// Damier carré qui rebondit en tournant sur lui-même.
#[derive(Clone, Debug)]
pub struct BouncingLogo {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    rotation: f64,
    width: f64,
    height: f64,
}

impl BouncingLogo {
    /// Part du centre de la surface avec une vitesse (2, 1.5) px/frame.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let width = f64::from(width);
        let height = f64::from(height);
        Self {
            x: width / 2.0,
            y: height / 2.0,
            vx: 2.0,
            vy: 1.5,
            rotation: 0.0,
            width,
            height,
        }
    }

    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    #[must_use]
    pub fn velocity(&self) -> (f64, f64) {
        (self.vx, self.vy)
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Avance d'une frame et renvoie les axes qui ont rebondi.
    ///
    /// # Example
    /// ```
    /// use db_fx::logo::BouncingLogo;
    /// let mut logo = BouncingLogo::new(320, 256);
    /// let bounce = logo.step();
    /// assert!(!bounce.x && !bounce.y);
    /// assert_eq!(logo.position(), (162.0, 129.5));
    /// ```
    pub fn step(&mut self) -> Bounce {
        self.x += self.vx;
        self.y += self.vy;

        let half = SIZE / 2.0;
        let bounce = Bounce {
            x: self.x - half < 0.0 || self.x + half > self.width,
            y: self.y - half < 0.0 || self.y + half > self.height - BOTTOM_MARGIN,
        };
        if bounce.x {
            self.vx = -self.vx;
        }
        if bounce.y {
            self.vy = -self.vy;
        }
        self.rotation += SPIN;
        bounce
    }

    fn draw(&self, surface: &mut dyn Surface, time: f64) {
        let half = (SIZE / 2.0) as f32;
        let cell = (SIZE / CHECKS as f64) as f32;

        surface.save();
        surface.translate(self.x as f32, self.y as f32);
        surface.rotate(self.rotation as f32);

        for i in 0..CHECKS {
            for j in 0..CHECKS {
                if (i + j) % 2 != 0 {
                    continue;
                }
                let hue = (time * 50.0 + (i * 30) as f64 + (j * 30) as f64) % 360.0;
                surface.fill_rect(
                    -half + i as f32 * cell,
                    -half + j as f32 * cell,
                    cell,
                    cell,
                    Color::Hsl(hue, 80.0, 50.0),
                );
            }
        }
        surface.stroke_rect(
            -half,
            -half,
            SIZE as f32,
            SIZE as f32,
            2.0,
            Color::WHITE,
        );

        surface.restore();
    }
}

impl Effect for BouncingLogo {
    fn kind(&self) -> EffectKind {
        EffectKind::Logo
    }

    fn render(&mut self, surface: &mut dyn Surface, time: f64) {
        self.step();
        self.draw(surface, time);
    }
}
