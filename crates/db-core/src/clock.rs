use std::time::Instant;

/// Source de temps de la démo : secondes écoulées depuis le dernier `reset`.
///
/// # Example
/// ```
/// use db_core::clock::{Clock, ManualClock};
/// let mut clock = ManualClock::default();
/// clock.set(12.5);
/// assert!((clock.elapsed_secs() - 12.5).abs() < f64::EPSILON);
/// clock.reset();
/// assert_eq!(clock.elapsed_secs(), 0.0);
/// ```
pub trait Clock {
    /// Remet l'origine à maintenant.
    fn reset(&mut self);

    /// Secondes écoulées depuis l'origine, monotone.
    fn elapsed_secs(&self) -> f64;
}

/// Horloge murale monotone (`Instant`), utilisée en mode interactif.
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn reset(&mut self) {
        self.origin = Instant::now();
    }

    #[inline]
    fn elapsed_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Horloge pilotée à la main : export hors-ligne et tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    /// Fixe le temps courant (secondes).
    pub fn set(&mut self, secs: f64) {
        self.now = secs.max(0.0);
    }

    /// Avance d'un pas (secondes).
    pub fn advance(&mut self, dt: f64) {
        self.set(self.now + dt);
    }
}

impl Clock for ManualClock {
    fn reset(&mut self) {
        self.now = 0.0;
    }

    #[inline]
    fn elapsed_secs(&self) -> f64 {
        self.now
    }
}
