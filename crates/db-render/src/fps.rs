use std::collections::VecDeque;
use std::time::Instant;

/// Compteur FPS par fenêtre glissante.
///
/// # Example
/// ```
/// use db_render::fps::FpsCounter;
/// let mut counter = FpsCounter::new(60);
/// counter.tick();
/// assert!(counter.fps() >= 0.0);
/// ```
pub struct FpsCounter {
    /// Instants des dernières frames, au plus `window`.
    stamps: VecDeque<Instant>,
    window: usize,
    fps: f64,
}

impl FpsCounter {
    #[must_use]
    pub fn new(window: usize) -> Self {
        let window = window.max(2);
        Self {
            stamps: VecDeque::with_capacity(window + 1),
            window,
            fps: 0.0,
        }
    }

    /// Appeler une fois par frame, après le rendu.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Enregistre une frame présentée à `now`.
    pub fn tick_at(&mut self, now: Instant) {
        self.stamps.push_back(now);
        if self.stamps.len() > self.window {
            self.stamps.pop_front();
        }
        if self.stamps.len() >= 2
            && let Some(first) = self.stamps.front()
        {
            let secs = now.duration_since(*first).as_secs_f64();
            if secs > 0.0 {
                self.fps = (self.stamps.len() - 1) as f64 / secs;
            }
        }
    }

    /// FPS moyen sur la fenêtre.
    #[must_use]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Remet le compteur à zéro (après une pause, par exemple).
    pub fn reset(&mut self) {
        self.stamps.clear();
        self.fps = 0.0;
    }
}
