use db_core::clock::Clock;
use db_core::color::Color;
use db_core::config::{DemoConfig, SCREEN_HEIGHT, SCREEN_WIDTH};
use db_core::surface::Surface;
use db_core::timeline::{EffectKind, Timeline, TimelineEntry};
use db_core::traits::Soundtrack;

use crate::Effect;
use crate::cube::RotatingCube;
use crate::logo::BouncingLogo;
use crate::plasma::Plasma;
use crate::raster_bars::RasterBars;
use crate::scroller::{Scroller, TRIBUTE_TEXT};
use crate::starfield::Starfield;

/// État de la session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoState {
    Idle,
    Running,
}

/// Résumé d'une frame rendue, pour les libellés de l'interface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInfo<'a> {
    pub scene: &'a str,
    pub scene_index: usize,
    pub elapsed: f64,
}

impl FrameInfo<'_> {
    /// Temps écoulé à une décimale.
    ///
    /// # Example
    /// ```
    /// use db_fx::FrameInfo;
    /// let info = FrameInfo { scene: "intro", scene_index: 0, elapsed: 12.34 };
    /// assert_eq!(info.elapsed_label(), "12.3s");
    /// ```
    #[must_use]
    pub fn elapsed_label(&self) -> String {
        format!("{:.1}s", self.elapsed)
    }
}

/// Les six effets, construits une fois par session.
pub struct Effects {
    pub plasma: Plasma,
    pub starfield: Starfield,
    pub raster_bars: RasterBars,
    pub logo: BouncingLogo,
    pub cube: RotatingCube,
    pub scroller: Scroller,
}

impl Effects {
    /// Construit tous les effets pour une surface `width`×`height`.
    ///
    /// Le hasard (étoiles, phases des barres) vient entièrement de `rng`.
    #[must_use]
    pub fn new(config: &DemoConfig, width: u32, height: u32, mut rng: fastrand::Rng) -> Self {
        let text = config.scroller_text.as_deref().unwrap_or(TRIBUTE_TEXT);
        let starfield = Starfield::new(width, height, config.star_count, rng.fork());
        let raster_bars = RasterBars::new(width, height, &mut rng);
        Self {
            plasma: Plasma::new(width, height),
            starfield,
            raster_bars,
            logo: BouncingLogo::new(width, height),
            cube: RotatingCube::new(width, height),
            scroller: Scroller::new(text, width, height),
        }
    }

    pub fn get_mut(&mut self, kind: EffectKind) -> &mut dyn Effect {
        match kind {
            EffectKind::Plasma => &mut self.plasma,
            EffectKind::Starfield => &mut self.starfield,
            EffectKind::RasterBars => &mut self.raster_bars,
            EffectKind::Logo => &mut self.logo,
            EffectKind::Cube => &mut self.cube,
            EffectKind::Scroller => &mut self.scroller,
        }
    }
}

/// Session de démo : horloge, timeline, effets et bande-son optionnelle.
///
/// `frame` est appelée une fois par tick de l'hôte ; elle ne dessine rien
/// tant que la session n'est pas lancée.
///
/// # Example
/// ```
/// use db_core::{Canvas, DemoConfig, ManualClock};
/// use db_fx::Demo;
///
/// let config = DemoConfig { seed: Some(1), ..DemoConfig::default() };
/// let mut demo = Demo::new(&config, ManualClock::default());
/// let mut canvas = Canvas::new(320, 256).unwrap();
///
/// assert!(demo.frame(&mut canvas).is_none());
/// assert!(demo.start());
/// demo.clock_mut().set(10.0);
/// let info = demo.frame(&mut canvas).unwrap();
/// assert_eq!(info.scene, "rasters");
/// assert_eq!(info.elapsed_label(), "10.0s");
/// ```
pub struct Demo<C: Clock> {
    state: DemoState,
    clock: C,
    timeline: Timeline,
    effects: Effects,
    soundtrack: Option<Box<dyn Soundtrack>>,
    current_scene: Option<usize>,
}

impl<C: Clock> Demo<C> {
    /// Session inactive, effets construits sur la résolution 320×256.
    #[must_use]
    pub fn new(config: &DemoConfig, clock: C) -> Self {
        let rng = config
            .seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        log::debug!(
            "Demo : {} étoiles, {} scènes, graine {:?}",
            config.star_count,
            config.timeline.entries().len(),
            config.seed
        );
        Self {
            state: DemoState::Idle,
            clock,
            timeline: config.timeline.clone(),
            effects: Effects::new(config, SCREEN_WIDTH, SCREEN_HEIGHT, rng),
            soundtrack: None,
            current_scene: None,
        }
    }

    /// Attache une bande-son, jouée depuis le début à chaque `start`.
    #[must_use]
    pub fn with_soundtrack(mut self, soundtrack: Box<dyn Soundtrack>) -> Self {
        self.soundtrack = Some(soundtrack);
        self
    }

    #[must_use]
    pub fn state(&self) -> DemoState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == DemoState::Running
    }

    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn effects_mut(&mut self) -> &mut Effects {
        &mut self.effects
    }

    /// Lance la session : remet l'horloge à zéro et joue la bande-son.
    ///
    /// Renvoie `false` sans rien faire si la session tourne déjà. Un échec
    /// audio est journalisé et n'empêche pas le démarrage.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            log::debug!("start ignoré : démo déjà lancée");
            return false;
        }
        self.clock.reset();
        self.current_scene = None;
        if let Some(track) = self.soundtrack.as_mut()
            && let Err(e) = track.play_from_start()
        {
            log::warn!("Lecture audio impossible : {e:#}");
        }
        self.state = DemoState::Running;
        log::info!("Démo lancée");
        true
    }

    /// Repasse en attente et coupe le son. Sans effet si déjà inactive.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.state = DemoState::Idle;
        if let Some(track) = self.soundtrack.as_mut() {
            track.stop();
        }
        log::info!("Démo arrêtée");
    }

    /// Scène active à `elapsed` secondes.
    #[must_use]
    pub fn select_scene(&self, elapsed: f64) -> &TimelineEntry {
        self.timeline.select_scene(elapsed)
    }

    /// Rend une frame si la session tourne.
    ///
    /// Efface la surface puis appelle les effets actifs dans l'ordre
    /// plasma, étoiles, barres, logo, cube, scroller.
    pub fn frame(&mut self, surface: &mut dyn Surface) -> Option<FrameInfo<'_>> {
        if !self.is_running() {
            return None;
        }

        let elapsed = self.clock.elapsed_secs();
        let index = self.timeline.index_at(elapsed);
        let entry = &self.timeline.entries()[index];

        if self.current_scene != Some(index) {
            log::info!("Scène '{}' à {elapsed:.1}s", entry.scene);
            self.current_scene = Some(index);
        }

        surface.clear(Color::BLACK);
        for kind in entry.effects.iter() {
            self.effects.get_mut(kind).render(surface, elapsed);
        }
        log::trace!("frame {elapsed:.3}s : {} effets", entry.effects.len());

        Some(FrameInfo {
            scene: &entry.scene,
            scene_index: index,
            elapsed,
        })
    }
}
