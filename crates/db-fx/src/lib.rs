//! Effets de la démo et pilote de session.
//!
//! Chaque effet possède son propre petit état et dessine directement sur la
//! `Surface` qu'on lui passe. `Demo` choisit la scène active et appelle les
//! effets dans l'ordre fixe de `EffectKind::RENDER_ORDER`.

pub mod cube;
pub mod demo;
pub mod logo;
pub mod plasma;
pub mod raster_bars;
pub mod scroller;
pub mod starfield;

#[cfg(test)]
pub(crate) mod testing;

use db_core::surface::Surface;
use db_core::timeline::EffectKind;

pub use demo::{Demo, DemoState, FrameInfo};

/// Un effet visuel rendu une fois par frame.
///
/// # Example
/// ```
/// use db_core::surface::Surface;
/// use db_core::timeline::EffectKind;
/// use db_fx::Effect;
///
/// struct Nothing;
/// impl Effect for Nothing {
///     fn kind(&self) -> EffectKind { EffectKind::Plasma }
///     fn render(&mut self, _surface: &mut dyn Surface, _time: f64) {}
/// }
/// ```
pub trait Effect {
    /// Identifiant utilisé par la timeline.
    fn kind(&self) -> EffectKind;

    /// Avance l'état interne d'une frame puis dessine.
    ///
    /// `time` = secondes écoulées depuis `Demo::start`.
    fn render(&mut self, surface: &mut dyn Surface, time: f64);
}
