use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identifiant d'un effet de la démo.
///
/// Noms en camelCase dans le TOML (`"rasterBars"`).
///
/// # Example
/// ```
/// use db_core::timeline::EffectKind;
/// let kind: EffectKind = "rasterBars".parse().unwrap();
/// assert_eq!(kind, EffectKind::RasterBars);
/// assert_eq!(kind.to_string(), "rasterBars");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectKind {
    Plasma,
    Starfield,
    RasterBars,
    Logo,
    Cube,
    Scroller,
}

impl EffectKind {
    /// Ordre de dessin fixe. Le scroller passe en dernier pour recouvrir le reste.
    pub const RENDER_ORDER: [Self; 6] = [
        Self::Plasma,
        Self::Starfield,
        Self::RasterBars,
        Self::Logo,
        Self::Cube,
        Self::Scroller,
    ];

    /// Nom canonique (camelCase).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plasma => "plasma",
            Self::Starfield => "starfield",
            Self::RasterBars => "rasterBars",
            Self::Logo => "logo",
            Self::Cube => "cube",
            Self::Scroller => "scroller",
        }
    }

    #[inline]
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::RENDER_ORDER
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| CoreError::UnknownEffect { name: s.to_owned() })
    }
}

/// Ensemble d'effets actifs, stocké sur un octet.
///
/// L'itération suit toujours `EffectKind::RENDER_ORDER`, quel que soit
/// l'ordre d'insertion.
///
/// # Example
/// ```
/// use db_core::timeline::{EffectKind, EffectSet};
/// let set: EffectSet = [EffectKind::Scroller, EffectKind::Plasma].into_iter().collect();
/// let order: Vec<_> = set.iter().collect();
/// assert_eq!(order, vec![EffectKind::Plasma, EffectKind::Scroller]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "Vec<EffectKind>", into = "Vec<EffectKind>")]
pub struct EffectSet(u8);

impl EffectSet {
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, kind: EffectKind) {
        self.0 |= kind.bit();
    }

    #[must_use]
    pub const fn contains(self, kind: EffectKind) -> bool {
        self.0 & kind.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Effets présents, dans l'ordre de dessin.
    pub fn iter(self) -> impl Iterator<Item = EffectKind> {
        EffectKind::RENDER_ORDER
            .into_iter()
            .filter(move |k| self.contains(*k))
    }
}

impl FromIterator<EffectKind> for EffectSet {
    fn from_iter<I: IntoIterator<Item = EffectKind>>(iter: I) -> Self {
        let mut set = Self::empty();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl From<Vec<EffectKind>> for EffectSet {
    fn from(kinds: Vec<EffectKind>) -> Self {
        kinds.into_iter().collect()
    }
}

impl From<EffectSet> for Vec<EffectKind> {
    fn from(set: EffectSet) -> Self {
        set.iter().collect()
    }
}

fn unbounded() -> f64 {
    f64::INFINITY
}

/// Une scène de la timeline : intervalle `[start, end)` en secondes.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TimelineEntry {
    pub start: f64,
    /// Fin exclusive. Absente du TOML = non bornée.
    #[serde(default = "unbounded")]
    pub end: f64,
    /// Nom affiché dans la barre de statut.
    pub scene: String,
    pub effects: EffectSet,
}

impl TimelineEntry {
    #[must_use]
    pub fn new(start: f64, end: f64, scene: &str, effects: &[EffectKind]) -> Self {
        Self {
            start,
            end,
            scene: scene.to_owned(),
            effects: effects.iter().copied().collect(),
        }
    }

    /// `true` si `t` tombe dans `[start, end)`.
    #[inline]
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }
}

/// Table ordonnée des scènes. Jamais vide.
///
/// # Example
/// ```
/// use db_core::timeline::{EffectKind, Timeline};
/// let timeline = Timeline::default();
/// let scene = timeline.select_scene(10.0);
/// assert_eq!(scene.scene, "rasters");
/// assert!(scene.effects.contains(EffectKind::RasterBars));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    /// Construit une timeline à partir d'entrées déjà ordonnées.
    ///
    /// # Errors
    /// Returns `CoreError::EmptyTimeline` when `entries` is empty.
    pub fn new(entries: Vec<TimelineEntry>) -> Result<Self, CoreError> {
        if entries.is_empty() {
            return Err(CoreError::EmptyTimeline);
        }
        for pair in entries.windows(2) {
            if pair[1].start != pair[0].end {
                log::warn!(
                    "Timeline : trou ou chevauchement entre '{}' et '{}' ({} → {})",
                    pair[0].scene,
                    pair[1].scene,
                    pair[0].end,
                    pair[1].start
                );
            }
        }
        Ok(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Index de la scène active à `elapsed` secondes.
    ///
    /// Première entrée dont l'intervalle contient `elapsed`, sinon la dernière.
    #[must_use]
    pub fn index_at(&self, elapsed: f64) -> usize {
        self.entries
            .iter()
            .position(|e| e.contains(elapsed))
            .unwrap_or(self.entries.len() - 1)
    }

    /// Scène active à `elapsed` secondes.
    #[must_use]
    pub fn select_scene(&self, elapsed: f64) -> &TimelineEntry {
        &self.entries[self.index_at(elapsed)]
    }

    /// Dernière borne finie de la table (début de la scène finale).
    #[must_use]
    pub fn last_boundary(&self) -> f64 {
        self.entries
            .iter()
            .flat_map(|e| [e.start, e.end])
            .filter(|t| t.is_finite())
            .fold(0.0, f64::max)
    }
}

impl Default for Timeline {
    fn default() -> Self {
        use EffectKind::{Cube, Logo, Plasma, RasterBars, Scroller, Starfield};

        Self {
            entries: vec![
                TimelineEntry::new(0.0, 8.0, "intro", &[Starfield, Scroller]),
                TimelineEntry::new(8.0, 16.0, "rasters", &[RasterBars, Scroller]),
                TimelineEntry::new(16.0, 28.0, "logo", &[Starfield, Logo]),
                TimelineEntry::new(28.0, 40.0, "plasma", &[Plasma, Scroller]),
                TimelineEntry::new(40.0, 52.0, "3d-cube", &[Cube, Starfield]),
                TimelineEntry::new(52.0, 64.0, "rasterBars", &[RasterBars, Scroller]),
                TimelineEntry::new(64.0, 76.0, "logo", &[Logo, Scroller]),
                TimelineEntry::new(76.0, f64::INFINITY, "3d-cube", &[Starfield, Cube, Scroller]),
            ],
        }
    }
}
