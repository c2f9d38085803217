use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::timeline::{Timeline, TimelineEntry};

/// Résolution logique fixe de la surface (pixels).
pub const SCREEN_WIDTH: u32 = 320;
/// Résolution logique fixe de la surface (pixels).
pub const SCREEN_HEIGHT: u32 = 256;

/// Configuration complète de la démo.
///
/// Chargée depuis TOML puis fusionnée sur les valeurs par défaut.
///
/// # Example
/// ```
/// use db_core::config::DemoConfig;
/// let config = DemoConfig::default();
/// assert_eq!(config.target_fps, 60);
/// assert_eq!(config.star_count, 100);
/// ```
#[derive(Clone, Debug)]
pub struct DemoConfig {
    /// FPS cible de la boucle de rendu. Les effets avancent par frame.
    pub target_fps: u32,
    /// Nombre d'étoiles, fixé à la construction du starfield.
    pub star_count: usize,
    /// Graine RNG. `None` = entropie système.
    pub seed: Option<u64>,
    /// Piste audio jouée au démarrage. `None` = démo muette.
    pub audio: Option<PathBuf>,
    /// Démarrer sans attendre la touche Entrée.
    pub autostart: bool,
    /// Afficher la barre de statut (scène, temps, FPS).
    pub show_status: bool,
    /// Remplace le texte du scroller.
    pub scroller_text: Option<String>,
    /// Table des scènes.
    pub timeline: Timeline,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            star_count: 100,
            seed: None,
            audio: Some(PathBuf::from("desert-byte.mp3")),
            autostart: false,
            show_status: true,
            scroller_text: None,
            timeline: Timeline::default(),
        }
    }
}

impl DemoConfig {
    /// Clamp all numeric fields to their valid ranges.
    pub fn clamp_all(&mut self) {
        self.target_fps = self.target_fps.clamp(15, 240);
        self.star_count = self.star_count.clamp(1, 2000);
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    demo: Option<DemoSection>,
    scroller: Option<ScrollerSection>,
    timeline: Option<Vec<TimelineEntry>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DemoSection {
    target_fps: Option<u32>,
    star_count: Option<usize>,
    seed: Option<u64>,
    audio: Option<PathBuf>,
    autostart: Option<bool>,
    show_status: Option<bool>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ScrollerSection {
    text: Option<String>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if it declares
/// an empty timeline.
///
/// # Example
/// ```no_run
/// use db_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<DemoConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Config invalide : {}", path.display()))
}

/// Parse une config TOML déjà en mémoire.
///
/// # Errors
/// Returns an error on TOML syntax errors, unknown keys or effect names, or
/// an empty `[[timeline]]` table.
///
/// # Example
/// ```
/// use db_core::config::parse_config;
/// let config = parse_config("[demo]\ntarget_fps = 30\nseed = 7").unwrap();
/// assert_eq!(config.target_fps, 30);
/// assert_eq!(config.seed, Some(7));
/// ```
pub fn parse_config(content: &str) -> Result<DemoConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = DemoConfig::default();

    if let Some(d) = file.demo {
        if let Some(v) = d.target_fps {
            config.target_fps = v;
        }
        if let Some(v) = d.star_count {
            config.star_count = v;
        }
        if let Some(v) = d.seed {
            config.seed = Some(v);
        }
        if let Some(v) = d.audio {
            config.audio = Some(v);
        }
        if let Some(v) = d.autostart {
            config.autostart = v;
        }
        if let Some(v) = d.show_status {
            config.show_status = v;
        }
    }

    if let Some(s) = file.scroller {
        config.scroller_text = s.text;
    }

    if let Some(entries) = file.timeline {
        config.timeline = Timeline::new(entries)?;
    }

    config.clamp_all();
    Ok(config)
}
