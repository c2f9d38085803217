use std::path::PathBuf;

use clap::Parser;
use db_core::config::DemoConfig;

/// Desert Byte : démo Amiga dans le terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Piste audio jouée au lancement (remplace celle de la config).
    #[arg(long)]
    pub audio: Option<PathBuf>,

    /// Démo muette.
    #[arg(long, default_value_t = false, conflicts_with = "audio")]
    pub no_audio: bool,

    /// Graine RNG, pour un rendu reproductible.
    #[arg(long)]
    pub seed: Option<u64>,

    /// FPS cible (15 à 240).
    #[arg(long)]
    pub fps: Option<u32>,

    /// Lancer sans attendre la touche Entrée.
    #[arg(long, default_value_t = false)]
    pub autostart: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Exporter des PNG dans ce dossier au lieu d'ouvrir le terminal.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Durée exportée, en secondes.
    #[arg(long, default_value_t = 10.0, requires = "export")]
    pub duration: f64,

    /// Facteur d'agrandissement des PNG exportés.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=4))]
    pub scale: u32,
}

impl Cli {
    /// Applique les options de ligne de commande par-dessus la config.
    pub fn apply_overrides(&self, config: &mut DemoConfig) {
        if let Some(ref path) = self.audio {
            config.audio = Some(path.clone());
        }
        if self.no_audio {
            config.audio = None;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(fps) = self.fps {
            config.target_fps = fps;
        }
        if self.autostart {
            config.autostart = true;
        }
        config.clamp_all();
    }
}
