use anyhow::Result;
use clap::Parser;
use db_audio::TrackPlayer;
use db_core::clock::WallClock;
use db_core::config::DemoConfig;
use db_fx::Demo;

pub mod app;
pub mod cli;
pub mod export;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);

    // Export PNG, sans terminal ni audio
    if let Some(ref dir) = cli.export {
        let opts = export::ExportOptions {
            dir: dir.clone(),
            duration: cli.duration,
            scale: cli.scale,
        };
        let frames = export::run_export(&config, &opts)?;
        log::info!("{frames} frames écrites dans {}", dir.display());
        return Ok(());
    }

    // 4. Construire la démo, avec bande-son si disponible
    let mut demo = Demo::new(&config, WallClock::new());
    if let Some(player) = init_audio(&config) {
        demo = demo.with_soundtrack(Box::new(player));
    }

    // 5. Initialiser le terminal ratatui
    let terminal = ratatui::init();

    // 6. Boucle principale
    let result = app::App::new(demo, &config).and_then(|mut app| app.run(terminal));

    // 7. Restaurer le terminal (TOUJOURS, même en cas d'erreur)
    ratatui::restore();

    result
}

/// Démarre le lecteur audio. Un échec laisse la démo muette.
fn init_audio(config: &DemoConfig) -> Option<TrackPlayer> {
    let path = config.audio.as_deref()?;
    match TrackPlayer::spawn(path) {
        Ok(player) => Some(player),
        Err(e) => {
            log::warn!("Audio non disponible ({}) : {e:#}", path.display());
            None
        }
    }
}

fn resolve_config(cli: &cli::Cli) -> Result<DemoConfig> {
    if cli.config.exists() {
        db_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(DemoConfig::default())
    }
}
