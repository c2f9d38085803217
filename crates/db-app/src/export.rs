use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use db_core::canvas::Canvas;
use db_core::clock::ManualClock;
use db_core::config::{DemoConfig, SCREEN_HEIGHT, SCREEN_WIDTH};
use db_fx::Demo;
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Paramètres de l'export PNG.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    pub dir: PathBuf,
    /// Secondes de démo à rendre.
    pub duration: f64,
    /// Agrandissement entier, plus proche voisin.
    pub scale: u32,
}

/// Chemin du PNG de la frame `index`.
#[must_use]
pub fn frame_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("frame_{index:05}.png"))
}

/// Rend la démo hors terminal, sans audio, une image PNG par frame.
///
/// L'horloge avance de `1/target_fps` par frame : la sortie est identique
/// d'un lancement à l'autre pour une même graine.
///
/// # Errors
/// Returns an error if the output directory cannot be created or a frame
/// cannot be encoded or written.
pub fn run_export(config: &DemoConfig, opts: &ExportOptions) -> Result<usize> {
    std::fs::create_dir_all(&opts.dir)
        .with_context(|| format!("Impossible de créer {}", opts.dir.display()))?;

    let fps = config.target_fps.max(1);
    let frames = (opts.duration.max(0.0) * f64::from(fps)).round() as usize;
    let dt = 1.0 / f64::from(fps);

    let mut demo = Demo::new(config, ManualClock::default());
    let mut canvas = Canvas::new(SCREEN_WIDTH, SCREEN_HEIGHT)?;
    demo.start();

    log::info!(
        "Export de {frames} frames ({:.1}s @ {fps} FPS) vers {}",
        opts.duration,
        opts.dir.display()
    );

    for index in 0..frames {
        demo.clock_mut().set(index as f64 * dt);
        if let Some(info) = demo.frame(&mut canvas)
            && index % fps as usize == 0
        {
            log::info!("{} : {}", info.elapsed_label(), info.scene);
        }

        let path = frame_path(&opts.dir, index);
        to_image(&canvas, opts.scale)?
            .save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("Écriture impossible : {}", path.display()))?;
    }

    Ok(frames)
}

fn to_image(canvas: &Canvas, scale: u32) -> Result<RgbaImage> {
    let img = RgbaImage::from_raw(SCREEN_WIDTH, SCREEN_HEIGHT, canvas.data().to_vec())
        .context("Taille de canvas inattendue")?;
    if scale <= 1 {
        return Ok(img);
    }
    Ok(imageops::resize(
        &img,
        SCREEN_WIDTH * scale,
        SCREEN_HEIGHT * scale,
        FilterType::Nearest,
    ))
}
