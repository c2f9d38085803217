use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

use anyhow::Context;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use db_core::traits::Soundtrack;

use crate::decode::{self, DecodedTrack};
use crate::error::AudioError;

/// Commandes envoyées au thread audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Rembobine et lance la lecture.
    Play,
    /// Coupe la lecture.
    Stop,
    /// Ferme le stream et termine le thread.
    Quit,
}

/// Position de lecture partagée entre le callback cpal et le thread de
/// contrôle.
#[derive(Debug, Default)]
struct Playhead {
    frame: AtomicUsize,
    playing: AtomicBool,
}

/// Remplit un buffer de sortie entrelacé à partir de la frame `pos`.
///
/// Renvoie la nouvelle position. Au-delà de la fin de la piste, le buffer
/// est complété par du silence : la lecture ne boucle pas.
///
/// # Example
/// ```
/// use db_audio::decode::DecodedTrack;
/// use db_audio::player::fill_output;
///
/// let track = DecodedTrack { samples: vec![0.5, -0.5], sample_rate: 8000, channels: 1 };
/// let mut out = [1.0f32; 6];
/// let pos = fill_output(&mut out, 2, &track, 0);
/// assert_eq!(pos, 2);
/// assert_eq!(out, [0.5, 0.5, -0.5, -0.5, 0.0, 0.0]);
/// ```
pub fn fill_output(
    out: &mut [f32],
    out_channels: usize,
    track: &DecodedTrack,
    pos: usize,
) -> usize {
    let total = track.frames();
    let mut pos = pos;
    for frame in out.chunks_mut(out_channels.max(1)) {
        if pos >= total {
            frame.fill(0.0);
            continue;
        }
        let (l, r) = track.stereo_frame(pos);
        match frame {
            [mono] => *mono = (l + r) * 0.5,
            [left, right, rest @ ..] => {
                *left = l;
                *right = r;
                rest.fill(0.0);
            }
            [] => {}
        }
        pos += 1;
    }
    pos
}

/// Lecteur de la bande-son sur la sortie audio par défaut.
///
/// Le stream cpal vit dans un thread dédié ; on le pilote par un canal
/// `flume`. Le fichier est décodé une seule fois, à la création.
pub struct TrackPlayer {
    cmd_tx: flume::Sender<PlayerCommand>,
    handle: Option<JoinHandle<()>>,
    path: PathBuf,
}

impl TrackPlayer {
    /// Décode `path` et ouvre la sortie audio, sans lancer la lecture.
    ///
    /// # Errors
    /// Returns an error if decoding fails, no output device exists, or the
    /// output stream cannot be built.
    pub fn spawn(path: &Path) -> anyhow::Result<Self> {
        let track = Arc::new(decode::decode_file(path)?);
        let (cmd_tx, cmd_rx) = flume::unbounded::<PlayerCommand>();
        let (ready_tx, ready_rx) = flume::bounded::<Result<(), AudioError>>(1);

        let handle = thread::Builder::new()
            .name("db-audio".to_string())
            .spawn(move || run_player(&track, &cmd_rx, &ready_tx))
            .context("Impossible de lancer le thread audio")?;

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = handle.join();
                return Err(e.into());
            }
            Err(_) => return Err(AudioError::Disconnected.into()),
        }

        log::info!("Bande-son prête : {}", path.display());
        Ok(Self {
            cmd_tx,
            handle: Some(handle),
            path: path.to_path_buf(),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn send(&self, cmd: PlayerCommand) -> Result<(), AudioError> {
        self.cmd_tx.send(cmd).map_err(|_| AudioError::Disconnected)
    }
}

impl Soundtrack for TrackPlayer {
    fn play_from_start(&mut self) -> anyhow::Result<()> {
        self.send(PlayerCommand::Play)?;
        Ok(())
    }

    fn stop(&mut self) {
        if let Err(e) = self.send(PlayerCommand::Stop) {
            log::debug!("Stop audio ignoré : {e}");
        }
    }
}

impl Drop for TrackPlayer {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(PlayerCommand::Quit);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Corps du thread audio : ouvre le stream, signale qu'il est prêt, puis
/// applique les commandes jusqu'à `Quit`.
fn run_player(
    track: &Arc<DecodedTrack>,
    cmd_rx: &flume::Receiver<PlayerCommand>,
    ready_tx: &flume::Sender<Result<(), AudioError>>,
) {
    let playhead = Arc::new(Playhead::default());
    let stream = match build_stream(track, &playhead) {
        Ok(s) => s,
        Err(e) => {
            let _ = ready_tx.send(Err(e));
            return;
        }
    };
    let _ = ready_tx.send(Ok(()));

    while let Ok(cmd) = cmd_rx.recv() {
        apply_command(cmd, &playhead);
        if cmd == PlayerCommand::Quit {
            break;
        }
    }
    drop(stream);
    log::debug!("Thread audio terminé");
}

fn apply_command(cmd: PlayerCommand, playhead: &Playhead) {
    match cmd {
        PlayerCommand::Play => {
            playhead.frame.store(0, Ordering::Relaxed);
            playhead.playing.store(true, Ordering::Relaxed);
        }
        PlayerCommand::Stop | PlayerCommand::Quit => {
            playhead.playing.store(false, Ordering::Relaxed);
        }
    }
}

fn build_stream(
    track: &Arc<DecodedTrack>,
    playhead: &Arc<Playhead>,
) -> Result<cpal::Stream, AudioError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or(AudioError::NoOutputDevice)?;

    let config = cpal::StreamConfig {
        channels: 2,
        sample_rate: cpal::SampleRate(track.sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };
    let out_channels = usize::from(config.channels);
    let sample_rate = track.sample_rate;

    let track = Arc::clone(track);
    let playhead = Arc::clone(playhead);
    let stream = device
        .build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                if !playhead.playing.load(Ordering::Relaxed) {
                    data.fill(0.0);
                    return;
                }
                let pos = playhead.frame.load(Ordering::Relaxed);
                let next = fill_output(data, out_channels, &track, pos);
                playhead.frame.store(next, Ordering::Relaxed);
                if next >= track.frames() {
                    playhead.playing.store(false, Ordering::Relaxed);
                }
            },
            |err| {
                log::error!("Audio output error: {err}");
            },
            None,
        )
        .map_err(|e| AudioError::StreamError(e.to_string()))?;

    stream
        .play()
        .map_err(|e| AudioError::StreamError(e.to_string()))?;
    log::info!("Sortie audio ouverte @ {sample_rate}Hz");
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo(samples: Vec<f32>) -> DecodedTrack {
        DecodedTrack {
            samples,
            sample_rate: 8000,
            channels: 2,
        }
    }

    #[test]
    fn fill_copies_stereo_frames() {
        let track = stereo(vec![0.1, 0.2, 0.3, 0.4]);
        let mut out = [9.0f32; 4];
        let pos = fill_output(&mut out, 2, &track, 0);
        assert_eq!(pos, 2);
        assert_eq!(out, [0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn fill_does_not_loop() {
        let track = stereo(vec![0.1, 0.2, 0.3, 0.4]);
        let mut out = [9.0f32; 6];
        let pos = fill_output(&mut out, 2, &track, 1);
        assert_eq!(pos, 2);
        assert_eq!(out, [0.3, 0.4, 0.0, 0.0, 0.0, 0.0]);

        let pos = fill_output(&mut out, 2, &track, pos);
        assert_eq!(pos, 2);
        assert!(out.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn fill_downmixes_to_single_channel() {
        let track = stereo(vec![0.2, 0.4]);
        let mut out = [0.0f32; 1];
        fill_output(&mut out, 1, &track, 0);
        assert!((out[0] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn fill_silences_extra_channels() {
        let track = stereo(vec![0.2, 0.4]);
        let mut out = [9.0f32; 4];
        fill_output(&mut out, 4, &track, 0);
        assert_eq!(out, [0.2, 0.4, 0.0, 0.0]);
    }

    #[test]
    fn play_rewinds_and_stop_halts() {
        let playhead = Playhead::default();
        playhead.frame.store(500, Ordering::Relaxed);

        apply_command(PlayerCommand::Play, &playhead);
        assert_eq!(playhead.frame.load(Ordering::Relaxed), 0);
        assert!(playhead.playing.load(Ordering::Relaxed));

        apply_command(PlayerCommand::Stop, &playhead);
        assert!(!playhead.playing.load(Ordering::Relaxed));
    }

    #[test]
    fn spawn_fails_cleanly_on_missing_file() {
        assert!(TrackPlayer::spawn(Path::new("/nonexistent/desert-byte.mp3")).is_err());
    }
}
