use std::path::PathBuf;

use thiserror::Error;

/// Errors originating from the soundtrack module.
#[derive(Error, Debug)]
pub enum AudioError {
    /// No audio output device found.
    #[error("Aucun périphérique audio de sortie trouvé")]
    NoOutputDevice,

    /// The file decoded to zero samples.
    #[error("Piste audio vide : {}", .0.display())]
    EmptyTrack(PathBuf),

    /// Audio stream error.
    #[error("Erreur de stream audio : {0}")]
    StreamError(String),

    /// The playback thread has exited.
    #[error("Thread audio terminé")]
    Disconnected,
}
