use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The timeline table has no entry.
    #[error("Timeline vide : au moins une scène est requise")]
    EmptyTimeline,

    /// Effect identifier not recognised.
    #[error("Effet inconnu : {name}")]
    UnknownEffect {
        /// Name as written in the configuration.
        name: String,
    },

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },
}
