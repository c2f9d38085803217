//! Bande-son de Desert Byte : décodage (symphonia) et lecture (cpal).
//!
//! Tout passe par le trait `db_core::traits::Soundtrack`. Une erreur ici ne
//! doit jamais interrompre le rendu : l'appelant la journalise et continue.

pub mod decode;
pub mod error;
pub mod player;

pub use decode::{DecodedTrack, decode_file};
pub use error::AudioError;
pub use player::{PlayerCommand, TrackPlayer};
