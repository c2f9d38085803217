//! Affichage terminal de Desert Byte.
//!
//! Pixels → demi-blocs → `ratatui::Buffer`, plus la barre de statut et
//! l'écran d'attente.

pub mod canvas;
pub mod fps;
pub mod halfblock;
pub mod ui;
pub mod viewport;
