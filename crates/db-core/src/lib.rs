//! Types partagés de Desert Byte : couleurs, surface de dessin, horloge,
//! timeline, configuration.
//!
//! Ce crate ne dépend d'aucun terminal ni périphérique audio.

pub mod canvas;
pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod font;
pub mod frame;
pub mod surface;
pub mod timeline;
pub mod traits;

pub use canvas::Canvas;
pub use clock::{Clock, ManualClock, WallClock};
pub use color::Color;
pub use config::DemoConfig;
pub use error::CoreError;
pub use frame::{Cell, CellGrid, FrameBuffer};
pub use surface::{Point, Surface};
pub use timeline::{EffectKind, EffectSet, Timeline, TimelineEntry};
