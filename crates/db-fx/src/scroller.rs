use db_core::color::Color;
use db_core::font::ADVANCE;
use db_core::surface::Surface;
use db_core::timeline::EffectKind;

use crate::Effect;

/// Texte hommage affiché par défaut.
pub const TRIBUTE_TEXT: &str = concat!(
    "    WELCOME TO THE COMMODORE AMIGA DEMOSCENE...",
    "    DESERT BYTE PRESENTS...",
    "    AUTHENTIC 1980S STYLE DEMO EFFECTS...",
    "    FEATURING STARFIELDS, COPPER BARS, PLASMA, AND MORE...",
    "    CODED IN PURE RUST...",
    "    GREETINGS TO ALL SCENERS WORLDWIDE...",
    "    KEEP THE SCENE ALIVE!",
    "    SPECIAL THANKS TO THE ORIGINAL AMIGA DEMO CREATORS...",
    "    THIS DEMO IS A TRIBUTE TO YOUR LEGACY...",
    "    DEDICATED TO KEFRENS, NIGHTLIGHT, AND OTHER LEGENDS...",
    "    CODED BY MACKENZIE",
    "    MUSIC BY MACKENZIE",
    "    GRAPHICS BY MACKENZIE",
    "    ENRICHED WITH LOVE AND NOSTALGIA...",
    "    DESERT BYTE RULES!",
    "    SEE YOU IN THE NEXT DEMO!    ",
);

/// Défilement en px par frame.
pub const SPEED: f64 = 1.5;
pub const FONT_SIZE: f32 = 16.0;
pub const AMPLITUDE: f64 = 10.0;
/// Marge de visibilité hors écran, de chaque côté.
const MARGIN: f64 = 20.0;
/// Distance de la ligne de base au bas de l'écran.
const BASELINE_OFFSET: f64 = 30.0;

/// Couleur à deux teintes : 180° sur la première moitié de la phase, 30° ensuite.
///
/// # Example
/// ```
/// use db_fx::scroller::hue_at;
/// assert_eq!(hue_at(0.0, 0.2), 180.0);
/// assert_eq!(hue_at(0.0, 0.7), 30.0);
/// ```
#[must_use]
pub fn hue_at(char_x: f64, time: f64) -> f64 {
    let phase = (char_x * 0.02 + time) % 1.0;
    if phase < 0.5 { 180.0 } else { 30.0 }
}

/// Caractère positionné pour une frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub x: f64,
    pub y: f64,
    pub hue: f64,
}

pub struct Scroller {
    text: String,
    char_count: usize,
    x: f64,
    width: f64,
    height: f64,
}

impl Scroller {
    /// Le texte démarre au bord droit.
    #[must_use]
    pub fn new(text: &str, width: u32, height: u32) -> Self {
        let width = f64::from(width);
        Self {
            text: text.to_owned(),
            char_count: text.chars().count(),
            x: width,
            width,
            height: f64::from(height),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Seuil de rebouclage : tout le texte est passé à gauche.
    #[must_use]
    pub fn wrap_threshold(&self) -> f64 {
        -(self.char_count as f64 * f64::from(ADVANCE))
    }

    /// Recule d'une frame, ou revient au bord droit une fois le texte sorti.
    pub fn step(&mut self) {
        self.x -= SPEED;
        if self.x < self.wrap_threshold() {
            self.x = self.width;
        }
    }

    /// Caractères visibles, déplacés par la sinusoïde.
    pub fn glyphs(&self, time: f64) -> impl Iterator<Item = Glyph> + '_ {
        let baseline = self.height - BASELINE_OFFSET;
        let right = self.width + MARGIN;
        self.text.chars().enumerate().filter_map(move |(i, ch)| {
            let x = self.x + i as f64 * f64::from(ADVANCE);
            if x < -MARGIN || x >= right {
                return None;
            }
            let wave = (x * 0.05 + time * 2.0).sin() * AMPLITUDE;
            Some(Glyph {
                ch,
                x,
                y: baseline + wave,
                hue: hue_at(x, time),
            })
        })
    }
}

impl Effect for Scroller {
    fn kind(&self) -> EffectKind {
        EffectKind::Scroller
    }

    fn render(&mut self, surface: &mut dyn Surface, time: f64) {
        self.step();
        let mut buf = [0u8; 4];
        for glyph in self.glyphs(time) {
            surface.fill_text(
                glyph.ch.encode_utf8(&mut buf),
                glyph.x.floor() as f32,
                glyph.y.floor() as f32,
                FONT_SIZE,
                Color::Hsl(glyph.hue, 100.0, 60.0),
            );
        }
    }
}
