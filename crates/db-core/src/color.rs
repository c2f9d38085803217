/// Couleur de remplissage, exprimée comme en CSS.
///
/// `Rgb` prend des composantes [0,255]. `Hsl` prend une teinte en degrés
/// (ramenée dans [0,360)), saturation et luminosité en pourcentages [0,100].
///
/// # Example
/// ```
/// use db_core::color::Color;
/// assert_eq!(Color::Hsl(0.0, 100.0, 50.0).to_rgb(), (255, 0, 0));
/// assert_eq!(Color::gray(200).to_rgb(), (200, 200, 200));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    /// Composantes directes [0,255].
    Rgb(u8, u8, u8),
    /// Teinte (degrés), saturation (%), luminosité (%).
    Hsl(f64, f64, f64),
}

impl Color {
    /// Pure black, the demo background.
    pub const BLACK: Self = Self::Rgb(0, 0, 0);
    /// Pure white, used for outlines and cube edges.
    pub const WHITE: Self = Self::Rgb(255, 255, 255);

    /// Greyscale color with the same value on every channel.
    #[must_use]
    pub const fn gray(value: u8) -> Self {
        Self::Rgb(value, value, value)
    }

    /// Résout la couleur en triplet RGB.
    #[inline]
    #[must_use]
    pub fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Rgb(r, g, b) => (r, g, b),
            Self::Hsl(h, s, l) => hsl_to_rgb(h, s, l),
        }
    }
}

/// Convertit HSL (CSS) → RGB [0,255].
///
/// H en degrés (toute valeur, ramenée modulo 360), S et L en pourcentages,
/// bornés à [0,100]. Les composantes sont arrondies au plus proche.
///
/// # Example
/// ```
/// use db_core::color::hsl_to_rgb;
/// assert_eq!(hsl_to_rgb(180.0, 100.0, 60.0), (51, 255, 255));
/// assert_eq!(hsl_to_rgb(30.0, 100.0, 60.0), (255, 153, 51));
/// ```
#[must_use]
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);

    if s == 0.0 {
        let v = to_channel(l);
        return (v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    (
        to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_channel(hue_to_rgb(p, q, h)),
        to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

#[inline]
fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsl_primaries_match_css() {
        assert_eq!(hsl_to_rgb(0.0, 100.0, 50.0), (255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 100.0, 50.0), (0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 100.0, 50.0), (0, 0, 255));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 100.0), (255, 255, 255));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.0), (0, 0, 0));
    }

    #[test]
    fn hue_wraps_around() {
        assert_eq!(hsl_to_rgb(360.0, 100.0, 50.0), hsl_to_rgb(0.0, 100.0, 50.0));
        assert_eq!(hsl_to_rgb(-120.0, 100.0, 50.0), hsl_to_rgb(240.0, 100.0, 50.0));
        assert_eq!(hsl_to_rgb(750.0, 80.0, 40.0), hsl_to_rgb(30.0, 80.0, 40.0));
    }

    #[test]
    fn grey_rounds_to_nearest() {
        assert_eq!(hsl_to_rgb(90.0, 0.0, 50.0), (128, 128, 128));
    }

    #[test]
    fn lightness_above_hundred_is_clamped() {
        // 40 + 5*8 = 80 % for the last cube face, but still guard the upper bound.
        assert_eq!(hsl_to_rgb(10.0, 80.0, 140.0), (255, 255, 255));
    }
}
