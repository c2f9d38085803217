use crate::color::Color;

/// Point 2D en coordonnées surface (pixels logiques).
pub type Point = (f32, f32);

/// Surface de dessin injectée dans chaque effet.
///
/// Reproduit le sous-ensemble d'un contexte 2D dont la démo a besoin.
/// Toutes les primitives passent par la transformation courante,
/// sauf `clear` qui couvre toujours la surface entière.
///
/// # Example
/// ```
/// use db_core::canvas::Canvas;
/// use db_core::color::Color;
/// use db_core::surface::Surface;
///
/// let mut canvas = Canvas::new(32, 32).unwrap();
/// canvas.clear(Color::BLACK);
/// canvas.save();
/// canvas.translate(16.0, 16.0);
/// canvas.fill_rect(-2.0, -2.0, 4.0, 4.0, Color::WHITE);
/// canvas.restore();
/// assert_eq!(canvas.rgb(16, 16), (255, 255, 255));
/// ```
pub trait Surface {
    /// Width in logical pixels.
    fn width(&self) -> u32;

    /// Height in logical pixels.
    fn height(&self) -> u32;

    /// Remplit toute la surface, sans tenir compte de la transformation.
    fn clear(&mut self, color: Color);

    /// Axis-aligned rectangle in the current local frame.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    /// Contour de rectangle, trait centré sur les bords.
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32, color: Color);

    /// Polygone fermé rempli (règle non-zéro). Ignoré sous 3 points.
    fn fill_polygon(&mut self, points: &[Point], color: Color);

    /// Segment de droite.
    fn stroke_line(&mut self, from: Point, to: Point, line_width: f32, color: Color);

    /// Texte monospace, avance de 8 px, `y` = milieu vertical du texte.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Color);

    /// Empile la transformation courante.
    fn save(&mut self);

    /// Dépile la transformation. Sans effet si la pile est vide.
    fn restore(&mut self);

    /// Translate the local frame.
    fn translate(&mut self, dx: f32, dy: f32);

    /// Rotate the local frame, clockwise on screen (y down).
    fn rotate(&mut self, radians: f32);
}
