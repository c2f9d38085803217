use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::color::Color;
use crate::error::CoreError;
use crate::font;
use crate::frame::FrameBuffer;
use crate::surface::{Point, Surface};

/// Surface raster logicielle (tiny-skia), sans anti-aliasing.
///
/// Les pixels restent nets, comme sur une machine 16 bits, et les tests
/// peuvent lire des couleurs exactes.
///
/// # Example
/// ```
/// use db_core::canvas::Canvas;
/// use db_core::color::Color;
/// use db_core::surface::Surface;
///
/// let mut canvas = Canvas::new(320, 256).unwrap();
/// canvas.clear(Color::Rgb(10, 20, 30));
/// assert_eq!(canvas.rgb(0, 0), (10, 20, 30));
/// ```
pub struct Canvas {
    pixmap: Pixmap,
    transform: Transform,
    stack: Vec<Transform>,
    paint: Paint<'static>,
}

impl Canvas {
    /// Crée une surface opaque noire.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidDimensions` for a zero-sized surface.
    pub fn new(width: u32, height: u32) -> Result<Self, CoreError> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(CoreError::InvalidDimensions { width, height })?;
        pixmap.fill(tiny_skia::Color::BLACK);

        let mut paint = Paint::default();
        paint.anti_alias = false;

        Ok(Self {
            pixmap,
            transform: Transform::identity(),
            stack: Vec::with_capacity(4),
            paint,
        })
    }

    /// Raw RGBA bytes, row-major. Colors are opaque so premultiplication is a no-op.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Copie les pixels dans un `FrameBuffer` de même taille.
    pub fn copy_into(&self, frame: &mut FrameBuffer) {
        frame.copy_from_rgba(self.pixmap.data());
    }

    /// Color of pixel (x, y). Out of bounds reads as black.
    #[must_use]
    pub fn rgb(&self, x: u32, y: u32) -> (u8, u8, u8) {
        self.pixmap
            .pixel(x, y)
            .map_or((0, 0, 0), |p| (p.red(), p.green(), p.blue()))
    }

    /// Profondeur de la pile save/restore.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    fn set_color(&mut self, color: Color) {
        let (r, g, b) = color.to_rgb();
        self.paint.set_color_rgba8(r, g, b, 255);
    }
}

impl Surface for Canvas {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear(&mut self, color: Color) {
        let (r, g, b) = color.to_rgb();
        self.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, 255));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        self.set_color(color);
        self.pixmap.fill_rect(rect, &self.paint, self.transform, None);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32, color: Color) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        let stroke = Stroke {
            width: line_width,
            ..Stroke::default()
        };
        self.set_color(color);
        self.pixmap
            .stroke_path(&path, &self.paint, &stroke, self.transform, None);
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.len() < 2 {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(first.0, first.1);
        for &(x, y) in rest {
            pb.line_to(x, y);
        }
        pb.close();
        let Some(path) = pb.finish() else {
            return;
        };
        self.set_color(color);
        self.pixmap
            .fill_path(&path, &self.paint, FillRule::Winding, self.transform, None);
    }

    fn stroke_line(&mut self, from: Point, to: Point, line_width: f32, color: Color) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.0, from.1);
        pb.line_to(to.0, to.1);
        let Some(path) = pb.finish() else {
            return;
        };
        let stroke = Stroke {
            width: line_width,
            ..Stroke::default()
        };
        self.set_color(color);
        self.pixmap
            .stroke_path(&path, &self.paint, &stroke, self.transform, None);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Color) {
        let row_h = font_size / font::GLYPH_SIZE as f32;
        let top = y - font_size / 2.0;
        for (i, ch) in text.chars().enumerate() {
            let gx = x + i as f32 * font::ADVANCE;
            for (row, col, len) in font::glyph_runs(ch) {
                self.fill_rect(
                    gx + col as f32,
                    top + row as f32 * row_h,
                    len as f32,
                    row_h,
                    color,
                );
            }
        }
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transform = self.transform.pre_concat(Transform::from_translate(dx, dy));
    }

    fn rotate(&mut self, radians: f32) {
        self.transform = self
            .transform
            .pre_concat(Transform::from_rotate(radians.to_degrees()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(64, 64).unwrap()
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            Canvas::new(0, 10),
            Err(CoreError::InvalidDimensions { width: 0, height: 10 })
        ));
    }

    #[test]
    fn fill_rect_covers_pixel_grid() {
        let mut c = canvas();
        c.fill_rect(2.0, 3.0, 4.0, 1.0, Color::Rgb(255, 0, 0));
        assert_eq!(c.rgb(2, 3), (255, 0, 0));
        assert_eq!(c.rgb(5, 3), (255, 0, 0));
        assert_eq!(c.rgb(6, 3), (0, 0, 0));
        assert_eq!(c.rgb(2, 4), (0, 0, 0));
    }

    #[test]
    fn hsl_colors_are_resolved() {
        let mut c = canvas();
        c.fill_rect(0.0, 0.0, 1.0, 1.0, Color::Hsl(180.0, 100.0, 60.0));
        assert_eq!(c.rgb(0, 0), (51, 255, 255));
    }

    #[test]
    fn translate_then_rotate_matches_canvas_order() {
        let mut c = canvas();
        c.save();
        c.translate(10.0, 10.0);
        c.rotate(std::f32::consts::FRAC_PI_2);
        // (0..5, 0..1) rotated a quarter turn lands on x ∈ [9, 10], y ∈ [10, 15].
        c.fill_rect(0.0, 0.0, 5.0, 1.0, Color::WHITE);
        c.restore();
        assert_eq!(c.rgb(9, 12), (255, 255, 255));
        assert_eq!(c.rgb(12, 10), (0, 0, 0));
    }

    #[test]
    fn restore_on_empty_stack_is_noop() {
        let mut c = canvas();
        c.restore();
        assert_eq!(c.depth(), 0);
        c.save();
        c.translate(5.0, 5.0);
        c.restore();
        c.fill_rect(0.0, 0.0, 1.0, 1.0, Color::WHITE);
        assert_eq!(c.rgb(0, 0), (255, 255, 255));
        assert_eq!(c.rgb(5, 5), (0, 0, 0));
    }

    #[test]
    fn clear_ignores_transform() {
        let mut c = canvas();
        c.translate(100.0, 100.0);
        c.clear(Color::Rgb(1, 2, 3));
        assert_eq!(c.rgb(0, 0), (1, 2, 3));
        assert_eq!(c.rgb(63, 63), (1, 2, 3));
    }

    #[test]
    fn polygon_fills_interior() {
        let mut c = canvas();
        c.fill_polygon(
            &[(10.0, 10.0), (30.0, 10.0), (30.0, 30.0), (10.0, 30.0)],
            Color::Rgb(0, 0, 255),
        );
        assert_eq!(c.rgb(20, 20), (0, 0, 255));
        assert_eq!(c.rgb(5, 5), (0, 0, 0));
    }

    #[test]
    fn degenerate_polygon_is_ignored() {
        let mut c = canvas();
        c.fill_polygon(&[(1.0, 1.0), (20.0, 20.0)], Color::WHITE);
        assert!(c.data().chunks(4).all(|p| p[..3] == [0, 0, 0]));
    }

    #[test]
    fn text_is_drawn_around_its_middle() {
        let mut c = canvas();
        c.fill_text("I", 10.0, 20.0, 16.0, Color::WHITE);
        let lit: Vec<(u32, u32)> = (0..64)
            .flat_map(|y| (0..64).map(move |x| (x, y)))
            .filter(|&(x, y)| c.rgb(x, y) != (0, 0, 0))
            .collect();
        assert!(!lit.is_empty());
        assert!(lit.iter().all(|&(x, y)| (10..18).contains(&x) && (12..28).contains(&y)));
    }
}
