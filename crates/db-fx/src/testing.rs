use db_core::color::Color;
use db_core::surface::{Point, Surface};

/// Appel de dessin capturé.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear(Color),
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    StrokeRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        line_width: f32,
        color: Color,
    },
    Polygon {
        points: Vec<Point>,
        color: Color,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        font_size: f32,
        color: Color,
    },
    Save,
    Restore,
    Translate(f32, f32),
    Rotate(f32),
}

/// Surface factice : enregistre les appels au lieu de dessiner.
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn fill_rects(&self) -> impl Iterator<Item = (f32, f32, f32, f32, Color)> + '_ {
        self.ops.iter().filter_map(|op| match *op {
            DrawOp::FillRect { x, y, w, h, color } => Some((x, y, w, h, color)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.ops.push(DrawOp::FillRect { x, y, w, h, color });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32, color: Color) {
        self.ops.push(DrawOp::StrokeRect {
            x,
            y,
            w,
            h,
            line_width,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        self.ops.push(DrawOp::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, _line_width: f32, color: Color) {
        self.ops.push(DrawOp::Line { from, to, color });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            x,
            y,
            font_size,
            color,
        });
    }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.ops.push(DrawOp::Translate(dx, dy));
    }

    fn rotate(&mut self, radians: f32) {
        self.ops.push(DrawOp::Rotate(radians));
    }
}
