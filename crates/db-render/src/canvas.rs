use db_core::frame::CellGrid;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

/// Écrit directement une `CellGrid` dans un `ratatui::Buffer`.
///
/// Pas de widget : écriture cellule par cellule, clippée à `area`.
///
/// # Example
/// ```
/// use db_core::frame::{Cell, CellGrid};
/// use db_render::canvas::render_grid;
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
///
/// let mut grid = CellGrid::new(2, 1);
/// grid.set(1, 0, Cell { ch: '▄', fg: (255, 0, 0), bg: (0, 0, 255) });
/// let area = Rect::new(0, 0, 4, 2);
/// let mut buf = Buffer::empty(area);
/// render_grid(&mut buf, area, &grid);
/// assert_eq!(buf[(1, 0)].symbol(), "▄");
/// ```
pub fn render_grid(buf: &mut Buffer, area: Rect, grid: &CellGrid) {
    for cy in 0..grid.height.min(area.height) {
        for cx in 0..grid.width.min(area.width) {
            let cell = grid.get(cx, cy);
            if let Some(buf_cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                buf_cell
                    .set_char(cell.ch)
                    .set_fg(Color::Rgb(cell.fg.0, cell.fg.1, cell.fg.2))
                    .set_bg(Color::Rgb(cell.bg.0, cell.bg.1, cell.bg.2));
            }
        }
    }
}
