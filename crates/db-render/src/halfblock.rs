use db_core::frame::{Cell, CellGrid, FrameBuffer};

/// Caractère demi-bloc inférieur.
pub const LOWER_HALF: char = '▄';

/// Convertit un frame en cellules demi-bloc, mis à l'échelle de la grille.
///
/// Each terminal cell covers 2 vertical pixels. The top pixel's color goes
/// to bg, the bottom pixel's color goes to fg. Échantillonnage au plus
/// proche voisin.
///
/// # Example
/// ```
/// use db_core::frame::{CellGrid, FrameBuffer};
/// use db_render::halfblock::process_halfblock;
///
/// let frame = FrameBuffer::new(4, 4);
/// let mut grid = CellGrid::new(4, 2);
/// process_halfblock(&frame, &mut grid);
/// assert_eq!(grid.get(0, 0).ch, '▄');
/// ```
pub fn process_halfblock(frame: &FrameBuffer, grid: &mut CellGrid) {
    if frame.width == 0 || frame.height == 0 {
        return;
    }
    let pixel_w = u32::from(grid.width).max(1);
    let pixel_h = (u32::from(grid.height) * 2).max(1);
    let max_x = frame.width - 1;
    let max_y = frame.height - 1;

    for cy in 0..grid.height {
        let row = u32::from(cy) * 2;
        let py_top = (row * frame.height / pixel_h).min(max_y);
        let py_bot = ((row + 1) * frame.height / pixel_h).min(max_y);

        for cx in 0..grid.width {
            let px = (u32::from(cx) * frame.width / pixel_w).min(max_x);
            let (tr, tg, tb, _) = frame.pixel(px, py_top);
            let (br, bg, bb, _) = frame.pixel(px, py_bot);
            grid.set(
                cx,
                cy,
                Cell {
                    ch: LOWER_HALF,
                    fg: (br, bg, bb),
                    bg: (tr, tg, tb),
                },
            );
        }
    }
}
