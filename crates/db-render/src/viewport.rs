use ratatui::layout::Rect;

/// Plus grande zone de `area` qui garde le ratio `src_w:src_h`, centrée.
///
/// Une cellule demi-bloc vaut un pixel de large sur deux de haut, et une
/// cellule terminal est environ deux fois plus haute que large : un pixel
/// source reste donc carré à l'écran.
///
/// # Example
/// ```
/// use ratatui::layout::Rect;
/// use db_render::viewport::fit_viewport;
///
/// let view = fit_viewport(Rect::new(0, 0, 80, 24), 320, 256);
/// assert_eq!(view, Rect::new(10, 0, 60, 24));
/// ```
#[must_use]
pub fn fit_viewport(area: Rect, src_w: u32, src_h: u32) -> Rect {
    if area.width == 0 || area.height == 0 || src_w == 0 || src_h == 0 {
        return Rect::new(area.x, area.y, 0, 0);
    }
    // colonnes par ligne de cellules
    let cells_ratio = 2.0 * f64::from(src_w) / f64::from(src_h);

    let mut height = area.height;
    let mut width = (f64::from(height) * cells_ratio).round() as u16;
    if width > area.width {
        width = area.width;
        height = ((f64::from(width) / cells_ratio).round() as u16).clamp(1, area.height);
    }
    let width = width.max(1);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
