use db_core::frame::{CellGrid, FrameBuffer};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::canvas;
use crate::halfblock;
use crate::viewport;

/// Libellés affichés autour de l'image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hud {
    /// Session lancée ou en attente de la touche Entrée.
    pub running: bool,
    /// Nom de la scène active.
    pub scene: String,
    /// Temps écoulé, déjà formaté ("12.3s").
    pub elapsed: String,
    pub fps: f64,
    /// Afficher la barre de statut.
    pub show_status: bool,
}

/// Dessine l'image de la démo, la barre de statut et l'écran d'attente.
///
/// `grid` est réutilisée d'une frame à l'autre et redimensionnée au viewport.
pub fn draw(frame: &mut Frame, screen: &FrameBuffer, grid: &mut CellGrid, hud: &Hud) {
    let area = frame.area();
    let status_height = u16::from(hud.show_status);
    let [canvas_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(status_height)]).areas(area);

    let view = viewport::fit_viewport(canvas_area, screen.width, screen.height);
    if (grid.width, grid.height) != (view.width, view.height) {
        log::debug!("Viewport {}x{} cellules en ({}, {})", view.width, view.height, view.x, view.y);
        grid.resize(view.width, view.height);
    }
    halfblock::process_halfblock(screen, grid);
    canvas::render_grid(frame.buffer_mut(), view, grid);

    if hud.show_status {
        draw_status(frame, status_area, hud);
    }
    if !hud.running {
        draw_idle_overlay(frame, canvas_area);
    }
}

fn draw_status(frame: &mut Frame, area: Rect, hud: &Hud) {
    let (state_str, state_color) = if hud.running {
        ("▶ RUN", Color::Green)
    } else {
        ("■ IDLE", Color::DarkGray)
    };
    let sep = Span::styled(" │ ", Style::default().fg(Color::DarkGray));

    let line = Line::from(vec![
        Span::styled(format!(" {state_str}"), Style::default().fg(state_color)),
        sep.clone(),
        Span::styled(hud.scene.clone(), Style::default().fg(Color::Yellow)),
        sep.clone(),
        Span::raw(hud.elapsed.clone()),
        sep,
        Span::raw(format!("{:.0} FPS", hud.fps)),
        Span::styled(
            "   Enter start · s stop · q quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_idle_overlay(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            " DESERT BYTE ",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(" Press Enter to start "),
        Line::from(Span::styled(
            " q / Esc to quit ",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let width = 28u16.min(area.width);
    let height = (text.len() as u16 + 2).min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    let overlay = Rect::new(x, y, width, height);

    let panel = Paragraph::new(text).centered().block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black).fg(Color::White)),
    );

    frame.render_widget(Clear, overlay);
    frame.render_widget(panel, overlay);
}
