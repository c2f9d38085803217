use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use db_core::canvas::Canvas;
use db_core::clock::WallClock;
use db_core::config::{DemoConfig, SCREEN_HEIGHT, SCREEN_WIDTH};
use db_core::frame::{CellGrid, FrameBuffer};
use db_fx::Demo;
use db_render::fps::FpsCounter;
use db_render::ui::{self, Hud};
use ratatui::DefaultTerminal;

/// Action déclenchée par une touche.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    Quit,
}

/// Traduit une touche en action. Les touches inconnues sont ignorées.
#[must_use]
pub fn key_action(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(code, KeyCode::Char('c')).then_some(Action::Quit);
    }
    match code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Start),
        KeyCode::Char('s') => Some(Action::Stop),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Application terminal : session de démo + surfaces d'affichage.
pub struct App {
    demo: Demo<WallClock>,
    canvas: Canvas,
    screen: FrameBuffer,
    grid: CellGrid,
    fps: FpsCounter,
    hud: Hud,
    target_fps: u32,
    autostart: bool,
    quitting: bool,
}

impl App {
    /// # Errors
    /// Returns an error if the drawing surface cannot be allocated.
    pub fn new(demo: Demo<WallClock>, config: &DemoConfig) -> Result<Self> {
        let hud = Hud {
            running: false,
            scene: demo.select_scene(0.0).scene.clone(),
            elapsed: "0.0s".to_owned(),
            fps: 0.0,
            show_status: config.show_status,
        };
        Ok(Self {
            demo,
            canvas: Canvas::new(SCREEN_WIDTH, SCREEN_HEIGHT)?,
            screen: FrameBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            grid: CellGrid::new(1, 1),
            fps: FpsCounter::new(60),
            hud,
            target_fps: config.target_fps.max(1),
            autostart: config.autostart,
            quitting: false,
        })
    }

    /// Boucle principale : rythme les frames à `target_fps` et reste
    /// réactive au clavier entre deux frames.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        if self.autostart {
            self.apply(Action::Start);
        }
        let frame_duration = Duration::from_secs_f64(1.0 / f64::from(self.target_fps));
        let start = Instant::now();
        let mut last_frame = start.checked_sub(frame_duration).unwrap_or(start);

        loop {
            if self.quitting {
                break;
            }

            let now = Instant::now();
            let elapsed = now - last_frame;
            if elapsed < frame_duration {
                let remaining = frame_duration.saturating_sub(elapsed);
                if event::poll(remaining)? {
                    self.handle_event(&event::read()?);
                }
                continue;
            }
            last_frame = now;

            while event::poll(Duration::ZERO)? {
                self.handle_event(&event::read()?);
            }

            self.render_frame();
            terminal.draw(|f| ui::draw(f, &self.screen, &mut self.grid, &self.hud))?;
            self.fps.tick();
            self.hud.fps = self.fps.fps();
        }

        self.demo.stop();
        Ok(())
    }

    /// Avance la démo d'une frame et met à jour les libellés.
    fn render_frame(&mut self) {
        if let Some(info) = self.demo.frame(&mut self.canvas) {
            if self.hud.scene != info.scene {
                self.hud.scene.clear();
                self.hud.scene.push_str(info.scene);
            }
            self.hud.elapsed = info.elapsed_label();
            self.canvas.copy_into(&mut self.screen);
        }
        self.hud.running = self.demo.is_running();
    }

    fn handle_event(&mut self, event: &Event) {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = *event
            && let Some(action) = key_action(code, modifiers)
        {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Start => {
                if self.demo.start() {
                    self.fps.reset();
                }
            }
            Action::Stop => self.demo.stop(),
            Action::Quit => self.quitting = true,
        }
        self.hud.running = self.demo.is_running();
    }
}
