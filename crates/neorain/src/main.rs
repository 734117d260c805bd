use std::io::stdout;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use neorain_config::Config;
use neorain_core::ColorTheme;
use neorain_effects::{CrackleField, GlitchTimer, PointerSway};
use neorain_rain::{ColumnField, FramePacer, RainSession, Surface};
use ratatui::layout::Rect;
use ratatui::style::{Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::{DefaultTerminal, Frame};

mod banner;
mod grid;
mod scheduler;

use banner::Banner;
use grid::{CellGrid, UNITS_PER_CELL, UNITS_PER_COL};
use scheduler::EventLoopScheduler;

/// Event poll timeout. Short enough that the 30 Hz pacer sees a steady
/// callback stream; the pacer does the actual rate limiting.
const POLL_INTERVAL: Duration = Duration::from_millis(15);

/// Crackles dimmer than this are not worth a draw call.
const CRACKLE_FLOOR: f32 = 0.05;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    let terminal = ratatui::init();
    let _ = execute!(stdout(), EnableMouseCapture);
    let result = App::new(&config).run(terminal);
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

/// The screensaver application: owns the rain session, the effects and
/// the terminal-facing adapters.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Current color theme.
    theme: ColorTheme,
    /// Draw the crackle lines this run?
    crackles_on: bool,
    /// Glitch the banner this run?
    glitch_on: bool,
    /// Surface-width threshold for reduced mode, in units.
    reduced_width: f32,
    /// Seed for regenerating the crackle placement.
    crackle_seed: u64,
    session: RainSession,
    sway: PointerSway,
    glitch: GlitchTimer,
    crackles: CrackleField,
    grid: CellGrid,
    scheduler: EventLoopScheduler,
    banner: Banner,
    /// Time origin for the millisecond timestamps fed to the effects.
    epoch: Instant,
}

impl App {
    /// Construct the application from loaded configuration.
    pub fn new(config: &Config) -> Self {
        // Fall back to wall-clock nanos when no seed is configured.
        let seed = config.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });

        let field = match config.alphabet_chars() {
            Some(alphabet) => ColumnField::with_alphabet(UNITS_PER_CELL, seed, alphabet),
            None => ColumnField::new(UNITS_PER_CELL, seed),
        };

        // Offset seeds keep the effect streams independent of the rain.
        let crackle_seed = seed.wrapping_add(1);
        Self {
            running: false,
            theme: config.color_theme(),
            crackles_on: config.crackles,
            glitch_on: config.glitch,
            reduced_width: config.reduced_width,
            crackle_seed,
            session: RainSession::new(FramePacer::new(config.fps), field),
            sway: PointerSway::new(),
            glitch: GlitchTimer::new(seed.wrapping_add(2)),
            crackles: CrackleField::generate(crackle_seed, false),
            grid: CellGrid::new(0, 0),
            scheduler: EventLoopScheduler::new(),
            banner: Banner::new(&config.banner),
            epoch: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;

        let size = terminal.size()?;
        self.grid.resize(size.width, size.height);
        self.session
            .start(self.grid.width(), self.grid.height(), &mut self.scheduler);
        self.crackles = CrackleField::generate(self.crackle_seed, self.reduced());

        while self.running {
            let now_ms = self.now_ms();
            // Reduced mode is re-derived every pass, never cached.
            let reduced = self.reduced();

            for handle in self.scheduler.take_due() {
                if self.session.pending() == Some(handle) {
                    self.session
                        .on_tick(now_ms, &mut self.grid, reduced, &mut self.scheduler);
                } else if self.sway.pending() == Some(handle) {
                    self.sway.on_update(self.grid.width(), self.grid.height());
                }
            }

            terminal.draw(|frame| self.render(frame, now_ms))?;
            self.handle_crossterm_events()?;
        }

        self.session.stop(&mut self.scheduler);
        self.sway.stop(&mut self.scheduler);
        Ok(())
    }

    /// Milliseconds since the application started.
    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// Whether the surface is currently below the reduced-mode threshold.
    fn reduced(&self) -> bool {
        self.grid.width() <= self.reduced_width
    }

    /// Renders the rain, the crackles, the banner and the help line.
    fn render(&mut self, frame: &mut Frame, now_ms: f64) {
        let area = frame.area();
        frame.render_widget(Paragraph::new(self.grid.lines(self.theme)), area);

        if self.crackles_on {
            self.render_crackles(frame, area, now_ms);
        }

        let glitch = if self.glitch_on {
            self.glitch.offset(now_ms)
        } else {
            0.0
        };
        self.banner.render(
            frame,
            area,
            self.theme,
            self.sway.offset(),
            self.sway.rotation(),
            glitch,
        );

        let color = self.theme.color();
        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "c".bold().fg(color),
            " cycle color  ".dark_gray(),
            "g".bold().fg(color),
            " glitch  ".dark_gray(),
            "k".bold().fg(color),
            " crackles".dark_gray(),
        ])
        .centered();
        let help_area = Rect {
            x: area.x,
            y: area.bottom().saturating_sub(1),
            width: area.width,
            height: 1,
        };
        frame.render_widget(help, help_area);
    }

    /// Draw each pulsing crackle as a thin horizontal line.
    fn render_crackles(&self, frame: &mut Frame, area: Rect, now_ms: f64) {
        for crackle in self.crackles.crackles() {
            let intensity = crackle.intensity(now_ms);
            if intensity <= CRACKLE_FLOOR {
                continue;
            }
            let x = (crackle.x * area.width as f32) as u16;
            let y = (crackle.y * area.height as f32) as u16;
            if x >= area.width || y >= area.height {
                continue;
            }
            let len = ((crackle.length / UNITS_PER_COL) as u16).min(area.width - x);
            if len == 0 {
                continue;
            }
            let line = "─".repeat(len as usize);
            let style = Style::new().fg(self.theme.trail_color(intensity));
            let rect = Rect {
                x: area.x + x,
                y: area.y + y,
                width: len,
                height: 1,
            };
            frame.render_widget(Paragraph::new(line).style(style), rect);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('c')) => self.theme = self.theme.next(),
            (_, KeyCode::Char('g')) => self.glitch_on = !self.glitch_on,
            (_, KeyCode::Char('k')) => self.crackles_on = !self.crackles_on,
            _ => {}
        }
    }

    /// Feeds pointer movement into the sway effect.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if matches!(
            mouse.kind,
            MouseEventKind::Moved | MouseEventKind::Drag(_)
        ) {
            self.sway.on_pointer_move(
                mouse.column as f32 * UNITS_PER_CELL,
                mouse.row as f32 * UNITS_PER_CELL,
                &mut self.scheduler,
            );
        }
    }

    /// Terminal dimensions changed: rebuild the grid and the columns.
    fn on_resize(&mut self, cols: u16, rows: u16) {
        self.grid.resize(cols, rows);
        self.session.on_resize(self.grid.width(), self.grid.height());
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
