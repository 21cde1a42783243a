use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use parallax_config::Config;
use parallax_core::{AnimationSpeed, Theme, Viewport};
use parallax_field::{draw_field, FieldAnimator, FieldTuning, ParticleField};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    style::Stylize,
    symbols::Marker,
    text::Line,
    widgets::canvas::Canvas,
    DefaultTerminal, Frame,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = parallax_config::load()?;
    let terminal = ratatui::init();
    // Without mouse capture the field still animates, it just cannot react.
    let _ = execute!(stdout(), EnableMouseCapture);
    let result = App::new(config).run(terminal);
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Current color theme.
    theme: Theme,
    /// Current animation speed.
    speed: AnimationSpeed,
    /// Field tuning derived from the config file.
    tuning: FieldTuning,
    /// Seed for the initial spawn.
    seed: u64,
    /// The animator, created on the first frame once the canvas size
    /// is known.
    animator: Option<FieldAnimator>,
    /// Canvas area of the last frame, for mapping mouse cells onto
    /// surface coordinates.
    canvas_area: Rect,
    /// Startup instant driving the animation clock.
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`] from the loaded config.
    pub fn new(config: Config) -> Self {
        let tuning = FieldTuning {
            particles: config.particles,
            projection_distance: config.projection_distance,
            depth: config.depth,
            link_distance: config.link_distance,
            pointer_radius: config.pointer_radius,
            pointer_force: config.pointer_force,
            max_speed: config.max_speed,
        };
        Self {
            running: false,
            theme: config.theme,
            speed: config.speed,
            tuning,
            seed: config.seed.unwrap_or_else(clock_seed),
            animator: None,
            canvas_area: Rect::default(),
            started: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        if let Some(animator) = &mut self.animator {
            animator.shutdown();
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Particle canvas
            Constraint::Length(1), // Help text
        ])
        .split(frame.area());
        self.canvas_area = chunks[0];

        // Braille gives 2x4 dots per cell; the surface works in dots so
        // pixel-scale constants (radii, distances) stay meaningful.
        let viewport = Viewport::new(
            self.canvas_area.width as f32 * 2.0,
            self.canvas_area.height as f32 * 4.0,
        );

        let (tuning, seed) = (self.tuning, self.seed);
        let animator = self
            .animator
            .get_or_insert_with(|| FieldAnimator::new(ParticleField::new(viewport, tuning, seed)));
        if animator.field().viewport() != viewport {
            animator.resize(viewport);
        }
        animator.tick(self.started.elapsed().as_millis() as u64, self.speed);

        let theme = self.theme;
        let paused = animator.is_paused();
        let field = animator.field();
        let empty = field.particles().is_empty();
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, viewport.width as f64])
            .y_bounds([0.0, viewport.height as f64])
            .paint(|ctx| draw_field(ctx, field, theme));
        frame.render_widget(canvas, self.canvas_area);

        // Render help text
        let color = theme.color();
        let mut spans = vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "c".bold().fg(color),
            " theme  ".dark_gray(),
            "s".bold().fg(color),
            " speed  ".dark_gray(),
            "space".bold().fg(color),
            " pause  ".dark_gray(),
            "r".bold().fg(color),
            " reseed".dark_gray(),
        ];
        if empty {
            spans.push("  (no particles configured)".dark_gray());
        } else if paused {
            spans.push("  paused".fg(color));
        }
        frame.render_widget(Line::from(spans).centered(), chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Uses polling with a frame-length timeout for smooth animation;
    /// pending events are drained so a burst of pointer motion cannot
    /// starve the frame timer.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(Duration::from_millis(16))? {
            loop {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                    Event::Mouse(mouse) => self.on_mouse_event(mouse),
                    Event::Resize(_, _) => {} // picked up by the next render
                    _ => {}
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
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
            (_, KeyCode::Char('s')) => self.speed = self.speed.next(),
            (_, KeyCode::Char(' ')) => {
                if let Some(animator) = &mut self.animator {
                    animator.toggle_pause();
                }
            }
            (_, KeyCode::Char('r')) => {
                self.seed = clock_seed();
                if let Some(animator) = &mut self.animator {
                    animator.reseed(self.seed);
                }
            }
            _ => {}
        }
    }

    /// Tracks the pointer over the canvas, in surface coordinates.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        let moved = matches!(
            mouse.kind,
            MouseEventKind::Moved | MouseEventKind::Drag(_)
        );
        if !moved {
            return;
        }
        let Some(animator) = &mut self.animator else {
            return;
        };

        if self
            .canvas_area
            .contains(Position::new(mouse.column, mouse.row))
        {
            // Center of the hovered cell, in braille dots.
            let x = (mouse.column - self.canvas_area.x) as f32 * 2.0 + 1.0;
            let y = (mouse.row - self.canvas_area.y) as f32 * 4.0 + 2.0;
            animator.set_pointer(Some((x, y)));
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Seed from the wall clock for unseeded runs and reseeds.
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
