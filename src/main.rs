//! Duskveil FOV playground
//!
//! Walk a viewer around a generated cave and watch the shadow-casting
//! field of view respond. Arrows or hjkl move, `+`/`-` change the sight
//! radius, `r` regenerates the cave, `q` quits.

use std::fs::OpenOptions;
use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use duskveil::world::generate_caves;
use duskveil::{Map, Position, VisibilityField};

const MAP_WIDTH: i32 = 70;
const MAP_HEIGHT: i32 = 40;
const POLL_INTERVAL: Duration = Duration::from_millis(50);

struct Playground {
    map: Map,
    viewer: Position,
    field: VisibilityField,
    rng: StdRng,
}

impl Playground {
    fn new() -> Self {
        let mut rng = StdRng::from_entropy();
        let map = generate_caves(&mut rng, MAP_WIDTH, MAP_HEIGHT);
        let viewer = map.start_pos().unwrap_or(Position::new(MAP_WIDTH / 2, MAP_HEIGHT / 2));
        Self {
            map,
            viewer,
            field: VisibilityField::new(8),
            rng,
        }
    }

    fn regenerate(&mut self) {
        self.map = generate_caves(&mut self.rng, MAP_WIDTH, MAP_HEIGHT);
        self.viewer = self
            .map
            .start_pos()
            .unwrap_or(Position::new(MAP_WIDTH / 2, MAP_HEIGHT / 2));
        log::info!("regenerated cave, viewer at {:?}", self.viewer);
    }

    fn try_move(&mut self, dx: i32, dy: i32) {
        let (nx, ny) = (self.viewer.x + dx, self.viewer.y + dy);
        if self.map.is_walkable(nx, ny) {
            self.viewer = Position::new(nx, ny);
        }
    }

    /// Returns true when the playground should quit
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left | KeyCode::Char('h') => self.try_move(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.try_move(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.try_move(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.try_move(0, 1),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let radius = self.field.radius();
                self.field.set_radius(radius + 1);
            }
            KeyCode::Char('-') => {
                let radius = self.field.radius();
                self.field.set_radius(radius - 1);
            }
            KeyCode::Char('r') => self.regenerate(),
            _ => {}
        }
        false
    }

    fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(frame.area());

        let vis = self.field.compute(self.viewer, &self.map);
        for ((dx, dy), _) in vis.iter() {
            self.map.mark_explored(self.viewer.x + dx, self.viewer.y + dy);
        }

        let mut lines = Vec::with_capacity(self.map.height as usize);
        for y in 0..self.map.height {
            let mut spans = Vec::with_capacity(self.map.width as usize);
            for x in 0..self.map.width {
                if x == self.viewer.x && y == self.viewer.y {
                    spans.push(Span::styled(
                        "@",
                        Style::default().fg(Color::Rgb(250, 250, 230)),
                    ));
                    continue;
                }

                let tile = match self.map.tile(x, y) {
                    Some(tile) => *tile,
                    None => continue,
                };
                let (dx, dy) = (x - self.viewer.x, y - self.viewer.y);

                let span = if vis.contains(dx, dy) {
                    let (r, g, b) = tile.kind.fg_color();
                    Span::styled(
                        tile.kind.glyph().to_string(),
                        Style::default().fg(Color::Rgb(r, g, b)),
                    )
                } else if tile.explored {
                    // remembered terrain, dimmed
                    let (r, g, b) = tile.kind.fg_color();
                    Span::styled(
                        tile.kind.glyph().to_string(),
                        Style::default().fg(Color::Rgb(r / 3, g / 3, b / 3)),
                    )
                } else {
                    Span::raw(" ")
                };
                spans.push(span);
            }
            lines.push(Line::from(spans));
        }

        let map_widget = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" duskveil "));
        frame.render_widget(map_widget, chunks[0]);

        let status = format!(
            " radius {}  viewer ({}, {})  visible {}  [hjkl/arrows move, +/- radius, r regen, q quit]",
            self.field.radius(),
            self.viewer.x,
            self.viewer.y,
            vis.len(),
        );
        frame.render_widget(Paragraph::new(status), chunks[1]);
    }
}

fn main() -> Result<()> {
    // Log to a file so logging doesn't fight the TUI
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("duskveil.log")?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    log::info!("starting duskveil playground v{}", env!("CARGO_PKG_VERSION"));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut playground = Playground::new();
    let result = run(&mut terminal, &mut playground);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    playground: &mut Playground,
) -> Result<()> {
    loop {
        terminal.draw(|frame| playground.draw(frame))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && playground.handle_key(key.code) {
                    return Ok(());
                }
            }
        }
    }
}
