//! Live terminal scoreboard for an Autodarts board.
//!
//! Usage: `cargo run --example scoreboard [host] [port]`

use autodarts_board::{BoardEvent, BoardMonitor, MonitorConfig};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

struct App {
    online: bool,
    version: String,
    last_throw: Option<(u32, bool)>,
    last_visit: Option<u32>,
    log: Vec<String>,
}

impl App {
    fn new() -> Self {
        Self {
            online: false,
            version: String::new(),
            last_throw: None,
            last_visit: None,
            log: Vec::new(),
        }
    }

    fn push_log(&mut self, line: String) {
        self.log.push(line);
        if self.log.len() > 100 {
            self.log.remove(0);
        }
    }

    fn apply(&mut self, event: BoardEvent) {
        match event {
            BoardEvent::Online(online) => {
                if online != self.online {
                    self.push_log(format!(
                        "Board {}",
                        if online { "reachable" } else { "unreachable" }
                    ));
                }
                self.online = online;
            }
            BoardEvent::Throw { score, is_triple } => {
                self.last_throw = Some((score, is_triple));
                self.push_log(format!(
                    "Dart: {}{}",
                    score,
                    if is_triple { " (triple)" } else { "" }
                ));
            }
            BoardEvent::VisitComplete { score } => {
                self.last_visit = Some(score);
                self.push_log(format!("Visit complete: {}", score));
            }
            BoardEvent::BoardVersion(version) => {
                self.version = version;
            }
            BoardEvent::CameraConfig { slot, json } => {
                self.push_log(format!("Camera {}: {}", slot, json));
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(f.size());

    render_scoreboard(f, app, chunks[0]);
    render_log(f, app, chunks[1]);
}

fn render_scoreboard(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Autodarts Scoreboard (q to quit) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let (throw_text, throw_style) = match app.last_throw {
        Some((score, true)) => (
            format!("{} TRIPLE", score),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Some((score, false)) => (
            format!("{}", score),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        None => ("-".to_string(), Style::default().fg(Color::Gray)),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Board: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                if app.online { "ONLINE" } else { "OFFLINE" },
                if app.online {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                },
            ),
            Span::raw("  "),
            Span::styled("Version: ", Style::default().fg(Color::Yellow)),
            Span::raw(if app.version.is_empty() {
                "unknown"
            } else {
                &app.version
            }),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Last dart:  ", Style::default().fg(Color::Yellow)),
            Span::styled(throw_text, throw_style),
        ]),
        Line::from(vec![
            Span::styled("Last visit: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                app.last_visit
                    .map(|score| score.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let text = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(text, area);
}

fn render_log(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Events ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let height = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .log
        .iter()
        .rev()
        .take(height)
        .map(|line| ListItem::new(line.as_str()))
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "127.0.0.1".to_string());
    let port: u16 = match args.next() {
        Some(port) => port.parse()?,
        None => 3180,
    };

    let config = MonitorConfig::new().with_host(host).with_port(port);
    let mut monitor = BoardMonitor::new(config);
    let mut events = monitor.subscribe();
    monitor.start()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let res = run_app(&mut terminal, &mut app, &mut events);

    monitor.stop().await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut autodarts_board::EventReceiver,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Drain pending board events
        while let Ok(Some(event)) = events.try_recv() {
            app.apply(event);
        }

        terminal.draw(|f| ui(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') {
                    return Ok(());
                }
            }
        }
    }
}
