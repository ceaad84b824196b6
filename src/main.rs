use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use hexfall::board::Position;
use hexfall::core::config::EngineConfig;
use hexfall::engine::{total_duration, Engine, EventSummary};
use hexfall::levels::Level;
use hexfall::ui::{render_board, BoardView};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::{backend::CrosstermBackend, Terminal};

struct Options {
    level: Level,
    seed: Option<u64>,
    config: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    let config = match &options.config {
        Some(path) => match EngineConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    let rng = match options.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let mut engine = match Engine::new(config, options.level, rng) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Invalid config: {}", e);
            std::process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut engine);

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    engine: &mut Engine<ChaCha8Rng>,
) -> io::Result<()> {
    let mut view = BoardView::default();
    let mut busy_until: Option<Instant> = None;

    loop {
        if busy_until.is_some_and(|until| Instant::now() >= until) {
            busy_until = None;
        }
        view.busy = busy_until.is_some();

        terminal.draw(|frame| {
            let area = frame.size();
            render_board(frame, area, engine, &view);
        })?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let rows = engine.grid().rows();
        let cols = engine.grid().cols();
        let cursor = view.cursor;
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
            KeyCode::Up => view.cursor.row = cursor.row.saturating_sub(1),
            KeyCode::Down => view.cursor.row = (cursor.row + 1).min(rows - 1),
            // Left and right follow the cylinder.
            KeyCode::Left => view.cursor.col = (cursor.col + cols - 1) % cols,
            KeyCode::Right => view.cursor.col = (cursor.col + 1) % cols,
            KeyCode::Enter | KeyCode::Char(' ') => {
                if view.busy {
                    continue;
                }
                let had_obstacles = engine.obstacles_remaining() > 0;
                match engine.activate_cell(cursor.row, cursor.col) {
                    Ok(events) if events.is_empty() => {
                        view.message = Some("Nothing to clear".to_string());
                    }
                    Ok(events) => {
                        view.moves += 1;
                        view.message = None;
                        view.last_move = Some(EventSummary::from_events(&events));
                        let secs = total_duration(&engine.timeline(&events));
                        busy_until = Some(Instant::now() + Duration::from_secs_f32(secs));
                        if had_obstacles && engine.obstacles_remaining() == 0 {
                            view.cleared = true;
                        }
                    }
                    Err(e) => view.message = Some(e.to_string()),
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                switch_level(engine, &mut view, &mut busy_until, |level| level.next());
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                switch_level(engine, &mut view, &mut busy_until, |level| level.previous());
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                switch_level(engine, &mut view, &mut busy_until, |level| level);
            }
            _ => {}
        }
    }

    Ok(())
}

fn switch_level(
    engine: &mut Engine<ChaCha8Rng>,
    view: &mut BoardView,
    busy_until: &mut Option<Instant>,
    pick: impl FnOnce(Level) -> Level,
) {
    let level = pick(engine.level().unwrap_or_default());
    engine.restart(level);
    *view = BoardView {
        cursor: Position::new(
            view.cursor.row.min(engine.grid().rows() - 1),
            view.cursor.col.min(engine.grid().cols() - 1),
        ),
        ..Default::default()
    };
    *busy_until = None;
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        level: Level::Classic,
        seed: None,
        config: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-l" | "--level" => {
                if i + 1 < args.len() {
                    options.level = Level::from_id(args[i + 1].parse().unwrap_or(0));
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    options.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    options.config = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    options
}

fn print_help() {
    println!("Hexfall - tile matching on a hex cylinder\n");
    println!("USAGE:");
    println!("    hexfall [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -l, --level <ID>     Start level (0 classic, 1 obstacle band, 2 island maze,");
    println!("                         3 bomb grid, 4 bomb chambers)");
    println!("    -s, --seed <S>       Random seed for a reproducible board");
    println!("    -c, --config <FILE>  Engine config (JSON)");
    println!("    -h, --help           Show this help");
    println!();
    println!("KEYS:");
    println!("    Arrows move, Enter/Space activate, N/P change level, R restart, Q quit");
}
