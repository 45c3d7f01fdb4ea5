//! Bowling scorekeeper (default binary).
//!
//! `play` runs the interactive score sheet in the terminal; `collect` runs the
//! score collector the sink reports to.

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyEventKind};

use bowling_tracker::adapter::{run_collector_blocking, SinkConfig, TcpScoreSink};
use bowling_tracker::cli::{parse_args, Command, USAGE};
use bowling_tracker::core::Roster;
use bowling_tracker::input::{handle_key_event, should_quit};
use bowling_tracker::session::Session;
use bowling_tracker::term::{FrameBuffer, SheetView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match parse_args(&args, SinkConfig::from_env())? {
        Command::Play { names } => {
            // Log lines would scribble over the alternate screen; opt in with RUST_LOG.
            init_logging(log::LevelFilter::Off);
            play(names)
        }
        Command::Collect(config) => {
            init_logging(log::LevelFilter::Info);
            run_collector_blocking(config)
        }
        Command::Help => {
            println!("{}", USAGE);
            Ok(())
        }
    }
}

fn init_logging(default: log::LevelFilter) {
    env_logger::builder()
        .filter_level(default)
        .parse_default_env()
        .init();
}

fn play(names: Vec<String>) -> Result<()> {
    let roster = Roster::new(names).map_err(|e| anyhow!("play: {}", e))?;
    let mut session = Session::new(roster);

    if let Some(sink) = TcpScoreSink::start_from_env() {
        let health = sink.health();
        session = session.with_sink(sink, Some(health));
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    // Leave the final sheet on the normal screen.
    let board = session.scoreboard();
    if board.game_over {
        let height = SheetView::sheet_height(board.players.len()) + 3;
        let fb = SheetView::new()
            .with_help(false)
            .render(&board, Viewport::new(80, height));
        for y in 0..fb.height() {
            println!("{}", fb.row_text(y));
        }
    }
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let view = SheetView::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.render_into(&view, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(cmd) = handle_key_event(key) {
                    session.handle(cmd);
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}

