//! Terminal Tetris runner.
//!
//! Owns the wall clock: every frame it reads `now`, feeds key events and the
//! scheduled tick into the session, routes sound cues and redraws.

use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use ultra_tetris::audio::{dispatch, TerminalAudio};
use ultra_tetris::config::AppConfig;
use ultra_tetris::core::{
    Clock, GameSession, GameSnapshot, MonotonicClock, ScoreRepository, ScoreTable,
};
use ultra_tetris::input::{should_quit, InputHandler};
use ultra_tetris::logging::init_file_logging;
use ultra_tetris::scores::ScoreFile;
use ultra_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use ultra_tetris::types::{GameEvent, FRAME_MS};

type Session = GameSession<Box<dyn ScoreRepository>>;

fn main() -> Result<()> {
    let config = AppConfig::from_env().context("reading configuration")?;
    if let Some(path) = &config.log_file {
        init_file_logging(path)?;
    }

    let scores: Box<dyn ScoreRepository> = match &config.score_file {
        Some(path) => Box::new(ScoreFile::open(path.clone())),
        None => Box::new(ScoreTable::new()),
    };
    let mut session: Session = GameSession::new(config.seed, scores, config.session);
    let mut audio = TerminalAudio::new(config.bell);
    tracing::info!(seed = config.seed, bell = config.bell, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &mut audio);

    let _ = term.exit();
    tracing::info!(episodes = session.episode(), "exiting");
    result
}

fn run(term: &mut TerminalRenderer, session: &mut Session, audio: &mut TerminalAudio) -> Result<()> {
    let clock = MonotonicClock::new();
    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        session.snapshot_into(&mut snapshot);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let now = clock.now_ms();
        let timeout = session
            .next_tick_at()
            .map_or(FRAME_MS, |at| at.saturating_sub(now).min(FRAME_MS));

        if event::poll(Duration::from_millis(timeout))? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    let now = clock.now_ms();
                    for action in input.handle_key(key, now) {
                        let events = session.apply(action, now);
                        route(&events, audio, term)?;
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = clock.now_ms();
        for action in input.update(now) {
            let events = session.apply(action, now);
            route(&events, audio, term)?;
        }
        let events = session.poll(now);
        route(&events, audio, term)?;
    }
}

fn route(events: &[GameEvent], audio: &mut TerminalAudio, term: &mut TerminalRenderer) -> Result<()> {
    for event in events {
        tracing::trace!(?event, "game event");
    }
    dispatch(events, audio);
    if audio.take_bell() {
        term.bell()?;
    }
    Ok(())
}
