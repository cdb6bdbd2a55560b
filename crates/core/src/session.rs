//! Game session - the timed single-player state machine
//!
//! A session owns the board, the active and next pieces, the score counters
//! and the countdown. It never reads a clock: every command and tick takes the
//! current monotonic time in milliseconds, which keeps the whole lifecycle
//! reproducible in tests.
//!
//! # Scheduling
//!
//! Hosts either call [`GameSession::tick`] themselves every
//! [`GameSession::tick_interval_ms`], or call [`GameSession::poll`] once per
//! frame and let the session keep its own deadline. A missed backlog is
//! collapsed into a single tick.
//!
//! # Lock rule
//!
//! The first tick that finds the piece unable to fall starts the lock timer.
//! A later tick locks it when more than [`LOCK_DELAY_MS`] passed since the last
//! successful move or rotation, or when it has been grounded for
//! [`LOCK_HARD_CAP_MS`]. A tick that manages to drop the piece clears the timer.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::piece::Piece;
use crate::rng::PieceRandomizer;
use crate::scores::{ScoreRepository, ScoreTable};
use crate::scoring::{calculate_line_score, get_drop_interval_ms, level_for_lines};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{
    GameAction, GameEvent, Phase, PieceKind, BASE_DROP_MS, GAME_DURATION_SECS, LOCK_DELAY_MS,
    LOCK_HARD_CAP_MS, MESSAGE_MS, RANKING_SIZE, SOFT_DROP_MS,
};

/// Most events a single command or tick can produce.
pub const MAX_EVENTS: usize = 8;

/// Events produced by one command or tick, in order.
pub type Events = ArrayVec<GameEvent, MAX_EVENTS>;

/// Optional behavior toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Allow `ShowRanking` from the finished screen.
    pub ranking_screen: bool,
    /// Flag a finished score that beat the previous best in snapshots.
    pub highlight_new_record: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ranking_screen: true,
            highlight_new_record: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LockTimer {
    grounded_at: u64,
    last_reset_at: u64,
}

/// One player's game, from title screen through any number of restarts.
#[derive(Debug)]
pub struct GameSession<S: ScoreRepository = ScoreTable> {
    config: SessionConfig,
    scores: S,
    board: Board,
    pieces: PieceRandomizer,
    active: Option<Piece>,
    next: PieceKind,
    phase: Phase,
    /// Monotonic session counter (increments on start and restart).
    episode: u32,
    score: u32,
    level: u32,
    lines: u32,
    normal_delay_ms: u64,
    soft_dropping: bool,
    message_started_at: u64,
    play_started_at: u64,
    remaining_secs: u32,
    lock: Option<LockTimer>,
    /// Deadline of the next scheduled tick; `None` when no tick is due.
    next_tick_at: Option<u64>,
    paused_at: u64,
    paused_tick_remaining: u64,
    previous_best: u32,
    new_record: bool,
    top_scores: ArrayVec<u32, RANKING_SIZE>,
}

impl<S: ScoreRepository> GameSession<S> {
    /// A session on the title screen.
    pub fn new(seed: u32, scores: S, config: SessionConfig) -> Self {
        let mut pieces = PieceRandomizer::new(seed);
        let next = pieces.draw();
        Self {
            config,
            scores,
            board: Board::new(),
            pieces,
            active: None,
            next,
            phase: Phase::Title,
            episode: 0,
            score: 0,
            level: 1,
            lines: 0,
            normal_delay_ms: BASE_DROP_MS,
            soft_dropping: false,
            message_started_at: 0,
            play_started_at: 0,
            remaining_secs: GAME_DURATION_SECS,
            lock: None,
            next_tick_at: None,
            paused_at: 0,
            paused_tick_remaining: 0,
            previous_best: 0,
            new_record: false,
            top_scores: ArrayVec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn is_soft_dropping(&self) -> bool {
        self.soft_dropping
    }

    /// Whether the active piece is grounded and waiting to lock.
    pub fn lock_pending(&self) -> bool {
        self.lock.is_some()
    }

    /// Normal gravity interval for the current level.
    pub fn normal_delay_ms(&self) -> u64 {
        self.normal_delay_ms
    }

    /// Interval until the next gravity tick.
    pub fn tick_interval_ms(&self) -> u64 {
        if self.soft_dropping {
            SOFT_DROP_MS
        } else {
            self.normal_delay_ms
        }
    }

    pub fn next_tick_at(&self) -> Option<u64> {
        self.next_tick_at
    }

    /// Best stored score before the last finished game was recorded.
    pub fn previous_best(&self) -> u32 {
        self.previous_best
    }

    /// Whether the last finished game beat the previous best.
    pub fn new_record(&self) -> bool {
        self.new_record
    }

    pub fn top_scores(&self) -> &[u32] {
        &self.top_scores
    }

    pub fn scores(&self) -> &S {
        &self.scores
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_color_grid(&mut out.board);

        let piece_visible = matches!(
            self.phase,
            Phase::ReadyMessage
                | Phase::GoMessage
                | Phase::Running
                | Phase::Paused
                | Phase::Finished
        );
        out.phase = self.phase;
        out.active = self
            .active
            .filter(|_| piece_visible)
            .map(ActiveSnapshot::from);
        out.ghost_y = match (self.phase, self.active) {
            (Phase::Running, Some(piece)) => Some(piece.ghost_y(&self.board)),
            _ => None,
        };
        out.next = self.next;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.remaining_secs = self.remaining_secs;
        out.new_record = self.config.highlight_new_record
            && self.new_record
            && matches!(self.phase, Phase::Finished | Phase::Ranking);
        out.top_scores.clear();
        out.top_scores.extend(self.top_scores.iter().copied());
        out.ranking_enabled = self.config.ranking_screen;
        out.episode = self.episode;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a player command at time `now`.
    ///
    /// Commands outside the phases they are valid in are ignored.
    pub fn apply(&mut self, action: GameAction, now: u64) -> Events {
        let mut ev = Events::new();
        match action {
            GameAction::Start => {
                if self.phase == Phase::Title {
                    self.begin(now, &mut ev);
                }
            }
            GameAction::Restart => {
                if matches!(
                    self.phase,
                    Phase::Running
                        | Phase::Paused
                        | Phase::Finished
                        | Phase::GameOver
                        | Phase::Ranking
                ) {
                    self.begin(now, &mut ev);
                }
            }
            GameAction::PauseToggle => match self.phase {
                Phase::Running => self.pause(now, &mut ev),
                Phase::Paused => self.resume(now, &mut ev),
                _ => {}
            },
            GameAction::SoftDropStop => {
                if matches!(self.phase, Phase::Running | Phase::Paused) {
                    self.soft_dropping = false;
                }
            }
            GameAction::ShowRanking => {
                if self.phase == Phase::Finished && self.config.ranking_screen {
                    self.refresh_top_scores();
                    self.set_phase(Phase::Ranking, &mut ev);
                }
            }
            _ if !self.phase.accepts_piece_input() => {}
            GameAction::MoveLeft => self.shift(-1, now),
            GameAction::MoveRight => self.shift(1, now),
            GameAction::SoftDropStart => self.soft_dropping = true,
            GameAction::Rotate => self.rotate(now),
            GameAction::HardDrop => self.hard_drop(&mut ev),
        }
        ev
    }

    /// Run one scheduled step at time `now`.
    ///
    /// Advances the Ready/Go messages, the countdown and gravity. Does nothing
    /// on the title screen, while paused or once the game has ended.
    pub fn tick(&mut self, now: u64) -> Events {
        let mut ev = Events::new();
        match self.phase {
            Phase::ReadyMessage => {
                if now.saturating_sub(self.message_started_at) >= MESSAGE_MS {
                    self.message_started_at = now;
                    self.set_phase(Phase::GoMessage, &mut ev);
                }
            }
            Phase::GoMessage => {
                if now.saturating_sub(self.message_started_at) >= MESSAGE_MS {
                    self.play_started_at = now;
                    self.remaining_secs = GAME_DURATION_SECS;
                    self.set_phase(Phase::Running, &mut ev);
                    let _ = ev.try_push(GameEvent::MusicStarted);
                }
            }
            Phase::Running => self.step(now, &mut ev),
            _ => {}
        }
        ev
    }

    /// Run a tick if the schedule says one is due, then book the next one.
    pub fn poll(&mut self, now: u64) -> Events {
        match self.next_tick_at {
            Some(due) if now >= due => {
                let ev = self.tick(now);
                if self.next_tick_at.is_some() {
                    self.next_tick_at = Some(now + self.tick_interval_ms());
                }
                ev
            }
            _ => Events::new(),
        }
    }

    fn set_phase(&mut self, to: Phase, ev: &mut Events) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        tracing::debug!(from = from.as_str(), to = to.as_str(), "phase changed");
        let _ = ev.try_push(GameEvent::PhaseChanged { from, to });
    }

    /// Reset everything but the score repository and enter the Ready message.
    fn begin(&mut self, now: u64, ev: &mut Events) {
        if self.phase == Phase::Running {
            let _ = ev.try_push(GameEvent::MusicStopped);
        }

        self.board.clear();
        self.active = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.normal_delay_ms = BASE_DROP_MS;
        self.soft_dropping = false;
        self.remaining_secs = GAME_DURATION_SECS;
        self.lock = None;
        self.new_record = false;
        self.previous_best = 0;
        self.top_scores.clear();
        self.episode = self.episode.wrapping_add(1);
        self.message_started_at = now;
        self.next_tick_at = Some(now + self.normal_delay_ms);

        tracing::info!(episode = self.episode, "session started");
        let _ = ev.try_push(GameEvent::SessionStarted);
        self.set_phase(Phase::ReadyMessage, ev);

        if !self.spawn_piece() {
            self.enter_game_over(ev);
        }
    }

    /// Promote the next piece to active and draw a new next.
    ///
    /// Returns false when the new piece collides at its spawn origin; the
    /// active slot is left empty in that case.
    fn spawn_piece(&mut self) -> bool {
        let piece = Piece::spawn(self.next);
        self.next = self.pieces.draw();
        self.lock = None;

        if !piece.can_move(&self.board, piece.x, piece.y) {
            self.active = None;
            return false;
        }

        self.active = Some(piece);
        true
    }

    fn step(&mut self, now: u64, ev: &mut Events) {
        let elapsed_secs = now.saturating_sub(self.play_started_at) / 1000;
        self.remaining_secs = u64::from(GAME_DURATION_SECS).saturating_sub(elapsed_secs) as u32;
        if self.remaining_secs == 0 {
            self.finish(ev);
            return;
        }

        let Some(piece) = self.active.as_mut() else {
            return;
        };

        if piece.try_move(&self.board, 0, 1) {
            self.lock = None;
            return;
        }

        match self.lock {
            None => {
                self.lock = Some(LockTimer {
                    grounded_at: now,
                    last_reset_at: now,
                });
            }
            Some(timer) => {
                let idle = now.saturating_sub(timer.last_reset_at);
                let grounded = now.saturating_sub(timer.grounded_at);
                if idle > LOCK_DELAY_MS || grounded >= LOCK_HARD_CAP_MS {
                    self.lock_piece(ev);
                }
            }
        }
    }

    fn reset_lock(&mut self, now: u64) {
        if let Some(timer) = self.lock.as_mut() {
            timer.last_reset_at = now;
        }
    }

    fn shift(&mut self, dx: i8, now: u64) {
        let Some(piece) = self.active.as_mut() else {
            return;
        };
        if piece.try_move(&self.board, dx, 0) {
            self.reset_lock(now);
        }
    }

    fn rotate(&mut self, now: u64) {
        let Some(piece) = self.active.as_mut() else {
            return;
        };
        if piece.rotate_with_kick(&self.board) {
            self.reset_lock(now);
        }
    }

    fn hard_drop(&mut self, ev: &mut Events) {
        let Some(piece) = self.active.as_mut() else {
            return;
        };
        piece.y = piece.ghost_y(&self.board);
        self.lock_piece(ev);
    }

    /// Write the active piece into the board, score cleared rows, spawn the next.
    fn lock_piece(&mut self, ev: &mut Events) {
        let Some(piece) = self.active.take() else {
            return;
        };
        self.lock = None;

        self.board
            .place_block(piece.x, piece.y, piece.shape(), piece.color());
        let cleared = self.board.clear_lines();
        let _ = ev.try_push(GameEvent::PieceLocked {
            lines_cleared: cleared,
        });

        if cleared > 0 {
            self.score = self.score.saturating_add(calculate_line_score(cleared));
            self.lines = self.lines.saturating_add(cleared);
            let _ = ev.try_push(GameEvent::LinesCleared { count: cleared });

            let level = level_for_lines(self.lines);
            if level != self.level {
                self.level = level;
                self.normal_delay_ms = get_drop_interval_ms(level);
                tracing::debug!(level, delay_ms = self.normal_delay_ms, "level up");
                let _ = ev.try_push(GameEvent::LevelChanged { level });
            }
        }

        tracing::trace!(
            x = piece.x,
            y = piece.y,
            cleared,
            score = self.score,
            "piece locked"
        );

        if !self.spawn_piece() {
            self.enter_game_over(ev);
        }
    }

    fn halt(&mut self, ev: &mut Events) {
        self.soft_dropping = false;
        self.lock = None;
        self.next_tick_at = None;
        let _ = ev.try_push(GameEvent::MusicStopped);
    }

    fn enter_game_over(&mut self, ev: &mut Events) {
        self.halt(ev);
        self.set_phase(Phase::GameOver, ev);
        tracing::info!(
            episode = self.episode,
            score = self.score,
            lines = self.lines,
            "game over"
        );
        let _ = ev.try_push(GameEvent::GameOver { score: self.score });
    }

    /// Countdown expired: record the score exactly once.
    fn finish(&mut self, ev: &mut Events) {
        self.halt(ev);
        self.set_phase(Phase::Finished, ev);

        self.previous_best = self.scores.best_score();
        self.scores.add_score(self.score);
        self.new_record = self.score > self.previous_best;
        self.refresh_top_scores();

        tracing::info!(
            episode = self.episode,
            score = self.score,
            previous_best = self.previous_best,
            new_record = self.new_record,
            "game finished"
        );
        let _ = ev.try_push(GameEvent::Finished {
            score: self.score,
            new_record: self.new_record,
        });
        let _ = ev.try_push(GameEvent::ScoreRecorded { score: self.score });
    }

    fn refresh_top_scores(&mut self) {
        self.top_scores.clear();
        self.top_scores
            .extend(self.scores.top_scores(RANKING_SIZE).into_iter().take(RANKING_SIZE));
    }

    fn pause(&mut self, now: u64, ev: &mut Events) {
        self.paused_at = now;
        self.paused_tick_remaining = self
            .next_tick_at
            .map_or(0, |due| due.saturating_sub(now));
        self.next_tick_at = None;
        self.set_phase(Phase::Paused, ev);
        let _ = ev.try_push(GameEvent::MusicStopped);
    }

    /// Shift every time anchor by the paused span so the pause costs nothing.
    fn resume(&mut self, now: u64, ev: &mut Events) {
        let paused_for = now.saturating_sub(self.paused_at);
        self.play_started_at = self.play_started_at.saturating_add(paused_for);
        if let Some(timer) = self.lock.as_mut() {
            timer.grounded_at = timer.grounded_at.saturating_add(paused_for);
            timer.last_reset_at = timer.last_reset_at.saturating_add(paused_for);
        }
        self.next_tick_at = Some(now + self.paused_tick_remaining);
        tracing::debug!(paused_for, "resumed");
        self.set_phase(Phase::Running, ev);
        let _ = ev.try_push(GameEvent::MusicStarted);
    }
}

impl Default for GameSession<ScoreTable> {
    fn default() -> Self {
        Self::new(1, ScoreTable::new(), SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{get_shape, piece_color};
    use crate::types::Color;

    /// Session that entered Running at t=1000.
    fn running_session() -> GameSession {
        let mut session: GameSession = GameSession::default();
        session.apply(GameAction::Start, 0);
        session.tick(500);
        session.tick(1000);
        assert_eq!(session.phase(), Phase::Running);
        session
    }

    fn o_piece_at(x: i8, y: i8) -> Piece {
        Piece::new(
            get_shape(PieceKind::O),
            piece_color(PieceKind::O),
            x,
            y,
        )
    }

    fn locked(ev: &Events) -> bool {
        ev.iter()
            .any(|e| matches!(e, GameEvent::PieceLocked { .. }))
    }

    #[test]
    fn new_session_waits_on_title() {
        let mut session: GameSession = GameSession::default();
        assert_eq!(session.phase(), Phase::Title);
        assert!(session.active().is_none());
        assert!(session.tick(10_000).is_empty());
        assert!(session.poll(10_000).is_empty());
        assert_eq!(session.phase(), Phase::Title);
    }

    #[test]
    fn start_spawns_piece_and_shows_ready() {
        let mut session: GameSession = GameSession::default();
        let next = session.next_kind();
        let ev = session.apply(GameAction::Start, 0);

        assert_eq!(session.phase(), Phase::ReadyMessage);
        assert_eq!(ev[0], GameEvent::SessionStarted);
        assert!(ev.contains(&GameEvent::PhaseChanged {
            from: Phase::Title,
            to: Phase::ReadyMessage
        }));
        let piece = session.active().unwrap();
        assert_eq!(piece, Piece::spawn(next));
        assert_eq!(session.episode(), 1);
        assert_eq!(session.remaining_secs(), 180);
    }

    #[test]
    fn ready_and_go_last_half_a_second_each() {
        let mut session: GameSession = GameSession::default();
        session.apply(GameAction::Start, 0);
        let y = session.active().unwrap().y;

        assert!(session.tick(499).is_empty());
        assert_eq!(session.phase(), Phase::ReadyMessage);

        session.tick(500);
        assert_eq!(session.phase(), Phase::GoMessage);
        session.tick(999);
        assert_eq!(session.phase(), Phase::GoMessage);

        let ev = session.tick(1000);
        assert_eq!(session.phase(), Phase::Running);
        assert!(ev.contains(&GameEvent::MusicStarted));
        // Gravity is idle during the messages.
        assert_eq!(session.active().unwrap().y, y);
    }

    #[test]
    fn piece_input_ignored_outside_running() {
        let mut session: GameSession = GameSession::default();
        session.apply(GameAction::Start, 0);
        let before = session.active();
        session.apply(GameAction::MoveLeft, 10);
        session.apply(GameAction::Rotate, 10);
        session.apply(GameAction::HardDrop, 10);
        session.apply(GameAction::SoftDropStart, 10);
        assert_eq!(session.active(), before);
        assert!(!session.is_soft_dropping());
        assert_eq!(session.board().filled_count(), 0);
    }

    #[test]
    fn restart_ignored_during_messages() {
        let mut session: GameSession = GameSession::default();
        session.apply(GameAction::Start, 0);
        assert!(session.apply(GameAction::Restart, 100).is_empty());
        assert_eq!(session.episode(), 1);
        assert!(session.apply(GameAction::Start, 100).is_empty());
    }

    #[test]
    fn gravity_moves_piece_down_one_row() {
        let mut session = running_session();
        let y = session.active().unwrap().y;
        let ev = session.tick(1500);
        assert!(ev.is_empty());
        assert_eq!(session.active().unwrap().y, y + 1);
        assert!(!session.lock_pending());
    }

    #[test]
    fn grounded_piece_waits_for_lock_delay() {
        let mut session = running_session();
        session.active = Some(o_piece_at(3, 18));

        session.tick(2000);
        assert!(session.lock_pending());
        assert!(!locked(&session.tick(2500)));
        assert!(locked(&session.tick(2501)));
        assert_eq!(session.board().get(3, 19), Some(Some(Color::YELLOW)));
    }

    #[test]
    fn successful_move_resets_lock_delay() {
        let mut session = running_session();
        session.active = Some(o_piece_at(3, 18));

        session.tick(2000);
        session.apply(GameAction::MoveRight, 2400);
        assert!(!locked(&session.tick(2900)));
        assert!(locked(&session.tick(2901)));
        assert_eq!(session.board().get(4, 18), Some(Some(Color::YELLOW)));
        assert_eq!(session.board().get(5, 19), Some(Some(Color::YELLOW)));
    }

    #[test]
    fn failed_move_does_not_reset_lock_delay() {
        let mut session = running_session();
        session.active = Some(o_piece_at(0, 18));

        session.tick(2000);
        session.apply(GameAction::MoveLeft, 2400);
        assert_eq!(session.active().unwrap().x, 0);
        assert!(locked(&session.tick(2501)));
    }

    #[test]
    fn successful_rotation_resets_lock_delay() {
        let mut session = running_session();
        // Flat T resting on a single block, with room to stand up on the floor.
        session.board_mut().set(5, 19, Some(Color::RED));
        let t = get_shape(PieceKind::T);
        session.active = Some(Piece::new(t, Color::MAGENTA, 3, 17));
        assert!(session.active().unwrap().is_grounded(session.board()));

        session.tick(2000);
        session.apply(GameAction::Rotate, 2300);
        let rotated = session.active().unwrap();
        assert_eq!(rotated.shape().height(), 3);
        assert!(rotated.is_grounded(session.board()));
        assert!(!locked(&session.tick(2700)));
        assert!(locked(&session.tick(2801)));
    }

    #[test]
    fn hard_cap_locks_despite_constant_resets() {
        let mut session = running_session();
        session.active = Some(o_piece_at(3, 18));
        session.tick(2000);

        for k in 1..10u64 {
            let now = 2000 + 500 * k;
            let action = if k % 2 == 1 {
                GameAction::MoveRight
            } else {
                GameAction::MoveLeft
            };
            session.apply(action, now);
            assert!(!locked(&session.tick(now)), "locked early at step {}", k);
        }

        session.apply(GameAction::MoveRight, 7000);
        assert!(locked(&session.tick(7000)));
    }

    #[test]
    fn falling_again_clears_lock_timer() {
        let mut session = running_session();
        session.board_mut().set(3, 19, Some(Color::RED));
        session.active = Some(o_piece_at(3, 17));

        session.tick(2000);
        assert!(session.lock_pending());
        session.apply(GameAction::MoveRight, 2100);
        session.apply(GameAction::MoveRight, 2200);
        session.tick(2300);
        assert!(!session.lock_pending());
        assert_eq!(session.active().unwrap().y, 18);
    }

    #[test]
    fn hard_drop_locks_immediately() {
        let mut session = running_session();
        session.active = Some(o_piece_at(0, 2));
        let ev = session.apply(GameAction::HardDrop, 1200);
        assert_eq!(ev[0], GameEvent::PieceLocked { lines_cleared: 0 });
        assert_eq!(session.board().filled_count(), 4);
        assert_eq!(session.board().get(0, 18), Some(Some(Color::YELLOW)));
        // The next piece took over.
        assert_eq!(session.active().unwrap().y, 0);
    }

    #[test]
    fn line_clear_scores_flat_points() {
        let mut session = running_session();
        session.board_mut().fill_row_except(19, &[3, 4, 5, 6], Color::RED);
        session.board_mut().fill_row_except(18, &[3, 4, 5, 6], Color::RED);
        session.active = Some(Piece::spawn(PieceKind::I));

        let ev = session.apply(GameAction::HardDrop, 1200);
        assert!(ev.contains(&GameEvent::LinesCleared { count: 1 }));
        assert_eq!(session.score(), 100);
        assert_eq!(session.lines(), 1);
        assert_eq!(session.level(), 1);
        assert_eq!(session.normal_delay_ms(), 500);
        // Row 18 moved down into 19.
        assert_eq!(session.board().get(0, 19), Some(Some(Color::RED)));
        assert_eq!(session.board().get(3, 19), Some(None));
    }

    #[test]
    fn tenth_line_raises_level_and_speed() {
        let mut session = running_session();
        session.lines = 9;
        session.board_mut().fill_row_except(19, &[3, 4, 5, 6], Color::RED);
        session.active = Some(Piece::spawn(PieceKind::I));

        let ev = session.apply(GameAction::HardDrop, 1200);
        assert!(ev.contains(&GameEvent::LevelChanged { level: 2 }));
        assert_eq!(session.lines(), 10);
        assert_eq!(session.level(), 2);
        assert_eq!(session.normal_delay_ms(), 460);
        assert_eq!(session.tick_interval_ms(), 460);
    }

    #[test]
    fn blocked_spawn_ends_the_game() {
        let mut session = running_session();
        session.board_mut().set(4, 0, Some(Color::RED));
        session.board_mut().set(4, 1, Some(Color::RED));
        session.active = Some(o_piece_at(0, 10));

        let ev = session.apply(GameAction::HardDrop, 1200);
        assert_eq!(session.phase(), Phase::GameOver);
        assert!(ev.contains(&GameEvent::GameOver { score: 0 }));
        assert!(ev.contains(&GameEvent::MusicStopped));
        assert!(session.active().is_none());
        assert!(session.next_tick_at().is_none());
        // Game over does not record a score.
        assert!(session.scores().is_empty());

        assert!(session.tick(5000).is_empty());
        assert!(session.apply(GameAction::MoveLeft, 5000).is_empty());
    }

    #[test]
    fn countdown_tracks_whole_seconds() {
        let mut session = running_session();
        session.tick(1999);
        assert_eq!(session.remaining_secs(), 180);
        session.tick(2000);
        assert_eq!(session.remaining_secs(), 179);
        session.tick(1000 + 179_500);
        assert_eq!(session.remaining_secs(), 1);
        assert_eq!(session.phase(), Phase::Running);
    }

    #[test]
    fn countdown_expiry_records_score_once() {
        let mut session = running_session();
        session.score = 300;
        let ev = session.tick(181_000);

        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.remaining_secs(), 0);
        assert!(ev.contains(&GameEvent::Finished {
            score: 300,
            new_record: true
        }));
        assert!(ev.contains(&GameEvent::ScoreRecorded { score: 300 }));
        assert_eq!(session.scores().as_slice(), &[300]);
        assert_eq!(session.top_scores(), &[300]);
        assert!(session.snapshot().new_record);

        assert!(session.tick(182_000).is_empty());
        assert!(session.poll(182_000).is_empty());
        assert_eq!(session.scores().len(), 1);
    }

    #[test]
    fn finish_below_best_is_not_a_record() {
        let mut session = GameSession::new(
            1,
            ScoreTable::from_unsorted(vec![500]),
            SessionConfig::default(),
        );
        session.apply(GameAction::Start, 0);
        session.tick(500);
        session.tick(1000);
        session.score = 200;
        session.tick(181_000);

        assert!(!session.new_record());
        assert_eq!(session.previous_best(), 500);
        assert_eq!(session.top_scores(), &[500, 200]);
    }

    #[test]
    fn equal_to_best_is_not_a_record() {
        let mut session = running_session();
        session.tick(181_000);
        assert_eq!(session.score(), 0);
        assert!(!session.new_record());
    }

    #[test]
    fn record_highlight_can_be_disabled() {
        let config = SessionConfig {
            highlight_new_record: false,
            ..SessionConfig::default()
        };
        let mut session = GameSession::new(1, ScoreTable::new(), config);
        session.apply(GameAction::Start, 0);
        session.tick(500);
        session.tick(1000);
        session.score = 100;
        session.tick(181_000);
        assert!(session.new_record());
        assert!(!session.snapshot().new_record);
    }

    #[test]
    fn pause_freezes_countdown_and_gravity() {
        let mut session = running_session();
        let y = session.active().unwrap().y;

        let ev = session.apply(GameAction::PauseToggle, 2000);
        assert_eq!(session.phase(), Phase::Paused);
        assert!(ev.contains(&GameEvent::MusicStopped));

        assert!(session.tick(5000).is_empty());
        session.apply(GameAction::MoveRight, 5000);
        assert_eq!(session.active().unwrap().y, y);
        assert_eq!(session.active().unwrap().x, 3);

        let ev = session.apply(GameAction::PauseToggle, 12_000);
        assert_eq!(session.phase(), Phase::Running);
        assert!(ev.contains(&GameEvent::MusicStarted));

        session.tick(12_000);
        // Only the unpaused second counts.
        assert_eq!(session.remaining_secs(), 179);
    }

    #[test]
    fn pause_shifts_lock_timer() {
        let mut session = running_session();
        session.active = Some(o_piece_at(3, 18));
        session.tick(2000);
        session.apply(GameAction::PauseToggle, 2400);
        session.apply(GameAction::PauseToggle, 10_400);
        // 400ms of grounded time before the pause, 100ms after.
        assert!(!locked(&session.tick(10_500)));
        assert!(locked(&session.tick(10_501)));
    }

    #[test]
    fn soft_drop_switches_interval() {
        let mut session = running_session();
        assert_eq!(session.tick_interval_ms(), 500);
        session.apply(GameAction::SoftDropStart, 1100);
        assert_eq!(session.tick_interval_ms(), 50);
        session.apply(GameAction::SoftDropStop, 1200);
        assert_eq!(session.tick_interval_ms(), 500);
    }

    #[test]
    fn soft_drop_stop_honored_while_paused() {
        let mut session = running_session();
        session.apply(GameAction::SoftDropStart, 1100);
        session.apply(GameAction::PauseToggle, 1200);
        session.apply(GameAction::SoftDropStop, 1300);
        assert!(!session.is_soft_dropping());
    }

    #[test]
    fn poll_follows_the_schedule() {
        let mut session: GameSession = GameSession::default();
        session.apply(GameAction::Start, 0);
        assert_eq!(session.next_tick_at(), Some(500));

        assert!(session.poll(499).is_empty());
        session.poll(500);
        assert_eq!(session.phase(), Phase::GoMessage);
        assert_eq!(session.next_tick_at(), Some(1000));

        session.poll(1000);
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(session.next_tick_at(), Some(1500));

        // Soft drop takes effect from the next booking.
        session.apply(GameAction::SoftDropStart, 1200);
        assert_eq!(session.next_tick_at(), Some(1500));
        let y = session.active().unwrap().y;
        session.poll(1500);
        assert_eq!(session.active().unwrap().y, y + 1);
        assert_eq!(session.next_tick_at(), Some(1550));

        // A long stall collapses into one tick.
        session.poll(3000);
        assert_eq!(session.active().unwrap().y, y + 2);
        assert_eq!(session.next_tick_at(), Some(3050));
    }

    #[test]
    fn pause_keeps_remaining_tick_wait() {
        let mut session = running_session();
        session.next_tick_at = Some(1550);
        session.apply(GameAction::PauseToggle, 1520);
        assert!(session.next_tick_at().is_none());
        assert!(session.poll(4000).is_empty());
        session.apply(GameAction::PauseToggle, 5000);
        assert_eq!(session.next_tick_at(), Some(5030));
    }

    #[test]
    fn restart_resets_the_game() {
        let mut session = running_session();
        session.score = 700;
        session.lines = 12;
        session.level = 2;
        session.normal_delay_ms = 460;
        session.board_mut().set(0, 19, Some(Color::RED));

        let ev = session.apply(GameAction::Restart, 4000);
        assert_eq!(ev[0], GameEvent::MusicStopped);
        assert!(ev.contains(&GameEvent::SessionStarted));
        assert_eq!(session.phase(), Phase::ReadyMessage);
        assert_eq!(session.score(), 0);
        assert_eq!(session.lines(), 0);
        assert_eq!(session.level(), 1);
        assert_eq!(session.normal_delay_ms(), 500);
        assert_eq!(session.board().filled_count(), 0);
        assert_eq!(session.remaining_secs(), 180);
        assert_eq!(session.episode(), 2);
        assert_eq!(session.next_tick_at(), Some(4500));
    }

    #[test]
    fn restart_from_game_over() {
        let mut session = running_session();
        session.board_mut().set(4, 0, Some(Color::RED));
        session.board_mut().set(4, 1, Some(Color::RED));
        session.active = Some(o_piece_at(0, 10));
        session.apply(GameAction::HardDrop, 1200);
        assert_eq!(session.phase(), Phase::GameOver);

        session.apply(GameAction::Restart, 2000);
        assert_eq!(session.phase(), Phase::ReadyMessage);
        assert!(session.active().is_some());
    }

    #[test]
    fn ranking_only_after_finish() {
        let mut session = running_session();
        assert!(session.apply(GameAction::ShowRanking, 1200).is_empty());

        session.tick(181_000);
        let ev = session.apply(GameAction::ShowRanking, 182_000);
        assert_eq!(session.phase(), Phase::Ranking);
        assert_eq!(
            ev[0],
            GameEvent::PhaseChanged {
                from: Phase::Finished,
                to: Phase::Ranking
            }
        );

        session.apply(GameAction::Restart, 183_000);
        assert_eq!(session.phase(), Phase::ReadyMessage);
    }

    #[test]
    fn ranking_can_be_disabled() {
        let config = SessionConfig {
            ranking_screen: false,
            ..SessionConfig::default()
        };
        let mut session = GameSession::new(1, ScoreTable::new(), config);
        session.apply(GameAction::Start, 0);
        session.tick(500);
        session.tick(1000);
        session.tick(181_000);
        session.apply(GameAction::ShowRanking, 182_000);
        assert_eq!(session.phase(), Phase::Finished);
    }

    #[test]
    fn snapshot_mirrors_session() {
        let mut session = running_session();
        session.board_mut().set(0, 19, Some(Color::BLUE));
        let snap = session.snapshot();

        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.board[19][0], Some(Color::BLUE));
        assert_eq!(snap.next, session.next_kind());
        let active = snap.active.unwrap();
        assert_eq!((active.x, active.y), (3, 0));
        assert!(snap.ghost_y.unwrap() >= 17);
        assert_eq!(snap.time_text().as_str(), "3:00");

        session.apply(GameAction::PauseToggle, 1100);
        let snap = session.snapshot();
        assert!(snap.active.is_some());
        assert!(snap.ghost_y.is_none());
    }
}
