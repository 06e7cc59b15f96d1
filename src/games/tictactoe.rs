//! Tic-tac-toe against a heuristic bot. The human is X and always opens.

use crossterm::event::{KeyCode, KeyEvent};
use rand::Rng;
use rand::seq::SliceRandom;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::{Game, GameKey, digit_cell};
use crate::context::GameContext;
use crate::random::GameRng;
use crate::sound::SoundKind;
use crate::terminal::{self, AMBER, DIM};
use crate::timer::Timers;

/// How long the bot "thinks" before placing its mark.
pub const BOT_DELAY: Duration = Duration::from_millis(350);

const CENTER: usize = 4;
const CORNERS: [usize; 4] = [0, 2, 6, 8];

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark
{
    X,
    O,
}

impl Mark
{
    pub fn opponent(self) -> Self
    {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    fn symbol(self) -> char
    {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

/// 3x3 board in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board
{
    cells: [Option<Mark>; 9],
}

impl Board
{
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn from_cells(cells: [Option<Mark>; 9]) -> Self
    {
        Self { cells }
    }

    pub fn get(&self, idx: usize) -> Option<Mark>
    {
        self.cells.get(idx).copied().flatten()
    }

    /// In range and unoccupied.
    pub fn is_open(&self, idx: usize) -> bool
    {
        idx < self.cells.len() && self.cells[idx].is_none()
    }

    /// Copy of the board with `mark` at `idx`.
    pub fn with(&self, idx: usize, mark: Mark) -> Self
    {
        let mut cells = self.cells;
        cells[idx] = Some(mark);
        Self { cells }
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_
    {
        (0..self.cells.len()).filter(|idx| self.cells[*idx].is_none())
    }

    pub fn is_full(&self) -> bool
    {
        self.cells.iter().all(Option::is_some)
    }
}

pub fn winner(board: &Board) -> Option<Mark>
{
    LINES.iter().find_map(|&[a, b, c]| {
        let mark = board.get(a)?;
        (board.get(b) == Some(mark) && board.get(c) == Some(mark)).then_some(mark)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome
{
    InProgress,
    Won(Mark),
    Draw,
}

pub fn outcome(board: &Board) -> Outcome
{
    match winner(board) {
        Some(mark) => Outcome::Won(mark),
        None if board.is_full() => Outcome::Draw,
        None => Outcome::InProgress,
    }
}

/// Picks the bot's cell for O, or `None` on a full board.
///
/// Priority: win now, block X, center, a random open corner, first open cell.
pub fn bot_pick<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize>
{
    let open: Vec<usize> = board.empty_cells().collect();

    let completes = |mark: Mark| {
        open.iter()
            .copied()
            .find(|&idx| winner(&board.with(idx, mark)) == Some(mark))
    };
    if let Some(idx) = completes(Mark::O) {
        return Some(idx);
    }
    if let Some(idx) = completes(Mark::X) {
        return Some(idx);
    }

    if board.is_open(CENTER) {
        return Some(CENTER);
    }

    let corners: Vec<usize> = CORNERS.iter().copied().filter(|c| board.is_open(*c)).collect();
    if let Some(corner) = corners.choose(rng) {
        return Some(*corner);
    }

    open.first().copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToeState
{
    pub board: Board,
    pub turn: Mark,
    /// Set once the game-over cue has played; cleared by a new game.
    pub end_cue_played: bool,
}

impl Default for TicTacToeState
{
    fn default() -> Self
    {
        Self {
            board: Board::new(),
            turn: Mark::X,
            end_cue_played: false,
        }
    }
}

impl TicTacToeState
{
    pub fn outcome(&self) -> Outcome
    {
        outcome(&self.board)
    }

    pub fn is_over(&self) -> bool
    {
        self.outcome() != Outcome::InProgress
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicTacToeAction
{
    /// Current player marks a cell.
    Play(usize),
    Reset,
    EndCuePlayed,
}

pub fn reduce(state: &TicTacToeState, action: TicTacToeAction) -> TicTacToeState
{
    match action {
        TicTacToeAction::Play(idx) => {
            if state.is_over() || !state.board.is_open(idx) {
                return *state;
            }
            TicTacToeState {
                board: state.board.with(idx, state.turn),
                turn: state.turn.opponent(),
                ..*state
            }
        }
        TicTacToeAction::Reset => TicTacToeState::default(),
        TicTacToeAction::EndCuePlayed => TicTacToeState {
            end_cue_played: true,
            ..*state
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending
{
    BotMove,
}

pub struct TicTacToe
{
    state: TicTacToeState,
    timers: Timers<Pending>,
    rng: GameRng,
}

impl TicTacToe
{
    pub fn new(rng: GameRng) -> Self
    {
        Self {
            state: TicTacToeState::default(),
            timers: Timers::new(),
            rng,
        }
    }

    pub fn state(&self) -> &TicTacToeState
    {
        &self.state
    }

    pub fn bot_deadline(&self) -> Option<Instant>
    {
        self.timers.deadline(Pending::BotMove)
    }

    /// Human move. Rejected once the game is over, on an occupied cell, or
    /// while the bot is to move.
    pub fn play(&mut self, idx: usize, now: Instant, ctx: &GameContext)
    {
        if self.state.is_over() || self.state.turn != Mark::X || !self.state.board.is_open(idx) {
            ctx.play(SoundKind::Error);
            return;
        }
        ctx.play(SoundKind::Click);
        self.apply(TicTacToeAction::Play(idx), now, ctx);
    }

    pub fn reset(&mut self, now: Instant, ctx: &GameContext)
    {
        ctx.play(SoundKind::Click);
        self.apply(TicTacToeAction::Reset, now, ctx);
    }

    fn apply(&mut self, action: TicTacToeAction, now: Instant, ctx: &GameContext)
    {
        let next = reduce(&self.state, action);
        if next == self.state {
            return;
        }
        self.state = next;
        debug!(?action, turn = ?self.state.turn, outcome = ?self.state.outcome(), "Tic-tac-toe transition");
        self.after_transition(now, ctx);
    }

    fn after_transition(&mut self, now: Instant, ctx: &GameContext)
    {
        let over = self.state.is_over();
        if over && !self.state.end_cue_played {
            info!(outcome = ?self.state.outcome(), "Tic-tac-toe game over");
            ctx.play(SoundKind::Success);
            self.state = reduce(&self.state, TicTacToeAction::EndCuePlayed);
        }

        self.timers.cancel(Pending::BotMove);
        if !over && self.state.turn == Mark::O {
            self.timers.once(Pending::BotMove, now, BOT_DELAY);
        }
    }

    fn bot_move(&mut self, now: Instant, ctx: &GameContext)
    {
        if let Some(idx) = bot_pick(&self.state.board, &mut self.rng) {
            debug!(cell = idx, "Bot moves");
            ctx.play(SoundKind::Click);
            self.apply(TicTacToeAction::Play(idx), now, ctx);
        }
    }

    fn status_line(&self) -> String
    {
        match self.state.outcome() {
            Outcome::Won(mark) => format!("Winner: {}", mark.symbol()),
            Outcome::Draw => "Draw!".to_string(),
            Outcome::InProgress if self.state.turn == Mark::O => {
                "Turn: O (Bot thinking...)".to_string()
            }
            Outcome::InProgress => "Turn: X (Your move)".to_string(),
        }
    }
}

impl Game for TicTacToe
{
    fn key(&self) -> GameKey
    {
        GameKey::TicTacToe
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant, ctx: &GameContext)
    {
        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(now, ctx),
            KeyCode::Char(ch) => {
                if let Some(idx) = digit_cell(ch) {
                    self.play(idx, now, ctx);
                }
            }
            _ => {}
        }
    }

    fn advance(&mut self, now: Instant, ctx: &GameContext)
    {
        while let Some(Pending::BotMove) = self.timers.pop_due(now) {
            self.bot_move(now, ctx);
        }
    }

    fn render(&self, _now: Instant) -> Vec<String>
    {
        let mut lines = Vec::new();
        lines.push(terminal::bold("Tic-Tac-Toe (vs Bot)"));
        lines.push("You are X, the bot is O".to_string());
        lines.push(String::new());
        lines.push(self.status_line());
        lines.push(String::new());
        for row in 0..3 {
            let cells: Vec<String> = (0..3)
                .map(|col| {
                    let idx = row * 3 + col;
                    match self.state.board.get(idx) {
                        Some(Mark::X) => terminal::bold(" X "),
                        Some(Mark::O) => terminal::paint(" O ", AMBER),
                        None => terminal::paint(&format!(" {} ", idx + 1), DIM),
                    }
                })
                .collect();
            lines.push(cells.join("|"));
            if row < 2 {
                lines.push("---+---+---".to_string());
            }
        }
        lines
    }

    fn controls(&self) -> &'static str
    {
        "1-9 play a cell, R reset"
    }

    fn teardown(&mut self)
    {
        self.timers.cancel_all();
    }
}
