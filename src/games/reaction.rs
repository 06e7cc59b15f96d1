//! Reaction timer: wait for green, then press as fast as possible.

use crossterm::event::{KeyCode, KeyEvent};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

use super::{Game, GameKey};
use crate::context::GameContext;
use crate::random::{GameRng, rand_int};
use crate::settings::Difficulty;
use crate::sound::SoundKind;
use crate::terminal::{self, BLACK, GREEN, RED, WHITE};
use crate::timer::Timers;

const BOX_WIDTH: usize = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase
{
    Idle,
    Waiting,
    Go,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionState
{
    pub phase: Phase,
    pub message: String,
    pub best: Option<u64>,
    pub last: Option<u64>,
}

impl Default for ReactionState
{
    fn default() -> Self
    {
        Self {
            phase: Phase::Idle,
            message: "Press Start".to_string(),
            best: None,
            last: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionAction
{
    Start,
    Go,
    TooSoon,
    Done { ms: u64 },
    Reset,
}

pub fn reduce(state: &ReactionState, action: ReactionAction) -> ReactionState
{
    match action {
        ReactionAction::Start => ReactionState {
            phase: Phase::Waiting,
            message: "Wait for GREEN...".to_string(),
            last: None,
            ..state.clone()
        },
        ReactionAction::Go if state.phase == Phase::Waiting => ReactionState {
            phase: Phase::Go,
            message: "GO! Press now!".to_string(),
            ..state.clone()
        },
        ReactionAction::TooSoon => ReactionState {
            phase: Phase::Done,
            message: "Too soon! Try again.".to_string(),
            last: None,
            ..state.clone()
        },
        ReactionAction::Done { ms } => ReactionState {
            phase: Phase::Done,
            message: format!("Your time: {ms} ms"),
            last: Some(ms),
            best: Some(state.best.map_or(ms, |best| best.min(ms))),
        },
        ReactionAction::Reset => ReactionState {
            best: state.best,
            ..ReactionState::default()
        },
        ReactionAction::Go => state.clone(),
    }
}

/// Bounds of the random wait before green, in milliseconds.
pub fn delay_range(difficulty: Difficulty) -> (u64, u64)
{
    match difficulty {
        Difficulty::Easy => (700, 1400),
        Difficulty::Medium => (800, 2200),
        Difficulty::Hard => (900, 2600),
    }
}

/// Whole milliseconds, rounded to nearest.
fn rounded_ms(elapsed: Duration) -> u64
{
    ((elapsed.as_micros() + 500) / 1000) as u64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending
{
    Green,
}

pub struct ReactionTimer
{
    state: ReactionState,
    timers: Timers<Pending>,
    green_at: Option<Instant>,
    rng: GameRng,
}

impl ReactionTimer
{
    pub fn new(rng: GameRng) -> Self
    {
        Self {
            state: ReactionState::default(),
            timers: Timers::new(),
            green_at: None,
            rng,
        }
    }

    pub fn state(&self) -> &ReactionState
    {
        &self.state
    }

    /// When the pending switch to green will happen, if one is armed.
    pub fn green_deadline(&self) -> Option<Instant>
    {
        self.timers.deadline(Pending::Green)
    }

    fn dispatch(&mut self, action: ReactionAction)
    {
        self.state = reduce(&self.state, action);
        debug!(?action, phase = ?self.state.phase, "Reaction transition");
    }

    #[instrument(skip(self, ctx))]
    pub fn start(&mut self, now: Instant, ctx: &GameContext)
    {
        ctx.play(SoundKind::Click);
        self.dispatch(ReactionAction::Start);
        self.green_at = None;

        let (lo, hi) = delay_range(ctx.difficulty());
        let delay = rand_int(&mut self.rng, lo, hi);
        self.timers.once(Pending::Green, now, Duration::from_millis(delay));
    }

    pub fn press(&mut self, now: Instant, ctx: &GameContext)
    {
        match self.state.phase {
            Phase::Waiting => {
                ctx.play(SoundKind::Error);
                self.timers.cancel(Pending::Green);
                self.dispatch(ReactionAction::TooSoon);
            }
            Phase::Go => {
                ctx.play(SoundKind::Success);
                let ms = self
                    .green_at
                    .take()
                    .map_or(0, |green| rounded_ms(now.saturating_duration_since(green)));
                self.dispatch(ReactionAction::Done { ms });
                info!(ms, best = ?self.state.best, "Reaction measured");
            }
            Phase::Idle | Phase::Done => ctx.play(SoundKind::Click),
        }
    }

    pub fn reset(&mut self, ctx: &GameContext)
    {
        ctx.play(SoundKind::Click);
        self.timers.cancel(Pending::Green);
        self.green_at = None;
        self.dispatch(ReactionAction::Reset);
    }
}

impl Game for ReactionTimer
{
    fn key(&self) -> GameKey
    {
        GameKey::Reaction
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant, ctx: &GameContext)
    {
        match key.code {
            KeyCode::Enter => self.start(now, ctx),
            KeyCode::Char(' ') => self.press(now, ctx),
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(ctx),
            _ => {}
        }
    }

    fn advance(&mut self, now: Instant, _ctx: &GameContext)
    {
        while let Some(Pending::Green) = self.timers.pop_due(now) {
            self.green_at = Some(now);
            self.dispatch(ReactionAction::Go);
        }
    }

    fn render(&self, _now: Instant) -> Vec<String>
    {
        let best = self
            .state
            .best
            .map_or("-".to_string(), |ms| ms.to_string());
        let last = self
            .state
            .last
            .map_or("-".to_string(), |ms| ms.to_string());
        let bg = if self.state.phase == Phase::Go { GREEN } else { RED };
        let fg = if self.state.phase == Phase::Go { BLACK } else { WHITE };

        let blank = " ".repeat(BOX_WIDTH);
        let label = format!("{:^width$}", self.state.message, width = BOX_WIDTH);

        let mut lines = Vec::new();
        lines.push(terminal::bold("Reaction Timer"));
        lines.push(format!("Best: {best} ms"));
        lines.push(String::new());
        lines.push(terminal::fill(&blank, fg, bg));
        lines.push(terminal::fill(&label, fg, bg));
        lines.push(terminal::fill(&blank, fg, bg));
        lines.push(String::new());
        lines.push(format!("Last: {last} ms"));
        lines
    }

    fn controls(&self) -> &'static str
    {
        "Enter start, Space press, R reset"
    }

    fn teardown(&mut self)
    {
        self.timers.cancel_all();
    }
}
