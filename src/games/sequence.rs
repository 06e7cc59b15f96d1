//! Key sequence: type the target string exactly.

use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;
use tracing::{debug, info};

use super::{Game, GameKey};
use crate::context::GameContext;
use crate::random::{GameRng, rand_int};
use crate::settings::Difficulty;
use crate::terminal::{self, GREEN};
use crate::words;

pub const MAX_TYPED: usize = 24;

/// A key press as the buffer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke
{
    Backspace,
    Char(char),
    /// Named keys (arrows, function keys, ...) that never reach the buffer.
    Other,
}

impl From<KeyCode> for Keystroke
{
    fn from(code: KeyCode) -> Self
    {
        match code {
            KeyCode::Backspace => Keystroke::Backspace,
            KeyCode::Char(ch) => Keystroke::Char(ch),
            _ => Keystroke::Other,
        }
    }
}

/// The buffer after `key`, or `None` when the key leaves it untouched.
pub fn next_buffer(typed: &str, key: Keystroke) -> Option<String>
{
    match key {
        Keystroke::Backspace => {
            let mut next = typed.to_string();
            next.pop()?;
            Some(next)
        }
        Keystroke::Char(ch) if ch.is_ascii_alphabetic() => {
            let next: String = typed
                .chars()
                .chain(std::iter::once(ch.to_ascii_lowercase()))
                .take(MAX_TYPED)
                .collect();
            (next != typed).then_some(next)
        }
        Keystroke::Char(_) | Keystroke::Other => None,
    }
}

/// Leading characters of `typed` that agree with `target`.
pub fn matched_prefix(target: &str, typed: &str) -> usize
{
    target
        .chars()
        .zip(typed.chars())
        .take_while(|(a, b)| a == b)
        .count()
}

pub fn make_target<R: rand::Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> String
{
    let pool = words::pool(difficulty);
    let idx = rand_int(rng, 0, pool.len().saturating_sub(1));
    pool.get(idx).copied().unwrap_or_default().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status
{
    Typing,
    Win,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceState
{
    pub target: String,
    pub typed: String,
    pub score: u32,
    pub status: Status,
}

impl SequenceState
{
    pub fn new(target: String) -> Self
    {
        Self {
            target,
            typed: String::new(),
            score: 0,
            status: Status::Typing,
        }
    }

    /// "matched/length", e.g. `3/5`.
    pub fn progress(&self) -> String
    {
        format!(
            "{}/{}",
            matched_prefix(&self.target, &self.typed),
            self.target.chars().count()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceAction
{
    NewTarget(String),
    Key(Keystroke),
    Clear,
}

pub fn reduce(state: &SequenceState, action: SequenceAction) -> SequenceState
{
    match action {
        SequenceAction::NewTarget(target) => SequenceState {
            target,
            typed: String::new(),
            status: Status::Typing,
            ..state.clone()
        },
        SequenceAction::Key(key) => match next_buffer(&state.typed, key) {
            Some(typed) => {
                let won = typed == state.target;
                SequenceState {
                    score: if won { state.score + 1 } else { state.score },
                    status: if won { Status::Win } else { state.status },
                    typed,
                    ..state.clone()
                }
            }
            None => state.clone(),
        },
        SequenceAction::Clear => SequenceState {
            typed: String::new(),
            status: Status::Typing,
            ..state.clone()
        },
    }
}

pub struct KeySequence
{
    state: SequenceState,
    difficulty: Difficulty,
    rng: GameRng,
}

impl KeySequence
{
    pub fn new(ctx: &GameContext, mut rng: GameRng) -> Self
    {
        let difficulty = ctx.difficulty();
        let target = make_target(difficulty, &mut rng);
        Self {
            state: SequenceState::new(target),
            difficulty,
            rng,
        }
    }

    pub fn state(&self) -> &SequenceState
    {
        &self.state
    }

    fn dispatch(&mut self, action: SequenceAction)
    {
        let score = self.state.score;
        self.state = reduce(&self.state, action);
        if self.state.score > score {
            info!(word = %self.state.target, score = self.state.score, "Sequence complete");
        }
    }

    pub fn press(&mut self, key: Keystroke)
    {
        self.dispatch(SequenceAction::Key(key));
    }

    pub fn next(&mut self)
    {
        let target = make_target(self.difficulty, &mut self.rng);
        debug!(word = %target, "New sequence target");
        self.dispatch(SequenceAction::NewTarget(target));
    }

    pub fn clear(&mut self)
    {
        self.dispatch(SequenceAction::Clear);
    }
}

impl Game for KeySequence
{
    fn key(&self) -> GameKey
    {
        GameKey::Sequence
    }

    fn handle_key(&mut self, key: KeyEvent, _now: Instant, _ctx: &GameContext)
    {
        match key.code {
            KeyCode::Enter => self.next(),
            KeyCode::Tab => self.clear(),
            code => self.press(Keystroke::from(code)),
        }
    }

    fn advance(&mut self, _now: Instant, _ctx: &GameContext) {}

    fn settings_changed(&mut self, _now: Instant, ctx: &GameContext)
    {
        let difficulty = ctx.difficulty();
        if difficulty != self.difficulty {
            self.difficulty = difficulty;
            self.next();
        }
    }

    fn render(&self, _now: Instant) -> Vec<String>
    {
        let typed = if self.state.typed.is_empty() {
            "-".to_string()
        } else {
            self.state.typed.clone()
        };
        let check = if self.state.status == Status::Win {
            terminal::paint(" ✓", GREEN)
        } else {
            String::new()
        };

        vec![
            terminal::bold("Key Sequence"),
            format!("Score {}", self.state.score),
            String::new(),
            "Type exactly:".to_string(),
            terminal::bold(&self.state.target),
            String::new(),
            "You typed:".to_string(),
            typed,
            String::new(),
            format!("Progress: {}{}", self.state.progress(), check),
        ]
    }

    fn controls(&self) -> &'static str
    {
        "type letters, Backspace delete, Tab clear, Enter next"
    }

    fn teardown(&mut self) {}
}
