pub mod reaction;
pub mod sequence;
pub mod tictactoe;
pub mod whack;

use clap::ValueEnum;
use crossterm::event::KeyEvent;
use std::time::{Duration, Instant};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::context::GameContext;
use crate::random::GameRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum GameKey
{
    Reaction,
    #[value(name = "tictactoe")]
    TicTacToe,
    Whack,
    Sequence,
}

pub struct GameDescriptor
{
    pub key: GameKey,
    pub name: &'static str,
    pub description: &'static str,
    pub badge: &'static str,
}

impl GameDescriptor
{
    fn haystack(&self) -> String
    {
        format!("{} {} {}", self.name, self.description, self.badge).to_lowercase()
    }
}

pub fn registry() -> Vec<GameDescriptor>
{
    GameKey::iter().map(describe).collect()
}

pub fn describe(key: GameKey) -> GameDescriptor
{
    match key {
        GameKey::Reaction => GameDescriptor {
            key,
            name: "Reaction Timer",
            description: "Press when it turns green",
            badge: "timer+reducer",
        },
        GameKey::TicTacToe => GameDescriptor {
            key,
            name: "Tic-Tac-Toe",
            description: "Classic 3x3 against a bot",
            badge: "heuristic bot",
        },
        GameKey::Whack => GameDescriptor {
            key,
            name: "Whack-a-Mole",
            description: "Hit the mole fast",
            badge: "periodic timers",
        },
        GameKey::Sequence => GameDescriptor {
            key,
            name: "Key Sequence",
            description: "Type the target string",
            badge: "key buffer",
        },
    }
}

/// Games whose name, description or badge contain the trimmed query.
pub fn filter(games: Vec<GameDescriptor>, query: &str) -> Vec<GameDescriptor>
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return games;
    }
    games
        .into_iter()
        .filter(|game| game.haystack().contains(&needle))
        .collect()
}

/// A mounted game instance as seen by the dashboard.
///
/// Every entry point receives the current time and the dashboard's context;
/// expired timers are only acted on inside [`Game::advance`].
pub trait Game
{
    fn key(&self) -> GameKey;

    fn handle_key(&mut self, key: KeyEvent, now: Instant, ctx: &GameContext);

    /// Fires every timer due at `now`.
    fn advance(&mut self, now: Instant, ctx: &GameContext);

    /// Called after the dashboard's settings changed.
    fn settings_changed(&mut self, _now: Instant, _ctx: &GameContext) {}

    fn render(&self, now: Instant) -> Vec<String>;

    fn controls(&self) -> &'static str;

    /// Cancels everything still scheduled. Called before the game is dropped.
    fn teardown(&mut self);
}

/// Per-mount options that do not come from [`GameContext`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MountOptions
{
    pub round_length: Option<Duration>,
}

pub fn mount(key: GameKey, ctx: &GameContext, rng: GameRng, options: MountOptions) -> Box<dyn Game>
{
    match key {
        GameKey::Reaction => Box::new(reaction::ReactionTimer::new(rng)),
        GameKey::TicTacToe => Box::new(tictactoe::TicTacToe::new(rng)),
        GameKey::Whack => Box::new(whack::WhackAMole::new(ctx, rng, options.round_length)),
        GameKey::Sequence => Box::new(sequence::KeySequence::new(ctx, rng)),
    }
}

/// Cell index for the digit keys `1`..=`9`.
pub(crate) fn digit_cell(ch: char) -> Option<usize>
{
    ch.to_digit(10)
        .filter(|d| (1..=9).contains(d))
        .map(|d| d as usize - 1)
}
