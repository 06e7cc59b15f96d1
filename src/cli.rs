//! Command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::games::GameKey;
use crate::settings::Difficulty;

/// Terminal dashboard with four mini-games
#[derive(Parser, Debug)]
#[command(name = "minigames")]
#[command(about = "Terminal dashboard with four mini-games", long_about = None)]
#[command(version)]
pub struct Cli
{
    /// Starting difficulty (Ctrl+D cycles it while playing)
    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    pub difficulty: Difficulty,

    /// Start with sound cues off (Ctrl+S toggles them)
    #[arg(long)]
    pub mute: bool,

    /// Seed for every random choice, for a reproducible session
    #[arg(long)]
    pub seed: Option<u64>,

    /// Whack-a-mole round length in seconds, instead of the difficulty default
    #[arg(long)]
    pub round_seconds: Option<u32>,

    /// File receiving the trace log (filter with RUST_LOG)
    #[arg(long, default_value = "minigames.log")]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command
{
    /// List the available games
    List,

    /// Open a game directly instead of the home screen
    Play {
        #[arg(value_enum)]
        game: GameKey,
    },
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn defaults()
    {
        let cli = Cli::try_parse_from(["minigames"]).unwrap();
        assert_eq!(cli.difficulty, Difficulty::Medium);
        assert!(!cli.mute);
        assert_eq!(cli.command, None);
        assert_eq!(cli.log_file, PathBuf::from("minigames.log"));
    }

    #[test]
    fn play_subcommand_takes_game_name()
    {
        let cli = Cli::try_parse_from(["minigames", "--difficulty", "hard", "play", "tictactoe"]).unwrap();
        assert_eq!(cli.difficulty, Difficulty::Hard);
        assert_eq!(cli.command, Some(Command::Play { game: GameKey::TicTacToe }));
    }

    #[test]
    fn unknown_game_is_rejected()
    {
        assert!(Cli::try_parse_from(["minigames", "play", "chess"]).is_err());
    }
}
