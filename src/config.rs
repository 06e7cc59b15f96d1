use std::path::PathBuf;
use std::time::Duration;

use crate::cli::{Cli, Command};
use crate::error::AppError;
use crate::games::GameKey;
use crate::settings::Settings;

const MAX_ROUND_SECONDS: u32 = 600;

/// Validated startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig
{
    pub settings: Settings,
    pub seed: Option<u64>,
    pub round_length: Option<Duration>,
    pub log_file: PathBuf,
    pub start_game: Option<GameKey>,
}

impl DashboardConfig
{
    pub fn from_cli(cli: &Cli) -> Result<Self, AppError>
    {
        let round_length = cli
            .round_seconds
            .map(parse_round_seconds)
            .transpose()?;
        let start_game = match cli.command {
            Some(Command::Play { game }) => Some(game),
            Some(Command::List) | None => None,
        };

        Ok(Self {
            settings: Settings {
                difficulty: cli.difficulty,
                sound_on: !cli.mute,
            },
            seed: cli.seed,
            round_length,
            log_file: cli.log_file.clone(),
            start_game,
        })
    }
}

impl Default for DashboardConfig
{
    fn default() -> Self
    {
        Self {
            settings: Settings::default(),
            seed: None,
            round_length: None,
            log_file: PathBuf::from("minigames.log"),
            start_game: None,
        }
    }
}

fn parse_round_seconds(seconds: u32) -> Result<Duration, AppError>
{
    if seconds == 0 {
        return Err(AppError::new("Round length must be positive"));
    }
    if seconds > MAX_ROUND_SECONDS {
        return Err(AppError::new(format!(
            "Round length must be at most {MAX_ROUND_SECONDS} seconds"
        )));
    }
    Ok(Duration::from_secs(u64::from(seconds)))
}
