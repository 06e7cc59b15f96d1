//! Dashboard settings: difficulty and the sound toggle.

use clap::ValueEnum;
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::debug;

/// Difficulty shared by every game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty
{
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty
{
    /// The next difficulty, wrapping from hard back to easy.
    pub fn cycle(self) -> Self
    {
        let all: Vec<Self> = Self::iter().collect();
        let idx = all.iter().position(|d| *d == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings
{
    pub difficulty: Difficulty,
    pub sound_on: bool,
}

impl Default for Settings
{
    fn default() -> Self
    {
        Self {
            difficulty: Difficulty::default(),
            sound_on: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction
{
    SetDifficulty(Difficulty),
    ToggleSound,
}

pub fn reduce(state: Settings, action: SettingsAction) -> Settings
{
    let next = match action {
        SettingsAction::SetDifficulty(difficulty) => Settings { difficulty, ..state },
        SettingsAction::ToggleSound => Settings {
            sound_on: !state.sound_on,
            ..state
        },
    };
    debug!(?action, difficulty = %next.difficulty, sound_on = next.sound_on, "Settings updated");
    next
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn defaults_to_medium_with_sound()
    {
        let settings = Settings::default();
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert!(settings.sound_on);
    }

    #[test]
    fn cycle_wraps()
    {
        assert_eq!(Difficulty::Easy.cycle(), Difficulty::Medium);
        assert_eq!(Difficulty::Medium.cycle(), Difficulty::Hard);
        assert_eq!(Difficulty::Hard.cycle(), Difficulty::Easy);
    }

    #[test]
    fn toggle_sound_flips_only_sound()
    {
        let start = Settings::default();
        let muted = reduce(start, SettingsAction::ToggleSound);
        assert!(!muted.sound_on);
        assert_eq!(muted.difficulty, start.difficulty);
        assert_eq!(reduce(muted, SettingsAction::ToggleSound), start);
    }

    #[test]
    fn difficulty_displays_lowercase()
    {
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }
}
