//! Collaborators handed to every game operation.

use crate::settings::{self, Difficulty, Settings, SettingsAction};
use crate::sound::{self, SoundBackend, SoundKind};

/// Settings plus the sound capability.
///
/// Owned by the dashboard and lent to the active game for each event, so a
/// game can neither outlive nor bypass it.
pub struct GameContext
{
    settings: Settings,
    sound: Box<dyn SoundBackend>,
}

impl GameContext
{
    pub fn new(settings: Settings, sound: Box<dyn SoundBackend>) -> Self
    {
        Self { settings, sound }
    }

    pub fn settings(&self) -> Settings
    {
        self.settings
    }

    pub fn difficulty(&self) -> Difficulty
    {
        self.settings.difficulty
    }

    pub fn play(&self, kind: SoundKind)
    {
        sound::trigger(self.sound.as_ref(), self.settings.sound_on, kind);
    }

    /// Applies a settings action, returning whether anything changed.
    pub fn update(&mut self, action: SettingsAction) -> bool
    {
        let next = settings::reduce(self.settings, action);
        let changed = next != self.settings;
        self.settings = next;
        changed
    }
}
