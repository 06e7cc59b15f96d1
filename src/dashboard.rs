//! Home screen, navigation and the terminal event loop.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};
use tracing::{info, instrument};

use crate::config::DashboardConfig;
use crate::context::GameContext;
use crate::error::AppError;
use crate::games::{self, Game, GameDescriptor, GameKey, MountOptions};
use crate::random::{self, GameRng};
use crate::settings::SettingsAction;
use crate::sound::{Bell, SoundBackend};
use crate::terminal::{self, AMBER, DIM, TerminalGuard};

const FRAME: Duration = Duration::from_millis(33);
const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow
{
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavState
{
    pub active: Option<GameKey>,
    pub search: String,
    /// Highlighted row of the filtered home list.
    pub selected: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction
{
    Go(GameKey),
    Home,
    Search(String),
    Move(isize),
}

/// `visible` is the length of the filtered list the selection moves over.
pub fn reduce_nav(state: &NavState, action: NavAction, visible: usize) -> NavState
{
    match action {
        NavAction::Go(key) => NavState {
            active: Some(key),
            ..state.clone()
        },
        NavAction::Home => NavState {
            active: None,
            ..state.clone()
        },
        NavAction::Search(search) => NavState {
            search,
            selected: 0,
            ..state.clone()
        },
        NavAction::Move(delta) => {
            let last = visible.saturating_sub(1) as isize;
            let selected = (state.selected as isize + delta).clamp(0, last) as usize;
            NavState { selected, ..state.clone() }
        }
    }
}

pub struct Dashboard
{
    nav: NavState,
    ctx: GameContext,
    game: Option<Box<dyn Game>>,
    rng: GameRng,
    options: MountOptions,
}

impl Dashboard
{
    pub fn new(config: &DashboardConfig, sound: Box<dyn SoundBackend>) -> Self
    {
        let rng = config.seed.map_or_else(random::from_entropy, random::seeded);
        let mut dashboard = Self {
            nav: NavState::default(),
            ctx: GameContext::new(config.settings, sound),
            game: None,
            rng,
            options: MountOptions {
                round_length: config.round_length,
            },
        };
        if let Some(key) = config.start_game {
            dashboard.navigate(NavAction::Go(key));
        }
        dashboard
    }

    pub fn nav(&self) -> &NavState
    {
        &self.nav
    }

    pub fn context(&self) -> &GameContext
    {
        &self.ctx
    }

    pub fn active_game(&self) -> Option<GameKey>
    {
        self.game.as_ref().map(|game| game.key())
    }

    pub fn visible_games(&self) -> Vec<GameDescriptor>
    {
        games::filter(games::registry(), &self.nav.search)
    }

    /// Applies a navigation action, tearing down and mounting games as the
    /// active view changes.
    #[instrument(skip(self))]
    pub fn navigate(&mut self, action: NavAction)
    {
        let visible = self.visible_games().len();
        let next = reduce_nav(&self.nav, action, visible);
        let switched = next.active != self.nav.active;
        self.nav = next;
        if !switched {
            return;
        }

        if let Some(mut game) = self.game.take() {
            info!(game = %game.key(), "Unmounting game");
            game.teardown();
        }
        if let Some(key) = self.nav.active {
            info!(game = %key, difficulty = %self.ctx.difficulty(), "Mounting game");
            let rng = random::fork(&mut self.rng);
            self.game = Some(games::mount(key, &self.ctx, rng, self.options));
        }
    }

    fn update_settings(&mut self, action: SettingsAction, now: Instant)
    {
        if !self.ctx.update(action) {
            return;
        }
        if let Some(game) = self.game.as_mut() {
            game.settings_changed(now, &self.ctx);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Flow
    {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return Flow::Quit,
                KeyCode::Char('d') => {
                    let next = self.ctx.difficulty().cycle();
                    self.update_settings(SettingsAction::SetDifficulty(next), now);
                }
                KeyCode::Char('s') => self.update_settings(SettingsAction::ToggleSound, now),
                _ => {}
            }
            return Flow::Continue;
        }

        if key.code == KeyCode::Esc {
            if self.game.is_none() {
                return Flow::Quit;
            }
            self.navigate(NavAction::Home);
            return Flow::Continue;
        }

        match self.game.as_mut() {
            Some(game) => game.handle_key(key, now, &self.ctx),
            None => self.handle_home_key(key.code),
        }
        Flow::Continue
    }

    fn handle_home_key(&mut self, code: KeyCode)
    {
        match code {
            KeyCode::Up => self.navigate(NavAction::Move(-1)),
            KeyCode::Down => self.navigate(NavAction::Move(1)),
            KeyCode::Enter => {
                let chosen = self.visible_games().get(self.nav.selected).map(|game| game.key);
                if let Some(key) = chosen {
                    self.navigate(NavAction::Go(key));
                }
            }
            KeyCode::Backspace => {
                let mut search = self.nav.search.clone();
                search.pop();
                self.navigate(NavAction::Search(search));
            }
            KeyCode::Char(ch) => {
                let mut search = self.nav.search.clone();
                search.push(ch);
                self.navigate(NavAction::Search(search));
            }
            _ => {}
        }
    }

    pub fn advance(&mut self, now: Instant)
    {
        if let Some(game) = self.game.as_mut() {
            game.advance(now, &self.ctx);
        }
    }

    pub fn render(&self, now: Instant) -> Vec<String>
    {
        let settings = self.ctx.settings();
        let mut lines = Vec::new();
        lines.push(terminal::bold("Minigames Dashboard"));
        lines.push(format!(
            "Difficulty: {}   Sound: {}",
            settings.difficulty,
            if settings.sound_on { "on" } else { "off" }
        ));
        lines.push("=".repeat(RULE_WIDTH));

        let controls = match &self.game {
            Some(game) => {
                lines.extend(game.render(now));
                format!("{}, Esc home", game.controls())
            }
            None => {
                lines.extend(self.render_home());
                "type to search, Up/Down select, Enter play, Esc quit".to_string()
            }
        };

        lines.push("=".repeat(RULE_WIDTH));
        lines.push(format!("Controls: {controls}"));
        lines.push(terminal::paint("Ctrl+D difficulty, Ctrl+S sound, Ctrl+C quit", DIM));
        lines
    }

    fn render_home(&self) -> Vec<String>
    {
        let mut lines = Vec::new();
        lines.push(format!("Search: {}_", self.nav.search));
        lines.push(String::new());

        let visible = self.visible_games();
        if visible.is_empty() {
            lines.push(terminal::paint("No games match.", DIM));
        }
        for (idx, game) in visible.iter().enumerate() {
            let row = format!("{} - {}  [{}]", game.name, game.description, game.badge);
            if idx == self.nav.selected {
                lines.push(terminal::paint(&format!("> {row}"), AMBER));
            } else {
                lines.push(format!("  {row}"));
            }
        }
        lines
    }

    /// Tears down the active game, if any.
    pub fn shutdown(&mut self)
    {
        if let Some(mut game) = self.game.take() {
            game.teardown();
        }
    }
}

pub fn run(config: &DashboardConfig) -> Result<(), AppError>
{
    let mut dashboard = Dashboard::new(config, Box::new(Bell));
    let mut term = TerminalGuard::enter()?;
    let mut last_draw: Option<Instant> = None;

    loop {
        let now = Instant::now();
        if poll_input(&mut dashboard, now)? == Flow::Quit {
            break;
        }

        dashboard.advance(Instant::now());

        if last_draw.map_or(true, |at| at.elapsed() >= FRAME) {
            terminal::draw(term.stdout(), &dashboard.render(Instant::now()))?;
            last_draw = Some(Instant::now());
        }

        std::thread::sleep(Duration::from_millis(1));
    }

    dashboard.shutdown();
    info!("Dashboard closed");
    Ok(())
}

fn poll_input(dashboard: &mut Dashboard, now: Instant) -> Result<Flow, AppError>
{
    while event::poll(Duration::from_millis(0))? {
        if let Event::Key(key) = event::read()? {
            if dashboard.handle_key(key, now) == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }
    Ok(Flow::Continue)
}
