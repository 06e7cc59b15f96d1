//! Whack-a-mole: hit the lit cell before the next spawn moves it.

use crossterm::event::{KeyCode, KeyEvent};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

use super::{Game, GameKey, digit_cell};
use crate::context::GameContext;
use crate::random::{GameRng, rand_int};
use crate::settings::Difficulty;
use crate::sound::SoundKind;
use crate::terminal::{self, AMBER, BLACK, DIM};
use crate::timer::Timers;

const TICK_PERIOD: Duration = Duration::from_secs(1);
const CELLS: usize = 9;

pub fn spawn_period(difficulty: Difficulty) -> Duration
{
    let ms = match difficulty {
        Difficulty::Easy => 700,
        Difficulty::Medium => 600,
        Difficulty::Hard => 450,
    };
    Duration::from_millis(ms)
}

/// Default round length in seconds.
pub fn round_seconds(difficulty: Difficulty) -> u32
{
    match difficulty {
        Difficulty::Easy => 20,
        Difficulty::Medium => 15,
        Difficulty::Hard => 12,
    }
}

fn round_length_secs(round_length: Option<Duration>, difficulty: Difficulty) -> u32
{
    round_length
        .map(|len| len.as_secs() as u32)
        .unwrap_or_else(|| round_seconds(difficulty))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WhackState
{
    pub running: bool,
    pub score: u32,
    pub time_left: u32,
    pub active: Option<usize>,
    /// Set once the end-of-round cue has played; cleared by the next start.
    pub end_cue_played: bool,
}

impl WhackState
{
    /// The round ran out its countdown and is no longer running.
    pub fn round_over(&self) -> bool
    {
        !self.running && self.time_left == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhackAction
{
    Start { seconds: u32 },
    /// Sets the countdown shown before a round has been played.
    Prepare { seconds: u32 },
    Tick,
    Spawn(usize),
    Hit(usize),
    EndCuePlayed,
}

pub fn reduce(state: &WhackState, action: WhackAction) -> WhackState
{
    match action {
        WhackAction::Start { seconds } => WhackState {
            running: true,
            score: 0,
            time_left: seconds,
            active: None,
            end_cue_played: false,
        },
        WhackAction::Prepare { seconds } if !state.running && !state.round_over() => WhackState {
            time_left: seconds,
            ..*state
        },
        WhackAction::Tick if state.running => {
            let time_left = state.time_left.saturating_sub(1);
            if time_left == 0 {
                WhackState {
                    running: false,
                    time_left: 0,
                    active: None,
                    ..*state
                }
            } else {
                WhackState { time_left, ..*state }
            }
        }
        WhackAction::Spawn(idx) if state.running => WhackState {
            active: Some(idx),
            ..*state
        },
        WhackAction::Hit(idx) if state.running && state.active == Some(idx) => WhackState {
            score: state.score + 1,
            active: None,
            ..*state
        },
        WhackAction::EndCuePlayed => WhackState {
            end_cue_played: true,
            ..*state
        },
        WhackAction::Prepare { .. } | WhackAction::Tick | WhackAction::Spawn(_) | WhackAction::Hit(_) => {
            *state
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending
{
    Spawn,
    Tick,
}

pub struct WhackAMole
{
    state: WhackState,
    timers: Timers<Pending>,
    rng: GameRng,
    round_length: Option<Duration>,
}

impl WhackAMole
{
    /// `round_length` overrides the difficulty's default round.
    pub fn new(ctx: &GameContext, rng: GameRng, round_length: Option<Duration>) -> Self
    {
        let state = WhackState {
            time_left: round_length_secs(round_length, ctx.difficulty()),
            ..WhackState::default()
        };
        Self {
            state,
            timers: Timers::new(),
            rng,
            round_length,
        }
    }

    fn round_seconds_for(&self, ctx: &GameContext) -> u32
    {
        round_length_secs(self.round_length, ctx.difficulty())
    }

    pub fn state(&self) -> &WhackState
    {
        &self.state
    }

    pub fn timers_armed(&self) -> usize
    {
        self.timers.len()
    }

    /// Starts a round using the configured or difficulty-default length.
    /// Ignored while a round is running.
    pub fn start(&mut self, now: Instant, ctx: &GameContext)
    {
        if self.state.running {
            debug!("Start ignored, round in progress");
            return;
        }
        let seconds = self.round_seconds_for(ctx);
        self.start_round(seconds, now, ctx);
    }

    #[instrument(skip(self, ctx))]
    pub fn start_round(&mut self, seconds: u32, now: Instant, ctx: &GameContext)
    {
        ctx.play(SoundKind::Click);
        self.apply(WhackAction::Start { seconds }, ctx);
        if self.state.running {
            self.timers.every(Pending::Spawn, now, spawn_period(ctx.difficulty()));
            self.timers.every(Pending::Tick, now, TICK_PERIOD);
        }
    }

    pub fn hit(&mut self, idx: usize, ctx: &GameContext)
    {
        if !self.state.running || self.state.active != Some(idx) {
            ctx.play(SoundKind::Error);
            return;
        }
        ctx.play(SoundKind::Click);
        self.apply(WhackAction::Hit(idx), ctx);
    }

    fn apply(&mut self, action: WhackAction, ctx: &GameContext)
    {
        self.state = reduce(&self.state, action);
        debug!(?action, running = self.state.running, score = self.state.score, "Whack transition");

        if !self.state.running {
            self.timers.cancel_all();
        }
        if self.state.round_over() && !self.state.end_cue_played {
            info!(score = self.state.score, "Whack round over");
            ctx.play(SoundKind::Success);
            self.state = reduce(&self.state, WhackAction::EndCuePlayed);
        }
    }
}

impl Game for WhackAMole
{
    fn key(&self) -> GameKey
    {
        GameKey::Whack
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant, ctx: &GameContext)
    {
        match key.code {
            KeyCode::Enter => self.start(now, ctx),
            KeyCode::Char(ch) => {
                if let Some(idx) = digit_cell(ch) {
                    self.hit(idx, ctx);
                }
            }
            _ => {}
        }
    }

    fn advance(&mut self, now: Instant, ctx: &GameContext)
    {
        while let Some(purpose) = self.timers.pop_due(now) {
            match purpose {
                Pending::Spawn => {
                    let idx = rand_int(&mut self.rng, 0, CELLS - 1);
                    self.apply(WhackAction::Spawn(idx), ctx);
                }
                Pending::Tick => self.apply(WhackAction::Tick, ctx),
            }
        }
    }

    fn settings_changed(&mut self, now: Instant, ctx: &GameContext)
    {
        if self.state.running {
            let period = spawn_period(ctx.difficulty());
            debug!(?period, "Spawn period changed");
            self.timers.every(Pending::Spawn, now, period);
        } else {
            let seconds = self.round_seconds_for(ctx);
            self.apply(WhackAction::Prepare { seconds }, ctx);
        }
    }

    fn render(&self, _now: Instant) -> Vec<String>
    {
        let mut lines = Vec::new();
        lines.push(terminal::bold("Whack-a-Mole"));
        lines.push(format!(
            "Score {}  Time {}s",
            self.state.score, self.state.time_left
        ));
        lines.push(if self.state.running {
            "Running...".to_string()
        } else if self.state.round_over() {
            format!("Round over! Final score {}. Press Enter to play again.", self.state.score)
        } else {
            "Press Enter to start".to_string()
        });
        lines.push(String::new());
        for row in 0..3 {
            let cells: Vec<String> = (0..3)
                .map(|col| {
                    let idx = row * 3 + col;
                    if self.state.active == Some(idx) {
                        terminal::fill(" (o) ", BLACK, AMBER)
                    } else {
                        terminal::paint(&format!("  {}  ", idx + 1), DIM)
                    }
                })
                .collect();
            lines.push(cells.join(" "));
            lines.push(String::new());
        }
        lines
    }

    fn controls(&self) -> &'static str
    {
        "Enter start, 1-9 hit"
    }

    fn teardown(&mut self)
    {
        self.timers.cancel_all();
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::random::seeded;
    use crate::settings::{Settings, SettingsAction};
    use crate::sound::Recorder;

    fn setup() -> (WhackAMole, GameContext, Recorder)
    {
        let recorder = Recorder::new();
        let ctx = GameContext::new(Settings::default(), Box::new(recorder.clone()));
        let game = WhackAMole::new(&ctx, seeded(9), None);
        (game, ctx, recorder)
    }

    fn running(score: u32, active: Option<usize>) -> WhackState
    {
        WhackState {
            running: true,
            score,
            time_left: 10,
            active,
            end_cue_played: false,
        }
    }

    #[test]
    fn hit_on_active_scores_and_clears()
    {
        let next = reduce(&running(2, Some(4)), WhackAction::Hit(4));
        assert_eq!(next.score, 3);
        assert_eq!(next.active, None);
    }

    #[test]
    fn miss_changes_nothing()
    {
        let state = running(2, Some(4));
        assert_eq!(reduce(&state, WhackAction::Hit(5)), state);
    }

    #[test]
    fn spawn_overwrites_unhit_target()
    {
        let next = reduce(&running(0, Some(1)), WhackAction::Spawn(7));
        assert_eq!(next.active, Some(7));
        assert_eq!(next.score, 0);
    }

    #[test]
    fn idle_ignores_spawn_and_tick()
    {
        let idle = WhackState::default();
        assert_eq!(reduce(&idle, WhackAction::Spawn(3)), idle);
        assert_eq!(reduce(&idle, WhackAction::Tick), idle);
    }

    #[test]
    fn last_tick_ends_round()
    {
        let state = WhackState {
            time_left: 1,
            ..running(4, Some(2))
        };
        let next = reduce(&state, WhackAction::Tick);
        assert!(!next.running);
        assert_eq!(next.time_left, 0);
        assert_eq!(next.active, None);
        assert_eq!(next.score, 4);
    }

    #[test]
    fn hit_while_idle_is_an_error_cue()
    {
        let (mut game, ctx, recorder) = setup();
        game.hit(0, &ctx);
        assert_eq!(game.state().score, 0);
        assert_eq!(recorder.played(), vec![SoundKind::Error]);
    }

    #[test]
    fn start_arms_spawn_and_tick()
    {
        let (mut game, ctx, _) = setup();
        let t0 = Instant::now();
        game.start(t0, &ctx);
        assert!(game.state().running);
        assert_eq!(game.state().time_left, 15);
        assert_eq!(game.timers_armed(), 2);

        game.advance(t0 + Duration::from_millis(600), &ctx);
        assert!(game.state().active.is_some());
        assert_eq!(game.state().time_left, 15);

        game.advance(t0 + Duration::from_millis(1_000), &ctx);
        assert_eq!(game.state().time_left, 14);
    }

    #[test]
    fn round_ends_cancels_timers_and_cues_once()
    {
        let (mut game, ctx, recorder) = setup();
        let t0 = Instant::now();
        game.start_round(3, t0, &ctx);
        game.advance(t0 + Duration::from_secs(3), &ctx);

        assert!(game.state().round_over());
        assert_eq!(game.timers_armed(), 0);
        assert_eq!(recorder.count(SoundKind::Success), 1);

        game.advance(t0 + Duration::from_secs(30), &ctx);
        assert_eq!(recorder.count(SoundKind::Success), 1);

        game.start_round(1, t0 + Duration::from_secs(30), &ctx);
        assert!(!game.state().end_cue_played);
        game.advance(t0 + Duration::from_secs(31), &ctx);
        assert_eq!(recorder.count(SoundKind::Success), 2);
    }

    #[test]
    fn hitting_the_spawned_cell_scores()
    {
        let (mut game, ctx, recorder) = setup();
        let t0 = Instant::now();
        game.start(t0, &ctx);
        game.advance(t0 + Duration::from_millis(600), &ctx);
        let target = game.state().active.unwrap();
        let miss = (target + 1) % CELLS;

        game.hit(miss, &ctx);
        assert_eq!(game.state().score, 0);
        game.hit(target, &ctx);
        assert_eq!(game.state().score, 1);
        assert_eq!(game.state().active, None);
        assert_eq!(
            recorder.played(),
            vec![SoundKind::Click, SoundKind::Error, SoundKind::Click]
        );
    }

    #[test]
    fn round_length_override_wins()
    {
        let recorder = Recorder::new();
        let ctx = GameContext::new(Settings::default(), Box::new(recorder));
        let mut game = WhackAMole::new(&ctx, seeded(1), Some(Duration::from_secs(5)));
        assert_eq!(game.state().time_left, 5);
        game.start(Instant::now(), &ctx);
        assert_eq!(game.state().time_left, 5);
    }

    #[test]
    fn teardown_disarms_running_round()
    {
        let (mut game, ctx, _) = setup();
        let t0 = Instant::now();
        game.start(t0, &ctx);
        game.teardown();
        game.advance(t0 + Duration::from_secs(60), &ctx);
        assert_eq!(game.state().time_left, 15);
    }

    #[test]
    fn fresh_mount_is_not_round_over()
    {
        let (game, _, _) = setup();
        assert!(!game.state().round_over());
        assert_eq!(game.state().time_left, 15);
        let screen = game.render(Instant::now()).join("\n");
        assert!(screen.contains("Press Enter to start"));
        assert!(!screen.contains("Round over"));
    }

    #[test]
    fn enter_mid_round_keeps_score_and_countdown()
    {
        let (mut game, ctx, recorder) = setup();
        let t0 = Instant::now();
        game.start(t0, &ctx);
        game.advance(t0 + Duration::from_millis(1_200), &ctx);
        let target = game.state().active.unwrap();
        game.hit(target, &ctx);
        let before = *game.state();
        assert_eq!(before.score, 1);
        assert_eq!(before.time_left, 14);
        recorder.clear();

        let enter = KeyEvent::new(KeyCode::Enter, crossterm::event::KeyModifiers::NONE);
        game.handle_key(enter, t0 + Duration::from_millis(1_300), &ctx);
        assert_eq!(*game.state(), before);
        assert!(recorder.played().is_empty());

        game.advance(t0 + Duration::from_millis(2_000), &ctx);
        assert_eq!(game.state().time_left, 13);
    }

    #[test]
    fn difficulty_change_rearms_spawn_mid_round()
    {
        let recorder = Recorder::new();
        let mut ctx = GameContext::new(Settings::default(), Box::new(recorder));
        let mut game = WhackAMole::new(&ctx, seeded(3), None);
        let t0 = Instant::now();
        game.start(t0, &ctx);

        ctx.update(SettingsAction::SetDifficulty(Difficulty::Hard));
        game.settings_changed(t0, &ctx);
        game.advance(t0 + Duration::from_millis(500), &ctx);
        assert!(game.state().active.is_some());
        assert_eq!(game.timers_armed(), 2);
        assert_eq!(game.state().time_left, 15);
    }

    #[test]
    fn difficulty_change_while_idle_updates_countdown()
    {
        let recorder = Recorder::new();
        let mut ctx = GameContext::new(Settings::default(), Box::new(recorder));
        let mut game = WhackAMole::new(&ctx, seeded(3), None);
        ctx.update(SettingsAction::SetDifficulty(Difficulty::Easy));
        game.settings_changed(Instant::now(), &ctx);
        assert_eq!(game.state().time_left, 20);
        assert!(!game.state().running);
        assert_eq!(game.timers_armed(), 0);
    }

    #[test]
    fn finished_round_keeps_final_countdown_on_settings_change()
    {
        let idle = WhackState {
            score: 6,
            ..WhackState::default()
        };
        assert!(idle.round_over());
        assert_eq!(reduce(&idle, WhackAction::Prepare { seconds: 20 }), idle);
    }
}
