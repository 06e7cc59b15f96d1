//! Drives the dashboard with synthetic key events.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

use minigame_dashboard::config::DashboardConfig;
use minigame_dashboard::dashboard::{Dashboard, Flow};
use minigame_dashboard::games::GameKey;
use minigame_dashboard::settings::Difficulty;
use minigame_dashboard::sound::{Recorder, SoundKind};
use minigame_dashboard::words;

fn key(code: KeyCode) -> KeyEvent
{
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(ch: char) -> KeyEvent
{
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

fn dashboard(start_game: Option<GameKey>) -> (Dashboard, Recorder)
{
    let recorder = Recorder::new();
    let config = DashboardConfig {
        seed: Some(7),
        start_game,
        ..DashboardConfig::default()
    };
    (Dashboard::new(&config, Box::new(recorder.clone())), recorder)
}

fn type_text(dash: &mut Dashboard, text: &str, now: Instant)
{
    for ch in text.chars() {
        assert_eq!(dash.handle_key(key(KeyCode::Char(ch)), now), Flow::Continue);
    }
}

#[test]
fn search_then_enter_opens_the_match()
{
    let (mut dash, _) = dashboard(None);
    let now = Instant::now();
    type_text(&mut dash, "mole", now);
    let visible: Vec<GameKey> = dash.visible_games().iter().map(|g| g.key).collect();
    assert_eq!(visible, vec![GameKey::Whack]);

    dash.handle_key(key(KeyCode::Enter), now);
    assert_eq!(dash.active_game(), Some(GameKey::Whack));
    assert_eq!(dash.nav().active, Some(GameKey::Whack));
}

#[test]
fn enter_with_no_match_stays_home()
{
    let (mut dash, _) = dashboard(None);
    let now = Instant::now();
    type_text(&mut dash, "chess", now);
    assert!(dash.visible_games().is_empty());
    dash.handle_key(key(KeyCode::Enter), now);
    assert_eq!(dash.active_game(), None);
    assert!(dash.render(now).iter().any(|line| line.contains("No games match")));
}

#[test]
fn arrows_pick_a_row()
{
    let (mut dash, _) = dashboard(None);
    let now = Instant::now();
    dash.handle_key(key(KeyCode::Down), now);
    dash.handle_key(key(KeyCode::Down), now);
    dash.handle_key(key(KeyCode::Enter), now);
    assert_eq!(dash.active_game(), Some(GameKey::Whack));
}

#[test]
fn escape_goes_home_then_quits()
{
    let (mut dash, _) = dashboard(Some(GameKey::Reaction));
    let now = Instant::now();
    assert_eq!(dash.handle_key(key(KeyCode::Esc), now), Flow::Continue);
    assert_eq!(dash.active_game(), None);
    assert_eq!(dash.handle_key(key(KeyCode::Esc), now), Flow::Quit);
}

#[test]
fn ctrl_c_quits_from_anywhere()
{
    let (mut dash, _) = dashboard(Some(GameKey::Sequence));
    assert_eq!(dash.handle_key(ctrl('c'), Instant::now()), Flow::Quit);
}

#[test]
fn key_releases_are_ignored()
{
    let (mut dash, _) = dashboard(None);
    let release = KeyEvent::new_with_kind(KeyCode::Char('x'), KeyModifiers::NONE, KeyEventKind::Release);
    dash.handle_key(release, Instant::now());
    assert_eq!(dash.nav().search, "");
}

#[test]
fn leaving_whack_mid_round_stops_its_timers()
{
    let (mut dash, recorder) = dashboard(Some(GameKey::Whack));
    let start = Instant::now();
    dash.handle_key(key(KeyCode::Enter), start);
    dash.advance(start + Duration::from_secs(2));
    dash.handle_key(key(KeyCode::Esc), start + Duration::from_secs(2));
    recorder.clear();

    dash.advance(start + Duration::from_secs(60));
    assert!(recorder.played().is_empty());
    assert_eq!(dash.active_game(), None);
}

#[test]
fn difficulty_change_reaches_the_active_game()
{
    let (mut dash, _) = dashboard(Some(GameKey::Sequence));
    assert_eq!(dash.context().difficulty(), Difficulty::Medium);

    dash.handle_key(ctrl('d'), Instant::now());
    assert_eq!(dash.context().difficulty(), Difficulty::Hard);
    let screen = dash.render(Instant::now()).join("\n");
    assert!(
        words::HARD_WORDS.iter().any(|word| screen.contains(word)),
        "no hard target on screen:\n{screen}"
    );
}

#[test]
fn muting_silences_game_cues()
{
    let (mut dash, recorder) = dashboard(Some(GameKey::TicTacToe));
    let now = Instant::now();
    dash.handle_key(ctrl('s'), now);
    assert!(!dash.context().settings().sound_on);

    dash.handle_key(key(KeyCode::Char('5')), now);
    assert!(recorder.played().is_empty());

    dash.handle_key(ctrl('s'), now);
    dash.handle_key(key(KeyCode::Char('5')), now);
    assert_eq!(recorder.count(SoundKind::Error), 1);
}

#[test]
fn switching_games_mounts_fresh_state()
{
    let (mut dash, _) = dashboard(Some(GameKey::Sequence));
    let now = Instant::now();
    type_text(&mut dash, "zz", now);
    dash.handle_key(key(KeyCode::Esc), now);
    dash.handle_key(key(KeyCode::Enter), now);
    assert_eq!(dash.active_game(), Some(GameKey::Reaction));
    dash.handle_key(key(KeyCode::Esc), now);

    type_text(&mut dash, "type", now);
    dash.handle_key(key(KeyCode::Enter), now);
    assert_eq!(dash.active_game(), Some(GameKey::Sequence));
    let screen = dash.render(now).join("\n");
    assert!(!screen.contains("zz"));
}

#[test]
fn fresh_whack_shows_the_upcoming_round()
{
    let (dash, _) = dashboard(Some(GameKey::Whack));
    let screen = dash.render(Instant::now()).join("\n");
    assert!(!screen.contains("Round over"), "{screen}");
    assert!(screen.contains("Time 15s"), "{screen}");
}

#[test]
fn harder_difficulty_speeds_up_a_running_round()
{
    let (mut dash, _) = dashboard(Some(GameKey::Whack));
    let t0 = Instant::now();
    dash.handle_key(key(KeyCode::Enter), t0);
    dash.handle_key(ctrl('d'), t0);
    assert_eq!(dash.context().difficulty(), Difficulty::Hard);

    dash.advance(t0 + Duration::from_millis(500));
    let screen = dash.render(t0 + Duration::from_millis(500)).join("\n");
    assert!(screen.contains("(o)"), "{screen}");
}
