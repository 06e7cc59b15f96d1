use clap::Parser;
use tracing::info;

use minigame_dashboard::cli::{Cli, Command};
use minigame_dashboard::config::DashboardConfig;
use minigame_dashboard::error::AppError;
use minigame_dashboard::{dashboard, games, logging};

fn main()
{
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError>
{
    let cli = Cli::parse();
    let config = DashboardConfig::from_cli(&cli)?;

    if cli.command == Some(Command::List) {
        list_games();
        return Ok(());
    }

    logging::init(&config.log_file)?;
    info!(
        difficulty = %config.settings.difficulty,
        sound_on = config.settings.sound_on,
        seed = ?config.seed,
        "Starting dashboard"
    );
    dashboard::run(&config)
}

fn list_games()
{
    println!("Available games:");
    for game in games::registry() {
        println!("  {:<10} - {} [{}]", game.key.to_string(), game.description, game.badge);
    }
}
