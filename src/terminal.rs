use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};

use crate::error::AppError;

pub struct TerminalGuard
{
    stdout: Stdout,
}

impl TerminalGuard
{
    pub fn enter() -> io::Result<Self>
    {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, Hide)?;
        Ok(Self { stdout })
    }

    pub fn stdout(&mut self) -> &mut Stdout
    {
        &mut self.stdout
    }
}

impl Drop for TerminalGuard
{
    fn drop(&mut self)
    {
        let _ = execute!(self.stdout, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb
{
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const GREEN: Rgb = Rgb { r: 16, g: 185, b: 129 };
pub const RED: Rgb = Rgb { r: 239, g: 68, b: 68 };
pub const AMBER: Rgb = Rgb { r: 251, g: 191, b: 36 };
pub const DIM: Rgb = Rgb { r: 120, g: 120, b: 120 };
pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Foreground color.
pub fn paint(text: &str, color: Rgb) -> String
{
    format!("{}{}\x1b[0m", ansi_fg(color), text)
}

/// Foreground on background, for filled blocks.
pub fn fill(text: &str, fg: Rgb, bg: Rgb) -> String
{
    format!("{}{}{}\x1b[0m", ansi_fg(fg), ansi_bg(bg), text)
}

pub fn bold(text: &str) -> String
{
    format!("\x1b[1m{}\x1b[0m", text)
}

fn ansi_fg(color: Rgb) -> String
{
    format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

fn ansi_bg(color: Rgb) -> String
{
    format!("\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
}

/// Replaces the whole screen with `lines`.
pub fn draw(stdout: &mut Stdout, lines: &[String]) -> Result<(), AppError>
{
    let output = format!("{}\r\n", lines.join("\r\n"));

    queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
