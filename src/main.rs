//! MathRush entry point
//!
//! Parses the command line, sets up logging, and runs the terminal event loop.

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event};

use math_rush::app::App;
use math_rush::error::{Result, RushError};
use math_rush::platform::{Clock, SystemClock};
use math_rush::ui::{self, Action, map_key};
use math_rush::Settings;

/// How long to wait for a key when no countdown is running
const IDLE_POLL: Duration = Duration::from_millis(250);

/// A timed 64-question addition quiz
#[derive(Debug, Parser)]
#[command(name = "math-rush", version, about)]
struct Cli {
    /// Seed for the first round's question order
    #[arg(long)]
    seed: Option<u64>,

    /// Hide the keypad legend
    #[arg(long)]
    no_keypad: bool,

    /// Print the last finished report as JSON on exit
    #[arg(long)]
    json: bool,

    /// Write log output to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Self {
            seed: cli.seed,
            show_keypad: !cli.no_keypad,
            print_json: cli.json,
            log_file: cli.log_file,
        }
    }
}

fn init_logging(settings: &Settings) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = &settings.log_file {
        let file = File::create(path).map_err(|source| RushError::LogFile {
            path: path.clone(),
            source,
        })?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let settings = Settings::from(Cli::parse());
    init_logging(&settings)?;
    log::info!("MathRush starting...");

    let mut app = App::new(settings, SystemClock::new());
    log::info!("Game initialized with seed: {}", app.state.seed);

    let mut terminal = ui::terminal::init()?;
    let outcome = run(&mut terminal, &mut app);
    ui::terminal::restore()?;
    outcome?;

    if app.settings.print_json {
        if let Some(report) = &app.report {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }
    Ok(())
}

/// Serial event loop: keys and countdown ticks are handled one at a time
fn run<C: Clock>(terminal: &mut ui::terminal::QuizTerminal, app: &mut App<C>) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        let now = app.clock().now_ms();
        let timeout = app.ticker().time_until_due(now).unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match map_key(app.state.phase, key) {
                    Some(Action::Game(game_event)) => app.dispatch(game_event),
                    Some(Action::ScrollUp) => app.scroll_report(-1),
                    Some(Action::ScrollDown) => app.scroll_report(1),
                    Some(Action::Quit) => app.should_quit = true,
                    None => {}
                }
            }
        }
        app.pump_ticks();
    }
    log::info!("MathRush exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let settings = Settings::from(Cli::try_parse_from(["math-rush"]).unwrap());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "math-rush",
            "--seed",
            "42",
            "--no-keypad",
            "--json",
            "--log-file",
            "rush.log",
        ])
        .unwrap();
        let settings = Settings::from(cli);
        assert_eq!(settings.seed, Some(42));
        assert!(!settings.show_keypad);
        assert!(settings.print_json);
        assert_eq!(settings.log_file, Some(PathBuf::from("rush.log")));
    }

    #[test]
    fn test_cli_rejects_bad_seed() {
        assert!(Cli::try_parse_from(["math-rush", "--seed", "abc"]).is_err());
    }
}
