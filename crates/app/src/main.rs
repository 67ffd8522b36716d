mod terminal;

use std::fmt;
use std::path::PathBuf;

use services::{RecordingPort, RoundController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::terminal::{Input, Job, Screen};

#[derive(Debug)]
enum ArgsError {
    HelpRequested,
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidRounds { raw: String },
    InvalidSeed { raw: String },
    InvalidImagesDir { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::HelpRequested => write!(f, "help requested"),
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidRounds { raw } => write!(f, "invalid --rounds value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidImagesDir { raw } => write!(f, "invalid --images value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--rounds <n>] [--images <dir>] [--seed <u64>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --rounds 5");
    eprintln!("  --images .   (image paths like images/luxon.png resolve against it)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  GLIMPSE_ROUNDS, GLIMPSE_IMAGES_DIR, GLIMPSE_SEED, RUST_LOG");
}

#[derive(Debug)]
struct Args {
    rounds: Option<u32>,
    images_dir: PathBuf,
    seed: Option<u64>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut rounds = std::env::var("GLIMPSE_ROUNDS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok());
        let mut images_dir = std::env::var("GLIMPSE_IMAGES_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from("."), PathBuf::from);
        let mut seed = std::env::var("GLIMPSE_SEED")
            .ok()
            .and_then(|value| value.parse::<u64>().ok());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--rounds" => {
                    let value = require_value(args, "--rounds")?;
                    let parsed: u32 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidRounds { raw: value.clone() })?;
                    rounds = Some(parsed);
                }
                "--images" => {
                    let value = require_value(args, "--images")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidImagesDir { raw: value });
                    }
                    images_dir = PathBuf::from(value);
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let parsed: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--help" | "-h" => return Err(ArgsError::HelpRequested),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            rounds,
            images_dir,
            seed,
        })
    }

}

fn init_tracing() {
    // Game text owns stdout; keep logs on stderr and quiet unless asked.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = match Args::parse(&mut argv) {
        Ok(args) => args,
        Err(ArgsError::HelpRequested) => {
            print_usage();
            return Ok(());
        }
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            return Err(e.into());
        }
    };

    let mut controller = RoundController::builtin(args.rounds, RecordingPort::new())?;
    if let Some(seed) = args.seed {
        controller = controller.with_seed(seed);
    }
    controller.start()?;

    let mut screen = Screen::new(args.images_dir);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let jobs = screen.apply_all(controller.port_mut().drain());
        if !jobs.is_empty() {
            for job in jobs {
                tracing::debug!(?job, "running job");
                match job {
                    Job::LoadImage { image, ticket } => {
                        if screen.image_available(&image).await {
                            controller.image_ready(ticket);
                        } else {
                            controller.image_failed(ticket);
                        }
                    }
                    Job::Timer { ticket, delay } => {
                        tokio::time::sleep(delay).await;
                        controller.timer_fired(ticket);
                    }
                }
            }
            continue;
        }

        screen.prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let outcome = match Input::parse(&line) {
            Input::Choice(number) => match screen.choice(number) {
                Some(label) => controller.submit_choice(&label).map(|_| ()),
                None => {
                    println!("That choice is not available right now.");
                    Ok(())
                }
            },
            Input::Next => controller.advance_round(),
            Input::Restart => controller.restart(),
            Input::Quit => break,
            Input::Unknown => {
                println!("Enter 1-4, n, r or q.");
                Ok(())
            }
        };
        if let Err(err) = outcome {
            println!("{err}");
        }
    }

    if let Some(summary) = controller.summary() {
        println!(
            "{} correct of {} rounds, best streak {}, {}s.",
            summary.correct_rounds,
            summary.rounds_played,
            summary.best_streak,
            summary.elapsed().num_seconds()
        );
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(&mut raw.iter().map(ToString::to_string))
    }

    #[test]
    fn help_is_reported_not_handled() {
        assert!(matches!(parse(&["--help"]), Err(ArgsError::HelpRequested)));
        assert!(matches!(
            parse(&["--rounds", "3", "-h"]),
            Err(ArgsError::HelpRequested)
        ));
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&["--rounds", "3", "--seed", "42", "--images", "assets"]).unwrap();
        assert_eq!(args.rounds, Some(3));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.images_dir, PathBuf::from("assets"));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            parse(&["--rounds", "many"]),
            Err(ArgsError::InvalidRounds { .. })
        ));
        assert!(matches!(
            parse(&["--seed"]),
            Err(ArgsError::MissingValue { flag: "--seed" })
        ));
        assert!(matches!(parse(&["--fast"]), Err(ArgsError::UnknownArg(_))));
    }
}
