use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::AsyncBufReadExt;
use tracing::info;

use services::sessions::{PlayerInput, SessionRuntime};
use services::{CatalogService, ConfigService};

mod render;
mod sources;

use sources::{BundledCatalogSource, DirCatalogSource, FileConfigSource};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
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
    eprintln!("  cargo run -p app -- [--config <file>] [--exercises-dir <dir>] [--seed <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --config         none (built-in defaults: basic, 3 exercises)");
    eprintln!("  --exercises-dir  none (bundled catalogs)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DRILL_CONFIG, DRILL_EXERCISES_DIR");
}

struct Args {
    config_path: Option<PathBuf>,
    exercises_dir: Option<PathBuf>,
    seed: Option<u64>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut config_path = std::env::var("DRILL_CONFIG").ok().map(PathBuf::from);
        let mut exercises_dir = std::env::var("DRILL_EXERCISES_DIR").ok().map(PathBuf::from);
        let mut seed = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    config_path = Some(PathBuf::from(require_value(args, "--config")?));
                }
                "--exercises-dir" => {
                    exercises_dir = Some(PathBuf::from(require_value(args, "--exercises-dir")?));
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    seed = Some(
                        value
                            .parse::<u64>()
                            .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?,
                    );
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            config_path,
            exercises_dir,
            seed,
        })
    }
}

/// Map one stdin line onto a session command.
fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        "q" | "quit" | "salir" => Some(Command::Quit),
        "s" | "start" | "" => Some(Command::Input(PlayerInput::Start)),
        "p" | "pause" => Some(Command::Input(PlayerInput::Pause)),
        "r" | "resume" => Some(Command::Input(PlayerInput::Resume)),
        "x" | "exit" | "back" => Some(Command::Input(PlayerInput::ExitToStart)),
        "n" | "again" => Some(Command::Input(PlayerInput::Restart)),
        digits => digits
            .parse::<usize>()
            .ok()
            .filter(|n| *n >= 1)
            .map(|n| Command::Input(PlayerInput::Select(n - 1))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Input(PlayerInput),
    Quit,
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let config_service = match args.config_path {
        Some(path) => ConfigService::new(Arc::new(FileConfigSource::new(path))),
        None => ConfigService::without_source(),
    };
    let config = config_service.load().await;
    info!(difficulty = %config.difficulty(), exercises = config.exercise_count(), "configuration loaded");

    let catalog_service = match args.exercises_dir {
        Some(dir) => CatalogService::new(Arc::new(DirCatalogSource::new(dir))),
        None => CatalogService::new(Arc::new(BundledCatalogSource)),
    };
    let pool = catalog_service.load_pool().await?;
    let exercises = pool.tier(config.difficulty()).to_vec();
    info!(tier = %config.difficulty(), available = exercises.len(), "exercise catalog loaded");

    let (handle, task) = SessionRuntime::spawn(config.clone(), exercises, args.seed);

    // Snapshot printer, one line per published state.
    let mut snapshots = handle.subscribe();
    let render_config = config.clone();
    let renderer = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            render::print_snapshot(&snapshot, &render_config);
        }
    });

    render::print_start_screen(&config);

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Some(Command::Input(input)) => handle.send(input).await,
            Some(Command::Quit) => break,
            None => println!("No entendí «{}» — [s] [1..n] [p] [r] [x] [n] [q]", line.trim()),
        }
    }

    drop(handle);
    task.await?;
    renderer.abort();
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_map_onto_inputs() {
        assert_eq!(parse_command("s"), Some(Command::Input(PlayerInput::Start)));
        assert_eq!(
            parse_command("  2 "),
            Some(Command::Input(PlayerInput::Select(1)))
        );
        assert_eq!(parse_command("p"), Some(Command::Input(PlayerInput::Pause)));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("0"), None);
        assert_eq!(parse_command("hola"), None);
    }

    #[test]
    fn args_reject_unknown_flags() {
        let mut argv = ["--frobnicate".to_string()].into_iter();
        assert!(matches!(
            Args::parse(&mut argv),
            Err(ArgsError::UnknownArg(_))
        ));
    }

    #[test]
    fn args_parse_seed_and_paths() {
        let mut argv = [
            "--config".to_string(),
            "config.json".into(),
            "--seed".into(),
            "42".into(),
        ]
        .into_iter();
        let args = Args::parse(&mut argv).unwrap();
        assert_eq!(args.config_path.as_deref(), Some(std::path::Path::new("config.json")));
        assert_eq!(args.seed, Some(42));
    }

    #[test]
    fn bad_seed_is_rejected() {
        let mut argv = ["--seed".to_string(), "many".into()].into_iter();
        assert!(matches!(
            Args::parse(&mut argv),
            Err(ArgsError::InvalidSeed { .. })
        ));
    }
}
