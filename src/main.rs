//! Interval Workout Timer CLI
//!
//! Generates randomized workouts and runs them in the terminal:
//! - 5 second countdown before the first exercise
//! - 50 seconds per exercise, 10 seconds rest in between
//! - Long pauses spread evenly through the workout

use anyhow::Result;
use clap::{CommandFactory, Parser};

use workout_timer::cli::{session, Cli, Commands, Display, GenerateArgs, SourceArgs, WorkoutContext};
use workout_timer::config;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Start(args)) => {
            session::run(&args).await?;
        }
        Some(Commands::Generate(args)) => {
            generate(&args)?;
        }
        Some(Commands::Difficulties(args)) => {
            show_difficulties(&args)?;
        }
        Some(Commands::Exercises(args)) => {
            let library = config::library_from(args.library.as_deref())?;
            Display::show_exercises(&library);
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Prints a generated workout.
fn generate(args: &GenerateArgs) -> Result<()> {
    let plan = WorkoutContext::load(&args.workout)?.next_plan()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        Display::show_plan(&plan);
    }
    Ok(())
}

/// Prints the difficulty presets.
fn show_difficulties(args: &SourceArgs) -> Result<()> {
    let table = config::config_table_from(args.difficulties.as_deref())?;
    Display::show_difficulties(&table);
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
