//! Pomodoro Widget - a countdown timer for focused work
//!
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break
//!
//! Commands are read from stdin, one per line.

use std::io::BufRead;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;
use tracing::warn;

use pomodoro_widget::cli::{Cli, Commands, Display, RunArgs};
use pomodoro_widget::{
    Collaborators, ControlCommand, TerminalBell, TerminalNotifier, TerminalRenderer, Widget,
};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only the countdown display.
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
    match cli
        .command
        .unwrap_or_else(|| Commands::Run(RunArgs::default()))
    {
        Commands::Run(args) => run_widget(&args).await,
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}

/// Runs the widget until `quit`, end of input or Ctrl-C.
async fn run_widget(args: &RunArgs) -> Result<()> {
    let config = args.resolve().context("Invalid configuration")?;
    Display::show_banner(&config);

    let collaborators = Collaborators::new(
        TerminalRenderer::stdout(),
        TerminalBell::stderr(!config.sound),
        TerminalNotifier::stderr(config.notifications),
    );
    let widget = Widget::new(&config, collaborators);

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    spawn_command_reader(command_tx.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = command_tx.send(ControlCommand::Quit);
        }
    });

    let final_state = widget.run(command_rx).await;
    Display::show_summary(&final_state);
    Ok(())
}

/// Reads commands from stdin on a dedicated thread.
///
/// End of input is treated as `quit`.
fn spawn_command_reader(command_tx: mpsc::UnboundedSender<ControlCommand>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Failed to read stdin: {}", e);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<ControlCommand>() {
                Ok(command) => {
                    if command_tx.send(command).is_err() || command == ControlCommand::Quit {
                        return;
                    }
                }
                Err(e) => Display::show_error(&e.to_string()),
            }
        }

        let _ = command_tx.send(ControlCommand::Quit);
    });
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
