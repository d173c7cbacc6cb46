use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc as std_mpsc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tokio::sync::mpsc;

use spark_application::{AppState, SparkApp};
use spark_infrastructure::{ConfigService, SecretServiceImpl, ServiceType, SparkPaths};
use spark_interaction::{GeminiApiAgent, SimulatedOutcome, SimulatedPaymentProcessor};

mod command;
mod helper;
mod logging;
mod render;

use command::Command;
use helper::CliHelper;

#[derive(Parser, Debug)]
#[command(name = "spark", version)]
#[command(about = "SparkAI - AI dating coach in the terminal", long_about = None)]
struct Args {
    /// Directory holding config.toml, secret.json and logs/
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Gemini model to use (overrides config.toml)
    #[arg(long)]
    model: Option<String>,

    /// Make the simulated payment processor decline every payment
    #[arg(long)]
    decline_payments: bool,
}

/// What the reader thread got from the terminal.
enum Input {
    Line(String),
    Interrupted,
    Eof,
    Failed(String),
}

/// Runs the blocking editor on its own thread. Each prompt sent in yields
/// exactly one [`Input`] back.
fn spawn_reader(
    prompts: std_mpsc::Receiver<String>,
    lines: mpsc::UnboundedSender<Input>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let mut editor = match Editor::<CliHelper, DefaultHistory>::new() {
            Ok(editor) => editor,
            Err(err) => {
                let _ = lines.send(Input::Failed(err.to_string()));
                return;
            }
        };
        editor.set_helper(Some(CliHelper::new()));

        while let Ok(prompt) = prompts.recv() {
            let input = match editor.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = editor.add_history_entry(line.as_str());
                    }
                    Input::Line(line)
                }
                Err(ReadlineError::Interrupted) => Input::Interrupted,
                Err(ReadlineError::Eof) => Input::Eof,
                Err(err) => Input::Failed(err.to_string()),
            };
            if lines.send(input).is_err() {
                break;
            }
        }
    })
}

fn print_screen(app: &SparkApp) {
    println!();
    println!("{}", render::render(app.state()));
}

/// Applies continuations until the app is idle, redrawing after each one.
/// Ctrl-C cancels whatever is still running.
async fn wait_while_busy(app: &mut SparkApp) {
    while app.state().is_busy() {
        let mut interrupted = false;
        tokio::select! {
            settled = app.settle() => {
                if !settled {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => interrupted = true,
        }
        if interrupted {
            println!("{}", "Cancelling...".yellow());
            app.cancel_in_flight();
            continue;
        }
        print_screen(app);
    }
}

/// The main entry point for the Spark REPL.
///
/// Loads config and credentials, wires the Gemini agent and the simulated
/// payment processor into the app, then reads commands until `/quit`.
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // ===== Configuration =====
    let paths = SparkPaths::new(args.config_dir.as_deref());
    let config = ConfigService::new(&paths)?.load().await?;
    let _log_guard = logging::init(&paths.get_path(ServiceType::Logs)?, &config.debug.log_level)?;

    let api_key = SecretServiceImpl::new(&paths)?
        .resolve_gemini_api_key()
        .await?;
    if api_key.is_none() {
        tracing::warn!("No Gemini API key configured");
        println!(
            "{}",
            "No Gemini API key found. Set GEMINI_API_KEY or add it to secret.json; AI replies will fail until then."
                .yellow()
        );
    }
    let model = args.model.unwrap_or(config.gemini.model);
    tracing::info!(%model, decline_payments = args.decline_payments, "Starting spark");

    // ===== Collaborators =====
    let generator = Arc::new(GeminiApiAgent::new(api_key.unwrap_or_default(), model));
    let mut processor = SimulatedPaymentProcessor::new();
    if args.decline_payments {
        processor = processor.with_outcome(SimulatedOutcome::Decline(None));
    }
    let mut app = SparkApp::new(AppState::new(), generator, Arc::new(processor));

    // ===== REPL Setup =====
    let (prompt_tx, prompt_rx) = std_mpsc::channel::<String>();
    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<Input>();
    let reader = spawn_reader(prompt_rx, line_tx);

    println!("{}", "=== SparkAI ===".bright_magenta().bold());
    println!("{}", "Type /help for commands or /quit to exit.".bright_black());
    print_screen(&app);

    // ===== Main REPL Loop =====
    loop {
        if prompt_tx
            .send(format!("spark:{}> ", app.state().view))
            .is_err()
        {
            break;
        }
        let Some(input) = line_rx.recv().await else {
            break;
        };

        let line = match input {
            Input::Line(line) => line,
            Input::Interrupted => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
                continue;
            }
            Input::Eof => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Input::Failed(err) => {
                eprintln!("{}", format!("Error: {err}").red());
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{}", err.to_string().red());
                continue;
            }
        };
        match command {
            Command::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Command::Help => {
                println!("{}", command::help_text());
                continue;
            }
            _ => {}
        }

        match command.into_actions(app.state()) {
            Ok(actions) => {
                for action in actions {
                    app.dispatch(action);
                }
                print_screen(&app);
                wait_while_busy(&mut app).await;
            }
            Err(hint) => println!("{}", hint.yellow()),
        }
    }

    app.cancel_in_flight();
    drop(prompt_tx);
    let _ = reader.join();

    Ok(())
}
