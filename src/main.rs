use anyhow::Context;
use blood_loss_simulator::export;
use blood_loss_simulator::session::{Command, Frame, Session};
use blood_loss_simulator::simulator::SimulationState;
use blood_loss_simulator::view::{self, media::DEFAULT_MEDIA_ASSET, DisplayGuard, LogView, MediaToggle, TerminalChart};
use clap::{Parser, ValueHint};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "RBC volume decay with and without acute normovolemic hemodilution", long_about = None)]
struct Cli {
    /// Skip the terminal chart: start immediately, log samples, exit when finished
    #[arg(long)]
    headless: bool,

    /// Write CSV, JSON and SVG of the last run into this directory on exit
    #[arg(long, value_hint = ValueHint::DirPath)]
    export_dir: Option<PathBuf>,

    /// Illustrative animation shown by the media toggle
    #[arg(long, default_value = DEFAULT_MEDIA_ASSET, value_hint = ValueHint::FilePath)]
    media: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.headless);

    tracing::info!("Starting Blood Loss Simulation");

    // Frames fan out to renderers, commands funnel into the session
    let (frame_tx, frame_rx) = broadcast::channel(64);
    let (cmd_tx, cmd_rx) = mpsc::channel(16);

    let session = Session::new(MediaToggle::new(cli.media.clone()), cmd_rx, frame_tx)
        .exit_when_finished(cli.headless);

    let state = if cli.headless {
        run_headless(session, frame_rx, cmd_tx).await?
    } else {
        run_interactive(session, frame_rx, cmd_tx).await?
    };

    if let Some(dir) = cli.export_dir {
        if state.history.is_empty() {
            tracing::warn!("Nothing to export, no simulation was started");
        } else {
            for path in export::export_all(&dir, &state.history)? {
                tracing::info!("  - {}", path.display());
            }
        }
    }

    tracing::info!("Shutting down");
    Ok(())
}

fn init_tracing(headless: bool) {
    let default_level = if headless { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_headless(
    session: Session,
    frames: broadcast::Receiver<Frame>,
    commands: mpsc::Sender<Command>,
) -> anyhow::Result<SimulationState> {
    let renderer = tokio::spawn(view::drive(frames, LogView::default()));
    let mut simulation = tokio::spawn(session.run());

    commands
        .send(Command::Start)
        .await
        .context("session stopped before the simulation started")?;

    let state = tokio::select! {
        state = &mut simulation => state?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C, shutting down");
            let _ = commands.send(Command::Quit).await;
            simulation.await?
        }
    };

    if let Err(e) = renderer.await? {
        tracing::error!("Renderer error: {}", e);
    }
    Ok(state)
}

async fn run_interactive(
    session: Session,
    frames: broadcast::Receiver<Frame>,
    commands: mpsc::Sender<Command>,
) -> anyhow::Result<SimulationState> {
    let guard = DisplayGuard::acquire().context("failed to prepare terminal")?;

    let renderer = tokio::spawn(view::drive(frames, TerminalChart::new()));
    let simulation = tokio::spawn(session.run());
    let input = tokio::task::spawn_blocking(move || read_keys(commands));

    let state = simulation.await?;
    if let Err(e) = renderer.await? {
        tracing::error!("Renderer error: {}", e);
    }
    let input_result = input.await?;
    drop(guard);

    input_result?;
    Ok(state)
}

/// Polls the keyboard until quit is requested or the session goes away.
fn read_keys(commands: mpsc::Sender<Command>) -> anyhow::Result<()> {
    while !commands.is_closed() {
        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        let Some(command) = command_for(key) else {
            continue;
        };
        if commands.blocking_send(command).is_err() || command == Command::Quit {
            break;
        }
    }
    Ok(())
}

fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Command::Quit),
        (KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc, _) => Some(Command::Quit),
        (KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter, _) => Some(Command::Start),
        (KeyCode::Char('g') | KeyCode::Char('G'), _) => Some(Command::ToggleMedia),
        _ => None,
    }
}
