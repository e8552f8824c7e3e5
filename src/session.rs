use crate::simulator::{Phase, Sample, SimulationController, SimulationState};
use crate::view::media::MediaToggle;
use serde::Serialize;
use std::path::PathBuf;
use tokio::sync::{broadcast, mpsc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    ToggleMedia,
    Quit,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub history: Vec<Sample>,
    pub elapsed_time: f64,
    pub is_running: bool,
    pub phase: Phase,
    pub start_label: &'static str,
    pub media_visible: bool,
    pub media_label: &'static str,
    pub media_asset: PathBuf,
}

/// Single owner of all mutable simulation state. Commands and ticks are
/// handled one at a time on the task running [`Session::run`].
pub struct Session {
    controller: SimulationController,
    media: MediaToggle,
    commands: mpsc::Receiver<Command>,
    frames: broadcast::Sender<Frame>,
    exit_when_finished: bool,
}

impl Session {
    pub fn new(
        media: MediaToggle,
        commands: mpsc::Receiver<Command>,
        frames: broadcast::Sender<Frame>,
    ) -> Self {
        Self {
            controller: SimulationController::new(),
            media,
            commands,
            frames,
            exit_when_finished: false,
        }
    }

    /// Return from [`Session::run`] as soon as a run finishes.
    pub fn exit_when_finished(mut self, enabled: bool) -> Self {
        self.exit_when_finished = enabled;
        self
    }

    pub fn frame(&self) -> Frame {
        let state = self.controller.state();
        Frame {
            history: state.history.clone(),
            elapsed_time: state.elapsed_time,
            is_running: state.is_running,
            phase: self.controller.phase(),
            start_label: self.controller.start_label(),
            media_visible: self.media.visible(),
            media_label: self.media.label(),
            media_asset: self.media.asset().to_path_buf(),
        }
    }

    fn publish(&self) {
        // No subscribers is fine, renderers may attach late
        let _ = self.frames.send(self.frame());
    }

    pub async fn run(mut self) -> SimulationState {
        tracing::info!("Session started");
        self.publish();

        loop {
            let event = tokio::select! {
                command = self.commands.recv() => Event::Command(command),
                () = self.controller.next_tick() => Event::Tick,
            };

            match event {
                Event::Command(Some(Command::Start)) => {
                    if self.controller.start() {
                        self.publish();
                    }
                }
                Event::Command(Some(Command::ToggleMedia)) => {
                    self.media.toggle();
                    self.publish();
                }
                Event::Command(Some(Command::Quit)) => {
                    tracing::info!("Quit requested");
                    break;
                }
                Event::Command(None) => {
                    tracing::info!("Command channel closed");
                    break;
                }
                Event::Tick => {
                    self.controller.on_tick();
                    self.publish();
                    if self.exit_when_finished && self.controller.phase() == Phase::Finished {
                        break;
                    }
                }
            }
        }

        // Dropping the controller drops any pending tick with it
        self.controller.state().clone()
    }
}

enum Event {
    Command(Option<Command>),
    Tick,
}
