pub mod media;
pub mod terminal;

pub use media::MediaToggle;
pub use terminal::{DisplayGuard, TerminalChart};

use crate::session::Frame;
use tokio::sync::broadcast;

/// Renders published frames. Renderers only read; all mutation goes through
/// session commands.
pub trait ChartView {
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()>;
}

/// Headless renderer that logs each newly appended sample.
#[derive(Debug, Default)]
pub struct LogView {
    seen: usize,
}

impl ChartView for LogView {
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()> {
        if frame.history.len() < self.seen {
            // A restart cleared the history
            self.seen = 0;
        }
        for sample in &frame.history[self.seen..] {
            tracing::info!(
                time = %format!("{:.1}", sample.time),
                without_anh = %format!("{:.3}", sample.without_anh),
                with_anh = %format!("{:.3}", sample.with_anh),
                "RBC volume"
            );
        }
        self.seen = frame.history.len();
        Ok(())
    }
}

/// Feeds frames from the session into `view` until the session ends.
pub async fn drive<V: ChartView>(mut frames: broadcast::Receiver<Frame>, mut view: V) -> anyhow::Result<()> {
    loop {
        match frames.recv().await {
            Ok(frame) => view.render(&frame)?,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Renderer lagging, skipping to newest frame");
            }
            Err(broadcast::error::RecvError::Closed) => return Ok(()),
        }
    }
}
