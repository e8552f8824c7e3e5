use std::path::{Path, PathBuf};

pub const DEFAULT_MEDIA_ASSET: &str =
    "Calculus--Controlling-RBC-Loss-Simulation/blood_loss_simulation.gif";

/// Show/hide switch for the illustrative animation. The asset path is only
/// displayed, never opened.
#[derive(Debug, Clone)]
pub struct MediaToggle {
    asset: PathBuf,
    visible: bool,
}

impl MediaToggle {
    pub fn new(asset: impl Into<PathBuf>) -> Self {
        Self {
            asset: asset.into(),
            visible: false,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        tracing::debug!(visible = self.visible, "Media toggled");
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn asset(&self) -> &Path {
        &self.asset
    }

    pub fn label(&self) -> &'static str {
        if self.visible {
            "Hide GIF"
        } else {
            "Show GIF"
        }
    }
}

impl Default for MediaToggle {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_ASSET)
    }
}
