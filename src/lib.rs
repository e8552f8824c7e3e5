pub mod export;
pub mod session;
pub mod simulator;
pub mod view;

pub use session::{Command, Frame, Session};
pub use simulator::{Phase, Sample, SimulationController, SimulationState};
