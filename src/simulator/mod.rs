pub mod clock;
pub mod controller;
pub mod physics;
pub mod state;

pub use clock::{SimulationClock, TickTimer};
pub use controller::SimulationController;
pub use physics::{decay, Scenario};
pub use state::{Phase, Sample, SimulationState};
