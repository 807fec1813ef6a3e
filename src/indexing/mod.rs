mod controller;
mod state;

pub use controller::{IndexingController, PollExit, SessionTicket};
pub use state::{RunningSession, SessionOutcome, SessionState};
