mod clock;
pub mod engine;
mod session;

pub use clock::{now_ms, Clock, ManualClock, SystemClock};
pub use engine::{TimerEngine, Transition};
pub use session::{SessionPhase, TimerSession};
