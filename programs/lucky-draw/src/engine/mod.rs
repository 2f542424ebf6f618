pub use entropy::*;
pub use grouping::*;
pub use sequencer::{current_target, draw, eligible_pool, redraw, reset_history, Target};
pub use session::*;

pub mod entropy;
pub mod grouping;
pub mod roster;
pub mod sequencer;
pub mod session;
