pub use history::*;
pub use participant::*;
pub use prize::*;
pub use session::*;

pub mod history;
pub mod participant;
pub mod prize;
pub mod session;
