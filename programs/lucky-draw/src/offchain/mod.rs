//! Host-side collaborators: persistence, CSV import and export, the timed
//! reveal cycle, and a local driver tying them to a [`DrawSession`].
//!
//! [`DrawSession`]: crate::state::DrawSession

pub use desk::*;

pub mod desk;
pub mod export;
pub mod import;
pub mod reveal;
pub mod store;
