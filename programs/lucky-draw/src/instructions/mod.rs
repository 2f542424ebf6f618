pub use confirmation::*;
pub use init_session::*;
pub use manage_prizes::*;
pub use manage_roster::*;
pub use manage_session::*;
pub use reveal_winner::*;
pub use start_draw::*;

pub mod confirmation;
pub mod init_session;
pub mod manage_prizes;
pub mod manage_roster;
pub mod manage_session;
pub mod reveal_winner;
pub mod start_draw;
