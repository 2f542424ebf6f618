use anchor_lang::prelude::*;

use super::MAX_NAME_LEN;

// 4 id + 4 (length of name) + 32 (name) + 4 count
pub const PRIZE_SIZE: usize = 4 + 4 + MAX_NAME_LEN + 4;

/// A prize definition. Its position in the session's prize list is its draw precedence.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Prize {
    pub id: u32,
    pub name: String,
    /// Number of winners this prize needs. Always at least 1.
    pub count: u32,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}
