use anchor_lang::prelude::*;

/// Longest participant or prize name accepted, in bytes after trimming.
pub const MAX_NAME_LEN: usize = 32;

// 4 id + 4 (length of name) + 32 (name)
pub const PARTICIPANT_SIZE: usize = 4 + 4 + MAX_NAME_LEN;

/// A roster entry. Identity is the `id`; names may collide.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub id: u32,
    pub name: String,
}
