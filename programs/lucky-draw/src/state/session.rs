use anchor_lang::prelude::*;

use super::{HistoryRecord, Participant, Prize, HISTORY_RECORD_SIZE, PARTICIPANT_SIZE, PRIZE_SIZE};

pub const MAX_PARTICIPANTS: usize = 100;
pub const MAX_PRIZES: usize = 10;
pub const MAX_HISTORY: usize = 50;

// 1 (action) + 8 (token)
const PENDING_CONFIRMATION_SIZE: usize = 1 + 8;

// Space calculation:
// 8 (discriminator) +
// 32 (authority) +
// 1 (bump) +
// 1 (phase) +
// 1 (allow_repeat) +
// 4 (next_participant_id) +
// 4 (next_prize_id) +
// 4 + 100 * 40 (roster) +
// 4 + 10 * 44 (prizes) +
// 4 + 50 * 92 (history) +
// 1 + 9 (pending: Option<PendingConfirmation>) +
// 8 (confirmation_nonce) +
// 8 (spin_slot) =
// 9129 total bytes
pub const SESSION_ACCOUNT_SIZE: usize = 8
    + 32
    + 1
    + 1
    + 1
    + 4
    + 4
    + (4 + MAX_PARTICIPANTS * PARTICIPANT_SIZE)
    + (4 + MAX_PRIZES * PRIZE_SIZE)
    + (4 + MAX_HISTORY * HISTORY_RECORD_SIZE)
    + (1 + PENDING_CONFIRMATION_SIZE)
    + 8
    + 8;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawPhase {
    Idle = 0,
    Spinning = 1,
}

/// Destructive actions that only apply after an explicit confirmation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmAction {
    ResetHistory,
    ClearRoster,
    Redraw,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub action: ConfirmAction,
    pub token: u64,
}

#[account]
pub struct DrawSession {
    pub authority: Pubkey,
    pub bump: u8,
    pub phase: DrawPhase,
    pub allow_repeat: bool,
    pub next_participant_id: u32,
    pub next_prize_id: u32,
    pub roster: Vec<Participant>,
    /// In draw order.
    pub prizes: Vec<Prize>,
    /// Newest first.
    pub history: Vec<HistoryRecord>,
    pub pending: Option<PendingConfirmation>,
    pub confirmation_nonce: u64,
    /// Slot at which the current spin started. Only meaningful while Spinning.
    pub spin_slot: u64,
}

impl DrawSession {
    pub fn new(authority: Pubkey, bump: u8) -> Self {
        Self {
            authority,
            bump,
            phase: DrawPhase::Idle,
            allow_repeat: false,
            next_participant_id: 1,
            next_prize_id: 1,
            roster: Vec::new(),
            prizes: Vec::new(),
            history: Vec::new(),
            pending: None,
            confirmation_nonce: 0,
            spin_slot: 0,
        }
    }
}
