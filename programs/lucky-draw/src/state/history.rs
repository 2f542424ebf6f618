use anchor_lang::prelude::*;

use super::{Participant, Prize, PARTICIPANT_SIZE, PRIZE_SIZE};

// participant + prize + 8 timestamp
pub const HISTORY_RECORD_SIZE: usize = PARTICIPANT_SIZE + PRIZE_SIZE + 8;

/// One committed draw result.
///
/// Records keep a snapshot of the participant and prize as they were when the
/// draw was committed, so later roster or prize edits never rewrite history.
/// Tallies and eligibility are matched on the ids only.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct HistoryRecord {
    pub participant: Participant,
    pub prize: Prize,
    /// Epoch milliseconds.
    pub timestamp: i64,
}
