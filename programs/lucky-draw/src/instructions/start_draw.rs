use anchor_lang::prelude::*;

use crate::engine::Limits;

use super::ManageSession;

/// Event emitted when a draw starts spinning
#[event]
pub struct DrawStarted {
    pub session: Pubkey,
    /// The prize this draw fills
    pub prize_id: u32,
    /// 1-based winner number for that prize
    pub winner_number: u32,
    /// How many participants can win
    pub pool_size: u32,
    /// Slot the spin started in. The reveal must land in a later slot.
    pub slot: u64,
}

/// Starts a draw for the current target prize (Idle -> Spinning).
///
/// The request is ignored, leaving the session untouched, when:
/// 1. A draw is already spinning
/// 2. Every prize already has all its winners
/// 3. Nobody is eligible
/// 4. The history log is full
///
/// While spinning, roster and prize edits fail and redraw/reset requests are
/// ignored until `reveal_winner` commits the result.
pub fn start_draw(ctx: Context<ManageSession>) -> Result<()> {
    let clock = Clock::get()?;
    let session = &mut ctx.accounts.session;

    match session.start_draw(clock.slot, &Limits::ACCOUNT) {
        Ok(spin) => emit!(DrawStarted {
            session: session.key(),
            prize_id: spin.prize.id,
            winner_number: spin.winner_number,
            pool_size: spin.pool.len() as u32,
            slot: clock.slot,
        }),
        Err(refusal) => msg!("Draw request ignored: {}", refusal),
    }

    Ok(())
}
