use anchor_lang::{prelude::*, solana_program::sysvar::slot_hashes};

use crate::{
    engine::{Committed, SlotHashEntropy},
    error::LuckyDrawError,
    state::DrawSession,
};

/// Event emitted when a winner is committed to the history
#[event]
pub struct WinnerDrawn {
    pub session: Pubkey,
    pub participant_id: u32,
    pub participant_name: String,
    pub prize_id: u32,
    /// Position of this winner within the prize, starting at 1
    pub winner_number: u32,
    /// Epoch milliseconds
    pub timestamp: i64,
}

/// Reveals the winner of the spinning draw (Spinning -> Idle).
///
/// The winner is picked uniformly from the eligible pool with entropy taken
/// from the newest SlotHashes entry and the clock. Because the reveal has to
/// land in a later slot than `start_draw`, that entry did not exist yet when
/// the draw started.
///
/// After execution:
/// - Exactly one record is prepended to the history
/// - The session is Idle again
///
/// # Errors
/// - `NotSpinning` if no draw was started
/// - `RevealTooEarly` if called in the slot the draw started in
/// - `InvalidSlotHashesAccount` if the provided SlotHashes account is invalid
/// - `Overflow` if the timestamp cannot be expressed in milliseconds
pub fn reveal_winner(ctx: Context<RevealWinner>) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.recent_slothashes.key(),
        slot_hashes::ID,
        LuckyDrawError::InvalidSlotHashesAccount
    );

    let clock = Clock::get()?;
    let session = &mut ctx.accounts.session;
    require!(session.is_spinning(), LuckyDrawError::NotSpinning);
    require!(clock.slot > session.spin_slot, LuckyDrawError::RevealTooEarly);

    let timestamp = clock
        .unix_timestamp
        .checked_mul(1000)
        .ok_or(LuckyDrawError::Overflow)?;
    let mut entropy = {
        let data = ctx.accounts.recent_slothashes.data.borrow();
        SlotHashEntropy::from_slot_hashes(&data[..], clock.unix_timestamp)?
    };

    match session.commit_draw(&mut entropy, timestamp) {
        Ok(Committed {
            record,
            winner_number,
        }) => emit!(WinnerDrawn {
            session: session.key(),
            participant_id: record.participant.id,
            participant_name: record.participant.name,
            prize_id: record.prize.id,
            winner_number,
            timestamp,
        }),
        Err(refusal) => msg!("Reveal committed nothing: {}", refusal),
    }

    Ok(())
}

#[derive(Accounts)]
pub struct RevealWinner<'info> {
    /// The session whose draw is spinning
    #[account(
        mut,
        seeds = [
            b"session",
            authority.key().as_ref(),
        ],
        bump = session.bump,
        has_one = authority @ LuckyDrawError::NotSessionAuthority,
    )]
    pub session: Account<'info, DrawSession>,

    pub authority: Signer<'info>,

    /// The SlotHashes sysvar contains the most recent block hashes
    /// CHECK: Using UncheckedAccount because we manually validate the correct sysvar.
    /// Anchor cannot deserialize the SlotHashes sysvar within the compute budget.
    pub recent_slothashes: UncheckedAccount<'info>,
}
