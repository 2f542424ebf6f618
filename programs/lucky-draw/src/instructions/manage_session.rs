use anchor_lang::prelude::*;

use crate::{error::LuckyDrawError, state::DrawSession};

/// Accounts shared by every instruction that edits a session in place.
#[derive(Accounts)]
pub struct ManageSession<'info> {
    /// The session being changed. Must belong to the signer.
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
}

/// Switches whether past winners stay eligible for later prizes.
pub fn set_allow_repeat(ctx: Context<ManageSession>, allow_repeat: bool) -> Result<()> {
    ctx.accounts.session.set_allow_repeat(allow_repeat)?;
    msg!("Repeat winners allowed: {}", allow_repeat);
    Ok(())
}
