use anchor_lang::prelude::*;

use crate::state::{DrawSession, SESSION_ACCOUNT_SIZE};

#[event]
pub struct SessionInitialized {
    pub session: Pubkey,
    pub authority: Pubkey,
}

/// Creates the draw session owned by the signer.
///
/// # Account Validations
/// * Session - New PDA with seeds ["session", authority_key]
/// * Authority - Pays for the account and becomes the only account allowed to change it
///
/// # Implementation Notes
/// - The session starts Idle with an empty roster, prize list and history
/// - Repeat winners are disallowed until changed with `set_allow_repeat`
pub fn init_session(ctx: Context<InitSession>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    ctx.accounts
        .session
        .set_inner(DrawSession::new(authority, ctx.bumps.session));

    emit!(SessionInitialized {
        session: ctx.accounts.session.key(),
        authority,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitSession<'info> {
    #[account(
        init,
        payer = authority,
        space = SESSION_ACCOUNT_SIZE,
        seeds = [
            b"session",
            authority.key().as_ref(),
        ],
        bump
    )]
    pub session: Account<'info, DrawSession>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}
