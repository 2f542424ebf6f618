use anchor_lang::prelude::*;

use crate::{engine::Limits, state::DrawSession};

use super::ManageSession;

/// Event emitted whenever the roster changes size
#[event]
pub struct RosterChanged {
    pub session: Pubkey,
    /// Number of participants after the change
    pub roster_size: u32,
}

/// Appends participants to the roster.
///
/// Every name is trimmed and empty names are skipped. Each remaining
/// name gets a fresh id, in the order given.
///
/// # Errors
/// - `NameTooLong` if a trimmed name exceeds 32 bytes
/// - `RosterFull` if the roster would exceed its capacity
/// - `DrawInProgress` while a draw is spinning
pub fn add_participants(ctx: Context<ManageSession>, names: Vec<String>) -> Result<()> {
    let ids = ctx.accounts.session.append_names(&names, &Limits::ACCOUNT)?;
    msg!("Added {} participants", ids.len());
    roster_changed(&ctx.accounts.session)
}

/// Replaces the whole roster with `names`, with the same rules as `add_participants`.
pub fn replace_roster(ctx: Context<ManageSession>, names: Vec<String>) -> Result<()> {
    ctx.accounts.session.replace_roster(&names, &Limits::ACCOUNT)?;
    roster_changed(&ctx.accounts.session)
}

/// Removes one participant. Their past wins stay in the history.
pub fn remove_participant(ctx: Context<ManageSession>, participant_id: u32) -> Result<()> {
    ctx.accounts.session.remove_participant(participant_id)?;
    roster_changed(&ctx.accounts.session)
}

/// Drops every participant whose name already appeared earlier in the roster.
pub fn dedupe_roster(ctx: Context<ManageSession>) -> Result<()> {
    let removed = ctx.accounts.session.dedupe_roster()?;
    msg!("Removed {} duplicate participants", removed);
    roster_changed(&ctx.accounts.session)
}

fn roster_changed(session: &Account<DrawSession>) -> Result<()> {
    emit!(RosterChanged {
        session: session.key(),
        roster_size: session.roster.len() as u32,
    });
    Ok(())
}
