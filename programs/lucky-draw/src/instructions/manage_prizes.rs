use anchor_lang::prelude::*;

use crate::{
    engine::Limits,
    state::{DrawSession, MoveDirection},
};

use super::ManageSession;

#[event]
pub struct PrizesChanged {
    pub session: Pubkey,
    pub prize_count: u32,
}

/// Appends a prize to the end of the draw sequence.
///
/// # Errors
/// - `EmptyName` / `NameTooLong` for a bad name
/// - `InvalidPrizeCount` if `count` is zero
/// - `PrizeListFull` if the sequence is at capacity
pub fn add_prize(ctx: Context<ManageSession>, name: String, count: u32) -> Result<()> {
    let prize_id = ctx.accounts.session.add_prize(&name, count, &Limits::ACCOUNT)?;
    msg!("Added prize {} ({} winners)", prize_id, count);
    prizes_changed(&ctx.accounts.session)
}

/// Renames a prize and/or changes how many winners it needs.
///
/// History is never rewritten: progress is recomputed against the edited
/// prize on the next draw.
pub fn update_prize(
    ctx: Context<ManageSession>,
    prize_id: u32,
    name: Option<String>,
    count: Option<u32>,
) -> Result<()> {
    ctx.accounts
        .session
        .update_prize(prize_id, name.as_deref(), count, &Limits::ACCOUNT)?;
    prizes_changed(&ctx.accounts.session)
}

pub fn move_prize(
    ctx: Context<ManageSession>,
    prize_id: u32,
    direction: MoveDirection,
) -> Result<()> {
    ctx.accounts.session.move_prize(prize_id, direction)?;
    prizes_changed(&ctx.accounts.session)
}

pub fn remove_prize(ctx: Context<ManageSession>, prize_id: u32) -> Result<()> {
    ctx.accounts.session.remove_prize(prize_id)?;
    prizes_changed(&ctx.accounts.session)
}

fn prizes_changed(session: &Account<DrawSession>) -> Result<()> {
    emit!(PrizesChanged {
        session: session.key(),
        prize_count: session.prizes.len() as u32,
    });
    Ok(())
}
