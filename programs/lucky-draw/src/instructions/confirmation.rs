use anchor_lang::prelude::*;

use crate::{
    engine::{Confirmed, Limits},
    state::ConfirmAction,
};

use super::{DrawStarted, ManageSession};

#[event]
pub struct ConfirmationRequested {
    pub session: Pubkey,
    pub action: ConfirmAction,
    /// Pass this to `confirm_pending` to apply the action
    pub token: u64,
}

#[event]
pub struct HistoryReset {
    pub session: Pubkey,
    pub removed: u32,
}

#[event]
pub struct RosterCleared {
    pub session: Pubkey,
    pub removed: u32,
}

#[event]
pub struct DrawVoided {
    pub session: Pubkey,
    pub participant_id: u32,
    pub prize_id: u32,
}

/// First half of a destructive action: records what is about to happen and
/// hands out a token for it in a `ConfirmationRequested` event.
///
/// Ignored while a draw is spinning, and for resets or redraws with an empty
/// history, or clearing an empty roster. A new request replaces any pending one.
pub fn request_confirmation(ctx: Context<ManageSession>, action: ConfirmAction) -> Result<()> {
    let session = &mut ctx.accounts.session;

    match session.request_confirmation(action) {
        Ok(token) => emit!(ConfirmationRequested {
            session: session.key(),
            action: token.action,
            token: token.token,
        }),
        Err(refusal) => msg!("{:?} request ignored: {}", action, refusal),
    }

    Ok(())
}

/// Second half of a destructive action. Applies it only if `token` matches the
/// pending request and the action is still valid.
///
/// A confirmed redraw voids the newest record and immediately starts a new
/// draw for the same prize, which is then revealed with `reveal_winner`.
pub fn confirm_pending(ctx: Context<ManageSession>, token: u64) -> Result<()> {
    let clock = Clock::get()?;
    let session = &mut ctx.accounts.session;
    let key = session.key();

    let confirmed = match session.confirm(token, clock.slot, &Limits::ACCOUNT) {
        Ok(confirmed) => confirmed,
        Err(refusal) => {
            msg!("Confirmation ignored: {}", refusal);
            return Ok(());
        }
    };

    match confirmed {
        Confirmed::HistoryReset { removed } => emit!(HistoryReset {
            session: key,
            removed: removed as u32,
        }),
        Confirmed::RosterCleared { removed } => emit!(RosterCleared {
            session: key,
            removed: removed as u32,
        }),
        Confirmed::Redrawn { voided, respin } => {
            emit!(DrawVoided {
                session: key,
                participant_id: voided.participant.id,
                prize_id: voided.prize.id,
            });
            if let Some(spin) = respin {
                emit!(DrawStarted {
                    session: key,
                    prize_id: spin.prize.id,
                    winner_number: spin.winner_number,
                    pool_size: spin.pool.len() as u32,
                    slot: clock.slot,
                });
            }
        }
    }

    Ok(())
}

pub fn cancel_confirmation(ctx: Context<ManageSession>) -> Result<()> {
    if let Some(action) = ctx.accounts.session.cancel_confirmation() {
        msg!("{:?} cancelled", action);
    }
    Ok(())
}
