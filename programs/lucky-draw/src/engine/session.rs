//! Transitions of a [`DrawSession`].
//!
//! Draw, redraw and reset requests that are not valid right now come back as
//! a [`Refusal`] and leave the session untouched. Malformed edits (bad names,
//! unknown ids, full lists, edits during a spin) are program errors.

use std::fmt;

use anchor_lang::prelude::{err, require, Result};

use crate::{
    error::LuckyDrawError,
    state::{
        ConfirmAction, DrawPhase, DrawSession, HistoryRecord, MoveDirection, Participant,
        PendingConfirmation, Prize, MAX_HISTORY, MAX_NAME_LEN, MAX_PARTICIPANTS, MAX_PRIZES,
    },
};

use super::{roster, sequencer, Entropy, Target};

/// How far a session may grow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Bytes per participant or prize name
    pub max_name_len: usize,
    pub max_participants: usize,
    pub max_prizes: usize,
    /// Records kept before further draws are refused
    pub max_history: usize,
}

impl Limits {
    /// What fits in a session account.
    pub const ACCOUNT: Limits = Limits {
        max_name_len: MAX_NAME_LEN,
        max_participants: MAX_PARTICIPANTS,
        max_prizes: MAX_PRIZES,
        max_history: MAX_HISTORY,
    };

    /// No caps, for sessions kept in memory.
    pub const UNBOUNDED: Limits = Limits {
        max_name_len: usize::MAX,
        max_participants: usize::MAX,
        max_prizes: usize::MAX,
        max_history: usize::MAX,
    };
}

/// Why a sequencing request was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refusal {
    DrawInProgress,
    NoOpenPrize,
    EmptyPool,
    HistoryFull,
    EmptyHistory,
    EmptyRoster,
    NotSpinning,
    NoPendingConfirmation,
    TokenMismatch,
}

impl fmt::Display for Refusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Refusal::DrawInProgress => "a draw is in progress",
            Refusal::NoOpenPrize => "every prize is full",
            Refusal::EmptyPool => "nobody is eligible",
            Refusal::HistoryFull => "the history log is full",
            Refusal::EmptyHistory => "the history log is empty",
            Refusal::EmptyRoster => "the roster is empty",
            Refusal::NotSpinning => "no draw is in progress",
            Refusal::NoPendingConfirmation => "nothing is waiting for confirmation",
            Refusal::TokenMismatch => "the confirmation token is stale",
        };
        f.write_str(reason)
    }
}

impl std::error::Error for Refusal {}

/// Snapshot of a draw that has just started spinning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spin {
    pub prize: Prize,
    pub winner_number: u32,
    pub pool: Vec<Participant>,
}

/// A winner that has just been committed to the history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Committed {
    pub record: HistoryRecord,
    /// Position of this winner within the prize, starting at 1
    pub winner_number: u32,
}

/// Proof that a destructive action was requested. Hand it back to
/// [`DrawSession::confirm`] to apply the action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfirmationToken {
    pub action: ConfirmAction,
    pub token: u64,
}

/// What a confirmed action did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Confirmed {
    HistoryReset { removed: usize },
    RosterCleared { removed: usize },
    /// The newest record was voided. `respin` is the draw that started
    /// straight away for the same prize, if one could start.
    Redrawn { voided: HistoryRecord, respin: Option<Spin> },
}

impl DrawSession {
    pub fn is_spinning(&self) -> bool {
        self.phase == DrawPhase::Spinning
    }

    pub fn current_target(&self) -> Option<Target<'_>> {
        sequencer::current_target(&self.prizes, &self.history)
    }

    pub fn eligible_pool(&self) -> Vec<&Participant> {
        sequencer::eligible_pool(&self.roster, &self.history, self.allow_repeat)
    }

    // Draw lifecycle

    /// Idle -> Spinning. `slot` marks when the spin began.
    pub fn start_draw(
        &mut self,
        slot: u64,
        limits: &Limits,
    ) -> std::result::Result<Spin, Refusal> {
        if self.is_spinning() {
            return Err(Refusal::DrawInProgress);
        }
        if self.history.len() >= limits.max_history {
            return Err(Refusal::HistoryFull);
        }
        let target = self.current_target().ok_or(Refusal::NoOpenPrize)?;
        let pool = self.eligible_pool();
        if pool.is_empty() {
            return Err(Refusal::EmptyPool);
        }

        let spin = Spin {
            prize: target.prize.clone(),
            winner_number: target.winner_number,
            pool: pool.into_iter().cloned().collect(),
        };
        self.phase = DrawPhase::Spinning;
        self.spin_slot = slot;
        Ok(spin)
    }

    /// Spinning -> Idle, committing exactly one record.
    ///
    /// Roster and prize edits are locked while spinning, so the target and
    /// pool are the ones the spin started with.
    pub fn commit_draw<E: Entropy>(
        &mut self,
        entropy: &mut E,
        timestamp: i64,
    ) -> std::result::Result<Committed, Refusal> {
        if !self.is_spinning() {
            return Err(Refusal::NotSpinning);
        }
        self.phase = DrawPhase::Idle;
        self.spin_slot = 0;

        let target = self.current_target().ok_or(Refusal::NoOpenPrize)?;
        let pool = self.eligible_pool();
        if pool.is_empty() {
            return Err(Refusal::EmptyPool);
        }
        let winner_number = target.winner_number;
        let record = sequencer::draw(&target, &pool, entropy, timestamp);
        sequencer::record(&mut self.history, record.clone());
        Ok(Committed {
            record,
            winner_number,
        })
    }

    // Two-phase destructive actions

    pub fn request_confirmation(
        &mut self,
        action: ConfirmAction,
    ) -> std::result::Result<ConfirmationToken, Refusal> {
        self.check_confirmable(action)?;

        self.confirmation_nonce = self.confirmation_nonce.wrapping_add(1);
        let pending = PendingConfirmation {
            action,
            token: self.confirmation_nonce,
        };
        self.pending = Some(pending);
        Ok(ConfirmationToken {
            action,
            token: pending.token,
        })
    }

    /// Applies the pending action if `token` matches it. A confirmed redraw
    /// immediately starts a new spin at `slot`.
    pub fn confirm(
        &mut self,
        token: u64,
        slot: u64,
        limits: &Limits,
    ) -> std::result::Result<Confirmed, Refusal> {
        let pending = self.pending.ok_or(Refusal::NoPendingConfirmation)?;
        if pending.token != token {
            return Err(Refusal::TokenMismatch);
        }
        self.check_confirmable(pending.action)?;
        self.pending = None;

        Ok(match pending.action {
            ConfirmAction::ResetHistory => Confirmed::HistoryReset {
                removed: sequencer::reset_history(&mut self.history),
            },
            ConfirmAction::ClearRoster => {
                let removed = self.roster.len();
                self.roster.clear();
                Confirmed::RosterCleared { removed }
            }
            ConfirmAction::Redraw => {
                let voided =
                    sequencer::redraw(&mut self.history).ok_or(Refusal::EmptyHistory)?;
                Confirmed::Redrawn {
                    voided,
                    respin: self.start_draw(slot, limits).ok(),
                }
            }
        })
    }

    pub fn cancel_confirmation(&mut self) -> Option<ConfirmAction> {
        self.pending.take().map(|pending| pending.action)
    }

    fn check_confirmable(&self, action: ConfirmAction) -> std::result::Result<(), Refusal> {
        if self.is_spinning() {
            return Err(Refusal::DrawInProgress);
        }
        match action {
            ConfirmAction::ResetHistory | ConfirmAction::Redraw if self.history.is_empty() => {
                Err(Refusal::EmptyHistory)
            }
            ConfirmAction::ClearRoster if self.roster.is_empty() => Err(Refusal::EmptyRoster),
            _ => Ok(()),
        }
    }

    // Roster edits

    /// Appends every non-empty trimmed name with a fresh id, in order.
    /// Either all names are added or none.
    pub fn append_names<S: AsRef<str>>(
        &mut self,
        names: &[S],
        limits: &Limits,
    ) -> Result<Vec<u32>> {
        self.ensure_editable()?;

        let names = names
            .iter()
            .map(|name| name.as_ref().trim())
            .filter(|name| !name.is_empty())
            .map(|name| roster::normalize_name(name, limits.max_name_len))
            .collect::<Result<Vec<_>>>()?;
        require!(
            names.len() <= limits.max_participants.saturating_sub(self.roster.len()),
            LuckyDrawError::RosterFull
        );

        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let id = self.next_participant_id;
            self.next_participant_id = id.checked_add(1).ok_or(LuckyDrawError::Overflow)?;
            self.roster.push(Participant { id, name });
            ids.push(id);
        }
        Ok(ids)
    }

    pub fn replace_roster<S: AsRef<str>>(
        &mut self,
        names: &[S],
        limits: &Limits,
    ) -> Result<Vec<u32>> {
        self.ensure_editable()?;
        let previous = std::mem::take(&mut self.roster);
        match self.append_names(names, limits) {
            Ok(ids) => Ok(ids),
            Err(error) => {
                self.roster = previous;
                Err(error)
            }
        }
    }

    pub fn remove_participant(&mut self, participant_id: u32) -> Result<Participant> {
        self.ensure_editable()?;
        let index = self
            .roster
            .iter()
            .position(|participant| participant.id == participant_id)
            .ok_or(LuckyDrawError::ParticipantNotFound)?;
        Ok(self.roster.remove(index))
    }

    pub fn dedupe_roster(&mut self) -> Result<usize> {
        self.ensure_editable()?;
        Ok(roster::dedupe(&mut self.roster))
    }

    // Prize edits

    pub fn add_prize(&mut self, name: &str, count: u32, limits: &Limits) -> Result<u32> {
        self.ensure_editable()?;
        let name = roster::normalize_name(name, limits.max_name_len)?;
        require!(count > 0, LuckyDrawError::InvalidPrizeCount);
        require!(
            self.prizes.len() < limits.max_prizes,
            LuckyDrawError::PrizeListFull
        );

        let id = self.next_prize_id;
        self.next_prize_id = id.checked_add(1).ok_or(LuckyDrawError::Overflow)?;
        self.prizes.push(Prize { id, name, count });
        Ok(id)
    }

    pub fn update_prize(
        &mut self,
        prize_id: u32,
        name: Option<&str>,
        count: Option<u32>,
        limits: &Limits,
    ) -> Result<()> {
        self.ensure_editable()?;
        let name = name
            .map(|name| roster::normalize_name(name, limits.max_name_len))
            .transpose()?;
        if let Some(count) = count {
            require!(count > 0, LuckyDrawError::InvalidPrizeCount);
        }

        let prize = self.prize_mut(prize_id)?;
        if let Some(name) = name {
            prize.name = name;
        }
        if let Some(count) = count {
            prize.count = count;
        }
        Ok(())
    }

    /// Swaps the prize with its neighbour. Moving past either end does nothing.
    pub fn move_prize(&mut self, prize_id: u32, direction: MoveDirection) -> Result<()> {
        self.ensure_editable()?;
        let index = self.prize_index(prize_id)?;
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|i| *i < self.prizes.len()),
        };
        if let Some(target) = target {
            self.prizes.swap(index, target);
        }
        Ok(())
    }

    pub fn remove_prize(&mut self, prize_id: u32) -> Result<Prize> {
        self.ensure_editable()?;
        let index = self.prize_index(prize_id)?;
        Ok(self.prizes.remove(index))
    }

    pub fn set_allow_repeat(&mut self, allow_repeat: bool) -> Result<()> {
        self.ensure_editable()?;
        self.allow_repeat = allow_repeat;
        Ok(())
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.is_spinning() {
            return err!(LuckyDrawError::DrawInProgress);
        }
        Ok(())
    }

    fn prize_index(&self, prize_id: u32) -> Result<usize> {
        Ok(self
            .prizes
            .iter()
            .position(|prize| prize.id == prize_id)
            .ok_or(LuckyDrawError::PrizeNotFound)?)
    }

    fn prize_mut(&mut self, prize_id: u32) -> Result<&mut Prize> {
        let index = self.prize_index(prize_id)?;
        Ok(&mut self.prizes[index])
    }
}
