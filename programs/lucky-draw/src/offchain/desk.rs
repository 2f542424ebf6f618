use std::{collections::BTreeSet, io};

use anchor_lang::prelude::{msg, Pubkey};

use crate::{
    engine::{
        self, roster, ConfirmationToken, Confirmed, Entropy, Group, Limits, Refusal, Target,
    },
    state::{ConfirmAction, DrawSession, HistoryRecord, MoveDirection, Participant, Prize},
};

use super::{
    export::{self, CsvRow},
    import, reveal,
    store::{self, KeyValueStore},
};

#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    #[error("{0}")]
    Session(anchor_lang::error::Error),
    #[error("refused: {0}")]
    Refused(#[from] Refusal),
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    /// The change was applied but the store rejected the write.
    /// [`LuckyDesk::save`] retries it.
    #[error("applied, but the history was not saved: {0}")]
    Unsaved(io::Error),
}

impl From<anchor_lang::error::Error> for DeskError {
    fn from(error: anchor_lang::error::Error) -> Self {
        DeskError::Session(error)
    }
}

pub type DeskResult<T> = std::result::Result<T, DeskError>;

/// A local, single-user lucky draw.
///
/// Owns the one mutable [`DrawSession`] and applies every event to it in
/// turn. The history is written through to the store after each change, so
/// only an uncommitted spin can be lost.
///
/// The session is unbounded unless [`LuckyDesk::with_limits`] says otherwise.
pub struct LuckyDesk<S, E> {
    session: DrawSession,
    limits: Limits,
    store: S,
    entropy: E,
}

impl<S: KeyValueStore, E: Entropy> LuckyDesk<S, E> {
    /// Starts a session with the history found in `store`, if any.
    ///
    /// Only the history is durable. Ids handed out afterwards continue past
    /// every id in it, so a re-imported roster never matches old records.
    pub fn open(store: S, entropy: E) -> Self {
        let mut session = DrawSession::new(Pubkey::default(), 0);
        session.history = store::load_history(&store);
        for record in &session.history {
            session.next_participant_id = session
                .next_participant_id
                .max(record.participant.id.saturating_add(1));
            session.next_prize_id = session.next_prize_id.max(record.prize.id.saturating_add(1));
        }
        Self {
            session,
            limits: Limits::UNBOUNDED,
            store,
            entropy,
        }
    }

    /// Caps the session, for a desk that mirrors an on-chain session.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn session(&self) -> &DrawSession {
        &self.session
    }

    pub fn history(&self) -> &[HistoryRecord] {
        &self.session.history
    }

    pub fn current_target(&self) -> Option<Target<'_>> {
        self.session.current_target()
    }

    pub fn eligible_pool(&self) -> Vec<&Participant> {
        self.session.eligible_pool()
    }

    // Roster

    pub fn import_text(&mut self, text: &str) -> DeskResult<Vec<u32>> {
        let names = import::names_from_text(text);
        Ok(self.session.append_names(&names, &self.limits)?)
    }

    pub fn import_table(&mut self, bytes: &[u8]) -> DeskResult<Vec<u32>> {
        let names = import::names_from_table(bytes)?;
        Ok(self.session.append_names(&names, &self.limits)?)
    }

    pub fn load_sample_roster(&mut self) -> DeskResult<Vec<u32>> {
        Ok(self
            .session
            .replace_roster(&import::SAMPLE_NAMES, &self.limits)?)
    }

    pub fn remove_participant(&mut self, participant_id: u32) -> DeskResult<Participant> {
        Ok(self.session.remove_participant(participant_id)?)
    }

    pub fn duplicate_names(&self) -> BTreeSet<&str> {
        roster::duplicate_names(&self.session.roster)
    }

    pub fn dedupe_roster(&mut self) -> DeskResult<usize> {
        Ok(self.session.dedupe_roster()?)
    }

    // Prizes

    pub fn add_prize(&mut self, name: &str, count: u32) -> DeskResult<u32> {
        Ok(self.session.add_prize(name, count, &self.limits)?)
    }

    /// Appends the usual opening prizes: one grand prize, then three firsts.
    pub fn load_default_prizes(&mut self) -> DeskResult<Vec<u32>> {
        import::DEFAULT_PRIZES
            .iter()
            .map(|(name, count)| self.add_prize(name, *count))
            .collect()
    }

    pub fn update_prize(
        &mut self,
        prize_id: u32,
        name: Option<&str>,
        count: Option<u32>,
    ) -> DeskResult<()> {
        Ok(self
            .session
            .update_prize(prize_id, name, count, &self.limits)?)
    }

    pub fn move_prize(&mut self, prize_id: u32, direction: MoveDirection) -> DeskResult<()> {
        Ok(self.session.move_prize(prize_id, direction)?)
    }

    pub fn remove_prize(&mut self, prize_id: u32) -> DeskResult<Prize> {
        Ok(self.session.remove_prize(prize_id)?)
    }

    pub fn set_allow_repeat(&mut self, allow_repeat: bool) -> DeskResult<()> {
        Ok(self.session.set_allow_repeat(allow_repeat)?)
    }

    // Drawing

    /// Runs one full draw: spins through the eligible pool, then commits
    /// the winner. Returns `None` when no draw can start right now.
    ///
    /// A [`DeskError::Unsaved`] still means the winner was committed. It is
    /// the newest entry of [`LuckyDesk::history`].
    pub async fn draw<F: FnMut(&Participant)>(
        &mut self,
        show: F,
    ) -> DeskResult<Option<HistoryRecord>> {
        match self.session.start_draw(0, &self.limits) {
            Ok(spin) => self.finish_spin(&spin.pool, show).await.map(Some),
            Err(refusal) => {
                msg!("Draw request ignored: {}", refusal);
                Ok(None)
            }
        }
    }

    pub fn request(&mut self, action: ConfirmAction) -> Option<ConfirmationToken> {
        match self.session.request_confirmation(action) {
            Ok(token) => Some(token),
            Err(refusal) => {
                msg!("{:?} request ignored: {}", action, refusal);
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        self.session.cancel_confirmation();
    }

    /// Applies a confirmed action. A redraw also runs the replacement draw
    /// before returning, with `show` receiving its frames.
    ///
    /// The history is saved once the action, and any replacement draw, is
    /// complete. A [`DeskError::Unsaved`] leaves the session Idle with the
    /// action applied.
    pub async fn confirm<F: FnMut(&Participant)>(
        &mut self,
        token: ConfirmationToken,
        show: F,
    ) -> DeskResult<Option<Confirmed>> {
        let confirmed = match self.session.confirm(token.token, 0, &self.limits) {
            Ok(confirmed) => confirmed,
            Err(refusal) => {
                msg!("Confirmation ignored: {}", refusal);
                return Ok(None);
            }
        };

        match &confirmed {
            Confirmed::RosterCleared { .. } => {}
            Confirmed::HistoryReset { .. } | Confirmed::Redrawn { respin: None, .. } => self.save()?,
            Confirmed::Redrawn {
                respin: Some(spin), ..
            } => {
                self.finish_spin(&spin.pool, show).await?;
            }
        }
        Ok(Some(confirmed))
    }

    /// Writes the history to the store, removing the entry once it is empty.
    pub fn save(&mut self) -> DeskResult<()> {
        let written = if self.session.history.is_empty() {
            store::clear_history(&mut self.store)
        } else {
            store::save_history(&mut self.store, &self.session.history)
        };
        written.map_err(DeskError::Unsaved)
    }

    async fn finish_spin<F: FnMut(&Participant)>(
        &mut self,
        pool: &[Participant],
        show: F,
    ) -> DeskResult<HistoryRecord> {
        reveal::run_reveal(pool, show).await;

        let timestamp = chrono::Utc::now().timestamp_millis();
        let committed = self.session.commit_draw(&mut self.entropy, timestamp)?;
        self.save()?;
        Ok(committed.record)
    }

    // Grouping and export

    pub fn group(&mut self, group_size: usize) -> DeskResult<Vec<Group>> {
        Ok(engine::partition(
            &self.session.roster,
            group_size,
            &mut self.entropy,
        )?)
    }

    pub fn history_csv(&self) -> DeskResult<Vec<u8>> {
        Ok(export::write_csv(&export::history_rows(&self.session.history))?)
    }

    pub fn groups_csv(&self, groups: &[Group]) -> DeskResult<Vec<u8>> {
        let rows: Vec<CsvRow> = export::group_rows(groups);
        Ok(export::write_csv(&rows)?)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
