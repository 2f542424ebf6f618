//! Derivations over the prize sequence and the draw history.
//!
//! Nothing here is cached: callers recompute the target and the pool from the
//! full history after every mutation, so prize edits are always reflected.

use std::collections::{BTreeMap, BTreeSet};

use crate::state::{HistoryRecord, Participant, Prize};

use super::Entropy;

/// The prize the next draw fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target<'a> {
    pub prize: &'a Prize,
    /// 1-based number of the winner about to be drawn for `prize`.
    pub winner_number: u32,
}

/// Number of records per prize id.
pub fn tallies(history: &[HistoryRecord]) -> BTreeMap<u32, u32> {
    let mut tallies = BTreeMap::new();
    for record in history {
        *tallies.entry(record.prize.id).or_insert(0u32) += 1;
    }
    tallies
}

/// First prize in sequence order whose tally is below its count.
///
/// Earlier prizes always take precedence, even when a later prize also has
/// open slots. Returns `None` for an empty sequence or when every prize is full.
pub fn current_target<'a>(prizes: &'a [Prize], history: &[HistoryRecord]) -> Option<Target<'a>> {
    let tallies = tallies(history);
    prizes.iter().find_map(|prize| {
        let filled = tallies.get(&prize.id).copied().unwrap_or(0);
        (filled < prize.count).then(|| Target {
            prize,
            winner_number: filled + 1,
        })
    })
}

/// Participants who may win the next draw, in roster order.
///
/// Without repeats, anyone who has won any prize is excluded.
pub fn eligible_pool<'a>(
    roster: &'a [Participant],
    history: &[HistoryRecord],
    allow_repeat: bool,
) -> Vec<&'a Participant> {
    if allow_repeat {
        return roster.iter().collect();
    }

    let winners: BTreeSet<u32> = history.iter().map(|record| record.participant.id).collect();
    roster
        .iter()
        .filter(|participant| !winners.contains(&participant.id))
        .collect()
}

/// Picks a winner uniformly from `pool` for the target prize.
///
/// The caller guarantees `pool` is non-empty.
pub fn draw<E: Entropy>(
    target: &Target<'_>,
    pool: &[&Participant],
    entropy: &mut E,
    timestamp: i64,
) -> HistoryRecord {
    let winner = pool[entropy.index(pool.len())];
    HistoryRecord {
        participant: winner.clone(),
        prize: target.prize.clone(),
        timestamp,
    }
}

/// Puts a freshly drawn record at the head of the history.
pub fn record(history: &mut Vec<HistoryRecord>, record: HistoryRecord) {
    history.insert(0, record);
}

/// Removes and returns the newest record, leaving every other record untouched.
pub fn redraw(history: &mut Vec<HistoryRecord>) -> Option<HistoryRecord> {
    if history.is_empty() {
        return None;
    }
    Some(history.remove(0))
}

/// Drops every record and returns how many were removed.
pub fn reset_history(history: &mut Vec<HistoryRecord>) -> usize {
    let removed = history.len();
    history.clear();
    removed
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Always answers the same index, clamped to the bound.
    pub struct FixedIndex(pub usize);

    impl Entropy for FixedIndex {
        fn index(&mut self, bound: usize) -> usize {
            self.0.min(bound - 1)
        }
    }

    pub fn person(id: u32, name: &str) -> Participant {
        Participant {
            id,
            name: name.to_string(),
        }
    }

    pub fn prize(id: u32, name: &str, count: u32) -> Prize {
        Prize {
            id,
            name: name.to_string(),
            count,
        }
    }

    pub fn won(participant: &Participant, prize: &Prize, timestamp: i64) -> HistoryRecord {
        HistoryRecord {
            participant: participant.clone(),
            prize: prize.clone(),
            timestamp,
        }
    }

    fn abc() -> Vec<Participant> {
        vec![person(1, "A"), person(2, "B"), person(3, "C")]
    }

    #[test]
    fn empty_prize_sequence_has_no_target() {
        assert_eq!(current_target(&[], &[]), None);
    }

    #[test]
    fn single_prize_fills_then_closes() {
        let roster = abc();
        let prizes = vec![prize(1, "Gold", 1)];
        let mut history = Vec::new();

        let target = current_target(&prizes, &history).unwrap();
        assert_eq!(target.prize.name, "Gold");
        assert_eq!(target.winner_number, 1);

        let pool = eligible_pool(&roster, &history, false);
        let drawn = draw(&target, &pool, &mut FixedIndex(0), 10);
        record(&mut history, drawn);

        assert_eq!(history[0].participant, roster[0]);
        assert_eq!(current_target(&prizes, &history), None);
        let names: Vec<&str> = eligible_pool(&roster, &history, false)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["B", "C"]);
    }

    #[test]
    fn prizes_fill_in_declared_order() {
        let roster = abc();
        let gold = prize(1, "Gold", 1);
        let silver = prize(2, "Silver", 2);
        let prizes = vec![gold.clone(), silver.clone()];

        let mut history = vec![won(&roster[0], &gold, 1)];
        let target = current_target(&prizes, &history).unwrap();
        assert_eq!((target.prize.id, target.winner_number), (2, 1));

        record(&mut history, won(&roster[1], &silver, 2));
        let target = current_target(&prizes, &history).unwrap();
        assert_eq!((target.prize.id, target.winner_number), (2, 2));

        let pool = eligible_pool(&roster, &history, false);
        assert_eq!(pool, vec![&roster[2]]);
    }

    #[test]
    fn earlier_open_prize_wins_over_later_open_prize() {
        let roster = abc();
        let first = prize(1, "First", 2);
        let second = prize(2, "Second", 2);
        // A later prize already has a record, but the first one still has room.
        let history = vec![won(&roster[0], &first, 2), won(&roster[1], &second, 1)];
        let prizes = vec![first, second];

        let target = current_target(&prizes, &history).unwrap();
        assert_eq!((target.prize.id, target.winner_number), (1, 2));
    }

    #[test]
    fn shrinking_a_prize_below_its_tally_skips_it() {
        let roster = abc();
        let gold = prize(1, "Gold", 3);
        let history = vec![won(&roster[0], &gold, 1), won(&roster[1], &gold, 2)];
        let prizes = vec![prize(1, "Gold", 1), prize(2, "Silver", 1)];

        let target = current_target(&prizes, &history).unwrap();
        assert_eq!(target.prize.id, 2);
    }

    #[test]
    fn every_prize_full_means_no_target() {
        let roster = abc();
        let gold = prize(1, "Gold", 1);
        let silver = prize(2, "Silver", 1);
        let history = vec![won(&roster[1], &silver, 2), won(&roster[0], &gold, 1)];
        assert_eq!(current_target(&[gold, silver], &history), None);
    }

    #[test]
    fn winners_of_any_prize_are_excluded_without_repeats() {
        let roster = abc();
        let old_prize = prize(9, "Removed prize", 1);
        let history = vec![won(&roster[1], &old_prize, 1)];

        let pool = eligible_pool(&roster, &history, false);
        assert!(pool.iter().all(|p| p.id != 2));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn repeats_allowed_means_the_whole_roster() {
        let roster = abc();
        let gold = prize(1, "Gold", 3);
        let history = vec![won(&roster[0], &gold, 1), won(&roster[1], &gold, 2)];

        let pool = eligible_pool(&roster, &history, true);
        assert_eq!(pool, roster.iter().collect::<Vec<_>>());
    }

    #[test]
    fn empty_roster_yields_empty_pool() {
        assert!(eligible_pool(&[], &[], false).is_empty());
        assert!(eligible_pool(&[], &[], true).is_empty());
    }

    #[test]
    fn draw_uses_the_entropy_index() {
        let roster = abc();
        let prizes = vec![prize(1, "Gold", 1)];
        let target = current_target(&prizes, &[]).unwrap();
        let pool = eligible_pool(&roster, &[], false);

        let drawn = draw(&target, &pool, &mut FixedIndex(2), 77);
        assert_eq!(drawn, won(&roster[2], &prizes[0], 77));
    }

    #[test]
    fn redraw_removes_only_the_head() {
        let roster = abc();
        let gold = prize(1, "Gold", 2);
        let prizes = vec![gold.clone()];
        let mut history = vec![won(&roster[1], &gold, 2), won(&roster[0], &gold, 1)];

        let voided = redraw(&mut history).unwrap();
        assert_eq!(voided.participant, roster[1]);
        assert_eq!(history, vec![won(&roster[0], &gold, 1)]);

        let target = current_target(&prizes, &history).unwrap();
        assert_eq!((target.prize.id, target.winner_number), (1, 2));
    }

    #[test]
    fn redraw_on_empty_history_does_nothing() {
        let mut history = Vec::new();
        assert_eq!(redraw(&mut history), None);
        assert!(history.is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let roster = abc();
        let gold = prize(1, "Gold", 2);
        let mut history = vec![won(&roster[1], &gold, 2), won(&roster[0], &gold, 1)];
        assert_eq!(reset_history(&mut history), 2);
        assert!(history.is_empty());
    }
}
