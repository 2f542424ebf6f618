use std::collections::{BTreeMap, BTreeSet};

use anchor_lang::prelude::*;

use crate::{error::LuckyDrawError, state::Participant};

/// Splits pasted text on newlines and commas, trimming every token and
/// dropping the empty ones.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(['\n', '\r', ','])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trims a name and checks it is at most `max_len` bytes long.
pub fn normalize_name(name: &str, max_len: usize) -> Result<String> {
    let name = name.trim();
    require!(!name.is_empty(), LuckyDrawError::EmptyName);
    require!(name.len() <= max_len, LuckyDrawError::NameTooLong);
    Ok(name.to_string())
}

/// Names carried by more than one participant.
pub fn duplicate_names(roster: &[Participant]) -> BTreeSet<&str> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for participant in roster {
        *counts.entry(participant.name.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name)
        .collect()
}

/// Keeps the first participant of every name. Returns how many were dropped.
pub fn dedupe(roster: &mut Vec<Participant>) -> usize {
    let before = roster.len();
    let mut seen = BTreeSet::new();
    roster.retain(|participant| seen.insert(participant.name.clone()));
    before - roster.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::sequencer::tests::person, state::MAX_NAME_LEN};

    #[test]
    fn tokenize_splits_on_newlines_and_commas() {
        let names = tokenize("  Alice, Bob\n\nCarol ,,\r\n Dave  \n");
        assert_eq!(names, ["Alice", "Bob", "Carol", "Dave"]);
    }

    #[test]
    fn tokenize_of_blank_text_is_empty() {
        assert!(tokenize(" \n , \n").is_empty());
    }

    #[test]
    fn names_are_trimmed_and_bounded() {
        assert_eq!(normalize_name("  Gold ", MAX_NAME_LEN).unwrap(), "Gold");
        assert!(normalize_name("   ", usize::MAX).is_err());
        assert!(normalize_name(&"x".repeat(MAX_NAME_LEN + 1), MAX_NAME_LEN).is_err());
        assert!(normalize_name(&"x".repeat(MAX_NAME_LEN), MAX_NAME_LEN).is_ok());
        // Limits count bytes, not characters.
        assert!(normalize_name(&"獎".repeat(11), MAX_NAME_LEN).is_err());
        assert!(normalize_name(&"獎".repeat(11), usize::MAX).is_ok());
    }

    #[test]
    fn duplicates_are_reported_once() {
        let roster = vec![person(1, "Ann"), person(2, "Bo"), person(3, "Ann"), person(4, "Ann")];
        assert_eq!(duplicate_names(&roster).into_iter().collect::<Vec<_>>(), ["Ann"]);
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let mut roster = vec![person(1, "Ann"), person(2, "Bo"), person(3, "Ann")];
        assert_eq!(dedupe(&mut roster), 1);
        assert_eq!(roster, vec![person(1, "Ann"), person(2, "Bo")]);
    }
}
