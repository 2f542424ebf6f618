use anchor_lang::prelude::*;

use crate::{error::LuckyDrawError, state::Participant};

use super::Entropy;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub members: Vec<Participant>,
}

/// Shuffles the whole roster, then slices it into groups of `group_size`.
/// The last group may be smaller. An empty roster yields no groups.
pub fn partition<E: Entropy>(
    roster: &[Participant],
    group_size: usize,
    entropy: &mut E,
) -> Result<Vec<Group>> {
    if roster.is_empty() {
        return Ok(Vec::new());
    }
    require!(
        group_size >= 2 && group_size <= roster.len(),
        LuckyDrawError::InvalidGroupSize
    );

    let mut shuffled = roster.to_vec();
    shuffle(&mut shuffled, entropy);

    Ok(shuffled
        .chunks(group_size)
        .enumerate()
        .map(|(i, members)| Group {
            id: format!("group-{}", i),
            name: format!("Group {}", i + 1),
            members: members.to_vec(),
        })
        .collect())
}

/// Fisher-Yates.
pub fn shuffle<T, E: Entropy>(items: &mut [T], entropy: &mut E) {
    for i in (1..items.len()).rev() {
        let j = entropy.index(i + 1);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{sequencer::tests::person, RngEntropy};
    use rand::{rngs::StdRng, SeedableRng};

    fn roster(n: u32) -> Vec<Participant> {
        (1..=n).map(|id| person(id, &format!("P{}", id))).collect()
    }

    #[test]
    fn seven_by_three_makes_three_groups() {
        let roster = roster(7);
        let groups = partition(&roster, 3, &mut RngEntropy(StdRng::seed_from_u64(7))).unwrap();

        let sizes: Vec<usize> = groups.iter().map(|g| g.members.len()).collect();
        assert_eq!(sizes, [3, 3, 1]);
        assert_eq!(groups[0].id, "group-0");
        assert_eq!(groups[2].name, "Group 3");

        let mut ids: Vec<u32> = groups
            .iter()
            .flat_map(|g| g.members.iter().map(|m| m.id))
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn group_size_must_be_in_range() {
        let roster = roster(4);
        let mut entropy = RngEntropy(StdRng::seed_from_u64(1));
        assert!(partition(&roster, 1, &mut entropy).is_err());
        assert!(partition(&roster, 5, &mut entropy).is_err());
        assert_eq!(partition(&roster, 4, &mut entropy).unwrap().len(), 1);
    }

    #[test]
    fn empty_roster_has_no_groups() {
        let mut entropy = RngEntropy(StdRng::seed_from_u64(1));
        assert!(partition(&[], 3, &mut entropy).unwrap().is_empty());
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut items, &mut RngEntropy(StdRng::seed_from_u64(99)));
        assert_ne!(items, (0..50).collect::<Vec<_>>());
        items.sort_unstable();
        assert_eq!(items, (0..50).collect::<Vec<_>>());
    }
}
