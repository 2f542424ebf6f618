use anchor_lang::prelude::*;
use arrayref::array_ref;

use crate::error::LuckyDrawError;

/// Source of uniform indices for winner selection and shuffling.
pub trait Entropy {
    /// Returns an index in `0..bound`. Callers never pass a zero bound.
    fn index(&mut self, bound: usize) -> usize;
}

// splitmix64 increment
const GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

// 8 (vector length) + 8 (slot) + 32 (hash) for the newest entry
const MIN_SLOT_HASHES_LEN: usize = 8 + 8 + 32;

/// Entropy seeded from the SlotHashes sysvar and the clock.
///
/// The newest block hash is only known once its slot has been produced, so a
/// draw started in one slot and revealed in a later one cannot be predicted
/// when it is started.
pub struct SlotHashEntropy {
    state: u64,
}

impl SlotHashEntropy {
    pub fn from_slot_hashes(data: &[u8], timestamp: i64) -> Result<Self> {
        require!(
            data.len() >= MIN_SLOT_HASHES_LEN,
            LuckyDrawError::InvalidSlotHashesAccount
        );

        let hash_value1 = u64::from_le_bytes(*array_ref![data, 16, 8]);
        let hash_value2 = u64::from_le_bytes(*array_ref![data, 24, 8]);

        let mut state = mix(hash_value1, timestamp as u64);
        state = mix(state, hash_value2);

        Ok(Self { state })
    }
}

impl Entropy for SlotHashEntropy {
    fn index(&mut self, bound: usize) -> usize {
        self.state = mix(self.state, GAMMA);
        unbiased_range(self.state, bound as u64) as usize
    }
}

/// splitmix64 finalizer over the sum of both inputs.
fn mix(a: u64, b: u64) -> u64 {
    let mut z = a.wrapping_add(b);

    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z = z ^ (z >> 31);

    z
}

/// Maps `x` onto `0..range`. `range` must be non-zero.
fn unbiased_range(x: u64, range: u64) -> u64 {
    if range.is_power_of_two() {
        return x & (range - 1);
    }

    // Values at or above the threshold would favour the low end of the range
    let threshold = u64::MAX - (u64::MAX % range);

    let mut value = x;
    const MAX_ATTEMPTS: u8 = 3;

    for i in 0..MAX_ATTEMPTS {
        if value < threshold {
            return value % range;
        }
        value = mix(value, value.wrapping_add(i as u64 + 1));
    }

    value % range
}

/// Entropy backed by any `rand` generator.
#[cfg(not(target_os = "solana"))]
pub struct RngEntropy<R>(pub R);

#[cfg(not(target_os = "solana"))]
impl<R: rand::Rng> Entropy for RngEntropy<R> {
    fn index(&mut self, bound: usize) -> usize {
        self.0.random_range(0..bound)
    }
}
