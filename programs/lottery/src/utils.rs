use anchor_lang::prelude::*;
use solana_sha256_hasher::hashv;

use crate::errors::LotteryError;

// -----------------
// Seeds
// -----------------
pub const CONFIG_SEED: &[u8] = b"lottery_config_v1";
pub const LOTTERY_SEED: &[u8] = b"lottery_v1";
pub const POT_VAULT_SEED: &[u8] = b"pot_vault_v1";

// -------------------------
// Randomness
// -------------------------

/// Source of uniform draws used by winner selection.
pub trait RandomSource {
    /// Uniform value in `[0, bound)`. Callers never pass `bound == 0`.
    fn next_below(&mut self, bound: u64) -> u64;
}

/// Deterministic stream of sha256 words derived from a 32-byte seed.
pub struct HashStream {
    seed: [u8; 32],
    counter: u64,
}

impl HashStream {
    pub fn new(seed: [u8; 32]) -> Self {
        Self { seed, counter: 0 }
    }

    fn next_word(&mut self) -> u64 {
        let h = hashv(&[
            b"draw".as_ref(),
            self.seed.as_ref(),
            self.counter.to_le_bytes().as_ref(),
        ])
        .to_bytes();
        self.counter = self.counter.wrapping_add(1);

        let mut word = [0u8; 8];
        word.copy_from_slice(&h[..8]);
        u64::from_le_bytes(word)
    }
}

impl RandomSource for HashStream {
    fn next_below(&mut self, bound: u64) -> u64 {
        // 2^64 mod bound; words in the short tail are redrawn so every
        // residue is equally likely
        let tail = (u64::MAX % bound).wrapping_add(1) % bound;
        loop {
            let word = self.next_word();
            if tail == 0 || word < 0u64.wrapping_sub(tail) {
                return word % bound;
            }
        }
    }
}

/// Seed for the draw that ends `lottery_id`.
pub fn draw_seed(
    program_id: &Pubkey,
    lottery_id: u64,
    slot: u64,
    recent_slot_hash: &[u8; 32],
    entries: u64,
) -> [u8; 32] {
    hashv(&[
        b"lottery-draw".as_ref(),
        program_id.as_ref(),
        lottery_id.to_le_bytes().as_ref(),
        slot.to_le_bytes().as_ref(),
        recent_slot_hash.as_ref(),
        entries.to_le_bytes().as_ref(),
    ])
    .to_bytes()
}

/// Most recent hash from raw SlotHashes sysvar data.
///
/// Layout: `[len: u64][(slot: u64, hash: [u8; 32]); len]`, newest first.
/// Only the head is read; the sysvar is too large to deserialize on chain.
pub fn most_recent_slot_hash(data: &[u8]) -> Result<[u8; 32]> {
    require!(data.len() >= 48, LotteryError::RandomnessUnavailable);

    let mut len = [0u8; 8];
    len.copy_from_slice(&data[..8]);
    require!(u64::from_le_bytes(len) > 0, LotteryError::RandomnessUnavailable);

    let mut hash = [0u8; 32];
    hash.copy_from_slice(&data[16..48]);
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_stream_is_deterministic_per_seed() {
        let mut a = HashStream::new([7u8; 32]);
        let mut b = HashStream::new([7u8; 32]);
        let mut c = HashStream::new([8u8; 32]);

        let xs: Vec<u64> = (0..16).map(|_| a.next_below(1_000)).collect();
        let ys: Vec<u64> = (0..16).map(|_| b.next_below(1_000)).collect();
        let zs: Vec<u64> = (0..16).map(|_| c.next_below(1_000)).collect();

        assert_eq!(xs, ys);
        assert_ne!(xs, zs);
    }

    #[test]
    fn hash_stream_stays_in_bounds() {
        let mut stream = HashStream::new([1u8; 32]);
        for bound in [1u64, 2, 3, 7, 64, u64::MAX] {
            for _ in 0..50 {
                assert!(stream.next_below(bound) < bound);
            }
        }
        assert_eq!(stream.next_below(1), 0);
    }

    #[test]
    fn hash_stream_spreads_draws_evenly() {
        let mut stream = HashStream::new([42u8; 32]);
        let mut counts = [0u32; 3];
        for _ in 0..3_000 {
            counts[stream.next_below(3) as usize] += 1;
        }
        for count in counts {
            assert!((850..=1_150).contains(&count), "skewed draw counts: {counts:?}");
        }
    }

    #[test]
    fn draw_seed_binds_every_input() {
        let program = Pubkey::new_unique();
        let hash = [3u8; 32];
        let base = draw_seed(&program, 1, 100, &hash, 3);

        assert_eq!(base, draw_seed(&program, 1, 100, &hash, 3));
        assert_ne!(base, draw_seed(&program, 2, 100, &hash, 3));
        assert_ne!(base, draw_seed(&program, 1, 101, &hash, 3));
        assert_ne!(base, draw_seed(&program, 1, 100, &[4u8; 32], 3));
        assert_ne!(base, draw_seed(&program, 1, 100, &hash, 4));
        assert_ne!(base, draw_seed(&Pubkey::new_unique(), 1, 100, &hash, 3));
    }

    #[test]
    fn most_recent_slot_hash_reads_head_entry() {
        let mut data = Vec::new();
        data.extend_from_slice(&2u64.to_le_bytes());
        data.extend_from_slice(&99u64.to_le_bytes());
        data.extend_from_slice(&[5u8; 32]);
        data.extend_from_slice(&98u64.to_le_bytes());
        data.extend_from_slice(&[6u8; 32]);

        assert_eq!(most_recent_slot_hash(&data).unwrap(), [5u8; 32]);
    }

    #[test]
    fn most_recent_slot_hash_rejects_empty_sysvar() {
        let mut data = vec![0u8; 48];
        assert!(most_recent_slot_hash(&data).is_err());

        data.truncate(20);
        assert!(most_recent_slot_hash(&data).is_err());
    }
}
