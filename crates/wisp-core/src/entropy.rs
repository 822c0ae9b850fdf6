//! Deterministic expansion of oracle randomness into portal seeds and
//! candidate wisps.
//!
//! One fulfilled randomness value fans out to per-portal seeds; each seed
//! partitions into ten independent sub-seeds, and each sub-seed expands
//! into six bounded traits plus a collateral selection. The expansion is
//! pure: the same seed always reproduces the same ten candidates.

use sha2::{Digest, Sha256};

use crate::constants::{NUM_TRAITS, TRAIT_RANGE};
use crate::types::{BatchId, Randomness, RequestToken, Seed, TraitArray, WispId};

/// Derive a portal's seed from the batch randomness (BLAKE3 of
/// `randomness ‖ portal id`, little-endian).
pub fn portal_seed(randomness: &Randomness, portal: WispId) -> Seed {
    let mut hasher = blake3::Hasher::new();
    hasher.update(randomness.as_bytes());
    hasher.update(&portal.0.to_le_bytes());
    Seed(hasher.finalize().into())
}

/// The raw fields a sub-seed expands into, before registry lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CandidateDraw {
    /// Six trait values, each in `0..TRAIT_RANGE`.
    pub traits: TraitArray,
    /// Unreduced collateral selector; callers take it modulo registry size.
    pub collateral_byte: u8,
}

/// Expand candidate `index` of a portal seed.
///
/// Sub-seed `i` is `BLAKE3(seed ‖ i)`; its first six bytes become the
/// traits (mod [`TRAIT_RANGE`]) and the seventh selects the collateral.
pub fn candidate_draw(seed: &Seed, index: u8) -> CandidateDraw {
    let mut hasher = blake3::Hasher::new();
    hasher.update(seed.as_bytes());
    hasher.update(&[index]);
    let sub: [u8; 32] = hasher.finalize().into();

    let mut traits: TraitArray = [0; NUM_TRAITS];
    for (axis, byte) in sub[..NUM_TRAITS].iter().enumerate() {
        traits[axis] = (*byte as i16) % TRAIT_RANGE;
    }
    CandidateDraw {
        traits,
        collateral_byte: sub[NUM_TRAITS],
    }
}

/// Token size in bytes when serialized for hashing (batch + count + time).
const TOKEN_PREIMAGE_SIZE: usize = 4 + 8 + 8;

/// Derive the opaque token for a randomness request (double SHA-256 over
/// `batch ‖ member count ‖ issue time`, all little-endian).
pub fn request_token(batch: BatchId, count: u64, issued_at: u64) -> RequestToken {
    let mut data = Vec::with_capacity(TOKEN_PREIMAGE_SIZE);
    data.extend_from_slice(&batch.0.to_le_bytes());
    data.extend_from_slice(&count.to_le_bytes());
    data.extend_from_slice(&issued_at.to_le_bytes());
    let first = Sha256::digest(&data);
    RequestToken(Sha256::digest(first).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_randomness() -> Randomness {
        Randomness([0x5A; 32])
    }

    // --- portal seeds ---

    #[test]
    fn portal_seed_deterministic() {
        let r = sample_randomness();
        assert_eq!(portal_seed(&r, WispId(3)), portal_seed(&r, WispId(3)));
    }

    #[test]
    fn portal_seed_differs_per_portal() {
        let r = sample_randomness();
        assert_ne!(portal_seed(&r, WispId(0)), portal_seed(&r, WispId(1)));
    }

    // --- candidate draws ---

    #[test]
    fn candidate_draw_deterministic() {
        let seed = portal_seed(&sample_randomness(), WispId(0));
        assert_eq!(candidate_draw(&seed, 4), candidate_draw(&seed, 4));
    }

    #[test]
    fn candidate_draws_differ_per_index() {
        let seed = portal_seed(&sample_randomness(), WispId(0));
        let draws: Vec<_> = (0..10).map(|i| candidate_draw(&seed, i)).collect();
        // Ten independent sub-seeds: at least two distinct trait arrays.
        assert!(draws.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn traits_are_bounded() {
        let seed = portal_seed(&sample_randomness(), WispId(42));
        for index in 0..10 {
            let draw = candidate_draw(&seed, index);
            for t in draw.traits {
                assert!((0..TRAIT_RANGE).contains(&t), "trait {t} out of range");
            }
        }
    }

    // --- request tokens ---

    #[test]
    fn request_token_deterministic() {
        assert_eq!(
            request_token(BatchId(1), 5, 1_700_000_000),
            request_token(BatchId(1), 5, 1_700_000_000)
        );
    }

    #[test]
    fn request_token_varies_with_inputs() {
        let base = request_token(BatchId(1), 5, 1_700_000_000);
        assert_ne!(base, request_token(BatchId(2), 5, 1_700_000_000));
        assert_ne!(base, request_token(BatchId(1), 6, 1_700_000_000));
        assert_ne!(base, request_token(BatchId(1), 5, 1_700_000_001));
    }

    // --- proptest ---

    proptest! {
        #[test]
        fn all_candidate_traits_in_range(
            bytes in proptest::array::uniform32(any::<u8>()),
            portal in 0u64..1000,
            index in 0u8..10,
        ) {
            let seed = portal_seed(&Randomness(bytes), WispId(portal));
            let draw = candidate_draw(&seed, index);
            for t in draw.traits {
                prop_assert!((0..TRAIT_RANGE).contains(&t));
            }
        }
    }
}
