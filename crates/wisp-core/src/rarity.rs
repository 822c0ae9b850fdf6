//! Rarity scoring engine.
//!
//! Pure computation — no storage, no IO. All integer-only math. Scores are
//! never cached anywhere: every read recomputes from the current traits,
//! the current collateral modifiers, and the current equip state, so a
//! registry mutation re-bases every future read without touching wisps.

use crate::constants::{NUM_TRAITS, TRAIT_MIDPOINT, TRAIT_RANGE};
use crate::types::{TraitArray, TraitModifiers, WearableId, WearableKind};

/// Rarity contribution of a single trait axis.
///
/// Deviation from the midpoint is rewarded symmetrically: a trait of `t`
/// scores `TRAIT_RANGE - t` below the midpoint and `t + 1` at or above it,
/// so both extremes of an axis are worth 100 and the midpoint is worth 51.
fn axis_score(value: i16) -> i64 {
    if value < TRAIT_MIDPOINT {
        (TRAIT_RANGE - value) as i64
    } else {
        value as i64 + 1
    }
}

/// Base rarity score of six traits under a collateral kind's modifiers.
///
/// Sums the per-axis deviation scores plus the kind's signed per-axis
/// modifiers. Floored at zero. For generator-produced traits (`0..100`)
/// under the default registry this lands in roughly 300–600.
///
/// # Examples
///
/// ```
/// use wisp_core::rarity::base_rarity_score;
///
/// // All-zero traits, modifier sum −1: six axes at 100 each, minus one.
/// let modifiers = [0, 0, -1, 0, 0, 0];
/// assert_eq!(base_rarity_score(&[0; 6], &modifiers), 599);
/// ```
pub fn base_rarity_score(traits: &TraitArray, modifiers: &TraitModifiers) -> u64 {
    let mut score: i64 = 0;
    for axis in 0..NUM_TRAITS {
        score += axis_score(traits[axis]) + modifiers[axis] as i64;
    }
    score.max(0) as u64
}

/// Map a base rarity score to the display/economics multiplier.
///
/// | Score range | Multiplier |
/// |-------------|------------|
/// | 0–479       | 10         |
/// | 480–524     | 25         |
/// | 525–559     | 100        |
/// | 560–579     | 250        |
/// | 580+        | 1000       |
///
/// # Examples
///
/// ```
/// use wisp_core::rarity::score_to_multiplier;
///
/// assert_eq!(score_to_multiplier(306), 10);
/// assert_eq!(score_to_multiplier(480), 25);
/// assert_eq!(score_to_multiplier(599), 1000);
/// ```
pub fn score_to_multiplier(score: u64) -> u64 {
    match score {
        0..=479 => 10,
        480..=524 => 25,
        525..=559 => 100,
        560..=579 => 250,
        _ => 1000,
    }
}

/// Rarity multiplier of six traits under a collateral kind's modifiers.
pub fn rarity_multiplier(traits: &TraitArray, modifiers: &TraitModifiers) -> u64 {
    score_to_multiplier(base_rarity_score(traits, modifiers))
}

/// Score contribution of one equipped wearable: its flat rarity bonus plus
/// the sum of its six trait modifiers.
pub fn wearable_bonus(kind: &WearableKind) -> i64 {
    let trait_sum: i64 = kind.trait_modifiers.iter().map(|&m| m as i64).sum();
    kind.rarity_bonus as i64 + trait_sum
}

/// Total bonus of an equip array against a wearable catalog.
///
/// A multi-slot wearable occupies its companion slots as well as the slot
/// it was equipped into; only the non-companion occurrence counts, so each
/// equipped item contributes exactly once. Unknown ids contribute nothing.
pub fn equipped_bonus(equipped: &[WearableId], catalog: &[WearableKind]) -> i64 {
    let mut bonus = 0i64;
    for (slot, id) in equipped.iter().enumerate() {
        if id.is_none() {
            continue;
        }
        let Some(kind) = catalog.get(id.0 as usize) else {
            continue;
        };
        if kind.companion_slots.contains(&(slot as u8)) {
            continue;
        }
        bonus += wearable_bonus(kind);
    }
    bonus
}

/// Modified rarity score: base score plus every equipped wearable's bonus.
/// Floored at zero.
pub fn modified_rarity_score(
    traits: &TraitArray,
    modifiers: &TraitModifiers,
    equipped: &[WearableId],
    catalog: &[WearableKind],
) -> u64 {
    let base = base_rarity_score(traits, modifiers) as i64;
    (base + equipped_bonus(equipped, catalog)).max(0) as u64
}
