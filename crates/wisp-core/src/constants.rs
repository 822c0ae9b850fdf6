//! Protocol constants. All monetary values in motes (1 ECTO = 10^8 motes).

pub const ECTO: u64 = 100_000_000;

/// Price of one unopened portal.
pub const PORTAL_PRICE: u64 = 100 * ECTO;

/// Number of trait axes on every wisp.
pub const NUM_TRAITS: usize = 6;

/// Candidate wisps revealed by an opened portal.
pub const PORTAL_CANDIDATES: usize = 10;

/// Fixed length of the equipped-wearables array.
pub const EQUIP_SLOTS: usize = 16;

/// Exclusive upper bound for generated trait values (traits land in `0..TRAIT_RANGE`).
pub const TRAIT_RANGE: i16 = 100;

/// Neutral midpoint of the trait scale; rarity is scored as deviation from it.
pub const TRAIT_MIDPOINT: i16 = 50;

/// Wall-clock cooldown between randomness fulfillments (18 hours).
pub const DRAW_COOLDOWN_SECS: u64 = 18 * 3600;

/// Maximum length of a claimed wisp's display name.
pub const MAX_NAME_LENGTH: usize = 25;

/// Fixed-point denominator for collateral conversion rates.
///
/// A conversion rate of 100 means one unit of collateral backs exactly one
/// mote of guaranteed value; 500 means one unit backs five.
pub const CONVERSION_RATE_PRECISION: u64 = 100;

/// Capacity of the genesis haunt opened when the engine boots.
pub const FIRST_HAUNT_CAPACITY: u64 = 10_000;

/// Guaranteed minimum collateral value of the genesis haunt.
pub const FIRST_HAUNT_GUARANTEED_VALUE: u64 = 100 * ECTO;

pub const SECS_PER_DAY: u64 = 86_400;

/// Kinship score of a freshly claimed wisp.
pub const KINSHIP_BASELINE: u64 = 50;

/// Maximum idle gap that preserves an interaction streak (one day).
///
/// An interaction within the window extends the streak; a longer gap resets
/// it, and the streak bonus stops counting at evaluation time even before
/// the next interaction.
pub const KINSHIP_STREAK_WINDOW_SECS: u64 = SECS_PER_DAY;

/// Kinship points lost per full day without interaction.
pub const KINSHIP_DECAY_PER_DAY: u64 = 1;

/// Ceiling on the streak bonus component of the kinship score.
pub const KINSHIP_STREAK_BONUS_CAP: u64 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portal_price_is_one_hundred_ecto() {
        assert_eq!(PORTAL_PRICE, 100 * ECTO);
    }

    #[test]
    fn cooldown_is_eighteen_hours() {
        assert_eq!(DRAW_COOLDOWN_SECS, 64_800);
    }

    #[test]
    fn streak_window_fits_one_day() {
        assert_eq!(KINSHIP_STREAK_WINDOW_SECS, SECS_PER_DAY);
    }

    #[test]
    fn genesis_haunt_affords_its_guarantee() {
        // Every portal purchase covers the guaranteed collateral value.
        assert!(PORTAL_PRICE >= FIRST_HAUNT_GUARANTEED_VALUE);
    }
}
