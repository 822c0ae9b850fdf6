//! Engine configuration.
//!
//! Provides [`EngineConfig`] with protocol defaults for pricing, the draw
//! cooldown, and the genesis haunt. The configuration is fixed at engine
//! construction; only the registry remains mutable afterwards (by the
//! authority).

use wisp_core::constants::{
    DRAW_COOLDOWN_SECS, FIRST_HAUNT_CAPACITY, FIRST_HAUNT_GUARANTEED_VALUE, PORTAL_PRICE,
};
use wisp_core::types::AccountId;

/// Configuration for a Wisp engine instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Account allowed to mutate the collateral registry and open haunts.
    pub authority: AccountId,
    /// Price of one portal in motes.
    pub portal_price: u64,
    /// Minimum wall-clock gap between randomness fulfillments.
    pub draw_cooldown_secs: u64,
    /// Capacity of the genesis haunt opened at construction.
    pub genesis_haunt_capacity: u64,
    /// Guaranteed collateral value of the genesis haunt, in motes.
    pub genesis_haunt_guaranteed_value: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            authority: AccountId::default(),
            portal_price: PORTAL_PRICE,
            draw_cooldown_secs: DRAW_COOLDOWN_SECS,
            genesis_haunt_capacity: FIRST_HAUNT_CAPACITY,
            genesis_haunt_guaranteed_value: FIRST_HAUNT_GUARANTEED_VALUE,
        }
    }
}
