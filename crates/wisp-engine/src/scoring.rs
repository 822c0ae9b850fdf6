//! Rarity score reads over the live registry and equip state.
//!
//! Thin wrappers around [`wisp_core::rarity`]: the engine contributes only
//! the lookups, so every read reflects the current modifiers and equipment
//! with nothing cached in between.

use wisp_core::error::{PortalError, WispError};
use wisp_core::rarity;
use wisp_core::types::{CollateralId, TraitArray, WispId, WispStatus};

use crate::engine::WispEngine;

impl WispEngine {
    /// Base rarity score of `traits` under a collateral kind's current
    /// modifiers.
    pub fn calculate_base_rarity_score(
        &self,
        traits: &TraitArray,
        collateral: CollateralId,
    ) -> Result<u64, WispError> {
        let kind = self.collateral(collateral)?;
        Ok(rarity::base_rarity_score(traits, &kind.modifiers))
    }

    /// Rarity multiplier of `traits` under a collateral kind's current
    /// modifiers.
    pub fn calculate_rarity_multiplier(
        &self,
        traits: &TraitArray,
        collateral: CollateralId,
    ) -> Result<u64, WispError> {
        let kind = self.collateral(collateral)?;
        Ok(rarity::rarity_multiplier(traits, &kind.modifiers))
    }

    /// Modified rarity score of a claimed wisp: its base score plus every
    /// equipped wearable's flat bonus and trait modifiers.
    pub fn calculate_modified_rarity_score(&self, id: WispId) -> Result<u64, WispError> {
        let wisp = self.store.wisp(id)?;
        let (Some(collateral), WispStatus::Claimed) = (wisp.collateral, wisp.status) else {
            return Err(PortalError::WrongStatus {
                expected: WispStatus::Claimed,
                found: wisp.status,
            }
            .into());
        };
        let kind = self.collateral(collateral)?;
        Ok(rarity::modified_rarity_score(
            &wisp.traits,
            &kind.modifiers,
            &wisp.equipped,
            &self.store.wearables,
        ))
    }
}
