//! The collateral registry: accepted kinds and their scoring parameters.
//!
//! Registry mutations re-base every future score computation (scores are
//! recomputed on read, never stored) but leave claimed wisps untouched.

use tracing::info;

use wisp_core::constants::NUM_TRAITS;
use wisp_core::error::{RegistryError, WispError};
use wisp_core::types::{AccountId, CollateralId, CollateralKind, TraitModifiers};

use crate::engine::WispEngine;

/// The collateral kinds every engine boots with.
///
/// Kind 0 carries the reference parameters the scoring tests anchor on: a
/// conversion rate of 5.00 and a modifier sum of −1.
pub fn default_collaterals() -> Vec<CollateralKind> {
    let kind = |name: &str, conversion_rate: u64, modifiers: [i16; NUM_TRAITS]| CollateralKind {
        name: name.to_string(),
        conversion_rate,
        modifiers,
    };
    vec![
        kind("DRIP", 500, [0, 0, -1, 0, 0, 0]),
        kind("MIST", 100, [1, 0, 0, 0, 0, 0]),
        kind("FOG", 1_000, [0, 1, 0, -1, 0, 0]),
        kind("BRUME", 200, [0, 0, 1, 0, 0, -1]),
        kind("HAZE", 750, [-1, 0, 0, 0, 1, 0]),
        kind("SHADE", 5_000, [0, -1, 0, 0, 0, 1]),
        kind("GLOOM", 50, [0, 0, 0, 1, -1, 0]),
    ]
}

impl WispEngine {
    /// A collateral kind by id.
    pub fn collateral(&self, id: CollateralId) -> Result<&CollateralKind, WispError> {
        self.store
            .collaterals
            .get(id.0 as usize)
            .ok_or_else(|| RegistryError::UnknownCollateral(id).into())
    }

    /// Replace a kind's six per-axis modifiers.
    ///
    /// Future base-score reads for every wisp of this kind use the new
    /// modifiers immediately; nothing already stored changes.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Unauthorized`] unless `caller` is the authority
    /// - [`RegistryError::UnknownCollateral`]
    pub fn update_collateral_modifiers(
        &mut self,
        caller: AccountId,
        id: CollateralId,
        modifiers: TraitModifiers,
    ) -> Result<(), WispError> {
        if caller != self.config.authority {
            return Err(RegistryError::Unauthorized.into());
        }
        let kind = self
            .store
            .collaterals
            .get_mut(id.0 as usize)
            .ok_or(RegistryError::UnknownCollateral(id))?;
        kind.modifiers = modifiers;
        info!(collateral = %id, "collateral modifiers updated");
        Ok(())
    }

    /// Append a new accepted collateral kind.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Unauthorized`] unless `caller` is the authority
    pub fn add_collateral_kind(
        &mut self,
        caller: AccountId,
        kind: CollateralKind,
    ) -> Result<CollateralId, WispError> {
        if caller != self.config.authority {
            return Err(RegistryError::Unauthorized.into());
        }
        let id = CollateralId(self.store.collaterals.len() as u32);
        info!(collateral = %id, name = %kind.name, "collateral kind added");
        self.store.collaterals.push(kind);
        Ok(id)
    }
}
