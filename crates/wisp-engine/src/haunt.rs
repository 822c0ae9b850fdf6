//! Haunt issuance: capacity-bounded generations of portals.

use tracing::info;

use wisp_core::error::{HauntError, WispError};
use wisp_core::types::{AccountId, HauntGeneration, HauntId};

use crate::engine::WispEngine;

impl WispEngine {
    /// The active issuance generation.
    pub fn current_haunt(&self) -> &HauntGeneration {
        self.store.current_haunt()
    }

    /// A haunt by id, if it was ever opened.
    pub fn haunt(&self, id: HauntId) -> Option<&HauntGeneration> {
        self.store.haunts.get(id.0 as usize)
    }

    /// Open generation N+1.
    ///
    /// All subsequent purchases draw against the new generation.
    ///
    /// # Errors
    ///
    /// - [`HauntError::Unauthorized`] unless `caller` is the authority
    /// - [`HauntError::HauntNotFull`] unless the active generation's
    ///   population equals its capacity
    pub fn create_haunt(
        &mut self,
        caller: AccountId,
        capacity: u64,
        guaranteed_value: u64,
    ) -> Result<HauntId, WispError> {
        if caller != self.config.authority {
            return Err(HauntError::Unauthorized.into());
        }
        let current = self.store.current_haunt();
        if !current.is_full() {
            return Err(HauntError::HauntNotFull {
                id: current.id,
                populated: current.populated,
                capacity: current.capacity,
            }
            .into());
        }
        let id = HauntId(current.id.0 + 1);
        self.store.haunts.push(HauntGeneration {
            id,
            capacity,
            guaranteed_value,
            populated: 0,
        });
        info!(haunt = %id, capacity, guaranteed_value, "haunt opened");
        Ok(id)
    }
}
