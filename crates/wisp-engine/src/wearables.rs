//! The wearable equip system: fixed 16-slot geometry, multi-slot items,
//! and catalog minting.
//!
//! Equip and unequip never touch trait or collateral data; they only feed
//! the modified-rarity computation and downstream display.

use tracing::{debug, info};

use wisp_core::constants::EQUIP_SLOTS;
use wisp_core::error::{WearableError, WispError};
use wisp_core::types::{AccountId, WearableId, WearableKind, Wisp, WispId, WispStatus};

use crate::engine::WispEngine;

/// The wearable kinds every engine boots with.
///
/// Id 0 is the reserved empty-slot marker: nothing can be equipped or
/// minted as kind 0.
pub fn default_wearables() -> Vec<WearableKind> {
    let kind = |name: &str,
                allowed_slots: u16,
                companion_slots: Vec<u8>,
                trait_modifiers: [i16; 6],
                rarity_bonus: i16,
                max_quantity: u64| WearableKind {
        name: name.to_string(),
        allowed_slots,
        companion_slots,
        trait_modifiers,
        rarity_bonus,
        max_quantity,
        minted: 0,
    };
    vec![
        kind("The Void", 0, vec![], [0; 6], 0, 0),
        kind("Grave Lantern", 1 << 3, vec![], [1, 0, 0, 0, 0, 0], 4, 100),
        kind("Twin Mittens", 1 << 9, vec![0, 1], [0, 1, 0, 0, 0, 1], 7, 50),
        kind("Tattered Cloak", (1 << 4) | (1 << 5), vec![], [0, 0, 2, 0, 0, 0], 2, 200),
        kind("Ember Crown", 1 << 0, vec![], [0, 0, 0, 0, 3, -1], 10, 25),
        kind("Whisper Bell", 1 << 7, vec![], [0, -1, 0, 1, 0, 0], 1, 500),
    ]
}

impl WispEngine {
    /// Mint `quantity` items of a wearable kind.
    ///
    /// Per-account balances live with the hosting token ledger; the engine
    /// tracks only each kind's running minted count against its ceiling.
    ///
    /// # Errors
    ///
    /// - [`WearableError::UnknownWearable`]
    /// - [`WearableError::QuantityExceeded`] past the kind's ceiling
    pub fn mint_wearables(&mut self, id: WearableId, quantity: u64) -> Result<(), WispError> {
        if id.is_none() {
            return Err(WearableError::UnknownWearable(id).into());
        }
        let kind = self
            .store
            .wearables
            .get_mut(id.0 as usize)
            .ok_or(WearableError::UnknownWearable(id))?;
        let minted = kind.minted.saturating_add(quantity);
        if minted > kind.max_quantity {
            return Err(WearableError::QuantityExceeded {
                minted: kind.minted,
                requested: quantity,
                max: kind.max_quantity,
            }
            .into());
        }
        kind.minted = minted;
        info!(wearable = %id, quantity, "wearables minted");
        Ok(())
    }

    /// Equip wearables onto a claimed wisp, one `(item, slot)` pair at a
    /// time, in order.
    ///
    /// A multi-slot item occupies its companion slots along with the chosen
    /// slot, atomically; anything previously occupying a covered slot is
    /// evicted whole. All pairs are validated before the first write.
    ///
    /// # Errors
    ///
    /// - [`WearableError::LengthMismatch`] if the arrays differ in length
    /// - [`WearableError::NotClaimed`] / [`WearableError::NotOwner`]
    /// - [`WearableError::UnknownWearable`]
    /// - [`WearableError::InvalidSlot`] if a kind does not permit its slot
    pub fn equip_wearables(
        &mut self,
        caller: AccountId,
        id: WispId,
        items: &[WearableId],
        slots: &[u8],
    ) -> Result<(), WispError> {
        if items.len() != slots.len() {
            return Err(WearableError::LengthMismatch {
                items: items.len(),
                slots: slots.len(),
            }
            .into());
        }
        self.claimed_wearer(caller, id)?;
        for (&item, &slot) in items.iter().zip(slots) {
            let kind = self.wearable_kind(item)?;
            if !kind.allows_slot(slot) {
                return Err(WearableError::InvalidSlot {
                    wearable: item,
                    slot,
                }
                .into());
            }
        }

        for (&item, &slot) in items.iter().zip(slots) {
            let covered = self.store.wearables[item.0 as usize].occupied_slots(slot);
            if let Some(wisp) = self.store.wisps.get_mut(&id) {
                for &s in &covered {
                    evict_covering(&mut wisp.equipped, &self.store.wearables, s);
                }
                for &s in &covered {
                    wisp.equipped[s as usize] = item;
                }
            }
            debug!(wisp = %id, wearable = %item, slot, "wearable equipped");
        }
        Ok(())
    }

    /// Clear the given slots (and any multi-slot companions) back to empty.
    ///
    /// # Errors
    ///
    /// - [`WearableError::NotClaimed`] / [`WearableError::NotOwner`]
    /// - [`WearableError::InvalidSlot`] for slot indices past the array
    pub fn unequip_wearables(
        &mut self,
        caller: AccountId,
        id: WispId,
        slots: &[u8],
    ) -> Result<(), WispError> {
        self.claimed_wearer(caller, id)?;
        for &slot in slots {
            if slot as usize >= EQUIP_SLOTS {
                return Err(WearableError::InvalidSlot {
                    wearable: WearableId::NONE,
                    slot,
                }
                .into());
            }
        }
        if let Some(wisp) = self.store.wisps.get_mut(&id) {
            for &slot in slots {
                evict_covering(&mut wisp.equipped, &self.store.wearables, slot);
            }
        }
        debug!(wisp = %id, slots = slots.len(), "wearables unequipped");
        Ok(())
    }

    /// The full 16-length equip array of a wisp.
    pub fn equipped_wearables(&self, id: WispId) -> Result<[WearableId; EQUIP_SLOTS], WispError> {
        Ok(self.store.wisp(id)?.equipped)
    }

    /// A wearable kind by id, rejecting the reserved empty marker.
    fn wearable_kind(&self, id: WearableId) -> Result<&WearableKind, WispError> {
        if id.is_none() {
            return Err(WearableError::UnknownWearable(id).into());
        }
        self.store
            .wearables
            .get(id.0 as usize)
            .ok_or_else(|| WearableError::UnknownWearable(id).into())
    }

    /// Equip precondition: the wisp exists, is claimed, and `caller` owns it.
    fn claimed_wearer(&self, caller: AccountId, id: WispId) -> Result<&Wisp, WispError> {
        let wisp = self.store.wisp(id)?;
        if wisp.status != WispStatus::Claimed {
            return Err(WearableError::NotClaimed(wisp.status).into());
        }
        if wisp.owner != caller {
            return Err(WearableError::NotOwner(id).into());
        }
        Ok(wisp)
    }
}

/// Evict whatever occupies `slot`, whole.
///
/// A single-slot occupant clears just this slot; a multi-slot occupant is
/// removed from every slot it covers so no partial occupancy survives.
fn evict_covering(equipped: &mut [WearableId; EQUIP_SLOTS], catalog: &[WearableKind], slot: u8) {
    let occupant = equipped[slot as usize];
    if occupant.is_none() {
        return;
    }
    let multi = catalog
        .get(occupant.0 as usize)
        .is_some_and(|kind| !kind.companion_slots.is_empty());
    if multi {
        for s in equipped.iter_mut() {
            if *s == occupant {
                *s = WearableId::NONE;
            }
        }
    } else {
        equipped[slot as usize] = WearableId::NONE;
    }
}
