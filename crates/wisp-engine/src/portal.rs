//! Portal opening, candidate derivation, and the claim flow.

use tracing::info;

use wisp_core::constants::{MAX_NAME_LENGTH, PORTAL_CANDIDATES};
use wisp_core::entropy;
use wisp_core::error::{PortalError, WispError};
use wisp_core::types::{AccountId, CollateralId, PortalCandidate, Seed, WispId, WispStatus};

use crate::engine::WispEngine;

impl WispEngine {
    /// Open portals whose batch randomness has been fulfilled.
    ///
    /// All-or-nothing across `ids`: either every portal transitions to
    /// `Opened` or none does.
    ///
    /// # Errors
    ///
    /// - [`PortalError::NoRandomnessYet`] if a portal has no seed
    /// - [`PortalError::WrongStatus`] if a portal is not `InPortal`
    pub fn open_portals(&mut self, ids: &[WispId]) -> Result<(), WispError> {
        for &id in ids {
            let portal = self.store.wisp(id)?;
            if portal.seed.is_none() {
                return Err(PortalError::NoRandomnessYet(id).into());
            }
            if portal.status != WispStatus::InPortal {
                return Err(PortalError::WrongStatus {
                    expected: WispStatus::InPortal,
                    found: portal.status,
                }
                .into());
            }
        }
        for &id in ids {
            if let Some(portal) = self.store.wisps.get_mut(&id) {
                portal.status = WispStatus::Opened;
            }
        }
        info!(portals = ids.len(), "portals opened");
        Ok(())
    }

    /// The ten candidate wisps of an opened portal.
    ///
    /// Pure recomputation from the stored seed; nothing is persisted.
    ///
    /// # Errors
    ///
    /// - [`PortalError::WrongStatus`] unless the portal is `Opened`
    pub fn portal_candidates(&self, id: WispId) -> Result<Vec<PortalCandidate>, WispError> {
        let portal = self.store.wisp(id)?;
        if portal.status != WispStatus::Opened {
            return Err(PortalError::WrongStatus {
                expected: WispStatus::Opened,
                found: portal.status,
            }
            .into());
        }
        let seed = portal.seed.ok_or(PortalError::NoRandomnessYet(id))?;
        let guaranteed = self
            .haunt(portal.haunt)
            .map(|h| h.guaranteed_value)
            .unwrap_or(0);

        Ok((0..PORTAL_CANDIDATES as u8)
            .map(|index| self.derive_candidate(&seed, index, guaranteed))
            .collect())
    }

    /// Claim candidate `index` of an opened portal, staking `stake` motes.
    ///
    /// The portal materializes into a claimed wisp carrying the candidate's
    /// traits and collateral kind; the portal ceases to exist as a distinct
    /// entity.
    ///
    /// # Errors
    ///
    /// - [`PortalError::NotOwner`] unless `caller` owns the portal
    /// - [`PortalError::WrongStatus`] unless the portal is `Opened`
    /// - [`PortalError::IndexOutOfRange`] if `index >= 10`
    /// - [`PortalError::StakeBelowMinimum`] if `stake` is under the
    ///   candidate's minimum
    /// - [`BankError::InsufficientFunds`](wisp_core::error::BankError) if
    ///   the caller cannot fund the stake
    pub fn claim_from_portal(
        &mut self,
        caller: AccountId,
        id: WispId,
        index: u8,
        stake: u64,
    ) -> Result<(), WispError> {
        let portal = self.store.wisp(id)?;
        if portal.owner != caller {
            return Err(PortalError::NotOwner(id).into());
        }
        if portal.status != WispStatus::Opened {
            return Err(PortalError::WrongStatus {
                expected: WispStatus::Opened,
                found: portal.status,
            }
            .into());
        }
        if index as usize >= PORTAL_CANDIDATES {
            return Err(PortalError::IndexOutOfRange {
                index,
                len: PORTAL_CANDIDATES,
            }
            .into());
        }
        let seed = portal.seed.ok_or(PortalError::NoRandomnessYet(id))?;
        let guaranteed = self
            .haunt(portal.haunt)
            .map(|h| h.guaranteed_value)
            .unwrap_or(0);
        let candidate = self.derive_candidate(&seed, index, guaranteed);
        if stake < candidate.minimum_stake {
            return Err(PortalError::StakeBelowMinimum {
                stake,
                minimum: candidate.minimum_stake,
            }
            .into());
        }

        self.bank.debit(&caller, stake)?;

        let now = self.clock.now_secs();
        if let Some(wisp) = self.store.wisps.get_mut(&id) {
            wisp.status = WispStatus::Claimed;
            wisp.collateral = Some(candidate.collateral);
            wisp.traits = candidate.traits;
            wisp.minimum_stake = candidate.minimum_stake;
            wisp.staked = stake;
            wisp.last_interaction = now;
            wisp.interaction_count = 0;
            wisp.streak = 0;
        }
        info!(wisp = %id, candidate = index, stake, "wisp claimed");
        Ok(())
    }

    /// Set a claimed wisp's display name.
    ///
    /// # Errors
    ///
    /// - [`PortalError::NotOwner`] unless `caller` owns the wisp
    /// - [`PortalError::WrongStatus`] unless the wisp is `Claimed`
    /// - [`PortalError::NameTooLong`] past [`MAX_NAME_LENGTH`] characters
    pub fn set_name(&mut self, caller: AccountId, id: WispId, name: &str) -> Result<(), WispError> {
        let wisp = self.store.wisp(id)?;
        if wisp.owner != caller {
            return Err(PortalError::NotOwner(id).into());
        }
        if wisp.status != WispStatus::Claimed {
            return Err(PortalError::WrongStatus {
                expected: WispStatus::Claimed,
                found: wisp.status,
            }
            .into());
        }
        let len = name.chars().count();
        if len > MAX_NAME_LENGTH {
            return Err(PortalError::NameTooLong {
                len,
                max: MAX_NAME_LENGTH,
            }
            .into());
        }
        if let Some(wisp) = self.store.wisps.get_mut(&id) {
            wisp.name = name.to_string();
        }
        Ok(())
    }

    /// Expand one candidate from a portal seed against the current registry.
    fn derive_candidate(&self, seed: &Seed, index: u8, guaranteed_value: u64) -> PortalCandidate {
        let draw = entropy::candidate_draw(seed, index);
        let kinds = self.store.collaterals.len().max(1);
        let collateral = CollateralId(draw.collateral_byte as u32 % kinds as u32);
        let minimum_stake = self
            .store
            .collaterals
            .get(collateral.0 as usize)
            .map(|kind| kind.minimum_stake(guaranteed_value))
            .unwrap_or(guaranteed_value);
        PortalCandidate {
            index,
            traits: draw.traits,
            collateral,
            minimum_stake,
        }
    }
}
