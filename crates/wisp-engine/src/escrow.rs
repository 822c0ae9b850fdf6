//! Collateral escrow: stake increases, decreases, and destruction.
//!
//! Every operation is atomic: the ledger transfer and the wisp mutation
//! happen together or not at all.

use tracing::info;

use wisp_core::error::{EscrowError, WispError};
use wisp_core::types::{AccountId, Wisp, WispId, WispStatus};

use crate::engine::WispEngine;

impl WispEngine {
    /// Stake additional collateral behind a claimed wisp. No upper bound.
    ///
    /// # Errors
    ///
    /// - [`EscrowError::NotClaimed`] / [`EscrowError::NotOwner`]
    /// - [`BankError::InsufficientFunds`](wisp_core::error::BankError) if
    ///   the owner cannot fund the increase
    pub fn increase_stake(
        &mut self,
        caller: AccountId,
        id: WispId,
        amount: u64,
    ) -> Result<(), WispError> {
        self.claimed_owned(caller, id)?;
        self.bank.debit(&caller, amount)?;
        if let Some(wisp) = self.store.wisps.get_mut(&id) {
            wisp.staked = wisp.staked.saturating_add(amount);
        }
        info!(wisp = %id, amount, "stake increased");
        Ok(())
    }

    /// Withdraw part of a wisp's stake, never below its minimum.
    ///
    /// # Errors
    ///
    /// - [`EscrowError::BelowMinimumStake`] if the resulting balance would
    ///   drop under the wisp's minimum stake
    pub fn decrease_stake(
        &mut self,
        caller: AccountId,
        id: WispId,
        amount: u64,
    ) -> Result<(), WispError> {
        let wisp = self.claimed_owned(caller, id)?;
        let resulting = wisp.staked.saturating_sub(amount);
        if amount > wisp.staked || resulting < wisp.minimum_stake {
            return Err(EscrowError::BelowMinimumStake {
                resulting,
                minimum: wisp.minimum_stake,
            }
            .into());
        }
        self.bank.credit(&caller, amount);
        if let Some(wisp) = self.store.wisps.get_mut(&id) {
            wisp.staked = resulting;
        }
        info!(wisp = %id, amount, "stake decreased");
        Ok(())
    }

    /// Return the entire stake to the owner and destroy the wisp.
    ///
    /// The transition is terminal: the wisp leaves its haunt's population
    /// and becomes unreachable for staking, equipping, and interaction.
    /// Returns the refunded amount.
    pub fn decrease_and_destroy(
        &mut self,
        caller: AccountId,
        id: WispId,
    ) -> Result<u64, WispError> {
        let wisp = self.claimed_owned(caller, id)?;
        let refund = wisp.staked;
        let haunt = wisp.haunt;
        self.bank.credit(&caller, refund);
        if let Some(wisp) = self.store.wisps.get_mut(&id) {
            wisp.staked = 0;
            wisp.status = WispStatus::Destroyed;
        }
        if let Some(haunt) = self.store.haunts.get_mut(haunt.0 as usize) {
            haunt.populated = haunt.populated.saturating_sub(1);
        }
        info!(wisp = %id, refund, "wisp destroyed");
        Ok(refund)
    }

    /// Escrow precondition: the wisp exists, is claimed, and `caller` owns it.
    fn claimed_owned(&self, caller: AccountId, id: WispId) -> Result<&Wisp, WispError> {
        let wisp = self.store.wisp(id)?;
        if wisp.status != WispStatus::Claimed {
            return Err(EscrowError::NotClaimed(wisp.status).into());
        }
        if wisp.owner != caller {
            return Err(EscrowError::NotOwner(id).into());
        }
        Ok(wisp)
    }
}
