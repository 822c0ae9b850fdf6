//! The randomness batch oracle.
//!
//! Portal purchases accumulate into a batch; one external randomness
//! request per batch covers every member, and the fulfillment fans the
//! derived seeds back out. Two-phase: [`WispEngine::draw_random_number`]
//! registers the request and returns immediately; the matching
//! [`WispEngine::fulfill_randomness`] arrives later as an independent call
//! correlated by the opaque token.
//!
//! The member list is frozen at draw time: portals purchased while a
//! request is in flight stay in the accumulating count and roll over into
//! the next batch at fulfillment, so a fulfillment always applies to
//! exactly the composition its request was issued for.

use tracing::{debug, info};

use wisp_core::entropy;
use wisp_core::error::{OracleError, WispError};
use wisp_core::types::{
    AccountId, PendingRequest, Randomness, RequestToken, Wisp, WispId, WispStatus,
};

use crate::engine::WispEngine;

impl WispEngine {
    /// Purchase portals for `buyer`, spending `amount` motes.
    ///
    /// Mints `amount / portal_price` portals under the active haunt. Each
    /// portal either joins the accumulating randomness batch now
    /// (`join_batch`) or stays unassigned until [`set_batch_id`](Self::set_batch_id).
    ///
    /// # Errors
    ///
    /// - [`OracleError::InsufficientFunds`] if `amount` is below the price
    /// - [`OracleError::CapacityExceeded`] if the purchase would overflow
    ///   the active haunt
    /// - [`BankError::InsufficientFunds`](wisp_core::error::BankError) if
    ///   the buyer's ledger balance cannot cover the purchase
    pub fn buy_portals(
        &mut self,
        buyer: AccountId,
        amount: u64,
        join_batch: bool,
    ) -> Result<Vec<WispId>, WispError> {
        let price = self.config.portal_price;
        if amount < price {
            return Err(OracleError::InsufficientFunds {
                offered: amount,
                price,
            }
            .into());
        }
        let count = amount / price;
        let remaining = self.store.current_haunt().remaining();
        if count > remaining {
            return Err(OracleError::CapacityExceeded {
                requested: count,
                remaining,
            }
            .into());
        }

        self.bank.debit(&buyer, count * price)?;

        let haunt = self.store.current_haunt().id;
        let batch = self.store.oracle.batch;
        let mut ids = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let id = self.store.allocate_wisp_id();
            let mut portal = Wisp::new_portal(id, buyer, haunt);
            if join_batch {
                portal.batch = Some(batch);
            }
            self.store.wisps.insert(id, portal);
            ids.push(id);
        }
        if join_batch {
            self.store.oracle.batch_count += count;
        }
        self.store.current_haunt_mut().populated += count;

        info!(%buyer, portals = count, join_batch, "portals purchased");
        Ok(ids)
    }

    /// Assign previously unassigned portals to the accumulating batch.
    ///
    /// # Errors
    ///
    /// - [`OracleError::NotOwner`] unless `caller` owns every portal
    /// - [`OracleError::BatchAlreadySet`] if any portal is already assigned
    pub fn set_batch_id(&mut self, caller: AccountId, ids: &[WispId]) -> Result<(), WispError> {
        for &id in ids {
            let portal = self.store.wisp(id)?;
            if portal.owner != caller {
                return Err(OracleError::NotOwner(id).into());
            }
            if portal.batch.is_some() {
                return Err(OracleError::BatchAlreadySet(id).into());
            }
        }
        let batch = self.store.oracle.batch;
        for &id in ids {
            if let Some(portal) = self.store.wisps.get_mut(&id) {
                portal.batch = Some(batch);
            }
        }
        self.store.oracle.batch_count += ids.len() as u64;
        debug!(%batch, portals = ids.len(), "portals joined batch");
        Ok(())
    }

    /// Issue the single randomness request covering the accumulating batch.
    ///
    /// Freezes the batch composition into the request and returns the
    /// opaque token the fulfillment must present. The batch count is
    /// untouched until fulfillment.
    ///
    /// # Errors
    ///
    /// - [`OracleError::EmptyBatch`] if the accumulating count is zero
    /// - [`OracleError::WaitingPeriodActive`] if the cooldown since the
    ///   last fulfillment has not elapsed, or a request is already in
    ///   flight
    pub fn draw_random_number(&mut self) -> Result<RequestToken, WispError> {
        let batch = self.store.oracle.batch;
        let count = self.store.oracle.batch_count;
        if count == 0 {
            return Err(OracleError::EmptyBatch.into());
        }
        let now = self.now();
        if self.store.oracle.pending.is_some() {
            return Err(OracleError::WaitingPeriodActive {
                remaining_secs: self.cooldown_remaining(now),
            }
            .into());
        }
        let remaining_secs = self.cooldown_remaining(now);
        if remaining_secs > 0 {
            return Err(OracleError::WaitingPeriodActive { remaining_secs }.into());
        }

        let members: Vec<WispId> = self
            .store
            .wisps
            .values()
            .filter(|w| w.batch == Some(batch) && w.seed.is_none())
            .map(|w| w.id)
            .collect();
        if members.len() as u64 != count {
            return Err(OracleError::Internal(format!(
                "batch {batch} composition mismatch: {} members, count {count}",
                members.len(),
            ))
            .into());
        }

        let token = entropy::request_token(batch, count, now);
        self.store.oracle.pending = Some(PendingRequest {
            token,
            batch,
            members,
        });
        info!(%batch, count, %token, "randomness requested");
        Ok(token)
    }

    /// Apply an external randomness fulfillment.
    ///
    /// Derives a seed for every member frozen in the request, advances the
    /// accumulating batch (late joiners roll over), and starts the next
    /// cooldown. Unknown or duplicate tokens are rejected without effect.
    ///
    /// # Errors
    ///
    /// - [`OracleError::UnknownRequest`] if `token` does not match the
    ///   outstanding request
    /// - [`OracleError::Internal`] if a frozen member no longer has the
    ///   shape it was frozen with (a defect, not a normal error path)
    pub fn fulfill_randomness(
        &mut self,
        token: RequestToken,
        randomness: Randomness,
    ) -> Result<usize, WispError> {
        let pending = match &self.store.oracle.pending {
            Some(p) if p.token == token => p.clone(),
            _ => return Err(OracleError::UnknownRequest(token.to_string()).into()),
        };

        // Validate the frozen composition in full before the first write.
        for &id in &pending.members {
            let portal = self
                .store
                .wisps
                .get(&id)
                .ok_or_else(|| OracleError::Internal(format!("frozen portal {id} missing")))?;
            if portal.status != WispStatus::InPortal
                || portal.seed.is_some()
                || portal.batch != Some(pending.batch)
            {
                return Err(OracleError::Internal(format!(
                    "frozen portal {id} no longer matches batch {}",
                    pending.batch
                ))
                .into());
            }
        }

        for &id in &pending.members {
            if let Some(portal) = self.store.wisps.get_mut(&id) {
                portal.seed = Some(entropy::portal_seed(&randomness, id));
            }
        }

        // Late joiners keep accumulating under the next batch id.
        let next = pending.batch.next();
        for wisp in self.store.wisps.values_mut() {
            if wisp.batch == Some(pending.batch) && wisp.seed.is_none() {
                wisp.batch = Some(next);
            }
        }

        let seeded = pending.members.len();
        let oracle = &mut self.store.oracle;
        oracle.batch = next;
        oracle.batch_count -= seeded as u64;
        oracle.last_fulfillment = self.clock.now_secs();
        oracle.pending = None;

        info!(batch = %pending.batch, seeded, "randomness fulfilled");
        Ok(seeded)
    }

    /// Seconds of cooldown left before a new request may be issued.
    fn cooldown_remaining(&self, now: u64) -> u64 {
        let last = self.store.oracle.last_fulfillment;
        if last == 0 {
            return 0;
        }
        let elapsed = now.saturating_sub(last);
        self.config.draw_cooldown_secs.saturating_sub(elapsed)
    }
}
