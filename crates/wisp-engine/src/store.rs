//! The single mutable store behind every engine operation.
//!
//! All entities live here; components reach them only through the engine's
//! operation surface, never by holding references across calls. The store
//! performs id allocation and lookups; domain rules stay in the operation
//! modules.

use std::collections::BTreeMap;

use wisp_core::error::WispError;
use wisp_core::types::{
    BatchId, CollateralKind, HauntGeneration, PendingRequest, WearableKind, Wisp, WispId,
};

/// Randomness-oracle bookkeeping: the accumulating batch and the single
/// outstanding request.
#[derive(Debug, Clone, Default)]
pub struct OracleState {
    /// Batch currently accepting portals.
    pub batch: BatchId,
    /// Portals waiting in the accumulating batch.
    pub batch_count: u64,
    /// The outstanding request, if one is in flight. Never more than one.
    pub pending: Option<PendingRequest>,
    /// Unix seconds of the last successful fulfillment; 0 means never.
    pub last_fulfillment: u64,
}

/// Process-wide ledger of every engine entity.
///
/// Not thread-safe — the owning [`WispEngine`](crate::WispEngine) must be
/// wrapped in one mutual-exclusion boundary by a concurrent host.
#[derive(Debug, Clone, Default)]
pub struct Store {
    /// Portals and wisps by id. Ordered so owner scans are deterministic.
    pub wisps: BTreeMap<WispId, Wisp>,
    /// Collateral registry; `CollateralId` indexes this table.
    pub collaterals: Vec<CollateralKind>,
    /// Wearable catalog; `WearableId` indexes this table (0 reserved).
    pub wearables: Vec<WearableKind>,
    /// All haunts ever opened; the last entry is the active generation.
    pub haunts: Vec<HauntGeneration>,
    /// Next portal id to allocate.
    pub next_wisp: u64,
    pub oracle: OracleState,
}

impl Store {
    /// Look up a wisp by id.
    pub fn wisp(&self, id: WispId) -> Result<&Wisp, WispError> {
        self.wisps.get(&id).ok_or(WispError::UnknownWisp(id))
    }

    /// Look up a wisp by id, mutably.
    pub fn wisp_mut(&mut self, id: WispId) -> Result<&mut Wisp, WispError> {
        self.wisps.get_mut(&id).ok_or(WispError::UnknownWisp(id))
    }

    /// The active (most recently opened) haunt.
    ///
    /// The constructor seeds the genesis haunt, so the list is never empty.
    pub fn current_haunt(&self) -> &HauntGeneration {
        self.haunts.last().unwrap_or_else(|| unreachable!("genesis haunt always present"))
    }

    /// The active haunt, mutably.
    pub fn current_haunt_mut(&mut self) -> &mut HauntGeneration {
        self.haunts.last_mut().unwrap_or_else(|| unreachable!("genesis haunt always present"))
    }

    /// Allocate the next portal id.
    pub fn allocate_wisp_id(&mut self) -> WispId {
        let id = WispId(self.next_wisp);
        self.next_wisp += 1;
        id
    }
}
