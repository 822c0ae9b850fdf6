//! The engine façade owning the store and the collaborator seams.

use std::sync::Arc;

use tracing::info;

use wisp_core::bank::TokenLedger;
use wisp_core::error::WispError;
use wisp_core::traits::{Clock, KinshipCurve};
use wisp_core::types::{
    AccountId, CollateralKind, HauntGeneration, OracleInfo, WearableKind, Wisp, WispId,
};
use wisp_kinship::KinshipEngine;

use crate::config::EngineConfig;
use crate::store::Store;
use crate::{registry, wearables};

/// The Wisp domain engine.
///
/// Owns the process-wide [`Store`] plus handles to its collaborators: the
/// hosting balance ledger, the time source, and the kinship curve. Every
/// public operation takes `&mut self` and is serialized by the host; the
/// engine performs no internal locking.
pub struct WispEngine {
    pub(crate) config: EngineConfig,
    pub(crate) store: Store,
    pub(crate) bank: Box<dyn TokenLedger>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) curve: Box<dyn KinshipCurve>,
}

impl WispEngine {
    /// Create an engine seeded with the default collateral registry, the
    /// default wearable catalog, and the genesis haunt.
    pub fn new(config: EngineConfig, bank: Box<dyn TokenLedger>, clock: Arc<dyn Clock>) -> Self {
        let mut store = Store {
            collaterals: registry::default_collaterals(),
            wearables: wearables::default_wearables(),
            ..Store::default()
        };
        store.haunts.push(HauntGeneration {
            id: Default::default(),
            capacity: config.genesis_haunt_capacity,
            guaranteed_value: config.genesis_haunt_guaranteed_value,
            populated: 0,
        });
        info!(
            capacity = config.genesis_haunt_capacity,
            collaterals = store.collaterals.len(),
            wearables = store.wearables.len(),
            "engine initialized"
        );
        Self {
            config,
            store,
            bank,
            clock,
            curve: Box::new(KinshipEngine::new()),
        }
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read access to the hosting balance ledger.
    pub fn bank(&self) -> &dyn TokenLedger {
        self.bank.as_ref()
    }

    /// Look up a wisp by id.
    pub fn wisp(&self, id: WispId) -> Result<&Wisp, WispError> {
        self.store.wisp(id)
    }

    /// Ids of every portal and wisp owned by `account`, ascending.
    ///
    /// Destroyed wisps are excluded; they are out of circulation.
    pub fn wisps_of_owner(&self, account: &AccountId) -> Vec<WispId> {
        self.store
            .wisps
            .values()
            .filter(|w| w.owner == *account && !w.status.is_terminal())
            .map(|w| w.id)
            .collect()
    }

    /// The whole collateral registry, indexed by `CollateralId`.
    pub fn collaterals(&self) -> &[CollateralKind] {
        &self.store.collaterals
    }

    /// The whole wearable catalog, indexed by `WearableId`.
    pub fn wearable_kinds(&self) -> &[WearableKind] {
        &self.store.wearables
    }

    /// Snapshot of the randomness oracle's bookkeeping.
    pub fn oracle_info(&self) -> OracleInfo {
        let oracle = &self.store.oracle;
        OracleInfo {
            batch: oracle.batch,
            batch_count: oracle.batch_count,
            outstanding: oracle.pending.as_ref().map(|p| p.token),
            last_fulfillment: oracle.last_fulfillment,
        }
    }

    pub(crate) fn now(&self) -> u64 {
        self.clock.now_secs()
    }
}
