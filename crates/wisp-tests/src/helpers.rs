//! Shared test helpers for E2E and integration tests.

use std::sync::Arc;

use parking_lot::Mutex;

use wisp_core::bank::MemoryTokenLedger;
use wisp_core::constants::ECTO;
use wisp_core::traits::ManualClock;
use wisp_core::types::{AccountId, Randomness, WispId};
use wisp_engine::{EngineConfig, WispEngine};

/// Deterministic start time for every test engine.
pub const T0: u64 = 1_700_000_000;

/// The account funded by [`test_engine`].
pub const PLAYER: AccountId = AccountId([0xAA; 20]);

/// The registry/haunt authority of every test engine.
pub const AUTHORITY: AccountId = AccountId([0x01; 20]);

/// Simple account id from a seed byte.
pub fn acct(seed: u8) -> AccountId {
    AccountId([seed; 20])
}

/// Fixed randomness from a seed byte.
pub fn rnd(seed: u8) -> Randomness {
    Randomness([seed; 32])
}

/// An engine on a manual clock with a richly funded player account.
pub fn test_engine() -> (WispEngine, Arc<ManualClock>) {
    test_engine_with(EngineConfig {
        authority: AUTHORITY,
        ..EngineConfig::default()
    })
}

/// An engine with a custom configuration; the player is funded either way.
pub fn test_engine_with(config: EngineConfig) -> (WispEngine, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::starting_at(T0));
    let bank = MemoryTokenLedger::with_balances([(PLAYER, 10_000_000 * ECTO)]);
    let engine = WispEngine::new(config, Box::new(bank), clock.clone());
    (engine, clock)
}

/// Buy `count` portals into the current batch and run one full randomness
/// cycle over them, leaving each portal seeded but unopened.
///
/// Advances the clock past the draw cooldown first, so it can be called
/// repeatedly.
pub fn seeded_portals(
    engine: &mut WispEngine,
    clock: &ManualClock,
    count: u64,
    entropy: u8,
) -> Vec<WispId> {
    clock.advance(engine.config().draw_cooldown_secs);
    let price = engine.config().portal_price;
    let ids = engine.buy_portals(PLAYER, count * price, true).unwrap();
    let token = engine.draw_random_number().unwrap();
    engine.fulfill_randomness(token, rnd(entropy)).unwrap();
    ids
}

/// Run one portal to a claimed wisp (candidate 0, minimum stake).
pub fn claimed_wisp(engine: &mut WispEngine, clock: &ManualClock, entropy: u8) -> WispId {
    let ids = seeded_portals(engine, clock, 1, entropy);
    engine.open_portals(&ids).unwrap();
    let minimum = engine.portal_candidates(ids[0]).unwrap()[0].minimum_stake;
    engine
        .claim_from_portal(PLAYER, ids[0], 0, minimum)
        .unwrap();
    ids[0]
}

/// A shared, serialized engine the way a concurrent host would hold one:
/// a single mutual-exclusion boundary around the whole store.
pub fn shared_engine() -> (Arc<Mutex<WispEngine>>, Arc<ManualClock>) {
    let (engine, clock) = test_engine();
    (Arc::new(Mutex::new(engine)), clock)
}

/// Install a compact tracing subscriber for test runs. Safe to call from
/// every test; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}
