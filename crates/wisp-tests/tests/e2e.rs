//! End-to-end lifecycle tests for the Wisp engine.
//!
//! Each test drives the engine through the public operation surface only:
//! purchase → batch → draw → fulfillment → open → claim → post-claim play
//! (escrow, kinship, wearables), with balances and scores checked at every
//! seam.

use wisp_core::constants::{ECTO, KINSHIP_BASELINE, SECS_PER_DAY};
use wisp_core::rarity;
use wisp_core::types::{CollateralId, WearableId, WispStatus};
use wisp_engine::EngineConfig;
use wisp_tests::helpers::*;

// ======================================================================
// E2E Test 1: The canonical claim path
// Buy one portal for the exact price, join the batch, wait out the
// cooldown, draw, fulfill, open, and claim candidate 4 at its minimum.
// ======================================================================

#[test]
fn e2e_claim_candidate_four_at_minimum_stake() {
    init_tracing();
    let (mut engine, clock) = test_engine();
    let price = engine.config().portal_price;

    let ids = engine.buy_portals(PLAYER, price, true).unwrap();
    assert_eq!(ids.len(), 1);
    assert_eq!(engine.oracle_info().batch_count, 1);

    clock.advance(engine.config().draw_cooldown_secs + 1);
    let token = engine.draw_random_number().unwrap();
    engine.fulfill_randomness(token, rnd(0x77)).unwrap();
    assert_eq!(engine.oracle_info().batch_count, 0);

    let id = ids[0];
    engine.open_portals(&[id]).unwrap();
    assert_eq!(engine.wisp(id).unwrap().status, WispStatus::Opened);

    let candidates = engine.portal_candidates(id).unwrap();
    assert_eq!(candidates.len(), 10);
    let chosen = candidates[4].clone();

    let balance_before = engine.bank().balance(&PLAYER);
    engine
        .claim_from_portal(PLAYER, id, 4, chosen.minimum_stake)
        .unwrap();

    let wisp = engine.wisp(id).unwrap();
    assert_eq!(wisp.status, WispStatus::Claimed);
    assert_eq!(wisp.collateral, Some(chosen.collateral));
    assert_eq!(wisp.traits, chosen.traits);
    assert_eq!(wisp.staked, chosen.minimum_stake);
    assert_eq!(wisp.haunt.0, 0);
    assert_eq!(
        engine.bank().balance(&PLAYER),
        balance_before - chosen.minimum_stake
    );
}

// ======================================================================
// E2E Test 2: Batch bookkeeping across cycles
// Opting out of a batch, joining later, and the count/cooldown dance
// across two full request cycles.
// ======================================================================

#[test]
fn e2e_batch_accounting_across_cycles() {
    let (mut engine, clock) = test_engine();
    let price = engine.config().portal_price;

    let joined = engine.buy_portals(PLAYER, price, true).unwrap();
    assert_eq!(engine.oracle_info().batch_count, 1);

    let loner = engine.buy_portals(PLAYER, price, false).unwrap();
    assert_eq!(engine.oracle_info().batch_count, 1);

    engine.set_batch_id(PLAYER, &loner).unwrap();
    assert_eq!(engine.oracle_info().batch_count, 2);

    let token = engine.draw_random_number().unwrap();
    assert_eq!(engine.oracle_info().batch_count, 2);
    engine.fulfill_randomness(token, rnd(0x10)).unwrap();
    assert_eq!(engine.oracle_info().batch_count, 0);
    assert!(engine.wisp(joined[0]).unwrap().seed.is_some());
    assert!(engine.wisp(loner[0]).unwrap().seed.is_some());

    // Next cycle starts a fresh batch behind the cooldown.
    engine.buy_portals(PLAYER, price, true).unwrap();
    assert!(engine.draw_random_number().is_err());
    clock.advance(engine.config().draw_cooldown_secs);
    let token = engine.draw_random_number().unwrap();
    engine.fulfill_randomness(token, rnd(0x11)).unwrap();
    assert_eq!(engine.oracle_info().batch_count, 0);
}

// ======================================================================
// E2E Test 3: Rarity baseline and registry re-basing
// Neutral traits score 599 under kind 0; a modifier update shifts the
// baseline deterministically and only for that kind.
// ======================================================================

#[test]
fn e2e_rarity_baseline_and_rebase() {
    let (mut engine, _clock) = test_engine();

    for (id, kind) in engine.collaterals().iter().enumerate() {
        let expected =
            600i64 + kind.modifiers.iter().map(|&m| m as i64).sum::<i64>();
        let score = engine
            .calculate_base_rarity_score(&[0; 6], CollateralId(id as u32))
            .unwrap();
        assert_eq!(score as i64, expected, "kind {id} baseline");
    }

    assert_eq!(
        engine
            .calculate_base_rarity_score(&[0; 6], CollateralId(0))
            .unwrap(),
        599
    );
    assert_eq!(
        engine
            .calculate_rarity_multiplier(&[0; 6], CollateralId(0))
            .unwrap(),
        1000
    );

    engine
        .update_collateral_modifiers(AUTHORITY, CollateralId(0), [2, 0, 0, 0, 0, 0])
        .unwrap();
    assert_eq!(
        engine
            .calculate_base_rarity_score(&[0; 6], CollateralId(0))
            .unwrap(),
        602
    );
    // Untouched kinds keep their baselines.
    assert_eq!(
        engine
            .calculate_base_rarity_score(&[0; 6], CollateralId(1))
            .unwrap(),
        601
    );
}

// ======================================================================
// E2E Test 4: Ten candidates, all inside the rarity band
// ======================================================================

#[test]
fn e2e_opened_portal_candidates_score_in_band() {
    let (mut engine, clock) = test_engine();
    let ids = seeded_portals(&mut engine, &clock, 1, 0x2A);
    engine.open_portals(&ids).unwrap();

    let candidates = engine.portal_candidates(ids[0]).unwrap();
    assert_eq!(candidates.len(), 10);
    for candidate in &candidates {
        let score = engine
            .calculate_base_rarity_score(&candidate.traits, candidate.collateral)
            .unwrap();
        assert!(score > 298, "candidate {}: score {score}", candidate.index);
        assert!(score < 602, "candidate {}: score {score}", candidate.index);
    }

    // Reopening the same portal is impossible, but candidates recompute.
    assert_eq!(engine.portal_candidates(ids[0]).unwrap(), candidates);
}

// ======================================================================
// E2E Test 5: Escrow round trip
// Double the stake, withdraw back to the minimum, destroy, and end with
// the opening balance minus only the portal price.
// ======================================================================

#[test]
fn e2e_escrow_round_trip_restores_balance() {
    let (mut engine, clock) = test_engine();
    let opening = engine.bank().balance(&PLAYER);
    let price = engine.config().portal_price;

    let id = claimed_wisp(&mut engine, &clock, 0x33);
    let minimum = engine.wisp(id).unwrap().minimum_stake;
    assert_eq!(engine.bank().balance(&PLAYER), opening - price - minimum);

    engine.increase_stake(PLAYER, id, minimum).unwrap();
    assert_eq!(engine.wisp(id).unwrap().staked, 2 * minimum);

    engine.decrease_stake(PLAYER, id, minimum).unwrap();
    assert_eq!(engine.wisp(id).unwrap().staked, minimum);

    let refund = engine.decrease_and_destroy(PLAYER, id).unwrap();
    assert_eq!(refund, minimum);
    assert_eq!(engine.bank().balance(&PLAYER), opening - price);
    assert_eq!(engine.wisp(id).unwrap().status, WispStatus::Destroyed);
    assert_eq!(engine.current_haunt().populated, 0);
}

// ======================================================================
// E2E Test 6: Wearables change the modified score by exactly their bonus
// ======================================================================

#[test]
fn e2e_wearables_shift_modified_score() {
    let (mut engine, clock) = test_engine();
    let id = claimed_wisp(&mut engine, &clock, 0x44);

    let lantern = WearableId(1);
    let mittens = WearableId(2);
    engine.mint_wearables(lantern, 10).unwrap();
    engine.mint_wearables(mittens, 10).unwrap();

    let original = engine.calculate_modified_rarity_score(id).unwrap();

    engine.equip_wearables(PLAYER, id, &[lantern], &[3]).unwrap();
    let lantern_bonus = rarity::wearable_bonus(&engine.wearable_kinds()[1]);
    assert_eq!(
        engine.calculate_modified_rarity_score(id).unwrap() as i64,
        original as i64 + lantern_bonus
    );

    engine.equip_wearables(PLAYER, id, &[mittens], &[9]).unwrap();
    let equipped = engine.equipped_wearables(id).unwrap();
    assert_eq!(equipped[9], mittens);
    assert_eq!(equipped[0], mittens);
    assert_eq!(equipped[1], mittens);

    let mitten_bonus = rarity::wearable_bonus(&engine.wearable_kinds()[2]);
    assert_eq!(
        engine.calculate_modified_rarity_score(id).unwrap() as i64,
        original as i64 + lantern_bonus + mitten_bonus
    );

    engine.unequip_wearables(PLAYER, id, &[3, 9]).unwrap();
    assert_eq!(engine.calculate_modified_rarity_score(id).unwrap(), original);
    assert!(engine
        .equipped_wearables(id)
        .unwrap()
        .iter()
        .all(|w| w.is_none()));
}

// ======================================================================
// E2E Test 7: Haunt rollover
// A generation must fill before the next opens; purchases then draw
// against the new generation's parameters.
// ======================================================================

#[test]
fn e2e_haunt_rollover_gates_issuance() {
    let (mut engine, _clock) = test_engine_with(EngineConfig {
        authority: AUTHORITY,
        genesis_haunt_capacity: 3,
        ..EngineConfig::default()
    });
    let price = engine.config().portal_price;

    assert!(engine.create_haunt(AUTHORITY, 10, 100 * ECTO).is_err());

    engine.buy_portals(PLAYER, 3 * price, true).unwrap();
    assert!(engine.current_haunt().is_full());
    assert!(engine.buy_portals(PLAYER, price, true).is_err());

    let next = engine.create_haunt(AUTHORITY, 10, 50 * ECTO).unwrap();
    assert_eq!(next.0, 1);

    let ids = engine.buy_portals(PLAYER, price, true).unwrap();
    assert_eq!(engine.wisp(ids[0]).unwrap().haunt, next);
    assert_eq!(engine.current_haunt().guaranteed_value, 50 * ECTO);
}

// ======================================================================
// E2E Test 8: The kinship journey
// A long narrative of bursts and neglect, following the curve exactly.
// ======================================================================

#[test]
fn e2e_kinship_journey() {
    let (mut engine, clock) = test_engine();
    let id = claimed_wisp(&mut engine, &clock, 0x55);

    // Five interactions in one sitting: baseline + count + streak.
    for _ in 0..5 {
        engine.interact(id).unwrap();
    }
    assert_eq!(engine.calculate_kinship(id).unwrap(), 60);

    // Three days of neglect: the streak bonus is gone and decay bites.
    clock.advance(3 * SECS_PER_DAY);
    assert_eq!(engine.calculate_kinship(id).unwrap(), 52);

    // Seventeen days total.
    clock.advance(14 * SECS_PER_DAY);
    assert_eq!(engine.calculate_kinship(id).unwrap(), 38);

    // Thirty-seven days total.
    clock.advance(20 * SECS_PER_DAY);
    assert_eq!(engine.calculate_kinship(id).unwrap(), 18);

    // Coming back: the idle decay resets, the streak restarts at one.
    engine.interact(id).unwrap();
    assert_eq!(
        engine.calculate_kinship(id).unwrap(),
        KINSHIP_BASELINE + 6 + 1
    );

    // A long binge caps the streak bonus.
    for _ in 0..120 {
        engine.interact(id).unwrap();
    }
    assert_eq!(engine.calculate_kinship(id).unwrap(), 50 + 126 + 10);

    // The engine read agrees with the curve evaluated directly.
    use wisp_core::traits::KinshipCurve;
    assert_eq!(
        wisp_kinship::KinshipEngine::new().score(126, 121, 0),
        engine.calculate_kinship(id).unwrap()
    );

    // Four months of neglect in ten-day strides, monotonically down.
    let mut last = engine.calculate_kinship(id).unwrap();
    for _ in 0..12 {
        clock.advance(10 * SECS_PER_DAY);
        let score = engine.calculate_kinship(id).unwrap();
        assert!(score < last);
        last = score;
    }
    assert_eq!(last, 50 + 126 - 120);

    engine.interact(id).unwrap();
    assert_eq!(engine.calculate_kinship(id).unwrap(), 50 + 127 + 1);
}

// ======================================================================
// E2E Test 9: Naming
// ======================================================================

#[test]
fn e2e_naming_a_claimed_wisp() {
    let (mut engine, clock) = test_engine();
    let id = claimed_wisp(&mut engine, &clock, 0x66);

    engine.set_name(PLAYER, id, "Beavis").unwrap();
    assert_eq!(engine.wisp(id).unwrap().name, "Beavis");

    // Renaming is allowed; the cap is on length, not count.
    engine.set_name(PLAYER, id, "Butthead").unwrap();
    assert_eq!(engine.wisp(id).unwrap().name, "Butthead");
}

// ======================================================================
// E2E Test 10: One mutual-exclusion boundary serializes a swarm of buyers
// ======================================================================

#[test]
fn e2e_shared_engine_serializes_buyers() {
    let (engine, _clock) = shared_engine();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || {
                let mut engine = engine.lock();
                let price = engine.config().portal_price;
                engine.buy_portals(PLAYER, price, true).unwrap()
            })
        })
        .collect();
    let mut all_ids = Vec::new();
    for handle in handles {
        all_ids.extend(handle.join().unwrap());
    }
    all_ids.sort();
    all_ids.dedup();
    assert_eq!(all_ids.len(), 8, "id allocation raced");

    let engine = engine.lock();
    assert_eq!(engine.oracle_info().batch_count, 8);
    assert_eq!(engine.current_haunt().populated, 8);
    assert_eq!(engine.wisps_of_owner(&PLAYER).len(), 8);
}
