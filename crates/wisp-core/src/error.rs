//! Error types for the Wisp engine.
//!
//! Every operation reports failures from a closed, per-component set of
//! variants; nothing fails silently. Operations are all-or-nothing — a
//! returned error means no state was mutated.
use thiserror::Error;

use crate::types::{CollateralId, HauntId, WearableId, WispId, WispStatus};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HauntError {
    #[error("haunt {id} not full: {populated} of {capacity}")] HauntNotFull { id: HauntId, populated: u64, capacity: u64 },
    #[error("caller is not the engine authority")] Unauthorized,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("insufficient funds: offered {offered}, portal price {price}")] InsufficientFunds { offered: u64, price: u64 },
    #[error("capacity exceeded: requested {requested}, remaining {remaining}")] CapacityExceeded { requested: u64, remaining: u64 },
    #[error("portal {0} already assigned to a batch")] BatchAlreadySet(WispId),
    #[error("no portals in batch")] EmptyBatch,
    #[error("waiting period active: {remaining_secs}s remaining")] WaitingPeriodActive { remaining_secs: u64 },
    #[error("unknown randomness request: {0}")] UnknownRequest(String),
    #[error("caller does not own portal {0}")] NotOwner(WispId),
    #[error("internal: {0}")] Internal(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortalError {
    #[error("no randomness assigned to portal {0}")] NoRandomnessYet(WispId),
    #[error("wrong status: expected {expected}, found {found}")] WrongStatus { expected: WispStatus, found: WispStatus },
    #[error("candidate index out of range: {index} >= {len}")] IndexOutOfRange { index: u8, len: usize },
    #[error("stake {stake} below candidate minimum {minimum}")] StakeBelowMinimum { stake: u64, minimum: u64 },
    #[error("name too long: {len} > {max}")] NameTooLong { len: usize, max: usize },
    #[error("caller does not own portal {0}")] NotOwner(WispId),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EscrowError {
    #[error("resulting stake {resulting} below minimum {minimum}")] BelowMinimumStake { resulting: u64, minimum: u64 },
    #[error("wisp not claimed: status {0}")] NotClaimed(WispStatus),
    #[error("caller does not own wisp {0}")] NotOwner(WispId),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WearableError {
    #[error("wearable {wearable} cannot be equipped in slot {slot}")] InvalidSlot { wearable: WearableId, slot: u8 },
    #[error("unknown wearable: {0}")] UnknownWearable(WearableId),
    #[error("quantity exceeds max: {minted} minted + {requested} requested > {max}")] QuantityExceeded { minted: u64, requested: u64, max: u64 },
    #[error("wisp not claimed: status {0}")] NotClaimed(WispStatus),
    #[error("caller does not own wisp {0}")] NotOwner(WispId),
    #[error("items and slots length mismatch: {items} != {slots}")] LengthMismatch { items: usize, slots: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("caller is not the engine authority")] Unauthorized,
    #[error("unknown collateral kind: {0}")] UnknownCollateral(CollateralId),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KinshipError {
    #[error("wisp not claimed: status {0}")] NotClaimed(WispStatus),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("insufficient funds: have {have}, need {need}")] InsufficientFunds { have: u64, need: u64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WispError {
    #[error(transparent)] Haunt(#[from] HauntError),
    #[error(transparent)] Oracle(#[from] OracleError),
    #[error(transparent)] Portal(#[from] PortalError),
    #[error(transparent)] Escrow(#[from] EscrowError),
    #[error(transparent)] Wearable(#[from] WearableError),
    #[error(transparent)] Registry(#[from] RegistryError),
    #[error(transparent)] Kinship(#[from] KinshipError),
    #[error(transparent)] Bank(#[from] BankError),
    #[error("unknown wisp: {0}")] UnknownWisp(WispId),
}
