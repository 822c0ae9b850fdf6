//! Core entity types: wisps, collateral kinds, wearables, haunts, batches.
//!
//! All monetary values are in motes (1 ECTO = 10^8 motes). Timestamps are
//! unix seconds as u64 per engine convention.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{CONVERSION_RATE_PRECISION, EQUIP_SLOTS, NUM_TRAITS};

/// Identity of a portal and of the wisp it becomes once claimed.
///
/// A portal keeps its id across its entire lifecycle: the same `WispId`
/// names the unopened portal, the opened portal, and the claimed wisp.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct WispId(pub u64);

impl fmt::Display for WispId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index into the collateral registry.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct CollateralId(pub u32);

impl fmt::Display for CollateralId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index into the wearable catalog. Id 0 is reserved as the empty-slot marker.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct WearableId(pub u32);

impl WearableId {
    /// The reserved empty-slot marker.
    pub const NONE: Self = Self(0);

    /// Whether this id marks an empty slot.
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WearableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequence id of an issuance generation. Starts at 0 and only increases.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct HauntId(pub u32);

impl fmt::Display for HauntId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one randomness request/fulfillment cycle.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct BatchId(pub u32);

impl BatchId {
    /// The batch that follows this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An account on the hosting ledger (20-byte address).
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
    /// Create an account id from raw address bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Return the underlying address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// A 32-byte randomness seed assigned to a portal at fulfillment.
///
/// The seed fully determines the portal's ten candidates; candidates are
/// recomputed from it on demand and never persisted.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct Seed(pub [u8; 32]);

impl Seed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// The raw 32-byte value delivered by the external randomness provider.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct Randomness(pub [u8; 32]);

impl Randomness {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Opaque token correlating a randomness request with its fulfillment.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct RequestToken(pub [u8; 32]);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// The six numeric trait axes of a wisp.
///
/// The generator draws each value in `0..TRAIT_RANGE`; the type is signed
/// because rarity math treats traits as deviations from the midpoint.
pub type TraitArray = [i16; NUM_TRAITS];

/// Per-axis scoring adjustments carried by collateral and wearable kinds.
pub type TraitModifiers = [i16; NUM_TRAITS];

/// Lifecycle of a portal/wisp.
///
/// Transitions are monotonic: `InPortal → Opened → Claimed → Destroyed`.
/// `Destroyed` is terminal and removes the wisp from circulation.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default,
    bincode::Encode, bincode::Decode,
)]
pub enum WispStatus {
    /// Purchased, randomness not yet consumed.
    #[default]
    InPortal,
    /// Randomness assigned and portal opened; ten candidates visible.
    Opened,
    /// One candidate claimed and collateral staked.
    Claimed,
    /// Stake withdrawn; permanently out of circulation.
    Destroyed,
}

impl WispStatus {
    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Destroyed)
    }
}

impl fmt::Display for WispStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InPortal => "in-portal",
            Self::Opened => "opened",
            Self::Claimed => "claimed",
            Self::Destroyed => "destroyed",
        };
        write!(f, "{s}")
    }
}

/// A portal and the wisp it becomes.
///
/// The claim-time fields (`collateral`, `traits`, `minimum_stake`, kinship
/// state) hold their defaults until the portal is claimed; `collateral` is
/// `None` exactly while the entity is still a portal. Traits are immutable
/// after the claim materializes them.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub struct Wisp {
    pub id: WispId,
    /// Account that purchased the portal and owns the claimed wisp.
    pub owner: AccountId,
    pub status: WispStatus,
    /// Generation the portal was purchased under.
    pub haunt: HauntId,
    /// Randomness batch membership; `None` until assigned.
    pub batch: Option<BatchId>,
    /// Seed assigned at fulfillment; `None` until then.
    pub seed: Option<Seed>,
    /// Collateral kind selected by the claimed candidate.
    pub collateral: Option<CollateralId>,
    /// Currently staked amount in motes.
    pub staked: u64,
    /// Stake floor fixed at claim time from the candidate's collateral kind.
    pub minimum_stake: u64,
    pub traits: TraitArray,
    /// Slot index → wearable id; `WearableId::NONE` marks an empty slot.
    pub equipped: [WearableId; EQUIP_SLOTS],
    /// Unix seconds of the most recent interaction.
    pub last_interaction: u64,
    /// Monotonic lifetime interaction counter.
    pub interaction_count: u64,
    /// Length of the current consecutive-interaction streak.
    pub streak: u64,
    /// Display name, settable once claimed. Empty until then.
    pub name: String,
}

impl Wisp {
    /// Create a freshly purchased portal.
    pub fn new_portal(id: WispId, owner: AccountId, haunt: HauntId) -> Self {
        Self {
            id,
            owner,
            status: WispStatus::InPortal,
            haunt,
            batch: None,
            seed: None,
            collateral: None,
            staked: 0,
            minimum_stake: 0,
            traits: [0; NUM_TRAITS],
            equipped: [WearableId::NONE; EQUIP_SLOTS],
            last_interaction: 0,
            interaction_count: 0,
            streak: 0,
            name: String::new(),
        }
    }

    pub fn is_claimed(&self) -> bool {
        self.status == WispStatus::Claimed
    }
}

/// An accepted collateral kind and its scoring parameters.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub struct CollateralKind {
    pub name: String,
    /// Stake-value scalar with [`CONVERSION_RATE_PRECISION`] as denominator.
    ///
    /// A rate of 500 means one collateral unit carries five motes of value,
    /// so fewer units are needed to cover a haunt's guaranteed minimum.
    pub conversion_rate: u64,
    /// Signed per-axis rarity adjustments for wisps backed by this kind.
    pub modifiers: TraitModifiers,
}

impl CollateralKind {
    /// Minimum stake (in collateral units) covering `guaranteed_value` motes.
    ///
    /// Computed as `guaranteed_value * PRECISION / conversion_rate` with a
    /// u128 intermediate. A zero rate is treated as the precision unit.
    pub fn minimum_stake(&self, guaranteed_value: u64) -> u64 {
        let rate = self.conversion_rate.max(1) as u128;
        (guaranteed_value as u128 * CONVERSION_RATE_PRECISION as u128 / rate) as u64
    }
}

/// An equippable item kind.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub struct WearableKind {
    pub name: String,
    /// Bitmask over the 16 equip slots this kind may be equipped into.
    pub allowed_slots: u16,
    /// Extra slots occupied alongside the chosen slot (multi-slot kinds).
    pub companion_slots: Vec<u8>,
    /// Signed per-axis trait adjustments applied to the modified score.
    pub trait_modifiers: TraitModifiers,
    /// Flat rarity-score bonus.
    pub rarity_bonus: i16,
    /// Ceiling on the total mintable quantity.
    pub max_quantity: u64,
    /// Running minted count.
    pub minted: u64,
}

impl WearableKind {
    /// Whether this kind may be equipped into `slot`.
    pub fn allows_slot(&self, slot: u8) -> bool {
        (slot as usize) < EQUIP_SLOTS && self.allowed_slots & (1 << slot) != 0
    }

    /// All slots occupied when equipped at `slot`: the slot plus companions.
    pub fn occupied_slots(&self, slot: u8) -> Vec<u8> {
        let mut slots = Vec::with_capacity(1 + self.companion_slots.len());
        slots.push(slot);
        for &s in &self.companion_slots {
            if s != slot {
                slots.push(s);
            }
        }
        slots
    }
}

/// A capacity-bounded issuance generation.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub struct HauntGeneration {
    pub id: HauntId,
    /// Maximum wisp population of this generation.
    pub capacity: u64,
    /// Guaranteed minimum collateral value backing every wisp, in motes.
    pub guaranteed_value: u64,
    /// Current population: portals purchased plus claimed wisps, minus
    /// destroyed ones.
    pub populated: u64,
}

impl HauntGeneration {
    pub fn is_full(&self) -> bool {
        self.populated >= self.capacity
    }

    /// Portals that can still be purchased under this generation.
    pub fn remaining(&self) -> u64 {
        self.capacity.saturating_sub(self.populated)
    }
}

/// One of the ten candidate wisps an opened portal exposes.
///
/// Candidates are pure derivations of the portal seed; claiming one copies
/// its fields onto the wisp.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PortalCandidate {
    /// Position within the portal (0..10).
    pub index: u8,
    pub traits: TraitArray,
    pub collateral: CollateralId,
    /// Stake floor for this candidate under the portal's haunt.
    pub minimum_stake: u64,
}

/// The single outstanding randomness request, if any.
///
/// `members` freezes the batch composition at draw time: fulfillment seeds
/// exactly these portals regardless of later purchases.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub struct PendingRequest {
    pub token: RequestToken,
    pub batch: BatchId,
    pub members: Vec<WispId>,
}

/// Read-only snapshot of the randomness oracle's bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OracleInfo {
    /// The currently accumulating batch.
    pub batch: BatchId,
    /// Portals waiting in the accumulating batch.
    pub batch_count: u64,
    /// Token of the outstanding request, if one is in flight.
    pub outstanding: Option<RequestToken>,
    /// Unix seconds of the last successful fulfillment (0 if none yet).
    pub last_fulfillment: u64,
}
