//! # wisp-engine
//! The transactional domain engine: haunt issuance, the randomness batch
//! oracle, portal opening and claims, collateral escrow, the collateral
//! registry, kinship, and the wearable equip system.
//!
//! Every public operation executes to completion against the single
//! [`store::Store`] with all-or-nothing semantics: preconditions are
//! validated before the first mutation. The engine itself is not
//! thread-safe; a concurrent host wraps the whole engine in one
//! mutual-exclusion boundary (`Mutex`/`RwLock`) or a single-writer actor.

pub mod config;
pub mod engine;
pub mod escrow;
pub mod haunt;
pub mod kinship;
pub mod oracle;
pub mod portal;
pub mod registry;
pub mod scoring;
pub mod store;
pub mod wearables;

pub use config::EngineConfig;
pub use engine::WispEngine;
