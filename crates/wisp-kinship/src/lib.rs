//! # wisp-kinship — Time-decayed affinity scoring.
//!
//! All calculations use integer arithmetic only for determinism.
//!
//! Kinship rewards interaction cadence, not just interaction volume:
//! - **Accrual**: one point per lifetime interaction on top of the claim
//!   baseline.
//! - **Streak bonus**: consecutive interactions within the streak window
//!   build a capped bonus; it stops counting the moment the idle gap
//!   outgrows the window, before any further interaction.
//! - **Idle decay**: a point lost per full day since the last interaction,
//!   floored at zero.

pub mod curve;

pub use curve::KinshipEngine;
