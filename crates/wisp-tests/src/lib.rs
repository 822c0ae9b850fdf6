//! End-to-end and adversarial test suite for the Wisp engine.
//!
//! This crate exercises the full portal → wisp lifecycle through the public
//! operation surface only, plus error-path tests that try to break each
//! component's invariants from a hostile caller's perspective.

pub mod helpers;
