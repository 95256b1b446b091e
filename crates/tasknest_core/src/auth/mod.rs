//! Caller identity and ownership authorization.
//!
//! # Responsibility
//! - Define the identity-resolution contract required from the external
//!   auth collaborator.
//! - Gate every task operation on caller identity and record ownership.
//!
//! # Invariants
//! - Guard decisions have no side effects beyond pass/fail.
//! - Missing records are reported before ownership is compared.

pub mod guard;
pub mod session;
