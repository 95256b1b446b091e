//! Client view-model: presentation state over the sync channel.
//!
//! # Responsibility
//! - Derive filtered/sorted presentation lists from the raw task set.
//! - Mediate user intents into channel calls and surface every outcome
//!   as a user-visible notification.
//!
//! # Invariants
//! - Derivations never mutate the raw task set.
//! - At most one task is in editing state at a time.
//! - Channel failures are reported once and never re-thrown past here.

pub mod projection;
pub mod view_model;
