//! Domain record types shared by console views and the synchronizer.
//!
//! # Responsibility
//! - Define canonical record shapes matching the console's stored JSON.
//! - Provide key derivation and assignment-time validation helpers.

pub mod activity;
pub mod case;
pub mod curfew;
pub mod summons;
