//! Domain model for concepts, snapshots and authority-owned instances.
//!
//! # Responsibility
//! - Define value types and aggregates used by core business logic.
//! - Keep invariants next to the data they guard.
//!
//! # Invariants
//! - Every aggregate and child is identified by an `Iri` plus a uuid.
//! - Content copied across aggregate boundaries is always re-identified.

pub mod authority;
pub mod children;
pub mod codes;
pub mod concept;
pub mod content;
pub mod date;
pub mod identity;
pub mod instance;
pub mod invariant;
pub mod iri;
pub mod language;
