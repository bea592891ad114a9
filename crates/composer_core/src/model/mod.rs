//! Domain model for composed documents.
//!
//! # Responsibility
//! - Define the section record and the ordered document snapshot.
//! - Keep identity, ordering and content replacement rules in one place.
//!
//! # Invariants
//! - Every section is identified by a stable `SectionId`, never by index.
//! - Documents are immutable snapshots; updates produce new snapshots.

pub mod document;
pub mod section;
