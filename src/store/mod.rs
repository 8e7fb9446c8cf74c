//! Roster store: the authoritative in-memory student list and its
//! persisted mirror.

pub mod roster;

pub use roster::{PersistResult, RosterStore, ROSTER_KEY};
