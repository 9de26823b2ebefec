//! Personality domain
//!
//! The catalog of improvement roles and the policy that assigns them.

pub mod catalog;
pub mod sequencer;

pub use catalog::{Personality, PersonalityCatalog};
pub use sequencer::next_available;
