//! Personality sequencer
//!
//! First-available policy: walk the catalog in order, skip whatever the
//! acting model has already used, take the first survivor. Once a model has
//! used every entry it keeps receiving the terminal personality. The round
//! number plays no part in the choice.

use super::catalog::{Personality, PersonalityCatalog};

/// Pick the next personality for a model given its used-list.
pub fn next_available(used: &[Personality]) -> Personality {
    PersonalityCatalog::all()
        .iter()
        .copied()
        .find(|p| !used.contains(p))
        .unwrap_or(PersonalityCatalog::terminal())
}
