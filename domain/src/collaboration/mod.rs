//! Collaboration domain
//!
//! Entities describing a two-model collaboration: the session, its
//! exchanges, the roles that take turns, and the phases a run moves through.

pub mod exchange;
pub mod phase;
pub mod role;
pub mod session;

pub use exchange::{Exchange, ReadyStatus, TurnKind};
pub use phase::{Phase, TerminationReason};
pub use role::ModelRole;
pub use session::Session;
