//! Application-level configuration.
//!
//! - [`CollaborationParams`]: round limit and token caps for a run

pub mod collaboration_params;

pub use collaboration_params::CollaborationParams;
