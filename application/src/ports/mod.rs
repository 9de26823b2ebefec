//! Port definitions (interfaces for external systems)
//!
//! Ports define the boundaries between the application and infrastructure
//! layers. Adapters in the infrastructure layer implement these traits.

pub mod conversation_logger;
pub mod model_provider;
pub mod progress;
