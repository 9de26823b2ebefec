//! Token budget domain

pub mod token_budget;

pub use token_budget::{DEFAULT_MAX_SESSION_TOKENS, TokenBudget};
