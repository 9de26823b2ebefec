//! Interactive chat module
//!
//! Provides a reedline-based interactive chat interface: each entered
//! prompt runs one full collaboration.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
