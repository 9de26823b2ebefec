//! Progress reporting during a collaboration

pub mod reporter;
