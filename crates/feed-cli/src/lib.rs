//! Library side of the `feedgen` binary.
//!
//! Holds everything the binary wires together so integration tests can drive
//! a full run without spawning a process.

pub mod collaborators;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod report;
