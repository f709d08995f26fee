//! Infrastructure layer
//!
//! Handles all I/O operations: network, filesystem, and external processes.
//! This module is the only place where side effects occur.

pub mod cache;
pub mod compiler;
pub mod download;
pub mod filesystem;
pub mod unpack;
