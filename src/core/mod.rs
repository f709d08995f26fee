//! Business logic of the staging pipeline
//!
//! The orchestrator drives classification, toolchain provisioning, the
//! compiler invocation, and staging; I/O primitives live in [`crate::infra`].

pub mod classify;
pub mod orchestrator;
pub mod preflight;
pub mod stage;
