//! Pakforge - versioned content package exports.
//!
//! This library builds content packages for a given version label, either
//! as a standalone full package or as an incremental patch layered on the
//! nearest lower-precision baseline packages, and manages the on-disk
//! package store those exports live in.
//!
//! The pieces, bottom-up:
//!
//! - [`version`] - strict version label parsing and basis-chain derivation
//! - [`store`] - directory-per-version package store layout and listing
//! - [`export`] - the export orchestrator and the external build tool seam
//! - [`config`] - INI configuration file handling
//! - [`logging`] - tracing subscriber setup for the CLI

pub mod config;
pub mod export;
pub mod logging;
pub mod store;
pub mod version;
