//! # Ledger Store
//!
//! This crate holds the ports through which the calculators receive data and
//! through which profit shares are saved.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Adapter:** The calculators never touch storage. Everything
//!   that reads files or keeps state across calls lives here, behind traits.
//! - **Whole-snapshot updates:** The share store never mutates in place. Each
//!   save builds a new snapshot and swaps it in, so readers always see a
//!   complete state and a rejected save changes nothing.
//!
//! ## Public API
//!
//! - `ShareRepository`: the persistence port, with `InMemoryShareRepository`
//!   and `JsonFileShareRepository` implementations.
//! - `ProfitShareService`: validate-then-replace saving of a project's shares.
//! - `RecordSource`, `TeamSource`, `TaskSource`: read ports with JSON-file adapters.
//! - `StoreError`: the specific error types that can be returned from this crate.

pub mod error;
pub mod repository;
pub mod service;
pub mod sources;

pub use error::StoreError;
pub use repository::{
    InMemoryShareRepository, JsonFileShareRepository, ShareRepository, ShareSnapshot,
};
pub use service::ProfitShareService;
pub use sources::{
    JsonRecordSource, JsonTaskSource, JsonTeamSource, RecordSource, TaskSource, TeamSource,
};
