//! # Bookline Core
//!
//! Domain layer for the Bookline appointment service: the appointment
//! model and status machine, the scheduling rules that guard the shared
//! single-provider calendar, the error taxonomy, and the collaborator
//! traits (clock, notifier) the lifecycle layer depends on.
//!
//! This crate is deliberately free of database and web dependencies so
//! the scheduling rules can be tested in isolation.

/// Pure scheduling rules: overlap, temporal validation, update merging
pub mod booking;
/// Time source abstraction for past-start validation
pub mod clock;
/// Error taxonomy shared across the workspace
pub mod errors;
/// Domain models and request/response types
pub mod models;
/// Notification collaborator contract
pub mod notify;
