//! Task domain model.
//!
//! # Responsibility
//! - Define the closed set of task variants tracked by Butler.
//! - Own construction and reschedule invariants for every variant.
//!
//! # Invariants
//! - `description` is non-empty and never changes after construction.
//! - An event window never ends before it starts.

pub mod task;
