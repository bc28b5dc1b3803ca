//! Domain model for tasks and weather history.
//!
//! # Responsibility
//! - Define the records persisted by the store and returned to callers.
//! - Own input validation for task creation.
//!
//! # Invariants
//! - Task and weather log ids are assigned by the store, never by callers.
//! - `Task` and `WeatherLog` are independent aggregates.

pub mod task;
pub mod weather;
