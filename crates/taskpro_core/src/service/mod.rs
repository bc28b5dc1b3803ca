//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, summarization, provider lookups and repository
//!   calls into use-case level APIs.
//! - Classify every failure into a `ServiceError` kind.

pub mod dashboard;
pub mod error;
pub mod task_service;
pub mod weather_service;
