//! Utility functions and helpers for the wayfarer service.
//!
//! This module provides cross-cutting concerns like structured logging,
//! credential sanitization, and the retry/backoff policy.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization with secret redaction.
//! - `retry`: Retry budget and linear backoff schedule.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
pub mod retry;
