//! Shared utilities for Studyhall.

pub mod logger;
pub mod time;
