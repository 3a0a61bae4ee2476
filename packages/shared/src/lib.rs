//! Shared utilities for chitchat.
//!
//! Logger initialization and time helpers used by every chitchat binary.

pub mod logger;
pub mod time;
