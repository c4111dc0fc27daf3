//! Outbound Guide — policy-driven qualification wizard for outbound sales.

pub mod access;
pub mod cli;
pub mod config;
pub mod error;
pub mod guide;
