//! Daymark Core — holiday calendar cache and date classification.
//!
//! This crate contains the heart of the lookup service:
//! - Feed domain types ([`calendar::HolidayRecord`], [`calendar::HolidayDataset`])
//! - The data layer: remote feed provider, file-backed store, freshness
//!   policy, and the [`data::cache::HolidayCache`] orchestrator
//! - The day classifier (holiday / workday / weekday)
//! - Strict date-string validation
//!
//! The MCP transport and the CLI live in sibling crates and consume this one.

pub mod calendar;
pub mod classify;
pub mod data;
pub mod validate;
