//! Payroll engine for small teams
//!
//! This crate records employees, the hours they work and the bonuses or
//! deductions applied to them, and computes per-employee payroll over an
//! inclusive date range.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod validation;
