//! Financial Planning Engine for a five-year school business plan.
//!
//! This crate derives a five-year income statement, a two-year balance sheet,
//! a cash-flow statement and a funding-requirement check from yearly
//! enrollment inputs and cost parameters.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

/// Number of plan years covered by every projection.
pub const PLAN_YEARS: usize = 5;

/// Number of school grades tracked by the enrollment projector.
pub const GRADES: usize = 5;
