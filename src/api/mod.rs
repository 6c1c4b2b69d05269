//! HTTP API module for the planning engine.
//!
//! This module provides the REST endpoint that derives a complete
//! five-year business plan from a parameter set.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{FacilityRateOverrides, PlanInputs, PlanRequest};
pub use response::ApiError;
pub use state::AppState;
