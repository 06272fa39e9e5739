//! Local REST API consumed by the desktop shell
//!
//! Provides HTTP endpoints for authentication, record and user management,
//! dataset import/export, chart summaries and risk estimation.

pub mod dto;
pub mod handlers;
pub mod router;

pub use router::{create_api_router, ApiState};
