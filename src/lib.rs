//! # CardioDesk Service
//!
//! Backend of the CardioDesk desktop application for exploring a
//! heart-disease tabular dataset: CSV import into a relational store,
//! record and user management, chart summaries and a placeholder disease
//! risk estimate. The desktop shell talks to this crate through the
//! embedded REST API.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Services and the authentication session context
//! - **infrastructure**: SQLite persistence, migrations, seeding, crypto
//! - **ingest**: CSV codec for the 12-column dataset format
//! - **display**: Code ↔ localized label mapping for grids and charts
//! - **api**: Local REST API with Swagger documentation
//! - **server**: Embeddable bootstrap used by the CLI and the shell

pub mod api;
pub mod application;
pub mod config;
pub mod display;
pub mod domain;
pub mod infrastructure;
pub mod ingest;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use api::{create_api_router, ApiState};

// Re-export the embeddable server runtime
pub use server::{ServerHandle, ServerOptions};
