//! Heart disease record aggregate
//!
//! Contains the record entity, the identity-less draft variant produced by
//! ingestion and manual entry, and the repository interface.

pub mod model;
pub mod repository;

pub use model::{codes, HeartRecord, NewHeartRecord};
pub use repository::RecordRepositoryInterface;
