//! CRUD orchestration for heart disease records.

use std::sync::Arc;

use crate::domain::{DomainError, DomainResult, HeartRecord, NewHeartRecord, RepositoryProvider};

pub struct RecordService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RecordService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self) -> DomainResult<Vec<HeartRecord>> {
        self.repos.records().list_records().await
    }

    pub async fn get(&self, id: i32) -> DomainResult<HeartRecord> {
        self.repos
            .records()
            .get_record(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "HeartRecord",
                field: "id",
                value: id.to_string(),
            })
    }

    pub async fn create(&self, draft: NewHeartRecord) -> DomainResult<HeartRecord> {
        self.repos.records().create_record(draft).await
    }

    /// Overwrite every scalar field of an existing record; the identity is
    /// immutable and an unknown identity is a `NotFound`.
    pub async fn update(&self, id: i32, draft: NewHeartRecord) -> DomainResult<HeartRecord> {
        self.repos.records().update_record(id, draft).await
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.records().delete_record(id).await
    }
}
