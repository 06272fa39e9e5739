use async_trait::async_trait;

use super::{HeartRecord, NewHeartRecord};
use crate::domain::DomainResult;

#[async_trait]
pub trait RecordRepositoryInterface: Send + Sync {
    /// All records ordered by identity ascending.
    async fn list_records(&self) -> DomainResult<Vec<HeartRecord>>;

    async fn get_record(&self, id: i32) -> DomainResult<Option<HeartRecord>>;

    async fn create_record(&self, draft: NewHeartRecord) -> DomainResult<HeartRecord>;

    /// Bulk insert inside a single transaction. Returns the inserted count.
    async fn insert_records(&self, drafts: Vec<NewHeartRecord>) -> DomainResult<u64>;

    /// Overwrites every scalar field of the row with the given identity.
    /// Absent identity surfaces as `NotFound`; identity itself is immutable.
    async fn update_record(&self, id: i32, draft: NewHeartRecord) -> DomainResult<HeartRecord>;

    /// Deleting an absent identity is a no-op.
    async fn delete_record(&self, id: i32) -> DomainResult<()>;

    async fn count_records(&self) -> DomainResult<u64>;
}
