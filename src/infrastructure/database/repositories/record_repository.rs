use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryOrder, Set, TransactionTrait,
};

use super::db_err;
use crate::domain::{DomainError, DomainResult, HeartRecord, NewHeartRecord, RecordRepositoryInterface};
use crate::infrastructure::database::entities::heart_record;

/// Chunk size for bulk seeding inserts; keeps each statement well under the
/// SQLite bind-parameter limit.
const INSERT_CHUNK: usize = 100;

pub struct SeaOrmRecordRepository {
    db: DatabaseConnection,
}

impl SeaOrmRecordRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(model: heart_record::Model) -> HeartRecord {
    HeartRecord {
        id: model.id,
        age: model.age,
        sex: model.sex,
        chest_pain_type: model.chest_pain_type,
        resting_bp: model.resting_bp,
        cholesterol: model.cholesterol,
        fasting_bs: model.fasting_bs,
        resting_ecg: model.resting_ecg,
        max_hr: model.max_hr,
        exercise_angina: model.exercise_angina,
        oldpeak: model.oldpeak,
        st_slope: model.st_slope,
        heart_disease: model.heart_disease,
    }
}

fn draft_to_active(draft: NewHeartRecord) -> heart_record::ActiveModel {
    heart_record::ActiveModel {
        id: NotSet,
        age: Set(draft.age),
        sex: Set(draft.sex),
        chest_pain_type: Set(draft.chest_pain_type),
        resting_bp: Set(draft.resting_bp),
        cholesterol: Set(draft.cholesterol),
        fasting_bs: Set(draft.fasting_bs),
        resting_ecg: Set(draft.resting_ecg),
        max_hr: Set(draft.max_hr),
        exercise_angina: Set(draft.exercise_angina),
        oldpeak: Set(draft.oldpeak),
        st_slope: Set(draft.st_slope),
        heart_disease: Set(draft.heart_disease),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl RecordRepositoryInterface for SeaOrmRecordRepository {
    async fn list_records(&self) -> DomainResult<Vec<HeartRecord>> {
        let models = heart_record::Entity::find()
            .order_by_asc(heart_record::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn get_record(&self, id: i32) -> DomainResult<Option<HeartRecord>> {
        let model = heart_record::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_domain))
    }

    async fn create_record(&self, draft: NewHeartRecord) -> DomainResult<HeartRecord> {
        let inserted = draft_to_active(draft)
            .insert(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model_to_domain(inserted))
    }

    async fn insert_records(&self, drafts: Vec<NewHeartRecord>) -> DomainResult<u64> {
        if drafts.is_empty() {
            return Ok(0);
        }

        let count = drafts.len() as u64;
        let txn = self.db.begin().await.map_err(db_err)?;
        for chunk in drafts
            .chunks(INSERT_CHUNK)
            .map(|c| c.iter().cloned().map(draft_to_active).collect::<Vec<_>>())
        {
            heart_record::Entity::insert_many(chunk)
                .exec(&txn)
                .await
                .map_err(db_err)?;
        }
        txn.commit().await.map_err(db_err)?;

        Ok(count)
    }

    async fn update_record(&self, id: i32, draft: NewHeartRecord) -> DomainResult<HeartRecord> {
        let existing = heart_record::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "HeartRecord",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: heart_record::ActiveModel = existing.into();
        active.age = Set(draft.age);
        active.sex = Set(draft.sex);
        active.chest_pain_type = Set(draft.chest_pain_type);
        active.resting_bp = Set(draft.resting_bp);
        active.cholesterol = Set(draft.cholesterol);
        active.fasting_bs = Set(draft.fasting_bs);
        active.resting_ecg = Set(draft.resting_ecg);
        active.max_hr = Set(draft.max_hr);
        active.exercise_angina = Set(draft.exercise_angina);
        active.oldpeak = Set(draft.oldpeak);
        active.st_slope = Set(draft.st_slope);
        active.heart_disease = Set(draft.heart_disease);

        let updated = active.update(&self.db).await.map_err(db_err)?;

        Ok(model_to_domain(updated))
    }

    async fn delete_record(&self, id: i32) -> DomainResult<()> {
        // Absent identity deletes zero rows, which is fine.
        heart_record::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }

    async fn count_records(&self) -> DomainResult<u64> {
        heart_record::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::infrastructure::database::migrator::Migrator;

    async fn repo() -> SeaOrmRecordRepository {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmRecordRepository::new(db)
    }

    fn draft(age: i32) -> NewHeartRecord {
        NewHeartRecord {
            age,
            sex: "M".into(),
            chest_pain_type: "ASY".into(),
            resting_bp: 150,
            cholesterol: 365,
            fasting_bs: false,
            resting_ecg: "Normal".into(),
            max_hr: 134,
            exercise_angina: false,
            oldpeak: 1.0,
            st_slope: "Flat".into(),
            heart_disease: true,
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_identity_and_list_orders_by_it() {
        let repo = repo().await;
        let first = repo.create_record(draft(40)).await.unwrap();
        let second = repo.create_record(draft(54)).await.unwrap();
        assert!(second.id > first.id);

        let all = repo.list_records().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].id, second.id);
    }

    #[tokio::test]
    async fn update_overwrites_scalars_and_keeps_identity() {
        let repo = repo().await;
        let created = repo.create_record(draft(40)).await.unwrap();

        let mut changed = draft(63);
        changed.sex = "F".into();
        changed.oldpeak = 2.5;
        let updated = repo.update_record(created.id, changed).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.age, 63);
        assert_eq!(updated.sex, "F");
        assert_eq!(updated.oldpeak, 2.5);
    }

    #[tokio::test]
    async fn update_missing_identity_is_not_found_and_leaves_store_unchanged() {
        let repo = repo().await;
        repo.create_record(draft(40)).await.unwrap();

        let err = repo.update_record(999, draft(70)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let all = repo.list_records().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].age, 40);
    }

    #[tokio::test]
    async fn delete_removes_row_and_missing_identity_is_a_noop() {
        let repo = repo().await;
        let created = repo.create_record(draft(40)).await.unwrap();

        repo.delete_record(created.id).await.unwrap();
        assert_eq!(repo.count_records().await.unwrap(), 0);

        // Deleting again must not error
        repo.delete_record(created.id).await.unwrap();
    }

    #[tokio::test]
    async fn bulk_insert_preserves_order() {
        let repo = repo().await;
        let drafts: Vec<_> = (30..45).map(draft).collect();
        let inserted = repo.insert_records(drafts).await.unwrap();
        assert_eq!(inserted, 15);

        let ages: Vec<_> = repo
            .list_records()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.age)
            .collect();
        assert_eq!(ages, (30..45).collect::<Vec<_>>());
    }
}
