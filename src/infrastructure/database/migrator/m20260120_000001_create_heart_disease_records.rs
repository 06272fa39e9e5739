//! Migration to create heart_disease_records table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HeartDiseaseRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HeartDiseaseRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HeartDiseaseRecords::Age).integer().not_null())
                    .col(
                        ColumnDef::new(HeartDiseaseRecords::Sex)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HeartDiseaseRecords::ChestPainType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HeartDiseaseRecords::RestingBp)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HeartDiseaseRecords::Cholesterol)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HeartDiseaseRecords::FastingBs)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HeartDiseaseRecords::RestingEcg)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(HeartDiseaseRecords::MaxHr).integer().not_null())
                    .col(
                        ColumnDef::new(HeartDiseaseRecords::ExerciseAngina)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(HeartDiseaseRecords::Oldpeak).float().not_null())
                    .col(
                        ColumnDef::new(HeartDiseaseRecords::StSlope)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HeartDiseaseRecords::HeartDisease)
                            .boolean()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HeartDiseaseRecords::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum HeartDiseaseRecords {
    Table,
    Id,
    Age,
    Sex,
    ChestPainType,
    RestingBp,
    Cholesterol,
    FastingBs,
    RestingEcg,
    MaxHr,
    ExerciseAngina,
    Oldpeak,
    StSlope,
    HeartDisease,
}
