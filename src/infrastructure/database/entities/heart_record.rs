//! Heart disease record entity for database

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Heart disease record model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "heart_disease_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub age: i32,
    pub sex: String,
    pub chest_pain_type: String,
    pub resting_bp: i32,
    pub cholesterol: i32,
    pub fasting_bs: bool,
    pub resting_ecg: String,
    pub max_hr: i32,
    pub exercise_angina: bool,
    pub oldpeak: f32,
    pub st_slope: String,
    pub heart_disease: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
