//! `SeaORM` Entity for emergency_requests table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "emergency_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub park_name: String,
    pub emergency_type: String,
    pub justification: String,
    pub timeframe: String,
    pub status: String,
    /// Finance officer id of the creator.
    pub created_by: i32,
    /// Government officer id.
    pub reviewed_by: Option<i32>,
    pub reviewed_date: Option<DateTimeWithTimeZone>,
    pub reason: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
