//! `SeaORM` Entity for budgets table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub fiscal_year: String,
    pub park_name: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    /// Line items as a JSON array of `{category, description, amount}`.
    pub items: Json,
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
