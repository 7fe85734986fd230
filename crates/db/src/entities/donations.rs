//! `SeaORM` Entity for donations table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "donations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub donation_type: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub park_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: Option<String>,
    pub is_anonymous: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
