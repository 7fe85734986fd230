//! `SeaORM` Entity for payments table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub transaction_id: String,
    pub payment_type: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub card_name: String,
    pub card_number_last4: String,
    pub expiry_date: String,
    pub status: String,
    pub park_name: String,
    pub customer_email: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
