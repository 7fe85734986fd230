//! `SeaORM` Entity for services table (vendor service applications).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company_type: String,
    pub provided_service: Option<String>,
    pub company_name: String,
    pub tax_id: String,
    /// Public path of the stored registration document.
    pub company_registration: String,
    /// Public path of the stored application letter.
    pub application_letter: Option<String>,
    pub status: String,
    /// Finance officer id.
    pub reviewed_by: Option<i32>,
    pub reviewed_date: Option<DateTimeWithTimeZone>,
    pub reason: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
