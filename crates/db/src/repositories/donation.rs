//! Donation repository.

use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, Set, Statement,
    sea_query::{Expr, Func},
};
use serde::Serialize;

use parkpro_core::intake::NewDonation;

use crate::entities::donations;

/// Donations received in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct MonthlyAmount {
    /// Abbreviated month name, e.g. `Mar`.
    pub month: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, FromQueryResult)]
struct TotalRow {
    total: Decimal,
}

/// Repository for donations.
#[derive(Debug, Clone)]
pub struct DonationRepository {
    db: Arc<DatabaseConnection>,
}

impl DonationRepository {
    /// Creates a new donation repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Records a donation.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, new: &NewDonation) -> Result<donations::Model, DbErr> {
        donations::ActiveModel {
            donation_type: Set(new.donation_type.clone()),
            amount: Set(new.amount),
            park_name: Set(new.park_name.clone()),
            first_name: Set(new.first_name.clone()),
            last_name: Set(new.last_name.clone()),
            email: Set(new.email.clone()),
            message: Set(new.message.clone()),
            is_anonymous: Set(new.is_anonymous),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
    }

    /// Lists every donation, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<donations::Model>, DbErr> {
        donations::Entity::find()
            .order_by_desc(donations::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    /// Lists the donations made under an email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_email(&self, email: &str) -> Result<Vec<donations::Model>, DbErr> {
        donations::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(donations::Column::Email))).eq(email.to_lowercase()))
            .order_by_desc(donations::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    /// Sums every donation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn total(&self) -> Result<Decimal, DbErr> {
        let row = TotalRow::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            "SELECT COALESCE(SUM(amount), 0) AS total FROM donations",
        ))
        .one(self.db.as_ref())
        .await?;
        Ok(row.map_or(Decimal::ZERO, |row| row.total))
    }

    /// Sums donations per calendar month, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn monthly_totals(&self) -> Result<Vec<MonthlyAmount>, DbErr> {
        MonthlyAmount::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            r"SELECT to_char(date_trunc('month', created_at), 'Mon') AS month,
                     SUM(amount) AS amount
              FROM donations
              GROUP BY date_trunc('month', created_at)
              ORDER BY date_trunc('month', created_at)",
        ))
        .all(self.db.as_ref())
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_total_defaults_to_zero_without_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();
        let repo = DonationRepository::new(Arc::new(db));

        assert_eq!(repo.total().await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_monthly_totals_serialize_as_numbers() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([
                ("month", Value::from("Mar")),
                ("amount", Value::from(dec!(250.50))),
            ])]])
            .into_connection();
        let repo = DonationRepository::new(Arc::new(db));

        let months = repo.monthly_totals().await.unwrap();
        let json = serde_json::to_value(&months).unwrap();
        assert_eq!(json, serde_json::json!([{"month": "Mar", "amount": 250.5}]));
    }
}
