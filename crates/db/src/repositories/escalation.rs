//! Escalation repository: emergency requests, extra funds requests and
//! budgets raised by finance for government review.

use std::sync::Arc;

use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use parkpro_core::intake::{NewBudget, NewEmergencyRequest, NewExtraFunds};
use parkpro_core::workflow::RequestStatus;

use crate::entities::{budgets, emergency_requests, extra_funds_requests};

fn pending() -> String {
    RequestStatus::Pending.as_str().to_string()
}

/// Repository for finance escalations.
#[derive(Debug, Clone)]
pub struct EscalationRepository {
    db: Arc<DatabaseConnection>,
}

impl EscalationRepository {
    /// Creates a new escalation repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Files an emergency request.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_emergency(
        &self,
        created_by: i32,
        new: &NewEmergencyRequest,
    ) -> Result<emergency_requests::Model, DbErr> {
        emergency_requests::ActiveModel {
            title: Set(new.title.clone()),
            description: Set(new.description.clone()),
            amount: Set(new.amount),
            park_name: Set(new.park_name.clone()),
            emergency_type: Set(new.emergency_type.clone()),
            justification: Set(new.justification.clone()),
            timeframe: Set(new.timeframe.clone()),
            status: Set(pending()),
            created_by: Set(created_by),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
    }

    /// Files an extra funds request.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_extra_funds(
        &self,
        created_by: i32,
        new: &NewExtraFunds,
    ) -> Result<extra_funds_requests::Model, DbErr> {
        extra_funds_requests::ActiveModel {
            title: Set(new.title.clone()),
            description: Set(new.description.clone()),
            amount: Set(new.amount),
            park_name: Set(new.park_name.clone()),
            category: Set(new.category.clone()),
            justification: Set(new.justification.clone()),
            expected_duration: Set(new.expected_duration.clone()),
            status: Set(pending()),
            created_by: Set(created_by),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
    }

    /// Files a budget proposal with its line items.
    ///
    /// # Errors
    ///
    /// Returns an error if the items cannot be encoded or the insert fails.
    pub async fn create_budget(
        &self,
        created_by: i32,
        new: &NewBudget,
    ) -> Result<budgets::Model, DbErr> {
        let items = serde_json::to_value(&new.items).map_err(|e| DbErr::Json(e.to_string()))?;

        budgets::ActiveModel {
            title: Set(new.title.clone()),
            fiscal_year: Set(new.fiscal_year.clone()),
            park_name: Set(new.park_name.clone()),
            description: Set(new.description.clone()),
            total_amount: Set(new.total_amount),
            items: Set(items),
            status: Set(pending()),
            created_by: Set(created_by),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
    }

    /// Lists emergency requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_emergency(&self) -> Result<Vec<emergency_requests::Model>, DbErr> {
        emergency_requests::Entity::find()
            .order_by_desc(emergency_requests::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    /// Lists extra funds requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_extra_funds(&self) -> Result<Vec<extra_funds_requests::Model>, DbErr> {
        extra_funds_requests::Entity::find()
            .order_by_desc(extra_funds_requests::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    /// Lists budgets, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_budgets(&self) -> Result<Vec<budgets::Model>, DbErr> {
        budgets::Entity::find()
            .order_by_desc(budgets::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use parkpro_core::intake::BudgetItem;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_budget_stores_items_as_json() {
        let at = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .unwrap();
        let items = vec![BudgetItem {
            category: "Salaries".into(),
            description: "Rangers".into(),
            amount: dec!(750000),
        }];
        let stored = budgets::Model {
            id: 1,
            title: "Annual".into(),
            fiscal_year: "2026-2027".into(),
            park_name: "Akagera".into(),
            description: None,
            total_amount: dec!(750000),
            items: serde_json::to_value(&items).unwrap(),
            status: "pending".into(),
            created_by: 3,
            reviewed_by: None,
            reviewed_date: None,
            reason: None,
            created_at: at,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored.clone()]])
            .into_connection();
        let repo = EscalationRepository::new(Arc::new(db));

        let budget = repo
            .create_budget(
                3,
                &NewBudget {
                    title: "Annual".into(),
                    fiscal_year: "2026-2027".into(),
                    park_name: "Akagera".into(),
                    description: None,
                    items,
                    total_amount: dec!(750000),
                },
            )
            .await
            .unwrap();

        assert_eq!(budget, stored);
        assert_eq!(budget.items[0]["amount"], serde_json::json!(750000.0));
    }
}
