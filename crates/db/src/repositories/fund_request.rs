//! Fund request repository.
//!
//! Park staff own their requests: every read and write is scoped to the
//! creator, and edits only apply while the request is pending.

use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, Set, Statement,
    sea_query::Expr,
};
use serde::Serialize;

use parkpro_core::intake::NewFundRequest;
use parkpro_core::workflow::{RequestStatus, ReviewKind, WorkflowError, WorkflowService};

use crate::entities::fund_requests;

/// Error types for fund request operations.
#[derive(Debug, thiserror::Error)]
pub enum FundRequestError {
    /// Missing, or owned by someone else.
    #[error("Fund request not found or unauthorized")]
    NotFound,

    /// No longer pending.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A fund request joined with its creator, as finance sees it.
#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct FundRequestWithStaff {
    /// Row id.
    pub id: i32,
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Amount in currency units.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Spending category.
    pub category: String,
    /// Park the record belongs to.
    pub park_name: String,
    /// How urgent the request is.
    pub urgency: String,
    /// Workflow status.
    pub status: String,
    /// Park-staff id of the requester.
    pub created_by: i32,
    /// When the request was created.
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    /// Given name of the requesting staff member.
    pub first_name: Option<String>,
    /// Family name of the requesting staff member.
    pub last_name: Option<String>,
    /// Email of the requesting staff member.
    pub staff_email: Option<String>,
    /// Park of the requesting staff member.
    pub staff_park: Option<String>,
}

/// Request counts by status for one creator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct FundRequestStats {
    /// Total count.
    pub total: i64,
    /// Pending count.
    pub pending: i64,
    /// Approved count.
    pub approved: i64,
    /// Rejected count.
    pub rejected: i64,
}

/// Repository for fund requests.
#[derive(Debug, Clone)]
pub struct FundRequestRepository {
    db: Arc<DatabaseConnection>,
}

impl FundRequestRepository {
    /// Creates a new fund request repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates a pending request owned by `created_by`.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        created_by: i32,
        new: &NewFundRequest,
    ) -> Result<fund_requests::Model, DbErr> {
        fund_requests::ActiveModel {
            title: Set(new.title.clone()),
            description: Set(new.description.clone()),
            amount: Set(new.amount),
            category: Set(new.category.clone()),
            park_name: Set(new.park_name.clone()),
            urgency: Set(new.urgency.clone()),
            status: Set(RequestStatus::Pending.as_str().to_string()),
            created_by: Set(created_by),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
    }

    /// Lists a creator's requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_creator(
        &self,
        created_by: i32,
    ) -> Result<Vec<fund_requests::Model>, DbErr> {
        fund_requests::Entity::find()
            .filter(fund_requests::Column::CreatedBy.eq(created_by))
            .order_by_desc(fund_requests::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    /// Lists every request with its creator's details, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_with_staff(&self) -> Result<Vec<FundRequestWithStaff>, DbErr> {
        FundRequestWithStaff::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            r"SELECT fr.id, fr.title, fr.description, fr.amount, fr.category, fr.park_name,
                     fr.urgency, fr.status, fr.created_by, fr.created_at,
                     ps.first_name, ps.last_name, ps.email AS staff_email,
                     ps.park_name AS staff_park
              FROM fund_requests fr
              LEFT JOIN parkstaff ps ON ps.id = fr.created_by
              ORDER BY fr.created_at DESC",
        ))
        .all(self.db.as_ref())
        .await
    }

    /// Counts a creator's requests by status, optionally for one park.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn stats(
        &self,
        created_by: i32,
        park_name: Option<&str>,
    ) -> Result<FundRequestStats, DbErr> {
        let row = FundRequestStats::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r"SELECT COUNT(*) AS total,
                     COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                     COUNT(*) FILTER (WHERE status = 'approved') AS approved,
                     COUNT(*) FILTER (WHERE status = 'rejected') AS rejected
              FROM fund_requests
              WHERE created_by = $1 AND ($2::text IS NULL OR park_name = $2)",
            [created_by.into(), park_name.map(str::to_string).into()],
        ))
        .one(self.db.as_ref())
        .await?;

        Ok(row.unwrap_or_default())
    }

    /// Replaces the fields of a pending request owned by `created_by`.
    ///
    /// # Errors
    ///
    /// Returns `FundRequestError::NotFound` if the request is missing or
    /// owned by someone else, `WorkflowError::NotEditable` once decided.
    pub async fn update(
        &self,
        id: i32,
        created_by: i32,
        new: &NewFundRequest,
    ) -> Result<(), FundRequestError> {
        self.find_editable(id, created_by).await?;

        let result = fund_requests::Entity::update_many()
            .col_expr(fund_requests::Column::Title, Expr::value(new.title.clone()))
            .col_expr(
                fund_requests::Column::Description,
                Expr::value(new.description.clone()),
            )
            .col_expr(fund_requests::Column::Amount, Expr::value(new.amount))
            .col_expr(
                fund_requests::Column::Category,
                Expr::value(new.category.clone()),
            )
            .col_expr(
                fund_requests::Column::ParkName,
                Expr::value(new.park_name.clone()),
            )
            .col_expr(fund_requests::Column::Urgency, Expr::value(new.urgency.clone()))
            .filter(fund_requests::Column::Id.eq(id))
            .filter(fund_requests::Column::CreatedBy.eq(created_by))
            .filter(fund_requests::Column::Status.eq(RequestStatus::Pending.as_str()))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            // Decided in between; report the state it ended in.
            self.find_editable(id, created_by).await?;
            return Err(FundRequestError::NotFound);
        }
        Ok(())
    }

    /// Withdraws a pending request owned by `created_by`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::update`].
    pub async fn delete(&self, id: i32, created_by: i32) -> Result<(), FundRequestError> {
        self.find_editable(id, created_by).await?;

        let result = fund_requests::Entity::delete_many()
            .filter(fund_requests::Column::Id.eq(id))
            .filter(fund_requests::Column::CreatedBy.eq(created_by))
            .filter(fund_requests::Column::Status.eq(RequestStatus::Pending.as_str()))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            self.find_editable(id, created_by).await?;
            return Err(FundRequestError::NotFound);
        }
        Ok(())
    }

    async fn find_editable(
        &self,
        id: i32,
        created_by: i32,
    ) -> Result<fund_requests::Model, FundRequestError> {
        let request = fund_requests::Entity::find_by_id(id)
            .filter(fund_requests::Column::CreatedBy.eq(created_by))
            .one(self.db.as_ref())
            .await?
            .ok_or(FundRequestError::NotFound)?;

        let status =
            RequestStatus::parse(&request.status).ok_or(WorkflowError::InvalidStatus)?;
        WorkflowService::ensure_editable(ReviewKind::FundRequest, status)?;
        Ok(request)
    }
}
