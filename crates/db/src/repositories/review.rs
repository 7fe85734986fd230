//! Review repository: persists approval decisions on any reviewable table.

use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement};

use parkpro_core::workflow::{RequestStatus, ReviewDecision, ReviewKind, WorkflowError, WorkflowService};

/// Error types for review persistence.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// No row with that id.
    #[error("{} not found", .0.label())]
    NotFound(ReviewKind),

    /// The row exists but the transition is not allowed.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

#[derive(Debug, FromQueryResult)]
struct StatusRow {
    status: String,
}

/// Repository applying review decisions.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    db: Arc<DatabaseConnection>,
}

impl ReviewRepository {
    /// Creates a new review repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Records a decision on request `id`.
    ///
    /// The update only matches a pending row. When nothing matched, the
    /// current status is read back to tell a missing row from one another
    /// reviewer already decided.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::NotFound`, `WorkflowError::AlreadyDecided`
    /// or a database error.
    pub async fn decide(&self, id: i32, decision: &ReviewDecision) -> Result<(), ReviewError> {
        let kind = decision.kind;
        let sql = format!(
            "UPDATE {} SET status = $1, reviewed_by = $2, reviewed_date = $3, reason = $4 \
             WHERE id = $5 AND status = 'pending'",
            kind.table_name()
        );
        let result = self
            .db
            .execute(Statement::from_sql_and_values(
                DbBackend::Postgres,
                sql,
                [
                    decision.new_status.as_str().into(),
                    decision.reviewed_by.into(),
                    decision.reviewed_at.into(),
                    decision.reason.clone().into(),
                    id.into(),
                ],
            ))
            .await?;

        if result.rows_affected() > 0 {
            return Ok(());
        }
        tracing::debug!(table = kind.table_name(), id, "review matched no pending row");

        let current = self
            .current_status(kind, id)
            .await?
            .ok_or(ReviewError::NotFound(kind))?;
        WorkflowService::check_transition(kind, current, decision.new_status)?;

        // Still pending yet unmatched: the row vanished between statements.
        Err(ReviewError::NotFound(kind))
    }

    /// Reads the status of request `id`.
    ///
    /// # Errors
    ///
    /// Returns a database error, or `WorkflowError::InvalidStatus` for a
    /// status outside the known set.
    pub async fn current_status(
        &self,
        kind: ReviewKind,
        id: i32,
    ) -> Result<Option<RequestStatus>, ReviewError> {
        let sql = format!("SELECT status FROM {} WHERE id = $1", kind.table_name());
        let row = StatusRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [id.into()],
        ))
        .one(self.db.as_ref())
        .await?;

        row.map(|row| RequestStatus::parse(&row.status).ok_or(WorkflowError::InvalidStatus))
            .transpose()
            .map_err(ReviewError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkpro_shared::Role;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;

    fn decision() -> ReviewDecision {
        WorkflowService::review(
            ReviewKind::EmergencyRequest,
            Role::Government,
            4,
            Some("approved"),
            Some("Bridge repair is urgent"),
        )
        .unwrap()
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    fn status(value: &str) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("status", Value::from(value))])
    }

    #[tokio::test]
    async fn test_decide_pending_request() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(1)])
            .into_connection();
        let db = Arc::new(db);
        let repo = ReviewRepository::new(Arc::clone(&db));

        repo.decide(12, &decision()).await.unwrap();

        drop(repo);
        let log = format!("{:?}", Arc::into_inner(db).unwrap().into_transaction_log());
        assert!(log.contains("UPDATE emergency_requests"));
        assert!(log.contains("status = 'pending'"));
    }

    #[tokio::test]
    async fn test_decide_reports_already_decided() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(0)])
            .append_query_results([vec![status("rejected")]])
            .into_connection();
        let repo = ReviewRepository::new(Arc::new(db));

        let err = repo.decide(12, &decision()).await.unwrap_err();
        assert!(matches!(
            err,
            ReviewError::Workflow(WorkflowError::AlreadyDecided {
                status: RequestStatus::Rejected,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_decide_unknown_request() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(0)])
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();
        let repo = ReviewRepository::new(Arc::new(db));

        let err = repo.decide(99, &decision()).await.unwrap_err();
        assert!(matches!(err, ReviewError::NotFound(ReviewKind::EmergencyRequest)));
        assert_eq!(err.to_string(), "Emergency request not found");
    }
}
