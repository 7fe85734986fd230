//! Principal repository over the six role tables.
//!
//! The tables share one layout, so every query is written once and aimed at
//! a table through `Role::table_name`. Table names never come from request
//! input.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement, Value,
};

use parkpro_core::auth::{
    PrincipalKey, PrincipalProfile, PrincipalRecord, PrincipalStore, STAFF_PROBE_ORDER, StoreError,
};
use parkpro_core::intake::{NewPrincipal, ProfileChanges};
use parkpro_shared::Role;

const COLUMNS: &str =
    "id, first_name, last_name, email, phone, password_hash, park_name, avatar_url, last_login";

#[derive(Debug, FromQueryResult)]
struct PrincipalRow {
    id: i32,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    password_hash: String,
    park_name: Option<String>,
    avatar_url: Option<String>,
    last_login: Option<DateTime<FixedOffset>>,
}

impl PrincipalRow {
    fn into_record(self, role: Role) -> PrincipalRecord {
        PrincipalRecord {
            key: PrincipalKey::new(role, self.id),
            profile: PrincipalProfile {
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
                phone: self.phone,
                park_name: self.park_name,
                avatar_url: self.avatar_url,
                last_login: self.last_login.map(|at| at.with_timezone(&Utc)),
            },
            credential: self.password_hash,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct EmailOwnerRow {
    role: String,
    id: i32,
}

#[derive(Debug, FromQueryResult)]
struct IdRow {
    id: i32,
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct LoginRow {
    role: String,
    id: i32,
    first_name: String,
    last_name: String,
    email: String,
    last_login: DateTime<FixedOffset>,
}

/// A principal's most recent login, for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentLogin {
    /// Identity.
    pub key: PrincipalKey,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// When the login happened.
    pub last_login: DateTime<Utc>,
}

fn statement(sql: String, values: Vec<Value>) -> Statement {
    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

/// Repository for every principal table.
#[derive(Debug, Clone)]
pub struct PrincipalRepository {
    db: Arc<DatabaseConnection>,
}

impl PrincipalRepository {
    /// Creates a new principal repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Finds a principal of `role` by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(
        &self,
        role: Role,
        email: &str,
    ) -> Result<Option<PrincipalRecord>, DbErr> {
        let sql = format!(
            "SELECT {COLUMNS} FROM {} WHERE lower(email) = lower($1) LIMIT 1",
            role.table_name()
        );
        let row = PrincipalRow::find_by_statement(statement(sql, vec![email.into()]))
            .one(self.db.as_ref())
            .await?;
        Ok(row.map(|row| row.into_record(role)))
    }

    /// Finds a principal by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, key: PrincipalKey) -> Result<Option<PrincipalRecord>, DbErr> {
        let sql = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", key.role.table_name());
        let row = PrincipalRow::find_by_statement(statement(sql, vec![key.id.into()]))
            .one(self.db.as_ref())
            .await?;
        Ok(row.map(|row| row.into_record(key.role)))
    }

    /// Returns true if any principal table other than `except` holds this
    /// email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_in_use(
        &self,
        email: &str,
        except: Option<PrincipalKey>,
    ) -> Result<bool, DbErr> {
        let sql = Role::ALL
            .iter()
            .map(|role| {
                format!(
                    "SELECT '{}' AS role, id FROM {} WHERE lower(email) = lower($1)",
                    role.as_str(),
                    role.table_name()
                )
            })
            .collect::<Vec<_>>()
            .join(" UNION ALL ");

        let owners = EmailOwnerRow::find_by_statement(statement(sql, vec![email.into()]))
            .all(self.db.as_ref())
            .await?;

        Ok(owners.into_iter().any(|owner| {
            let key = Role::parse(&owner.role).map(|role| PrincipalKey::new(role, owner.id));
            key.is_none() || key != except
        }))
    }

    /// Inserts a principal and returns its key.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including a unique violation on
    /// the email.
    pub async fn create(&self, role: Role, new: &NewPrincipal) -> Result<PrincipalKey, DbErr> {
        let sql = format!(
            "INSERT INTO {} (first_name, last_name, email, phone, password_hash, park_name) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
            role.table_name()
        );
        let values = vec![
            new.first_name.clone().into(),
            new.last_name.clone().into(),
            new.email.clone().into(),
            new.phone.clone().into(),
            new.credential.clone().into(),
            new.park_name.clone().into(),
        ];

        let row = IdRow::find_by_statement(statement(sql, values))
            .one(self.db.as_ref())
            .await?
            .ok_or(DbErr::RecordNotInserted)?;

        Ok(PrincipalKey::new(role, row.id))
    }

    /// Overwrites profile fields; a `None` park keeps the current one.
    ///
    /// Returns the number of rows updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update_profile(
        &self,
        key: PrincipalKey,
        changes: &ProfileChanges,
    ) -> Result<u64, DbErr> {
        let sql = format!(
            "UPDATE {} SET first_name = $1, last_name = $2, email = $3, phone = $4, \
             park_name = COALESCE($5, park_name) WHERE id = $6",
            key.role.table_name()
        );
        let values = vec![
            changes.first_name.clone().into(),
            changes.last_name.clone().into(),
            changes.email.clone().into(),
            changes.phone.clone().into(),
            changes.park_name.clone().into(),
            key.id.into(),
        ];
        self.execute(sql, values).await
    }

    /// Replaces the stored credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update_password_hash(
        &self,
        key: PrincipalKey,
        credential: &str,
    ) -> Result<u64, DbErr> {
        let sql = format!(
            "UPDATE {} SET password_hash = $1 WHERE id = $2",
            key.role.table_name()
        );
        self.execute(sql, vec![credential.into(), key.id.into()])
            .await
    }

    /// Stamps `last_login` with the database clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn touch_last_login(&self, key: PrincipalKey) -> Result<u64, DbErr> {
        let sql = format!(
            "UPDATE {} SET last_login = now() WHERE id = $1",
            key.role.table_name()
        );
        self.execute(sql, vec![key.id.into()]).await
    }

    /// Sets the avatar URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update_avatar(&self, key: PrincipalKey, url: &str) -> Result<u64, DbErr> {
        let sql = format!(
            "UPDATE {} SET avatar_url = $1 WHERE id = $2",
            key.role.table_name()
        );
        self.execute(sql, vec![url.into(), key.id.into()]).await
    }

    /// Deletes a principal.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete(&self, key: PrincipalKey) -> Result<u64, DbErr> {
        let sql = format!("DELETE FROM {} WHERE id = $1", key.role.table_name());
        self.execute(sql, vec![key.id.into()]).await
    }

    /// Lists every principal of a role, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, role: Role) -> Result<Vec<PrincipalRecord>, DbErr> {
        let sql = format!("SELECT {COLUMNS} FROM {} ORDER BY id", role.table_name());
        let rows = PrincipalRow::find_by_statement(statement(sql, Vec::new()))
            .all(self.db.as_ref())
            .await?;
        Ok(rows.into_iter().map(|row| row.into_record(role)).collect())
    }

    /// Lists the principals of all five staff tables.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails.
    pub async fn list_staff(&self) -> Result<Vec<PrincipalRecord>, DbErr> {
        let mut staff = Vec::new();
        for role in STAFF_PROBE_ORDER {
            staff.extend(self.list(role).await?);
        }
        Ok(staff)
    }

    /// Counts the principals of a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self, role: Role) -> Result<u64, DbErr> {
        let sql = format!("SELECT COUNT(*) AS count FROM {}", role.table_name());
        let row = CountRow::find_by_statement(statement(sql, Vec::new()))
            .one(self.db.as_ref())
            .await?;
        Ok(row.map_or(0, |row| u64::try_from(row.count).unwrap_or(0)))
    }

    /// Returns the most recent logins across every principal table.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn recent_logins(&self, limit: u64) -> Result<Vec<RecentLogin>, DbErr> {
        let union = Role::ALL
            .iter()
            .map(|role| {
                format!(
                    "SELECT '{}' AS role, id, first_name, last_name, email, last_login \
                     FROM {} WHERE last_login IS NOT NULL",
                    role.as_str(),
                    role.table_name()
                )
            })
            .collect::<Vec<_>>()
            .join(" UNION ALL ");
        let sql = format!("{union} ORDER BY last_login DESC LIMIT $1");
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = LoginRow::find_by_statement(statement(sql, vec![limit.into()]))
            .all(self.db.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let role = Role::parse(&row.role)?;
                Some(RecentLogin {
                    key: PrincipalKey::new(role, row.id),
                    name: format!("{} {}", row.first_name, row.last_name),
                    email: row.email,
                    last_login: row.last_login.with_timezone(&Utc),
                })
            })
            .collect())
    }

    async fn execute(&self, sql: String, values: Vec<Value>) -> Result<u64, DbErr> {
        let result = self.db.execute(statement(sql, values)).await?;
        Ok(result.rows_affected())
    }
}

fn store_error(err: DbErr) -> StoreError {
    StoreError(err.to_string())
}

#[async_trait]
impl PrincipalStore for PrincipalRepository {
    async fn find_by_email(
        &self,
        role: Role,
        email: &str,
    ) -> Result<Option<PrincipalRecord>, StoreError> {
        Self::find_by_email(self, role, email)
            .await
            .map_err(store_error)
    }

    async fn update_credential(
        &self,
        key: PrincipalKey,
        credential: &str,
    ) -> Result<(), StoreError> {
        self.update_password_hash(key, credential)
            .await
            .map(drop)
            .map_err(store_error)
    }

    async fn record_login(&self, key: PrincipalKey) -> Result<(), StoreError> {
        self.touch_last_login(key)
            .await
            .map(drop)
            .map_err(store_error)
    }
}
