//! Tour booking repository.

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, Set, Statement,
    sea_query::{Expr, Func},
};
use serde::Serialize;

use parkpro_core::intake::NewTourBooking;

use crate::entities::tours;

/// Tour bookings made in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct MonthlyBookings {
    /// Abbreviated month name, e.g. `Mar`.
    pub month: String,
    pub bookings: i64,
}

/// Repository for tour bookings.
#[derive(Debug, Clone)]
pub struct TourRepository {
    db: Arc<DatabaseConnection>,
}

impl TourRepository {
    /// Creates a new tour repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Records a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, new: &NewTourBooking) -> Result<tours::Model, DbErr> {
        tours::ActiveModel {
            park_name: Set(new.park_name.clone()),
            tour_name: Set(new.tour_name.clone()),
            date: Set(new.date),
            time: Set(new.time),
            guests: Set(new.guests),
            amount: Set(new.amount),
            first_name: Set(new.first_name.clone()),
            last_name: Set(new.last_name.clone()),
            email: Set(new.email.clone()),
            phone: Set(new.phone.clone()),
            special_requests: Set(new.special_requests.clone()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
    }

    /// Lists every booking, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<tours::Model>, DbErr> {
        tours::Entity::find()
            .order_by_desc(tours::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    /// Lists the bookings made under an email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_email(&self, email: &str) -> Result<Vec<tours::Model>, DbErr> {
        tours::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(tours::Column::Email))).eq(email.to_lowercase()))
            .order_by_desc(tours::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    /// Counts every booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64, DbErr> {
        tours::Entity::find().count(self.db.as_ref()).await
    }

    /// Counts bookings per calendar month, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn monthly_bookings(&self) -> Result<Vec<MonthlyBookings>, DbErr> {
        MonthlyBookings::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            r"SELECT to_char(date_trunc('month', created_at), 'Mon') AS month,
                     COUNT(*) AS bookings
              FROM tours
              GROUP BY date_trunc('month', created_at)
              ORDER BY date_trunc('month', created_at)",
        ))
        .all(self.db.as_ref())
        .await
    }
}
