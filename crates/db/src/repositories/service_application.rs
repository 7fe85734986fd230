//! Service provider application repository.

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::{Expr, Func},
};

use parkpro_core::intake::NewServiceApplication;
use parkpro_core::workflow::RequestStatus;

use crate::entities::services;

/// Where the uploaded documents of an application were stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocuments {
    /// Path of the company registration document.
    pub company_registration: String,
    /// Path of the application letter, if one was sent.
    pub application_letter: Option<String>,
}

/// Repository for service applications.
#[derive(Debug, Clone)]
pub struct ServiceApplicationRepository {
    db: Arc<DatabaseConnection>,
}

impl ServiceApplicationRepository {
    /// Creates a new service application repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Records a pending application.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        new: &NewServiceApplication,
        documents: StoredDocuments,
    ) -> Result<services::Model, DbErr> {
        services::ActiveModel {
            first_name: Set(new.first_name.clone()),
            last_name: Set(new.last_name.clone()),
            email: Set(new.email.clone()),
            phone: Set(new.phone.clone()),
            company_type: Set(new.company_type.clone()),
            provided_service: Set(new.provided_service.clone()),
            company_name: Set(new.company_name.clone()),
            tax_id: Set(new.tax_id.clone()),
            company_registration: Set(documents.company_registration),
            application_letter: Set(documents.application_letter),
            status: Set(RequestStatus::Pending.as_str().to_string()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
    }

    /// Lists every application, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<services::Model>, DbErr> {
        services::Entity::find()
            .order_by_desc(services::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }

    /// Lists the applications made under an email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_email(&self, email: &str) -> Result<Vec<services::Model>, DbErr> {
        services::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(services::Column::Email))).eq(email.to_lowercase()))
            .order_by_desc(services::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
    }
}
