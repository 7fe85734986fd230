//! Payment repository.

use std::sync::Arc;

use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};

use parkpro_core::intake::NewPayment;

use crate::entities::payments;

/// Repository for card payments.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    db: Arc<DatabaseConnection>,
}

impl PaymentRepository {
    /// Creates a new payment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Records a completed payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including a duplicate
    /// transaction id.
    pub async fn create(&self, new: &NewPayment) -> Result<payments::Model, DbErr> {
        payments::ActiveModel {
            transaction_id: Set(new.transaction_id.clone()),
            payment_type: Set(new.payment_type.clone()),
            amount: Set(new.amount),
            card_name: Set(new.card_name.clone()),
            card_number_last4: Set(new.card_last4.clone()),
            expiry_date: Set(new.expiry_date.clone()),
            status: Set(NewPayment::STATUS.to_string()),
            park_name: Set(new.park_name.clone()),
            customer_email: Set(new.customer_email.clone()),
            created_at: Set(new.processed_at.into()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
    }
}
