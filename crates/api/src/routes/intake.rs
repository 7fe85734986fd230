//! Public intake: donations, tour bookings, service applications and
//! card payments. None of these require a session.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
};
use serde_json::{Value, json};
use tracing::info;

use crate::{AppState, error::ApiError, extractors::JsonBody};
use parkpro_core::intake::{
    DonationInput, NewPayment, PaymentInput, ServiceApplicationInput, TourBookingInput,
    UploadedFile,
};
use parkpro_db::{
    DonationRepository, PaymentRepository, ServiceApplicationRepository, TourRepository,
    repositories::StoredDocuments,
};

/// Creates the intake router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/donate", post(donate))
        .route("/api/book-tour", post(book_tour))
        .route("/api/services", post(apply_for_service))
        .route("/api/process_payment", post(process_payment))
}

/// POST /api/donate - Record a donation.
async fn donate(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<DonationInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let donation = form.validate()?;
    let created = DonationRepository::new(state.db.clone())
        .create(&donation)
        .await?;
    info!(donation_id = created.id, "Donation recorded");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Donation recorded successfully", "id": created.id })),
    ))
}

/// POST /api/book-tour - Book a guided tour.
async fn book_tour(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<TourBookingInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let booking = form.validate()?;
    let created = TourRepository::new(state.db.clone())
        .create(&booking)
        .await?;
    info!(tour_id = created.id, guests = created.guests, "Tour booked");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Tour booked successfully", "id": created.id })),
    ))
}

/// POST /api/services - Submit a service provider application.
///
/// Multipart form: text fields plus the `companyRegistration` and
/// optional `applicationLetter` files.
async fn apply_for_service(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut form = ServiceApplicationInput::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "companyRegistration" | "applicationLetter" => {
                let file = UploadedFile {
                    file_name: field.file_name().unwrap_or("document").to_string(),
                    bytes: field.bytes().await?.to_vec(),
                };
                if name == "companyRegistration" {
                    form.company_registration = Some(file);
                } else {
                    form.application_letter = Some(file);
                }
            }
            _ => {
                let value = field.text().await?;
                form.set_field(&name, value);
            }
        }
    }

    let application = form.validate()?;
    let company_registration = state
        .uploads
        .save("registration", &application.company_registration)
        .await?;
    let application_letter = match &application.application_letter {
        Some(letter) => Some(state.uploads.save("letter", letter).await?),
        None => None,
    };

    let created = ServiceApplicationRepository::new(state.db.clone())
        .create(
            &application,
            StoredDocuments {
                company_registration,
                application_letter,
            },
        )
        .await?;
    info!(service_id = created.id, "Service application submitted");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Service application submitted successfully",
            "id": created.id
        })),
    ))
}

/// POST /api/process_payment - Record a card payment.
async fn process_payment(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<PaymentInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let payment = form.validate()?;
    PaymentRepository::new(state.db.clone())
        .create(&payment)
        .await?;
    info!(transaction_id = %payment.transaction_id, "Payment processed");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Payment processed successfully",
            "transactionId": payment.transaction_id,
            "status": NewPayment::STATUS,
            "date": payment.processed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        })),
    ))
}
