//! Public submissions: donations, tour bookings, service applications and
//! card payments.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::error::IntakeError;
use super::fields::{RequiredFields, optional, positive};

/// Price of one tour seat.
pub const TOUR_PRICE_PER_GUEST: Decimal = Decimal::from_parts(75, 0, 0, false, 0);

/// Largest tour party.
pub const MAX_TOUR_GUESTS: i64 = 20;

/// Donation form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DonationInput {
    /// Kind of donation.
    pub donation_type: Option<String>,
    /// Amount in currency units.
    pub amount: Option<Decimal>,
    /// Park the record belongs to.
    pub park_name: Option<String>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// Optional note from the donor.
    pub message: Option<String>,
    /// Hide the donor name.
    pub is_anonymous: Option<bool>,
}

/// A validated donation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDonation {
    /// Kind of donation.
    pub donation_type: String,
    /// Amount in currency units.
    pub amount: Decimal,
    /// Park the record belongs to.
    pub park_name: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// Optional note from the donor.
    pub message: Option<String>,
    /// Hide the donor name.
    pub is_anonymous: bool,
}

impl DonationInput {
    /// Validates the form.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingFields` or a non-positive amount error.
    pub fn validate(self) -> Result<NewDonation, IntakeError> {
        let mut fields = RequiredFields::new();
        let donation_type = fields.text("donationType", self.donation_type);
        let amount = fields.amount("amount", self.amount);
        let park_name = fields.text("parkName", self.park_name);
        let first_name = fields.text("firstName", self.first_name);
        let last_name = fields.text("lastName", self.last_name);
        let email = fields.text("email", self.email);
        fields.finish()?;

        Ok(NewDonation {
            donation_type,
            amount: positive("Donation", amount)?,
            park_name,
            first_name,
            last_name,
            email,
            message: optional(self.message),
            is_anonymous: self.is_anonymous.unwrap_or(false),
        })
    }
}

/// Tour booking form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TourBookingInput {
    /// Park the record belongs to.
    pub park_name: Option<String>,
    /// Name of the booked tour.
    pub tour_name: Option<String>,
    /// Tour date.
    pub date: Option<String>,
    /// Tour start time.
    pub time: Option<String>,
    /// Number of guests.
    pub guests: Option<i64>,
    /// Amount in currency units.
    pub amount: Option<Decimal>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional requests from the visitor.
    pub special_requests: Option<String>,
}

/// A validated tour booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTourBooking {
    /// Park the record belongs to.
    pub park_name: String,
    /// Name of the booked tour.
    pub tour_name: String,
    /// Tour date.
    pub date: NaiveDate,
    /// Tour start time.
    pub time: NaiveTime,
    /// Number of guests.
    pub guests: i32,
    /// Amount in currency units.
    pub amount: Decimal,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional requests from the visitor.
    pub special_requests: Option<String>,
}

impl TourBookingInput {
    /// Validates the form.
    ///
    /// Checks run in order: required fields, party size, price, then the
    /// date and time formats.
    ///
    /// # Errors
    ///
    /// Returns the first failing check.
    pub fn validate(self) -> Result<NewTourBooking, IntakeError> {
        let mut fields = RequiredFields::new();
        let park_name = fields.text("parkName", self.park_name);
        let tour_name = fields.text("tourName", self.tour_name);
        let date = fields.text("date", self.date);
        let time = fields.text("time", self.time);
        let guests = fields.value("guests", self.guests).unwrap_or_default();
        let amount = fields.amount("amount", self.amount);
        let first_name = fields.text("firstName", self.first_name);
        let last_name = fields.text("lastName", self.last_name);
        let email = fields.text("email", self.email);
        fields.finish()?;

        if !(1..=MAX_TOUR_GUESTS).contains(&guests) {
            return Err(IntakeError::GuestsOutOfRange);
        }
        let guests = i32::try_from(guests).map_err(|_| IntakeError::GuestsOutOfRange)?;

        if amount != TOUR_PRICE_PER_GUEST * Decimal::from(guests) {
            return Err(IntakeError::TourAmountMismatch);
        }

        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| IntakeError::InvalidDateTime)?;
        let time =
            NaiveTime::parse_from_str(&time, "%H:%M").map_err(|_| IntakeError::InvalidDateTime)?;

        Ok(NewTourBooking {
            park_name,
            tour_name,
            date,
            time,
            guests,
            amount,
            first_name,
            last_name,
            email,
            phone: optional(self.phone),
            special_requests: optional(self.special_requests),
        })
    }
}

/// A file received with a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Name the client gave the file.
    pub file_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Service application fields collected from a multipart form.
#[derive(Debug, Clone, Default)]
pub struct ServiceApplicationInput {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Kind of company.
    pub company_type: Option<String>,
    /// Service the company offers.
    pub provided_service: Option<String>,
    /// Registered company name.
    pub company_name: Option<String>,
    /// Company tax identifier.
    pub tax_id: Option<String>,
    /// Uploaded company registration certificate.
    pub company_registration: Option<UploadedFile>,
    /// Uploaded application letter.
    pub application_letter: Option<UploadedFile>,
}

/// A validated service application, files not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServiceApplication {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Kind of company.
    pub company_type: String,
    /// Service the company offers.
    pub provided_service: Option<String>,
    /// Registered company name.
    pub company_name: String,
    /// Company tax identifier.
    pub tax_id: String,
    /// Uploaded company registration certificate.
    pub company_registration: UploadedFile,
    /// Uploaded application letter.
    pub application_letter: Option<UploadedFile>,
}

impl ServiceApplicationInput {
    /// Sets a text field by its form name; unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        let slot = match name {
            "firstName" => &mut self.first_name,
            "lastName" => &mut self.last_name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "companyType" => &mut self.company_type,
            "providedService" => &mut self.provided_service,
            "companyName" => &mut self.company_name,
            "taxId" => &mut self.tax_id,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Validates the form.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingFields` or
    /// `IntakeError::MissingRegistration`.
    pub fn validate(self) -> Result<NewServiceApplication, IntakeError> {
        let mut fields = RequiredFields::new();
        let first_name = fields.text("firstName", self.first_name);
        let last_name = fields.text("lastName", self.last_name);
        let email = fields.text("email", self.email);
        let company_type = fields.text("companyType", self.company_type);
        let company_name = fields.text("companyName", self.company_name);
        let tax_id = fields.text("taxId", self.tax_id);
        fields.finish()?;

        let company_registration = self
            .company_registration
            .filter(|f| !f.bytes.is_empty())
            .ok_or(IntakeError::MissingRegistration)?;

        Ok(NewServiceApplication {
            first_name,
            last_name,
            email,
            phone: optional(self.phone),
            company_type,
            provided_service: optional(self.provided_service),
            company_name,
            tax_id,
            company_registration,
            application_letter: self.application_letter.filter(|f| !f.bytes.is_empty()),
        })
    }
}

/// Card payment form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentInput {
    /// What the payment is for.
    pub payment_type: Option<String>,
    /// Amount in currency units.
    pub amount: Option<Decimal>,
    /// Name on the card.
    pub card_name: Option<String>,
    /// Full card number; only the last four digits are kept.
    pub card_number: Option<String>,
    /// Card expiry as `MM/YY`.
    pub expiry_date: Option<String>,
    /// Card security code; validated only for presence.
    pub cvv: Option<String>,
    /// Park the record belongs to.
    pub park_name: Option<String>,
    /// Email of the paying customer.
    pub customer_email: Option<String>,
}

/// A validated payment. The full card number and CVV are not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    /// Generated transaction identifier.
    pub transaction_id: String,
    /// What the payment is for.
    pub payment_type: String,
    /// Amount in currency units.
    pub amount: Decimal,
    /// Name on the card.
    pub card_name: String,
    /// Last four digits of the card number.
    pub card_last4: String,
    /// Card expiry as `MM/YY`.
    pub expiry_date: String,
    /// Park the record belongs to.
    pub park_name: String,
    /// Email of the paying customer.
    pub customer_email: String,
    /// When the payment was processed.
    pub processed_at: DateTime<Utc>,
}

impl NewPayment {
    /// Status recorded for every accepted payment.
    pub const STATUS: &'static str = "completed";
}

impl PaymentInput {
    /// Validates the form, stamping it with the current time and a random
    /// transaction suffix.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingFields` or a non-positive amount error.
    pub fn validate(self) -> Result<NewPayment, IntakeError> {
        self.validate_at(Utc::now(), rand::random_range(100..=999))
    }

    /// Validates the form with an explicit timestamp and suffix.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingFields` or a non-positive amount error.
    pub fn validate_at(self, now: DateTime<Utc>, suffix: u16) -> Result<NewPayment, IntakeError> {
        let mut fields = RequiredFields::new();
        let payment_type = fields.text("paymentType", self.payment_type);
        let amount = fields.amount("amount", self.amount);
        let card_name = fields.text("cardName", self.card_name);
        let card_number = fields.text("cardNumber", self.card_number);
        let expiry_date = fields.text("expiryDate", self.expiry_date);
        fields.text("cvv", self.cvv);
        let park_name = fields.text("parkName", self.park_name);
        let customer_email = fields.text("customerEmail", self.customer_email);
        fields.finish()?;

        Ok(NewPayment {
            transaction_id: format!("TR-{}-{suffix}", now.format("%y%m%d%H%M%S")),
            payment_type,
            amount: positive("Payment", amount)?,
            card_name,
            card_last4: card_last4(&card_number),
            expiry_date: normalize_expiry(&expiry_date),
            park_name,
            customer_email,
            processed_at: now,
        })
    }
}

/// Keeps the last four characters of a card number, ignoring spaces.
///
/// Numbers shorter than four characters are recorded as `0000`.
#[must_use]
pub fn card_last4(card_number: &str) -> String {
    let digits: Vec<char> = card_number.chars().filter(|c| *c != ' ').collect();
    if digits.len() < 4 {
        return "0000".to_string();
    }
    digits[digits.len() - 4..].iter().collect()
}

/// Expands a two-digit expiry year: `MM/YY` becomes `MM/20YY`.
#[must_use]
pub fn normalize_expiry(expiry: &str) -> String {
    match expiry.split_once('/') {
        Some((month, year)) if year.len() == 2 => format!("{month}/20{year}"),
        _ => expiry.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn tour(guests: i64, amount: Decimal) -> TourBookingInput {
        TourBookingInput {
            park_name: Some("Akagera".into()),
            tour_name: Some("Savannah drive".into()),
            date: Some("2026-07-14".into()),
            time: Some("09:30".into()),
            guests: Some(guests),
            amount: Some(amount),
            first_name: Some("Ada".into()),
            last_name: Some("Mukamana".into()),
            email: Some("ada@example.com".into()),
            ..TourBookingInput::default()
        }
    }

    fn payment() -> PaymentInput {
        PaymentInput {
            payment_type: Some("donation".into()),
            amount: Some(dec!(120.50)),
            card_name: Some("Ada Mukamana".into()),
            card_number: Some("4111 1111 1111 1234".into()),
            expiry_date: Some("08/29".into()),
            cvv: Some("123".into()),
            park_name: Some("Nyungwe".into()),
            customer_email: Some("ada@example.com".into()),
        }
    }

    #[test]
    fn test_donation_lists_missing_fields() {
        let input = DonationInput {
            amount: Some(dec!(10)),
            email: Some("a@example.com".into()),
            ..DonationInput::default()
        };

        assert_eq!(
            input.validate(),
            Err(IntakeError::MissingFields(vec![
                "donationType".into(),
                "parkName".into(),
                "firstName".into(),
                "lastName".into(),
            ]))
        );
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-1))]
    fn test_donation_amount_must_be_positive(#[case] amount: Decimal) {
        let input = DonationInput {
            donation_type: Some("one-time".into()),
            amount: Some(amount),
            park_name: Some("Akagera".into()),
            first_name: Some("A".into()),
            last_name: Some("B".into()),
            email: Some("a@example.com".into()),
            ..DonationInput::default()
        };

        assert_eq!(
            input.validate().unwrap_err().to_string(),
            "Donation amount must be positive"
        );
    }

    #[test]
    fn test_donation_deserializes_numeric_and_string_amounts() {
        let numeric: DonationInput = serde_json::from_str(r#"{"amount": 25.5}"#).unwrap();
        let text: DonationInput = serde_json::from_str(r#"{"amount": "25.5"}"#).unwrap();

        assert_eq!(numeric.amount, Some(dec!(25.5)));
        assert_eq!(text.amount, Some(dec!(25.5)));
    }

    #[rstest]
    #[case(1, dec!(75))]
    #[case(4, dec!(300))]
    #[case(20, dec!(1500))]
    fn test_tour_accepts_exact_price(#[case] guests: i64, #[case] amount: Decimal) {
        let booking = tour(guests, amount).validate().unwrap();
        assert_eq!(booking.date, NaiveDate::from_ymd_opt(2026, 7, 14).unwrap());
        assert_eq!(booking.time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert!(booking.phone.is_none());
    }

    #[rstest]
    #[case(0, dec!(0), IntakeError::GuestsOutOfRange)]
    #[case(21, dec!(1575), IntakeError::GuestsOutOfRange)]
    #[case(2, dec!(75), IntakeError::TourAmountMismatch)]
    #[case(2, dec!(150.01), IntakeError::TourAmountMismatch)]
    fn test_tour_rejects(#[case] guests: i64, #[case] amount: Decimal, #[case] expected: IntakeError) {
        assert_eq!(tour(guests, amount).validate(), Err(expected));
    }

    #[rstest]
    #[case("14/07/2026", "09:30")]
    #[case("2026-02-30", "09:30")]
    #[case("2026-07-14", "9.30")]
    #[case("2026-07-14", "25:00")]
    fn test_tour_rejects_bad_date_or_time(#[case] date: &str, #[case] time: &str) {
        let mut input = tour(2, dec!(150));
        input.date = Some(date.into());
        input.time = Some(time.into());

        assert_eq!(input.validate(), Err(IntakeError::InvalidDateTime));
    }

    #[test]
    fn test_service_application_requires_registration() {
        let mut input = ServiceApplicationInput::default();
        for (name, value) in [
            ("firstName", "Eric"),
            ("lastName", "Habimana"),
            ("email", "eric@example.com"),
            ("companyType", "llc"),
            ("companyName", "Gorilla Treks"),
            ("taxId", "TIN-1"),
            ("unknown", "ignored"),
        ] {
            input.set_field(name, value.to_string());
        }

        assert_eq!(
            input.clone().validate(),
            Err(IntakeError::MissingRegistration)
        );

        input.company_registration = Some(UploadedFile {
            file_name: "reg.pdf".into(),
            bytes: b"%PDF".to_vec(),
        });
        let application = input.validate().unwrap();
        assert_eq!(application.company_name, "Gorilla Treks");
        assert!(application.application_letter.is_none());
    }

    #[test]
    fn test_payment_keeps_only_last_four_digits() {
        let now = Utc.with_ymd_and_hms(2026, 3, 9, 14, 5, 7).unwrap();
        let payment = payment().validate_at(now, 417).unwrap();

        assert_eq!(payment.transaction_id, "TR-260309140507-417");
        assert_eq!(payment.card_last4, "1234");
        assert_eq!(payment.expiry_date, "08/2029");
        assert_eq!(payment.amount, dec!(120.50));
    }

    #[test]
    fn test_payment_random_suffix_in_range() {
        let payment = payment().validate().unwrap();
        let suffix: u16 = payment.transaction_id.rsplit('-').next().unwrap().parse().unwrap();
        assert!((100..=999).contains(&suffix));
    }

    #[test]
    fn test_payment_amount_must_be_positive() {
        let mut input = payment();
        input.amount = Some(dec!(0));
        assert_eq!(
            input.validate().unwrap_err(),
            IntakeError::NonPositiveAmount("Payment")
        );
    }

    #[rstest]
    #[case("4111 1111 1111 1234", "1234")]
    #[case("987", "0000")]
    #[case("1 2 3", "0000")]
    #[case("12345", "2345")]
    fn test_card_last4(#[case] number: &str, #[case] expected: &str) {
        assert_eq!(card_last4(number), expected);
    }

    #[rstest]
    #[case("08/29", "08/2029")]
    #[case("08/2029", "08/2029")]
    #[case("0829", "0829")]
    fn test_normalize_expiry(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_expiry(raw), expected);
    }
}
