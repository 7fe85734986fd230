//! Required-field collection.
//!
//! Forms report every missing field at once, so validation collects names
//! instead of failing on the first gap.

use rust_decimal::Decimal;

use super::error::IntakeError;

/// Collects missing required fields while extracting their values.
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<String>,
}

impl RequiredFields {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a trimmed, non-blank text field.
    pub fn text(&mut self, name: &str, value: Option<String>) -> String {
        match optional(value) {
            Some(v) => v,
            None => {
                self.missing.push(name.to_string());
                String::new()
            }
        }
    }

    /// Takes a secret verbatim; only emptiness counts as missing.
    pub fn secret(&mut self, name: &str, value: Option<String>) -> String {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => v,
            None => {
                self.missing.push(name.to_string());
                String::new()
            }
        }
    }

    /// Takes any other present value.
    pub fn value<T>(&mut self, name: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.missing.push(name.to_string());
        }
        value
    }

    /// Takes an amount; missing amounts read as zero until `finish`.
    pub fn amount(&mut self, name: &str, value: Option<Decimal>) -> Decimal {
        self.value(name, value).unwrap_or_default()
    }

    /// Fails with every missing field, in the order they were taken.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingFields` if any field was missing.
    pub fn finish(self) -> Result<(), IntakeError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(IntakeError::MissingFields(self.missing))
        }
    }
}

/// Trims an optional text field, treating blank as absent.
#[must_use]
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Requires a strictly positive amount.
///
/// # Errors
///
/// Returns `IntakeError::NonPositiveAmount` naming `what`.
pub fn positive(what: &'static str, amount: Decimal) -> Result<Decimal, IntakeError> {
    if amount > Decimal::ZERO {
        Ok(amount)
    } else {
        Err(IntakeError::NonPositiveAmount(what))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_collects_every_missing_field_in_order() {
        let mut fields = RequiredFields::new();
        let title = fields.text("title", Some("  Fence repair ".into()));
        fields.text("description", None);
        fields.text("category", Some("   ".into()));
        fields.amount("amount", None);

        assert_eq!(title, "Fence repair");
        assert_eq!(
            fields.finish(),
            Err(IntakeError::MissingFields(vec![
                "description".into(),
                "category".into(),
                "amount".into(),
            ]))
        );
    }

    #[test]
    fn test_secrets_are_not_trimmed() {
        let mut fields = RequiredFields::new();
        assert_eq!(fields.secret("password", Some(" pw ".into())), " pw ");
        fields.secret("confirm", Some(String::new()));

        assert_eq!(
            fields.finish(),
            Err(IntakeError::MissingFields(vec!["confirm".into()]))
        );
    }

    #[test]
    fn test_positive() {
        assert_eq!(positive("Donation", dec!(0.01)), Ok(dec!(0.01)));
        assert_eq!(
            positive("Donation", dec!(0)),
            Err(IntakeError::NonPositiveAmount("Donation"))
        );
        assert_eq!(
            positive("Payment", dec!(-5)).unwrap_err().to_string(),
            "Payment amount must be positive"
        );
    }
}
