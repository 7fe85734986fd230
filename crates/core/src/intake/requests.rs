//! Funding requests: park-staff fund requests and the emergency,
//! extra-funds and budget requests finance escalates to government.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::IntakeError;
use super::fields::{RequiredFields, optional, positive};

/// Fund request form as submitted by park staff.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FundRequestInput {
    /// Short title.
    pub title: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Amount in currency units.
    pub amount: Option<Decimal>,
    /// Spending category.
    pub category: Option<String>,
    /// Park the record belongs to.
    #[serde(rename = "parkname", alias = "parkName")]
    pub park_name: Option<String>,
    /// How urgent the request is.
    pub urgency: Option<String>,
}

/// A validated fund request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFundRequest {
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Amount in currency units.
    pub amount: Decimal,
    /// Spending category.
    pub category: String,
    /// Park the record belongs to.
    pub park_name: String,
    /// How urgent the request is.
    pub urgency: String,
}

impl FundRequestInput {
    /// Validates the form.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingFields` or a non-positive amount error.
    pub fn validate(self) -> Result<NewFundRequest, IntakeError> {
        let mut fields = RequiredFields::new();
        let title = fields.text("title", self.title);
        let description = fields.text("description", self.description);
        let amount = fields.amount("amount", self.amount);
        let category = fields.text("category", self.category);
        let park_name = fields.text("parkname", self.park_name);
        let urgency = fields.text("urgency", self.urgency);
        fields.finish()?;

        Ok(NewFundRequest {
            title,
            description,
            amount: positive("Fund request", amount)?,
            category,
            park_name,
            urgency,
        })
    }
}

/// Emergency funding request form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmergencyRequestInput {
    /// Short title.
    pub title: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Amount in currency units.
    pub amount: Option<Decimal>,
    /// Park the record belongs to.
    pub park_name: Option<String>,
    /// Kind of emergency.
    pub emergency_type: Option<String>,
    /// Why the money is needed.
    pub justification: Option<String>,
    /// When the emergency funds are needed.
    pub timeframe: Option<String>,
}

/// A validated emergency request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmergencyRequest {
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Amount in currency units.
    pub amount: Decimal,
    /// Park the record belongs to.
    pub park_name: String,
    /// Kind of emergency.
    pub emergency_type: String,
    /// Why the money is needed.
    pub justification: String,
    /// When the emergency funds are needed.
    pub timeframe: String,
}

impl EmergencyRequestInput {
    /// Validates the form.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingFields` or a non-positive amount error.
    pub fn validate(self) -> Result<NewEmergencyRequest, IntakeError> {
        let mut fields = RequiredFields::new();
        let title = fields.text("title", self.title);
        let description = fields.text("description", self.description);
        let amount = fields.amount("amount", self.amount);
        let park_name = fields.text("parkName", self.park_name);
        let emergency_type = fields.text("emergencyType", self.emergency_type);
        let justification = fields.text("justification", self.justification);
        let timeframe = fields.text("timeframe", self.timeframe);
        fields.finish()?;

        Ok(NewEmergencyRequest {
            title,
            description,
            amount: positive("Emergency request", amount)?,
            park_name,
            emergency_type,
            justification,
            timeframe,
        })
    }
}

/// Extra funds request form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtraFundsInput {
    /// Short title.
    pub title: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Amount in currency units.
    pub amount: Option<Decimal>,
    /// Park the record belongs to.
    pub park_name: Option<String>,
    /// Spending category.
    pub category: Option<String>,
    /// Why the money is needed.
    pub justification: Option<String>,
    /// How long the extra funds are needed.
    pub expected_duration: Option<String>,
}

/// A validated extra funds request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExtraFunds {
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Amount in currency units.
    pub amount: Decimal,
    /// Park the record belongs to.
    pub park_name: String,
    /// Spending category.
    pub category: String,
    /// Why the money is needed.
    pub justification: String,
    /// How long the extra funds are needed.
    pub expected_duration: String,
}

impl ExtraFundsInput {
    /// Validates the form.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingFields` or a non-positive amount error.
    pub fn validate(self) -> Result<NewExtraFunds, IntakeError> {
        let mut fields = RequiredFields::new();
        let title = fields.text("title", self.title);
        let description = fields.text("description", self.description);
        let amount = fields.amount("amount", self.amount);
        let park_name = fields.text("parkName", self.park_name);
        let category = fields.text("category", self.category);
        let justification = fields.text("justification", self.justification);
        let expected_duration = fields.text("expectedDuration", self.expected_duration);
        fields.finish()?;

        Ok(NewExtraFunds {
            title,
            description,
            amount: positive("Extra funds", amount)?,
            park_name,
            category,
            justification,
            expected_duration,
        })
    }
}

/// One budget line as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BudgetItemInput {
    /// Spending category.
    pub category: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Amount in currency units.
    pub amount: Option<Decimal>,
}

/// A validated budget line, stored as JSON alongside its budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetItem {
    /// Spending category.
    pub category: String,
    /// Free-text description.
    pub description: String,
    /// Amount in currency units.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Budget proposal form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetInput {
    /// Short title.
    pub title: Option<String>,
    /// Fiscal year the budget covers.
    pub fiscal_year: Option<String>,
    /// Park the record belongs to.
    pub park_name: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Budget line items.
    pub items: Option<Vec<BudgetItemInput>>,
}

/// A validated budget; the total is the sum of its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBudget {
    /// Short title.
    pub title: String,
    /// Fiscal year the budget covers.
    pub fiscal_year: String,
    /// Park the record belongs to.
    pub park_name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Budget line items.
    pub items: Vec<BudgetItem>,
    /// Sum of the line item amounts.
    pub total_amount: Decimal,
}

impl BudgetInput {
    /// Validates the form and every line item.
    ///
    /// Missing item fields are reported as `items[i].field`.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingFields`, `IntakeError::EmptyBudget` or
    /// a non-positive amount error.
    pub fn validate(self) -> Result<NewBudget, IntakeError> {
        let mut fields = RequiredFields::new();
        let title = fields.text("title", self.title);
        let fiscal_year = fields.text("fiscalYear", self.fiscal_year);
        let park_name = fields.text("parkName", self.park_name);
        let raw_items = fields.value("items", self.items).unwrap_or_default();

        let items: Vec<(String, String, Decimal)> = raw_items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                (
                    fields.text(&format!("items[{i}].category"), item.category),
                    fields.text(&format!("items[{i}].description"), item.description),
                    fields.amount(&format!("items[{i}].amount"), item.amount),
                )
            })
            .collect();
        fields.finish()?;

        if items.is_empty() {
            return Err(IntakeError::EmptyBudget);
        }

        let items = items
            .into_iter()
            .map(|(category, description, amount)| {
                Ok(BudgetItem {
                    category,
                    description,
                    amount: positive("Budget item", amount)?,
                })
            })
            .collect::<Result<Vec<_>, IntakeError>>()?;
        let total_amount = items.iter().map(|item| item.amount).sum();

        Ok(NewBudget {
            title,
            fiscal_year,
            park_name,
            description: optional(self.description),
            items,
            total_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fund_request_uses_parkname_key() {
        let input: FundRequestInput = serde_json::from_str(
            r#"{"title":"Fence","description":"North fence","amount":1200,
                "category":"maintenance","parkname":"Akagera","urgency":"high"}"#,
        )
        .unwrap();

        let request = input.validate().unwrap();
        assert_eq!(request.park_name, "Akagera");
        assert_eq!(request.amount, dec!(1200));
    }

    #[test]
    fn test_fund_request_accepts_camel_case_park_name() {
        let input: FundRequestInput =
            serde_json::from_str(r#"{"parkName":"Nyungwe"}"#).unwrap();
        assert_eq!(input.park_name.as_deref(), Some("Nyungwe"));
    }

    #[test]
    fn test_fund_request_missing_fields() {
        let err = FundRequestInput::default().validate().unwrap_err();
        assert_eq!(
            err,
            IntakeError::MissingFields(vec![
                "title".into(),
                "description".into(),
                "amount".into(),
                "category".into(),
                "parkname".into(),
                "urgency".into(),
            ])
        );
    }

    #[test]
    fn test_emergency_request_amount_positive() {
        let input = EmergencyRequestInput {
            title: Some("Flood".into()),
            description: Some("Bridge washed out".into()),
            amount: Some(dec!(-3)),
            park_name: Some("Volcanoes".into()),
            emergency_type: Some("natural-disaster".into()),
            justification: Some("Access road closed for visitors".into()),
            timeframe: Some("immediate".into()),
        };
        assert_eq!(
            input.validate().unwrap_err(),
            IntakeError::NonPositiveAmount("Emergency request")
        );
    }

    #[test]
    fn test_extra_funds_round_trip() {
        let input: ExtraFundsInput = serde_json::from_str(
            r#"{"title":"Rangers","description":"Seasonal hires","amount":"5000.00",
                "parkName":"Akagera","category":"staffing",
                "justification":"Peak season","expectedDuration":"3 months"}"#,
        )
        .unwrap();
        let request = input.validate().unwrap();
        assert_eq!(request.expected_duration, "3 months");
    }

    #[test]
    fn test_budget_total_is_sum_of_items() {
        let input: BudgetInput = serde_json::from_str(
            r#"{"title":"Annual 2026","fiscalYear":"2026-2027","parkName":"Akagera",
                "items":[{"category":"Salaries","description":"Rangers","amount":750000},
                         {"category":"Maintenance","description":"Roads","amount":"200000.50"}]}"#,
        )
        .unwrap();

        let budget = input.validate().unwrap();
        assert_eq!(budget.items.len(), 2);
        assert_eq!(budget.total_amount, dec!(950000.50));
    }

    #[test]
    fn test_budget_reports_missing_item_fields() {
        let input = BudgetInput {
            title: Some("Annual".into()),
            fiscal_year: Some("2026".into()),
            park_name: Some("Akagera".into()),
            description: None,
            items: Some(vec![BudgetItemInput {
                category: Some("Salaries".into()),
                description: None,
                amount: None,
            }]),
        };
        assert_eq!(
            input.validate().unwrap_err(),
            IntakeError::MissingFields(vec![
                "items[0].description".into(),
                "items[0].amount".into(),
            ])
        );
    }

    #[test]
    fn test_budget_requires_items() {
        let input = BudgetInput {
            title: Some("Annual".into()),
            fiscal_year: Some("2026".into()),
            park_name: Some("Akagera".into()),
            description: None,
            items: Some(Vec::new()),
        };
        assert_eq!(input.validate().unwrap_err(), IntakeError::EmptyBudget);
    }

    #[test]
    fn test_budget_item_serializes_amount_as_number() {
        let item = BudgetItem {
            category: "Roads".into(),
            description: "Resurfacing".into(),
            amount: dec!(1250.5),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["amount"], serde_json::json!(1250.5));
    }
}
