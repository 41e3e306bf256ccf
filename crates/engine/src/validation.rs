//! Field-level validation for expense input.
//!
//! An [`ExpenseDraft`] mirrors an unvalidated request body. The only way to
//! obtain the [`ExpenseFields`] accepted by the engine's write operations is
//! [`ExpenseDraft::validate`], so constraint violations never reach storage.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::Money;

pub const DESCRIPTION_MAX_CHARS: usize = 255;
pub const CATEGORY_MAX_CHARS: usize = 100;
pub const NOTES_MAX_CHARS: usize = 500;
pub const AMOUNT_MAX_INTEGER_DIGITS: u32 = 10;

/// Validated, storable expense content (everything but the id).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseFields {
    pub(crate) description: String,
    pub(crate) amount: Money,
    pub(crate) category: String,
    pub(crate) date: NaiveDate,
    pub(crate) notes: Option<String>,
}

impl ExpenseFields {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// Candidate expense as received from a caller; any field may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Description,
    Amount,
    Category,
    Date,
    Notes,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Amount => "amount",
            Self::Category => "category",
            Self::Date => "date",
            Self::Notes => "notes",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: Field,
    pub reason: String,
}

impl FieldViolation {
    fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Every constraint an [`ExpenseDraft`] violated, in field order.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("invalid expense: {}", join_reasons(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Shorthand to check whether a field was rejected.
    pub fn has(&self, field: Field) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn join_reasons(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.reason.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ExpenseDraft {
    /// Check every field constraint, reporting all violations at once.
    pub fn validate(self) -> Result<ExpenseFields, ValidationError> {
        let mut violations = Vec::new();

        let description = required_text(
            self.description,
            Field::Description,
            DESCRIPTION_MAX_CHARS,
            &mut violations,
        );
        let amount = match self.amount {
            None => {
                violations.push(FieldViolation::new(Field::Amount, "amount is required"));
                None
            }
            Some(value) => validate_amount(value, &mut violations),
        };
        let category = required_text(
            self.category,
            Field::Category,
            CATEGORY_MAX_CHARS,
            &mut violations,
        );
        if self.date.is_none() {
            violations.push(FieldViolation::new(Field::Date, "date is required"));
        }
        if let Some(notes) = &self.notes
            && notes.chars().count() > NOTES_MAX_CHARS
        {
            violations.push(FieldViolation::new(
                Field::Notes,
                format!("notes cannot exceed {NOTES_MAX_CHARS} characters"),
            ));
        }

        match (description, amount, category, self.date) {
            (Some(description), Some(amount), Some(category), Some(date))
                if violations.is_empty() =>
            {
                Ok(ExpenseFields {
                    description,
                    amount,
                    category,
                    date,
                    notes: self.notes,
                })
            }
            _ => Err(ValidationError { violations }),
        }
    }
}

fn required_text(
    value: Option<String>,
    field: Field,
    max_chars: usize,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        violations.push(FieldViolation::new(field, format!("{field} is required")));
        return None;
    };
    if value.chars().count() > max_chars {
        violations.push(FieldViolation::new(
            field,
            format!("{field} cannot exceed {max_chars} characters"),
        ));
        return None;
    }
    Some(value)
}

fn validate_amount(value: Decimal, violations: &mut Vec<FieldViolation>) -> Option<Money> {
    if value <= Decimal::ZERO {
        violations.push(FieldViolation::new(
            Field::Amount,
            "amount must be greater than 0",
        ));
        return None;
    }

    let integer_limit = Decimal::from(10_i64.pow(AMOUNT_MAX_INTEGER_DIGITS));
    let amount = (value.trunc() < integer_limit)
        .then(|| Money::from_decimal(value))
        .flatten();
    if amount.is_none() {
        violations.push(FieldViolation::new(
            Field::Amount,
            format!(
                "amount must have at most {AMOUNT_MAX_INTEGER_DIGITS} integer digits and {} decimal places",
                Money::SCALE
            ),
        ));
    }
    amount
}
