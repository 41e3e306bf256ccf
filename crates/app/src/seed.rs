//! Sample data inserted on first start when the database is empty.

use chrono::{Days, NaiveDate};
use engine::{Engine, ExpenseDraft};
use rust_decimal::Decimal;

type SeedResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// (description, amount in cents, category, days before today, notes)
const SAMPLES: [(&str, i64, &str, u64, &str); 5] = [
    (
        "Grocery shopping at Walmart",
        125_50,
        "Groceries",
        5,
        "Weekly grocery shopping",
    ),
    (
        "Gas station fill-up",
        45_75,
        "Transportation",
        3,
        "Full tank for the week",
    ),
    (
        "Electric bill payment",
        89_30,
        "Utilities",
        10,
        "Monthly electricity bill",
    ),
    ("Lunch at restaurant", 25_00, "Dining", 2, "Business lunch meeting"),
    (
        "Netflix subscription",
        15_99,
        "Entertainment",
        1,
        "Monthly subscription",
    ),
];

pub fn sample_drafts(today: NaiveDate) -> Vec<ExpenseDraft> {
    SAMPLES
        .iter()
        .map(|&(description, cents, category, days_ago, notes)| ExpenseDraft {
            description: Some(description.to_string()),
            amount: Some(Decimal::new(cents, 2)),
            category: Some(category.to_string()),
            date: today.checked_sub_days(Days::new(days_ago)),
            notes: Some(notes.to_string()),
        })
        .collect()
}

/// Insert the sample expenses unless some expense already exists.
///
/// Returns how many records were inserted.
pub async fn seed_if_empty(engine: &Engine, today: NaiveDate) -> SeedResult<usize> {
    if engine.count_expenses().await? > 0 {
        return Ok(0);
    }

    let drafts = sample_drafts(today);
    let inserted = drafts.len();
    for draft in drafts {
        engine.create_expense(draft.validate()?).await?;
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_valid_and_dated_in_the_past() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let drafts = sample_drafts(today);
        assert_eq!(drafts.len(), 5);
        for draft in drafts {
            let fields = draft.validate().unwrap();
            assert!(fields.date() < today);
        }
    }

    #[test]
    fn grocery_sample_matches_its_amount() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let grocery = sample_drafts(today).remove(0).validate().unwrap();
        assert_eq!(grocery.amount().to_string(), "125.50");
        assert_eq!(grocery.date(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }
}
