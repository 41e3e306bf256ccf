use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod expense {
    use super::*;

    /// Request body for creating or replacing an expense.
    ///
    /// Every field is optional on the wire so that missing values are reported
    /// as validation errors instead of deserialization failures. Amounts are
    /// accepted both as JSON numbers and as strings.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct ExpenseNew {
        pub description: Option<String>,
        pub amount: Option<Decimal>,
        pub category: Option<String>,
        pub date: Option<NaiveDate>,
        pub notes: Option<String>,
    }

    /// A stored expense. `amount` is serialized as a decimal string with two
    /// fractional digits (e.g. `"125.50"`).
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: i64,
        pub description: String,
        pub amount: Decimal,
        pub category: String,
        pub date: NaiveDate,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseDeleted {
        pub message: String,
    }

    /// Inclusive date range, `?startDate=2024-01-01&endDate=2024-01-31`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DateRange {
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct KeywordSearch {
        pub keyword: String,
    }
}

pub mod analytics {
    use std::collections::HashMap;

    use super::*;

    /// Sum of amounts per category. Key order carries no meaning.
    pub type CategoryTotals = HashMap<String, Decimal>;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DateRangeTotal {
        pub total: Decimal,
    }
}

pub mod error {
    use super::*;

    /// Body of every non-2xx response.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ApiError {
        pub error: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub violations: Vec<Violation>,
    }

    /// One rejected field of an expense payload.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Violation {
        pub field: String,
        pub reason: String,
    }
}
