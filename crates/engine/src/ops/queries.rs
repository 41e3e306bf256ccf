//! Filtered and aggregate reads.
//!
//! Each function issues one explicit, parameterised statement. Result order
//! follows the primary key but callers must not rely on it.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    QueryOrder, QuerySelect, Select,
    prelude::*,
    sea_query::Expr,
};

use crate::{Expense, Money, ResultEngine, expenses, money::floor_cents};

use super::Engine;

impl Engine {
    /// Expenses whose category equals `category` exactly.
    pub async fn expenses_by_category(&self, category: &str) -> ResultEngine<Vec<Expense>> {
        self.fetch(expenses::Entity::find().filter(expenses::Column::Category.eq(category)))
            .await
    }

    /// Expenses dated within `[start, end]`. Empty when `start > end`.
    pub async fn expenses_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ResultEngine<Vec<Expense>> {
        if start > end {
            return Ok(Vec::new());
        }
        self.fetch(expenses::Entity::find().filter(expenses::Column::Date.between(start, end)))
            .await
    }

    /// Expenses in `category` dated within `[start, end]`.
    pub async fn expenses_by_category_and_date_range(
        &self,
        category: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ResultEngine<Vec<Expense>> {
        if start > end {
            return Ok(Vec::new());
        }
        self.fetch(
            expenses::Entity::find()
                .filter(expenses::Column::Category.eq(category))
                .filter(expenses::Column::Date.between(start, end)),
        )
        .await
    }

    /// Expenses whose amount is strictly greater than `threshold`.
    pub async fn expenses_above_amount(&self, threshold: Decimal) -> ResultEngine<Vec<Expense>> {
        let query = match floor_cents(threshold) {
            Some(cents) => expenses::Entity::find().filter(expenses::Column::AmountMinor.gt(cents)),
            // out of the i64 range: nothing can exceed a huge positive threshold
            None if threshold.is_sign_positive() => return Ok(Vec::new()),
            None => expenses::Entity::find(),
        };
        self.fetch(query).await
    }

    /// Case-insensitive substring search on the description.
    ///
    /// Both sides are folded with Unicode lowercasing in the engine, since
    /// SQLite `lower()` only folds ASCII. The keyword is matched literally and
    /// an empty keyword matches every expense.
    pub async fn search_expenses(&self, keyword: &str) -> ResultEngine<Vec<Expense>> {
        let needle = keyword.to_lowercase();
        let all = self.fetch(expenses::Entity::find()).await?;
        Ok(all
            .into_iter()
            .filter(|expense| contains_folded(&expense.description, &needle))
            .collect())
    }

    /// Sum of amounts per category. Only categories with records appear.
    pub async fn total_by_category(&self) -> ResultEngine<HashMap<String, Money>> {
        let rows: Vec<(String, i64)> = expenses::Entity::find()
            .select_only()
            .column(expenses::Column::Category)
            .column_as(Expr::col(expenses::Column::AmountMinor).sum(), "total_minor")
            .group_by(expenses::Column::Category)
            .into_tuple()
            .all(&self.database)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(category, total)| (category, Money::new(total)))
            .collect())
    }

    /// Sum of amounts dated within `[start, end]`; zero when nothing matches.
    pub async fn total_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> ResultEngine<Money> {
        if start > end {
            return Ok(Money::ZERO);
        }
        let total: Option<Option<i64>> = expenses::Entity::find()
            .select_only()
            .column_as(Expr::col(expenses::Column::AmountMinor).sum(), "total_minor")
            .filter(expenses::Column::Date.between(start, end))
            .into_tuple()
            .one(&self.database)
            .await?;

        Ok(total.flatten().map(Money::new).unwrap_or(Money::ZERO))
    }

    async fn fetch(&self, query: Select<expenses::Entity>) -> ResultEngine<Vec<Expense>> {
        let models = query
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Expense::from).collect())
    }
}

/// `needle` must already be lowercased.
fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
