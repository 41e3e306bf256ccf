//! Expense records and their storage mapping.
//!
//! The `expenses` table stores the amount as integer cents (`amount_minor`),
//! which keeps every comparison and `SUM` exact.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{Money, validation::ExpenseFields};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub description: String,
    pub amount_minor: i64,
    pub category: String,
    pub date: Date,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A stored expense.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl From<Model> for Expense {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            amount: Money::new(model.amount_minor),
            category: model.category,
            date: model.date,
            notes: model.notes,
        }
    }
}

impl ActiveModel {
    /// Active model for a fresh row; the id is left to the database.
    pub(crate) fn new_from(fields: ExpenseFields) -> Self {
        let mut active = Self {
            id: ActiveValue::NotSet,
            ..Default::default()
        };
        active.set_fields(fields);
        active
    }

    /// Overwrite every mutable column, leaving `id` untouched.
    pub(crate) fn set_fields(&mut self, fields: ExpenseFields) {
        self.description = ActiveValue::Set(fields.description);
        self.amount_minor = ActiveValue::Set(fields.amount.cents());
        self.category = ActiveValue::Set(fields.category);
        self.date = ActiveValue::Set(fields.date);
        self.notes = ActiveValue::Set(fields.notes);
    }
}
