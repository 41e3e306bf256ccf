use sea_orm::{PaginatorTrait, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, Expense, ExpenseFields, ResultEngine, expenses};

use super::{Engine, with_tx};

impl Engine {
    /// Persist a new expense and return it with its assigned id.
    pub async fn create_expense(&self, fields: ExpenseFields) -> ResultEngine<Expense> {
        with_tx!(self, |db_tx| {
            let model = expenses::ActiveModel::new_from(fields)
                .insert(&db_tx)
                .await?;
            Ok(Expense::from(model))
        })
    }

    /// Look an expense up by id. Absence is not an error.
    pub async fn expense(&self, id: i64) -> ResultEngine<Option<Expense>> {
        let model = expenses::Entity::find_by_id(id).one(&self.database).await?;
        Ok(model.map(Expense::from))
    }

    /// Every stored expense.
    pub async fn list_expenses(&self) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find()
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Expense::from).collect())
    }

    /// Replace every mutable field of expense `id`.
    pub async fn update_expense(&self, id: i64, fields: ExpenseFields) -> ResultEngine<Expense> {
        with_tx!(self, |db_tx| {
            let model = expenses::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(format!("expense {id}")))?;

            let mut active: expenses::ActiveModel = model.into();
            active.set_fields(fields);
            let model = active.update(&db_tx).await?;
            Ok(Expense::from(model))
        })
    }

    /// Hard delete expense `id`.
    pub async fn delete_expense(&self, id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let result = expenses::Entity::delete_by_id(id).exec(&db_tx).await?;
            if result.rows_affected == 0 {
                Err(EngineError::KeyNotFound(format!("expense {id}")))
            } else {
                Ok(())
            }
        })
    }

    /// Number of stored expenses.
    pub async fn count_expenses(&self) -> ResultEngine<u64> {
        Ok(expenses::Entity::find().count(&self.database).await?)
    }
}
