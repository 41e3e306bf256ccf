//! Expense API endpoints

use api_types::expense::{DateRange, ExpenseDeleted, ExpenseNew, ExpenseView, KeywordSearch};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use engine::{EngineError, Expense, ExpenseDraft};
use rust_decimal::Decimal;

use crate::{ServerError, server::ServerState};

type ExpenseList = Result<Json<Vec<ExpenseView>>, ServerError>;

fn map_expense(expense: Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        description: expense.description,
        amount: expense.amount.to_decimal(),
        category: expense.category,
        date: expense.date,
        notes: expense.notes,
    }
}

fn map_list(expenses: Vec<Expense>) -> Json<Vec<ExpenseView>> {
    Json(expenses.into_iter().map(map_expense).collect())
}

fn draft(payload: ExpenseNew) -> ExpenseDraft {
    ExpenseDraft {
        description: payload.description,
        amount: payload.amount,
        category: payload.category,
        date: payload.date,
        notes: payload.notes,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let Json(payload) = payload?;
    let fields = draft(payload).validate()?;

    let expense = state.engine.create_expense(fields).await?;
    tracing::debug!("created expense {}", expense.id);
    Ok((StatusCode::CREATED, Json(map_expense(expense))))
}

pub async fn list(State(state): State<ServerState>) -> ExpenseList {
    Ok(map_list(state.engine.list_expenses().await?))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ExpenseView>, ServerError> {
    let Path(id) = id?;
    state
        .engine
        .expense(id)
        .await?
        .map(|expense| Json(map_expense(expense)))
        .ok_or_else(|| ServerError::Engine(EngineError::KeyNotFound(format!("expense {id}"))))
}

pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<Json<ExpenseView>, ServerError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let fields = draft(payload).validate()?;

    let expense = state.engine.update_expense(id, fields).await?;
    tracing::debug!("updated expense {id}");
    Ok(Json(map_expense(expense)))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ExpenseDeleted>, ServerError> {
    let Path(id) = id?;
    state.engine.delete_expense(id).await?;
    tracing::debug!("deleted expense {id}");
    Ok(Json(ExpenseDeleted {
        message: "Expense deleted successfully".to_string(),
    }))
}

pub async fn by_category(
    State(state): State<ServerState>,
    category: Result<Path<String>, PathRejection>,
) -> ExpenseList {
    let Path(category) = category?;
    Ok(map_list(state.engine.expenses_by_category(&category).await?))
}

pub async fn by_date_range(
    State(state): State<ServerState>,
    range: Result<Query<DateRange>, QueryRejection>,
) -> ExpenseList {
    let Query(range) = range?;
    Ok(map_list(
        state
            .engine
            .expenses_by_date_range(range.start_date, range.end_date)
            .await?,
    ))
}

pub async fn by_category_and_date_range(
    State(state): State<ServerState>,
    category: Result<Path<String>, PathRejection>,
    range: Result<Query<DateRange>, QueryRejection>,
) -> ExpenseList {
    let Path(category) = category?;
    let Query(range) = range?;
    Ok(map_list(
        state
            .engine
            .expenses_by_category_and_date_range(&category, range.start_date, range.end_date)
            .await?,
    ))
}

pub async fn above_amount(
    State(state): State<ServerState>,
    amount: Result<Path<Decimal>, PathRejection>,
) -> ExpenseList {
    let Path(amount) = amount?;
    Ok(map_list(state.engine.expenses_above_amount(amount).await?))
}

pub async fn search(
    State(state): State<ServerState>,
    search: Result<Query<KeywordSearch>, QueryRejection>,
) -> ExpenseList {
    let Query(search) = search?;
    Ok(map_list(state.engine.search_expenses(&search.keyword).await?))
}
