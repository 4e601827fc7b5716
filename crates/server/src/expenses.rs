//! Expenses API endpoints

use api_types::expense::{Expense, ExpenseNew};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn map_expense(expense: engine::Expense) -> Expense {
    Expense {
        id: expense.id,
        title: expense.title,
        amount: expense.amount,
        note: expense.note,
        tags: expense.tags,
    }
}

fn map_fields(payload: ExpenseNew) -> engine::ExpenseFields {
    engine::ExpenseFields {
        title: payload.title,
        amount: payload.amount,
        note: payload.note,
        tags: payload.tags,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<(StatusCode, Json<Expense>), ServerError> {
    let Json(payload) = payload?;
    let expense = state.engine.create_expense(map_fields(payload)).await?;
    Ok((StatusCode::CREATED, Json(map_expense(expense))))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Expense>, ServerError> {
    let Path(id) = id?;
    let expense = state.engine.expense(&id).await?;
    Ok(Json(map_expense(expense)))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Expense>>, ServerError> {
    let expenses = state
        .engine
        .expenses()
        .await?
        .into_iter()
        .map(map_expense)
        .collect();
    Ok(Json(expenses))
}

pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<Json<Expense>, ServerError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let expense = state.engine.update_expense(&id, map_fields(payload)).await?;
    Ok(Json(map_expense(expense)))
}
