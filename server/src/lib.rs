//! HTTP front end of the todo service.
//!
//! Routes map one-to-one onto `TodoStore` calls; all input checking lives in
//! `todo_core`. Every route answers with or without a trailing slash.

pub mod config;
pub mod error;
pub mod store;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use todo_core::{date, CreateTodo, Todo, TodoFilter, UpdateTodo, ValidationError};

pub use error::ApiError;
pub use store::{StoreError, TodoStore};

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: TodoStore,
}

#[derive(Debug, Deserialize)]
pub struct AgendaParams {
    pub date: Option<String>,
}

pub fn app(store: TodoStore) -> Router {
    let state = AppState { store };
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route(
            "/todos/{id}/",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/agenda", get(agenda))
        .route("/agenda/", get(agenda))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(listener: TcpListener, store: TodoStore) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}

#[tracing::instrument(skip(state))]
async fn list_todos(
    State(state): State<AppState>,
    Query(filter): Query<TodoFilter>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let query = filter.validate()?;
    let todos = state.store.list(&query).await?;
    Ok(Json(todos))
}

#[tracing::instrument(skip(state))]
async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, ApiError> {
    state
        .store
        .get(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

#[tracing::instrument(skip(state))]
async fn agenda(
    State(state): State<AppState>,
    Query(params): Query<AgendaParams>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let raw = params.date.ok_or(ValidationError::InvalidDueDate)?;
    let due = date::parse_due_date(&raw)?;
    let todos = state.store.agenda(due).await?;
    Ok(Json(todos))
}

#[tracing::instrument(skip(state))]
async fn create_todo(
    State(state): State<AppState>,
    Json(input): Json<CreateTodo>,
) -> Result<&'static str, ApiError> {
    let todo = input.validate()?;
    state.store.insert(&todo).await?;
    tracing::info!(id = todo.id, "todo created");
    Ok("Todo Successfully Added")
}

#[tracing::instrument(skip(state))]
async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTodo>,
) -> Result<String, ApiError> {
    let current = state.store.get(id).await?.ok_or(ApiError::NotFound(id))?;
    let (todo, field) = input.apply(&current)?;
    if !state.store.update(&todo).await? {
        return Err(ApiError::NotFound(id));
    }
    tracing::info!(id, %field, "todo updated");
    Ok(format!("{field} Updated"))
}

#[tracing::instrument(skip(state))]
async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<&'static str, ApiError> {
    if state.store.delete(id).await? {
        tracing::info!(id, "todo deleted");
        Ok("Todo Deleted")
    } else {
        Err(ApiError::NotFound(id))
    }
}
