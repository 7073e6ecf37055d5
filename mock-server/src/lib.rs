use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

/// Both fields are optional on the wire so a missing one can be answered
/// with 400 instead of axum's 422.
#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// Todos keyed by id; ids are never reused.
#[derive(Default)]
pub struct Store {
    todos: BTreeMap<u64, Todo>,
    next_id: u64,
}

impl Store {
    fn insert(&mut self, title: String, description: String) -> Todo {
        self.next_id += 1;
        let todo = Todo {
            id: self.next_id,
            title,
            description,
            completed: false,
        };
        self.todos.insert(todo.id, todo.clone());
        todo
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/search", get(search_todos))
        .route("/api/todos/{id}", put(update_todo).delete(delete_todo))
        .route("/api/todos/{id}/toggle", patch(toggle_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.todos.values().cloned().collect())
}

/// Case-insensitive substring match on title or description.
fn matches_query(todo: &Todo, needle: &str) -> bool {
    todo.title.to_lowercase().contains(needle) || todo.description.to_lowercase().contains(needle)
}

async fn search_todos(State(db): State<Db>, Query(params): Query<SearchParams>) -> Json<Vec<Todo>> {
    let needle = params.query.unwrap_or_default().to_lowercase();
    let store = db.read().await;
    Json(
        store
            .todos
            .values()
            .filter(|todo| matches_query(todo, &needle))
            .cloned()
            .collect(),
    )
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let (Some(title), Some(description)) = (input.title, input.description) else {
        return Err(StatusCode::BAD_REQUEST);
    };
    let todo = db.write().await.insert(title, description);
    info!(id = todo.id, "created todo");
    Ok(Json(todo))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(description) = input.description {
        todo.description = description;
    }
    info!(id, "updated todo");
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store.todos.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    info!(id, "deleted todo");
    Ok(StatusCode::NO_CONTENT)
}

async fn toggle_todo(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Todo>, StatusCode> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    todo.completed = !todo.completed;
    info!(id, completed = todo.completed, "toggled todo");
    Ok(Json(todo.clone()))
}
