use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex},
};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing::get};
use clap::Parser;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    port: u16,
}

type Record = Map<String, Value>;

#[derive(Default)]
struct Store {
    collections: HashMap<String, BTreeMap<i64, Record>>,
    next_id: i64,
}

#[derive(Clone, Default)]
struct AppState {
    store: Arc<Mutex<Store>>,
}

impl AppState {
    fn with_store<R>(&self, f: impl FnOnce(&mut Store) -> R) -> Result<R, StatusCode> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        Ok(f(&mut store))
    }
}

#[derive(Deserialize)]
struct IndexParams {
    cursor: Option<i64>,
}

async fn health() -> impl IntoResponse {
    "PONG"
}

async fn index(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Query(params): Query<IndexParams>,
) -> Result<Json<Vec<Record>>, StatusCode> {
    let after = params.cursor.unwrap_or(i64::MIN);
    state.with_store(|store| {
        let items: Vec<Record> = store
            .collections
            .get(&collection)
            .map(|items| {
                items
                    .range(after.saturating_add(1)..)
                    .map(|(_, record)| record.clone())
                    .collect()
            })
            .unwrap_or_default();
        Json(items)
    })
}

async fn create(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Json(mut record): Json<Record>,
) -> Result<impl IntoResponse, StatusCode> {
    let id = state.with_store(|store| {
        store.next_id += 1;
        let id = store.next_id;
        record.insert("id".to_string(), json!(id));
        store
            .collections
            .entry(collection.clone())
            .or_default()
            .insert(id, record);
        id
    })?;

    info!("Created {}/{}", collection, id);
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn read(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, i64)>,
) -> Result<Json<Record>, StatusCode> {
    state
        .with_store(|store| {
            store
                .collections
                .get(&collection)
                .and_then(|items| items.get(&id))
                .cloned()
        })?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, i64)>,
    Json(mut record): Json<Record>,
) -> Result<Json<Record>, StatusCode> {
    record.insert("id".to_string(), json!(id));
    state
        .with_store(|store| {
            let existing = store
                .collections
                .get_mut(&collection)
                .and_then(|items| items.get_mut(&id))?;
            *existing = record;
            Some(existing.clone())
        })?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn destroy(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, i64)>,
) -> StatusCode {
    let removed = state.with_store(|store| {
        store
            .collections
            .get_mut(&collection)
            .and_then(|items| items.remove(&id))
            .is_some()
    });

    match removed {
        Ok(true) => {
            info!("Destroyed {}/{}", collection, id);
            StatusCode::NO_CONTENT
        }
        Ok(false) => StatusCode::NOT_FOUND,
        Err(status) => status,
    }
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/{collection}", get(index).post(create))
        .route(
            "/{collection}/{id}",
            get(read).put(update).delete(destroy),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Args = Args::parse();
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port))
        .await
        .unwrap();

    info!("Dummy backend listening on port {}", args.port);

    axum::serve(listener, router(AppState::default()))
        .await
        .unwrap();
}
