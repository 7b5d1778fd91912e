use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const AUTH_HEADER: &str = "gameon-jwt";

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub location: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    #[serde(rename = "sharedSecret")]
    pub shared_secret: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev")]
    pub rev: String,
    pub name: String,
    #[serde(rename = "favoriteColor")]
    pub favorite_color: String,
    pub location: Location,
    pub credentials: Credentials,
}

#[derive(Deserialize)]
pub struct CreateAccount {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "favoriteColor")]
    pub favorite_color: String,
}

#[derive(Default)]
pub struct AppState {
    accounts: RwLock<HashMap<String, Account>>,
    token: Option<String>,
}

pub type Db = Arc<AppState>;

/// Router without authorization checks.
pub fn app() -> Router {
    app_with_token(None)
}

/// Router that requires `gameon-jwt: <token>` on POST and DELETE when
/// `token` is set.
pub fn app_with_token(token: Option<String>) -> Router {
    let db: Db = Arc::new(AppState {
        accounts: RwLock::new(HashMap::new()),
        token,
    });
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/{id}", get(get_account).delete(delete_account))
        .with_state(db)
}

pub async fn run(listener: TcpListener, token: Option<String>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_token(token)).await
}

fn authorize(db: &AppState, headers: &HeaderMap) -> Result<(), StatusCode> {
    let Some(expected) = &db.token else {
        return Ok(());
    };
    match headers.get(AUTH_HEADER).and_then(|v| v.to_str().ok()) {
        Some(presented) if presented == expected => Ok(()),
        _ => {
            tracing::warn!("rejecting request without a valid {AUTH_HEADER} header");
            Err(StatusCode::FORBIDDEN)
        }
    }
}

async fn list_accounts(State(db): State<Db>) -> Json<Vec<Account>> {
    let accounts = db.accounts.read().await;
    let mut all: Vec<Account> = accounts.values().cloned().collect();
    all.sort_by(|a, b| a.id.cmp(&b.id));
    Json(all)
}

async fn create_account(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateAccount>,
) -> Result<(StatusCode, Json<Account>), StatusCode> {
    authorize(&db, &headers)?;
    let id = if input.id.is_empty() {
        Uuid::new_v4().simple().to_string()
    } else {
        input.id
    };

    let mut accounts = db.accounts.write().await;
    if accounts.contains_key(&id) {
        return Err(StatusCode::CONFLICT);
    }
    let account = Account {
        id: id.clone(),
        rev: format!("1-{}", Uuid::new_v4().simple()),
        name: input.name,
        favorite_color: input.favorite_color,
        location: Location::default(),
        credentials: Credentials {
            shared_secret: Uuid::new_v4().to_string(),
        },
    };
    accounts.insert(id, account.clone());
    tracing::info!(id = %account.id, "created account");
    Ok((StatusCode::CREATED, Json(account)))
}

async fn get_account(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Account>, StatusCode> {
    let accounts = db.accounts.read().await;
    accounts.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_account(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    authorize(&db, &headers)?;
    let mut accounts = db.accounts.write().await;
    accounts
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
