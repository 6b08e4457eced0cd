//! In-process emulation of the demo Book Store service.
//!
//! Routes, status codes and `{code, message}` error bodies follow the real
//! service closely enough that the scenario suite in `bookstore-core` runs
//! unchanged against either.

pub mod catalog;
pub mod store;

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub use catalog::Book;
pub use store::{Failure, Store};

pub type Db = Arc<RwLock<Store>>;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsIn {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatedUser {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub username: String,
    pub books: Vec<Book>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenResult {
    pub token: Option<String>,
    pub expires: Option<String>,
    pub status: String,
    pub result: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOut {
    pub user_id: String,
    pub username: String,
    pub books: Vec<Book>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Books {
    pub books: Vec<Book>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Isbn {
    pub isbn: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddedBooks {
    pub books: Vec<Isbn>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBooksIn {
    pub user_id: String,
    pub collection_of_isbns: Vec<Isbn>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIsbnIn {
    pub user_id: String,
    pub isbn: String,
}

#[derive(Deserialize)]
pub struct BookQuery {
    #[serde(rename = "ISBN")]
    pub isbn: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code.to_string(),
            message: self.message.to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}

const TOKEN_LIFETIME: &str = "2099-12-31T23:59:59.000Z";

pub fn app() -> Router {
    app_with(Store::default())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/Account/v1/User", post(create_user))
        .route("/Account/v1/User/{uuid}", get(get_user))
        .route("/Account/v1/GenerateToken", post(generate_token))
        .route("/Account/v1/Authorized", post(is_authorized))
        .route("/BookStore/v1/Book", get(get_book).delete(remove_book))
        .route("/BookStore/v1/Books", get(list_books).post(add_books))
        .route("/BookStore/v1/Books/{isbn}", put(replace_book))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CredentialsIn>,
) -> Result<(StatusCode, Json<CreatedUser>), Failure> {
    let account = db.write().await.create_user(&input.user_name, &input.password)?;
    info!(user_id = %account.user_id, "account created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedUser {
            user_id: account.user_id,
            username: account.username,
            books: Vec::new(),
        }),
    ))
}

async fn generate_token(
    State(db): State<Db>,
    Json(input): Json<CredentialsIn>,
) -> Result<Json<TokenResult>, Failure> {
    let token = db.write().await.generate_token(&input.user_name, &input.password)?;
    let result = match token {
        Some(token) => TokenResult {
            token: Some(token),
            expires: Some(TOKEN_LIFETIME.to_string()),
            status: "Success".to_string(),
            result: "User authorized successfully.".to_string(),
        },
        None => TokenResult {
            token: None,
            expires: None,
            status: "Failed".to_string(),
            result: "User authorization failed.".to_string(),
        },
    };
    Ok(Json(result))
}

async fn is_authorized(State(db): State<Db>, Json(input): Json<CredentialsIn>) -> Result<Json<bool>, Failure> {
    let authorized = db.read().await.is_authorized(&input.user_name, &input.password)?;
    Ok(Json(authorized))
}

async fn get_user(
    State(db): State<Db>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<UserOut>, Failure> {
    let store = db.read().await;
    let account = store.authenticate(bearer(&headers), &user_id)?;
    Ok(Json(UserOut {
        user_id: account.user_id.clone(),
        username: account.username.clone(),
        books: store.books_of(account),
    }))
}

async fn list_books(State(db): State<Db>) -> Json<Books> {
    let store = db.read().await;
    Json(Books {
        books: store.catalog().to_vec(),
    })
}

async fn get_book(State(db): State<Db>, Query(query): Query<BookQuery>) -> Result<Json<Book>, Failure> {
    let store = db.read().await;
    store
        .book(&query.isbn)
        .cloned()
        .map(Json)
        .ok_or(crate::store::NOT_IN_CATALOG)
}

async fn add_books(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<AddBooksIn>,
) -> Result<(StatusCode, Json<AddedBooks>), Failure> {
    let isbns: Vec<String> = input.collection_of_isbns.iter().map(|i| i.isbn.clone()).collect();
    db.write().await.add_books(bearer(&headers), &input.user_id, &isbns)?;
    info!(user_id = %input.user_id, count = isbns.len(), "books added");
    Ok((
        StatusCode::CREATED,
        Json(AddedBooks {
            books: input.collection_of_isbns,
        }),
    ))
}

async fn replace_book(
    State(db): State<Db>,
    Path(current): Path<String>,
    headers: HeaderMap,
    Json(input): Json<UserIsbnIn>,
) -> Result<Json<UserOut>, Failure> {
    let mut store = db.write().await;
    let account = store.replace_book(bearer(&headers), &input.user_id, &current, &input.isbn)?;
    info!(user_id = %account.user_id, from = %current, to = %input.isbn, "book replaced");
    Ok(Json(UserOut {
        books: store.books_of(&account),
        user_id: account.user_id,
        username: account.username,
    }))
}

async fn remove_book(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<UserIsbnIn>,
) -> Result<StatusCode, Failure> {
    db.write().await.remove_book(bearer(&headers), &input.user_id, &input.isbn)?;
    Ok(StatusCode::NO_CONTENT)
}
