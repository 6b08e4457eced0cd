//! Domain DTOs for the Book Store API.
//!
//! # Design
//! Field names follow the service's JSON exactly, which is not consistent:
//! account creation answers with `userID` while the user resource uses
//! `userId`, and books mix `subTitle` with `publish_date`. The mock-server
//! crate defines its own copies; the scenario suite catches drift.

use serde::{Deserialize, Serialize};

/// Request payload for create-user, generate-token and authorized-check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_name: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user_name: &str, password: &str) -> Self {
        Self {
            user_name: user_name.to_string(),
            password: password.to_string(),
        }
    }
}

/// Body of a successful account creation (201).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedUser {
    #[serde(rename = "userID")]
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub books: Vec<Book>,
}

/// Body of the generate-token endpoint. Bad credentials still answer 200,
/// with `status: "Failed"` and a null token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResult {
    pub token: Option<String>,
    pub expires: Option<String>,
    pub status: String,
    pub result: String,
}

/// A user account together with its favourites list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub books: Vec<Book>,
}

impl User {
    /// ISBNs of the favourites list, in service order.
    pub fn isbns(&self) -> Vec<&str> {
        self.books.iter().map(|book| book.isbn.as_str()).collect()
    }
}

/// Catalog entry. Read-only reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    #[serde(rename = "subTitle", default)]
    pub sub_title: String,
    pub author: String,
    #[serde(default)]
    pub publish_date: String,
    pub publisher: String,
    pub pages: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub website: String,
}

/// Body of the get-all-books endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookCatalog {
    pub books: Vec<Book>,
}

/// A single book reference submitted to the favourites endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Isbn {
    pub isbn: String,
}

impl Isbn {
    pub fn new(isbn: &str) -> Self {
        Self { isbn: isbn.to_string() }
    }
}

/// Body of a successful add-to-favourites (201).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddedBooks {
    pub books: Vec<Isbn>,
}

/// Request payload for add-to-favourites.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBooks<'a> {
    pub user_id: &'a str,
    pub collection_of_isbns: &'a [Isbn],
}

/// Request payload for replace and remove: the user plus one isbn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIsbn<'a> {
    pub user_id: &'a str,
    pub isbn: &'a str,
}

/// Error body the service returns with every 4xx.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
