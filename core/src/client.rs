//! Stateless HTTP request builder and response parser for the Book Store API.
//!
//! # Design
//! `BookStoreClient` holds only a `ClientConfig` and carries no mutable state
//! between calls. Each endpoint has a `build_*` method that produces an
//! `HttpRequest`; endpoints whose result the suite extracts data from also
//! have a `parse_*` method that consumes an `HttpResponse`. Endpoints the
//! scenarios inspect raw (remove, add on the error path) have no parser.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    AddBooks, AddedBooks, Book, BookCatalog, CreatedUser, Credentials, ErrorBody, Isbn, TokenResult, User,
    UserIsbn,
};

/// Synchronous, stateless client for the Book Store API.
#[derive(Debug, Clone)]
pub struct BookStoreClient {
    config: ClientConfig,
}

impl BookStoreClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_create_user(&self, user_name: &str, password: &str) -> Result<HttpRequest, ApiError> {
        let url = self.config.url(&self.config.endpoints.create_user);
        json_request(HttpMethod::Post, url, &Credentials::new(user_name, password))
    }

    pub fn build_generate_token(&self, user_name: &str, password: &str) -> Result<HttpRequest, ApiError> {
        let url = self.config.url(&self.config.endpoints.generate_token);
        json_request(HttpMethod::Post, url, &Credentials::new(user_name, password))
    }

    pub fn build_is_authorized(&self, user_name: &str, password: &str) -> Result<HttpRequest, ApiError> {
        let url = self.config.url(&self.config.endpoints.is_authorized);
        json_request(HttpMethod::Post, url, &Credentials::new(user_name, password))
    }

    pub fn build_get_user(&self, user_id: &str, token: &str) -> HttpRequest {
        let path = self.config.endpoints.get_user.replace("{UUID}", user_id);
        let mut req = empty_request(HttpMethod::Get, self.config.url(&path));
        with_bearer(&mut req, token);
        req
    }

    pub fn build_get_book(&self, isbn: &str) -> HttpRequest {
        let mut req = empty_request(HttpMethod::Get, self.config.url(&self.config.endpoints.get_book));
        req.query.push(("ISBN".to_string(), isbn.to_string()));
        req
    }

    pub fn build_get_books(&self) -> HttpRequest {
        empty_request(HttpMethod::Get, self.config.url(&self.config.endpoints.get_books))
    }

    pub fn build_add_books(&self, user_id: &str, isbns: &[Isbn], token: &str) -> Result<HttpRequest, ApiError> {
        let url = self.config.url(&self.config.endpoints.add_books);
        let payload = AddBooks {
            user_id,
            collection_of_isbns: isbns,
        };
        let mut req = json_request(HttpMethod::Post, url, &payload)?;
        with_bearer(&mut req, token);
        Ok(req)
    }

    pub fn build_replace_book(
        &self,
        user_id: &str,
        current_isbn: &str,
        new_isbn: &str,
        token: &str,
    ) -> Result<HttpRequest, ApiError> {
        let path = self.config.endpoints.replace_book.replace("{ISBN}", current_isbn);
        let payload = UserIsbn {
            user_id,
            isbn: new_isbn,
        };
        let mut req = json_request(HttpMethod::Put, self.config.url(&path), &payload)?;
        with_bearer(&mut req, token);
        Ok(req)
    }

    pub fn build_remove_book(&self, user_id: &str, isbn: &str, token: &str) -> Result<HttpRequest, ApiError> {
        let url = self.config.url(&self.config.endpoints.remove_book);
        let mut req = json_request(HttpMethod::Delete, url, &UserIsbn { user_id, isbn })?;
        with_bearer(&mut req, token);
        Ok(req)
    }

    /// Extract `userID` from a 201 account creation.
    pub fn parse_user_id(&self, response: &HttpResponse) -> Result<String, ApiError> {
        let created: CreatedUser = parse_json(response, 201)?;
        Ok(created.user_id)
    }

    /// Extract the bearer token from a 200 generate-token response.
    pub fn parse_token(&self, response: &HttpResponse) -> Result<String, ApiError> {
        let result: TokenResult = parse_json(response, 200)?;
        result
            .token
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::MissingField("token"))
    }

    /// The authorized-check endpoint answers with a bare `true` / `false`.
    pub fn parse_is_authorized(&self, response: &HttpResponse) -> Result<bool, ApiError> {
        check_status(response, 200)?;
        match response.body.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(ApiError::Deserialization(format!("expected boolean literal, got {other:?}"))),
        }
    }

    pub fn parse_user(&self, response: &HttpResponse) -> Result<User, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_book(&self, response: &HttpResponse) -> Result<Book, ApiError> {
        parse_json(response, 200)
    }

    /// Every isbn in the catalog, in service order.
    pub fn parse_book_isbns(&self, response: &HttpResponse) -> Result<Vec<String>, ApiError> {
        let catalog: BookCatalog = parse_json(response, 200)?;
        Ok(catalog.books.into_iter().map(|book| book.isbn).collect())
    }

    pub fn parse_added_books(&self, response: &HttpResponse) -> Result<Vec<Isbn>, ApiError> {
        let added: AddedBooks = parse_json(response, 201)?;
        Ok(added.books)
    }

    /// Decode the `{code, message}` body of an expected error status.
    pub fn parse_error(&self, response: &HttpResponse, expected: u16) -> Result<ErrorBody, ApiError> {
        parse_json(response, expected)
    }
}

fn empty_request(method: HttpMethod, url: String) -> HttpRequest {
    HttpRequest {
        method,
        url,
        query: Vec::new(),
        headers: vec![("accept".to_string(), "application/json".to_string())],
        body: None,
    }
}

fn json_request<T: Serialize>(method: HttpMethod, url: String, payload: &T) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
    let mut req = empty_request(method, url);
    req.headers
        .push(("content-type".to_string(), "application/json".to_string()));
    req.body = Some(body);
    Ok(req)
}

fn with_bearer(req: &mut HttpRequest, token: &str) {
    req.headers
        .push(("authorization".to_string(), format!("Bearer {token}")));
}

fn parse_json<T: DeserializeOwned>(response: &HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(response, expected)?;
    response.json()
}

fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(ApiError::UnexpectedStatus {
        expected,
        status: response.status,
        body: response.body.clone(),
    })
}
