//! In-memory accounts, tokens and favourites lists.
//!
//! Every rule the handlers enforce lives here so it can be tested without a
//! router. Failures carry the status, code and message the real service uses.

use std::collections::HashMap;

use axum::http::StatusCode;
use uuid::Uuid;

use crate::catalog::{demo_catalog, Book};

pub const PASSWORD_RULES: &str = "Passwords must have at least one non alphanumeric character, one digit ('0'-'9'), one uppercase ('A'-'Z'), one lowercase ('a'-'z'), one special character and Password must be eight characters or longer.";

/// An error answer: HTTP status plus the `{code, message}` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: &'static str,
}

impl Failure {
    const fn new(status: StatusCode, code: &'static str, message: &'static str) -> Self {
        Self { status, code, message }
    }
}

pub const CREDENTIALS_REQUIRED: Failure =
    Failure::new(StatusCode::BAD_REQUEST, "1200", "UserName and Password required.");
pub const WEAK_PASSWORD: Failure = Failure::new(StatusCode::BAD_REQUEST, "1300", PASSWORD_RULES);
pub const USER_EXISTS: Failure = Failure::new(StatusCode::NOT_ACCEPTABLE, "1204", "User exists!");
pub const USER_NOT_FOUND: Failure = Failure::new(StatusCode::NOT_FOUND, "1207", "User not found!");
pub const NOT_AUTHORIZED: Failure = Failure::new(StatusCode::UNAUTHORIZED, "1200", "User not authorized!");
pub const UNKNOWN_USER_ID: Failure = Failure::new(StatusCode::UNAUTHORIZED, "1207", "User Id not correct!");
pub const NOT_IN_CATALOG: Failure = Failure::new(
    StatusCode::BAD_REQUEST,
    "1205",
    "ISBN supplied is not available in Books Collection!",
);
pub const NOT_IN_USER_LIST: Failure = Failure::new(
    StatusCode::BAD_REQUEST,
    "1206",
    "ISBN supplied is not available in User's Collection!",
);
pub const ALREADY_IN_USER_LIST: Failure = Failure::new(
    StatusCode::BAD_REQUEST,
    "1210",
    "ISBN already present in the User's Collection!",
);

#[derive(Clone, Debug)]
pub struct Account {
    pub user_id: String,
    pub username: String,
    password: String,
    pub authorized: bool,
    pub books: Vec<String>,
}

#[derive(Debug)]
pub struct Store {
    catalog: Vec<Book>,
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, String>,
}

impl Default for Store {
    fn default() -> Self {
        Self::with_catalog(demo_catalog())
    }
}

/// At least eight characters with a digit, an upper- and lowercase letter and
/// a non-alphanumeric character.
pub fn password_is_strong(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_uppercase())
        && password.chars().any(|c| c.is_lowercase())
        && password.chars().any(|c| !c.is_alphanumeric())
}

impl Store {
    pub fn with_catalog(catalog: Vec<Book>) -> Self {
        Self {
            catalog,
            accounts: HashMap::new(),
            tokens: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &[Book] {
        &self.catalog
    }

    pub fn book(&self, isbn: &str) -> Option<&Book> {
        self.catalog.iter().find(|book| book.isbn == isbn)
    }

    /// Resolve a favourites list to full catalog entries.
    pub fn books_of(&self, account: &Account) -> Vec<Book> {
        account
            .books
            .iter()
            .filter_map(|isbn| self.book(isbn).cloned())
            .collect()
    }

    fn by_name(&self, username: &str) -> Option<&Account> {
        self.accounts.values().find(|account| account.username == username)
    }

    fn by_credentials(&self, username: &str, password: &str) -> Option<&Account> {
        self.by_name(username).filter(|account| account.password == password)
    }

    pub fn create_user(&mut self, username: &str, password: &str) -> Result<Account, Failure> {
        if username.is_empty() || password.is_empty() {
            return Err(CREDENTIALS_REQUIRED);
        }
        if !password_is_strong(password) {
            return Err(WEAK_PASSWORD);
        }
        if self.by_name(username).is_some() {
            return Err(USER_EXISTS);
        }
        let account = Account {
            user_id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password: password.to_string(),
            authorized: false,
            books: Vec::new(),
        };
        self.accounts.insert(account.user_id.clone(), account.clone());
        Ok(account)
    }

    /// Issue a token for valid credentials. `Ok(None)` means the credentials
    /// were well-formed but wrong, which the service answers with 200.
    pub fn generate_token(&mut self, username: &str, password: &str) -> Result<Option<String>, Failure> {
        if username.is_empty() || password.is_empty() {
            return Err(CREDENTIALS_REQUIRED);
        }
        let Some(user_id) = self
            .by_credentials(username, password)
            .map(|account| account.user_id.clone())
        else {
            return Ok(None);
        };
        let token = Uuid::new_v4().simple().to_string();
        self.tokens.insert(token.clone(), user_id.clone());
        if let Some(account) = self.accounts.get_mut(&user_id) {
            account.authorized = true;
        }
        Ok(Some(token))
    }

    pub fn is_authorized(&self, username: &str, password: &str) -> Result<bool, Failure> {
        if username.is_empty() || password.is_empty() {
            return Err(CREDENTIALS_REQUIRED);
        }
        self.by_credentials(username, password)
            .map(|account| account.authorized)
            .ok_or(USER_NOT_FOUND)
    }

    /// Resolve a bearer token to the account it may act on.
    pub fn authenticate(&self, token: Option<&str>, user_id: &str) -> Result<&Account, Failure> {
        let owner = token
            .and_then(|token| self.tokens.get(token))
            .ok_or(NOT_AUTHORIZED)?;
        if owner != user_id {
            return Err(UNKNOWN_USER_ID);
        }
        self.accounts.get(user_id).ok_or(USER_NOT_FOUND)
    }

    fn authenticate_mut(&mut self, token: Option<&str>, user_id: &str) -> Result<&mut Account, Failure> {
        self.authenticate(token, user_id)?;
        self.accounts.get_mut(user_id).ok_or(USER_NOT_FOUND)
    }

    /// Append `isbns` to the list. Rejected whole if any isbn is unknown,
    /// already held, or repeated within the request.
    pub fn add_books(&mut self, token: Option<&str>, user_id: &str, isbns: &[String]) -> Result<(), Failure> {
        let held = &self.authenticate(token, user_id)?.books;
        if isbns.iter().any(|isbn| self.book(isbn).is_none()) {
            return Err(NOT_IN_CATALOG);
        }
        let repeated = isbns
            .iter()
            .enumerate()
            .any(|(i, isbn)| isbns[..i].contains(isbn));
        if repeated || isbns.iter().any(|isbn| held.contains(isbn)) {
            return Err(ALREADY_IN_USER_LIST);
        }
        self.authenticate_mut(token, user_id)?
            .books
            .extend(isbns.iter().cloned());
        Ok(())
    }

    /// Swap `current` for `replacement` in place, keeping list order.
    pub fn replace_book(
        &mut self,
        token: Option<&str>,
        user_id: &str,
        current: &str,
        replacement: &str,
    ) -> Result<Account, Failure> {
        self.authenticate(token, user_id)?;
        if self.book(replacement).is_none() {
            return Err(NOT_IN_CATALOG);
        }
        let account = self.authenticate_mut(token, user_id)?;
        let slot = account
            .books
            .iter()
            .position(|isbn| isbn == current)
            .ok_or(NOT_IN_USER_LIST)?;
        account.books[slot] = replacement.to_string();
        Ok(account.clone())
    }

    pub fn remove_book(&mut self, token: Option<&str>, user_id: &str, isbn: &str) -> Result<(), Failure> {
        let account = self.authenticate_mut(token, user_id)?;
        let slot = account
            .books
            .iter()
            .position(|held| held == isbn)
            .ok_or(NOT_IN_USER_LIST)?;
        account.books.remove(slot);
        Ok(())
    }
}
