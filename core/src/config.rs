//! Client configuration: base URL, endpoint paths and the optional random seed.

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://demoqa.com/";

const BASE_URL_ENV: &str = "BOOKSTORE_BASE_URL";
const SEED_ENV: &str = "BOOKSTORE_SEED";

/// Relative paths of every endpoint the client talks to.
///
/// `get_user` and `replace_book` are templates carrying `{UUID}` and `{ISBN}`
/// placeholders respectively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub create_user: String,
    pub generate_token: String,
    pub is_authorized: String,
    pub get_user: String,
    pub get_book: String,
    pub get_books: String,
    pub add_books: String,
    pub replace_book: String,
    pub remove_book: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            create_user: "Account/v1/User".to_string(),
            generate_token: "Account/v1/GenerateToken".to_string(),
            is_authorized: "Account/v1/Authorized".to_string(),
            get_user: "Account/v1/User/{UUID}".to_string(),
            get_book: "/BookStore/v1/Book".to_string(),
            get_books: "/BookStore/v1/Books".to_string(),
            add_books: "/BookStore/v1/Books".to_string(),
            replace_book: "/BookStore/v1/Books/{ISBN}".to_string(),
            remove_book: "/BookStore/v1/Book".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub endpoints: Endpoints,
    /// Seed for usernames and catalog picks. `None` draws a fresh one per run.
    pub seed: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            endpoints: Endpoints::default(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load from `.env` and the process environment.
    ///
    /// `BOOKSTORE_BASE_URL` overrides the base URL and `BOOKSTORE_SEED` fixes
    /// the random seed. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Missing `.env` is fine.
        let _ = dotenvy::dotenv();

        let mut config = match Self::base_url_from_env() {
            Some(url) => Self::new(&url),
            None => Self::default(),
        };
        if let Ok(raw) = std::env::var(SEED_ENV) {
            let seed = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                name: SEED_ENV,
                value: raw.clone(),
            })?;
            config.seed = Some(seed);
        }
        Ok(config)
    }

    /// `BOOKSTORE_BASE_URL`, trimmed. Unset and blank both read as `None`.
    pub fn base_url_from_env() -> Option<String> {
        non_blank(std::env::var(BASE_URL_ENV).ok())
    }

    /// Join the base URL and a relative path with exactly one `/`.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
