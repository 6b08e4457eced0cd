//! Blocking Book Store operations: build, execute, parse.
//!
//! Operations that return a raw `HttpResponse` leave status interpretation to
//! the caller; the others check the status they expect and extract one field.

use rand::rngs::StdRng;
use tracing::info;

use crate::client::BookStoreClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::random::{seeded_rng, RandomSource};
use crate::transport::{Transport, UreqTransport};
use crate::types::Isbn;

const USERNAME_LEN: usize = 10;

pub struct BookStoreApi<T, R> {
    client: BookStoreClient,
    transport: T,
    rng: R,
}

impl BookStoreApi<UreqTransport, StdRng> {
    /// Live client over ureq, seeded from `config.seed` or fresh entropy.
    pub fn connect(config: ClientConfig) -> Self {
        let (rng, seed) = seeded_rng(config.seed);
        info!(base_url = %config.base_url, seed, "book store client ready");
        Self::new(config, UreqTransport::new(), rng)
    }
}

impl<T: Transport, R: RandomSource> BookStoreApi<T, R> {
    pub fn new(config: ClientConfig, transport: T, rng: R) -> Self {
        Self {
            client: BookStoreClient::new(config),
            transport,
            rng,
        }
    }

    pub fn client(&self) -> &BookStoreClient {
        &self.client
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.transport.execute(request)
    }

    /// Generate a bearer token for the credentials. Expects 200 and a token.
    pub fn authorize_user(&self, user_name: &str, password: &str) -> Result<String, ApiError> {
        info!("authorizing user");
        let response = self.send(self.client.build_generate_token(user_name, password)?)?;
        info!(status = response.status, "authorize user");
        self.client.parse_token(&response)
    }

    /// Create the account and return its id. Expects 201.
    pub fn get_user_id(&self, user_name: &str, password: &str) -> Result<String, ApiError> {
        info!("getting user id");
        let response = self.send(self.client.build_create_user(user_name, password)?)?;
        info!(status = response.status, "get user id");
        self.client.parse_user_id(&response)
    }

    pub fn create_user(&self, user_name: &str, password: &str) -> Result<HttpResponse, ApiError> {
        info!("creating user");
        let response = self.send(self.client.build_create_user(user_name, password)?)?;
        info!(status = response.status, "create user");
        Ok(response)
    }

    pub fn get_user(&self, user_id: &str, token: &str) -> Result<HttpResponse, ApiError> {
        info!("getting user");
        let response = self.send(self.client.build_get_user(user_id, token))?;
        info!(status = response.status, "get user");
        Ok(response)
    }

    /// Raw body of the book lookup; not status-checked.
    pub fn get_book(&self, isbn: &str) -> Result<String, ApiError> {
        info!("getting book");
        let response = self.send(self.client.build_get_book(isbn))?;
        info!(status = response.status, "get book");
        Ok(response.body)
    }

    /// Fetch the catalog and pick one isbn uniformly at random.
    pub fn get_random_book_isbn(&mut self) -> Result<String, ApiError> {
        let response = self.send(self.client.build_get_books())?;
        info!(status = response.status, "get all books");
        let mut isbns = self.client.parse_book_isbns(&response)?;
        if isbns.is_empty() {
            return Err(ApiError::EmptyCatalog);
        }
        let picked = self.rng.index(isbns.len());
        Ok(isbns.swap_remove(picked))
    }

    /// Random isbn that differs from `current`, redrawing at most once.
    ///
    /// A catalog with very few books can still hand back `current`.
    pub fn random_distinct_isbn(&mut self, current: &str) -> Result<String, ApiError> {
        let isbn = self.get_random_book_isbn()?;
        if isbn != current {
            return Ok(isbn);
        }
        self.get_random_book_isbn()
    }

    pub fn is_user_authorized(&self, user_name: &str, password: &str) -> Result<bool, ApiError> {
        info!("checking if user is authorized");
        let response = self.send(self.client.build_is_authorized(user_name, password)?)?;
        info!(status = response.status, "is user authorized");
        self.client.parse_is_authorized(&response)
    }

    pub fn add_book_to_favourite_list(
        &self,
        user_id: &str,
        isbns: &[Isbn],
        token: &str,
    ) -> Result<HttpResponse, ApiError> {
        info!(count = isbns.len(), "adding books to favourite list");
        let response = self.send(self.client.build_add_books(user_id, isbns, token)?)?;
        info!(status = response.status, "add books to favourite list");
        Ok(response)
    }

    pub fn remove_a_book_from_favourite_list(
        &self,
        user_id: &str,
        isbn: &str,
        token: &str,
    ) -> Result<HttpResponse, ApiError> {
        info!("removing book from favourite list");
        let response = self.send(self.client.build_remove_book(user_id, isbn, token)?)?;
        info!(status = response.status, "remove book from favourite list");
        Ok(response)
    }

    pub fn replace_book(
        &self,
        user_id: &str,
        current_isbn: &str,
        new_isbn: &str,
        token: &str,
    ) -> Result<HttpResponse, ApiError> {
        info!("replacing book in user's list");
        let response = self.send(self.client.build_replace_book(user_id, current_isbn, new_isbn, token)?)?;
        info!(status = response.status, "replace book");
        Ok(response)
    }

    pub fn random_username(&mut self) -> String {
        self.rng.alphanumeric(USERNAME_LEN)
    }
}
