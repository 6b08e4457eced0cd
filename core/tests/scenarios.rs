//! End-to-end Book Store workflows.
//!
//! # Design
//! Every scenario builds its own `BookStoreApi` and its own random user, so
//! scenarios are independent and may run in parallel. By default each one
//! starts the mock server on a random port; exporting `BOOKSTORE_BASE_URL`
//! (for example `https://demoqa.com/`) runs the same assertions against that
//! service instead. `BOOKSTORE_SEED` replays a run's usernames and picks;
//! against a live service, replay one scenario at a time since every
//! scenario would otherwise draw the same username.

use bookstore_core::{BookStoreApi, Book, ClientConfig, Isbn, UreqTransport};
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

const PASSWORD: &str = "Qwerty3!";
const KNOWN_ISBN: &str = "9781491904244";
const MISSING_ISBN: &str = "9781491904255";

const PASSWORD_RULES: &str = "Passwords must have at least one non alphanumeric character, one digit ('0'-'9'), one uppercase ('A'-'Z'), one lowercase ('a'-'z'), one special character and Password must be eight characters or longer.";

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_test_writer()
        .try_init();
}

/// Start the mock server on a random port and return its base URL.
fn spawn_mock_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}/")
}

fn api() -> BookStoreApi<UreqTransport, StdRng> {
    init_logging();
    let mut config = ClientConfig::from_env().expect("valid BOOKSTORE_* environment");
    if ClientConfig::base_url_from_env().is_none() {
        config.base_url = spawn_mock_server();
    }
    BookStoreApi::connect(config)
}

/// Create a fresh user and return `(user_id, token)`.
fn signed_in(api: &mut BookStoreApi<UreqTransport, StdRng>) -> (String, String) {
    let user_name = api.random_username();
    let user_id = api.get_user_id(&user_name, PASSWORD).expect("create user");
    let token = api.authorize_user(&user_name, PASSWORD).expect("authorize user");
    (user_id, token)
}

/// Look a book up and decode it.
fn book(api: &BookStoreApi<UreqTransport, StdRng>, isbn: &str) -> Book {
    let body = api.get_book(isbn).expect("get book");
    serde_json::from_str(&body).expect("book body")
}

// --- account ---

#[test]
fn create_new_user() {
    let mut api = api();
    let user_name = api.random_username();
    assert_eq!(user_name.len(), 10);

    let response = api.create_user(&user_name, PASSWORD).unwrap();
    assert_eq!(response.status, 201, "User is not created!");

    if !api.is_user_authorized(&user_name, PASSWORD).unwrap() {
        let token = api.authorize_user(&user_name, PASSWORD).unwrap();
        assert!(!token.is_empty());
    }
    assert!(api.is_user_authorized(&user_name, PASSWORD).unwrap(), "User not authorized!");
}

#[test]
fn create_new_user_with_invalid_password() {
    let mut api = api();
    let user_name = api.random_username();

    let response = api.create_user(&user_name, "wrongPas").unwrap();

    assert_eq!(response.status, 400);
    let err = api.client().parse_error(&response, 400).unwrap();
    assert_eq!(err.message, PASSWORD_RULES);
}

#[test]
fn create_already_existing_user() {
    let mut api = api();
    let user_name = api.random_username();

    api.create_user(&user_name, PASSWORD).unwrap();
    let response = api.create_user(&user_name, PASSWORD).unwrap();

    assert_eq!(response.status, 406, "Unexpected response code!");
    let err = api.client().parse_error(&response, 406).unwrap();
    assert_eq!(err.message, "User exists!", "Unexpected error message!");
}

// --- catalog ---

#[test]
fn book_with_isbn_has_expected_pages() {
    let api = api();
    assert_eq!(book(&api, KNOWN_ISBN).pages, 278);
}

// --- favourites ---

#[test]
fn add_book_to_favourite_list() {
    let mut api = api();
    let (user_id, token) = signed_in(&mut api);

    let isbn = api.get_random_book_isbn().unwrap();
    let to_add = book(&api, &isbn);
    let isbns = vec![Isbn::new(&to_add.isbn)];

    let response = api.add_book_to_favourite_list(&user_id, &isbns, &token).unwrap();

    assert_eq!(response.status, 201);
    let added = api.client().parse_added_books(&response).unwrap();
    assert_eq!(added[0].isbn, isbns[0].isbn);

    let user = api.client().parse_user(&api.get_user(&user_id, &token).unwrap()).unwrap();
    assert_eq!(user.isbns(), vec![to_add.isbn.as_str()]);
}

#[test]
fn add_non_existent_book_to_favourite_list() {
    let mut api = api();
    let (user_id, token) = signed_in(&mut api);

    let isbn = api.get_random_book_isbn().unwrap();
    let mut to_add = book(&api, &isbn);
    to_add.isbn = MISSING_ISBN.to_string();
    let isbns = vec![Isbn::new(&to_add.isbn)];

    let response = api.add_book_to_favourite_list(&user_id, &isbns, &token).unwrap();

    assert_eq!(response.status, 400);
    let err = api.client().parse_error(&response, 400).unwrap();
    assert_eq!(err.message, "ISBN supplied is not available in Books Collection!");
}

#[test]
fn replace_book_in_favourite_list() {
    let mut api = api();
    let (user_id, token) = signed_in(&mut api);

    let isbn = api.get_random_book_isbn().unwrap();
    let current = book(&api, &isbn);
    api.add_book_to_favourite_list(&user_id, &[Isbn::new(&current.isbn)], &token)
        .unwrap();
    api.get_user(&user_id, &token).unwrap();

    // Single redraw; a tiny catalog can still collide.
    let isbn = api.random_distinct_isbn(&current.isbn).unwrap();
    let replacement = book(&api, &isbn);

    let response = api
        .replace_book(&user_id, &current.isbn, &replacement.isbn, &token)
        .unwrap();
    let user = api.get_user(&user_id, &token).unwrap();

    assert_eq!(response.status, 200);
    let user = api.client().parse_user(&user).unwrap();
    assert_eq!(user.books[0].isbn, replacement.isbn);
    assert_eq!(user.isbns(), vec![replacement.isbn.as_str()]);
}

#[test]
fn remove_book_from_favourite_list() {
    let mut api = api();
    let (user_id, token) = signed_in(&mut api);

    let isbn = api.get_random_book_isbn().unwrap();
    let to_add = book(&api, &isbn);
    api.add_book_to_favourite_list(&user_id, &[Isbn::new(&to_add.isbn)], &token)
        .unwrap();

    let response = api
        .remove_a_book_from_favourite_list(&user_id, &to_add.isbn, &token)
        .unwrap();

    assert_eq!(response.status, 204);
    assert!(response.body.is_empty());
}

#[test]
fn remove_non_existent_book_from_favourite_list() {
    let mut api = api();
    let (user_id, token) = signed_in(&mut api);

    let isbn = api.get_random_book_isbn().unwrap();
    let response = api
        .remove_a_book_from_favourite_list(&user_id, &isbn, &token)
        .unwrap();

    assert_eq!(response.status, 400);
    let err = api.client().parse_error(&response, 400).unwrap();
    assert_eq!(err.message, "ISBN supplied is not available in User's Collection!");
}
